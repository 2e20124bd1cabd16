//! Background worker that performs network calls without blocking the UI.
//!
//! Requests go to a dispatcher thread over a channel. Each request runs on
//! its own short-lived thread so the submit and history flows can be in
//! flight at the same time. Responses carry the originating [`RequestId`];
//! the screen decides whether a response is still wanted.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use persona_core::{AnalysisApi, AnalysisError, AnalyzeTicket, HistoryTicket, RequestId};

/// Request sent to the background worker
#[derive(Debug)]
pub enum ApiRequest {
    Analyze(AnalyzeTicket),
    History(HistoryTicket),
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug)]
pub enum ApiResponse {
    Analyzed {
        id: RequestId,
        result: Result<String, AnalysisError>,
    },
    HistoryLoaded {
        id: RequestId,
        result: Result<Vec<String>, AnalysisError>,
    },
}

impl ApiResponse {
    pub fn id(&self) -> RequestId {
        match self {
            ApiResponse::Analyzed { id, .. } | ApiResponse::HistoryLoaded { id, .. } => *id,
        }
    }
}

pub struct ApiWorker {
    request_tx: Sender<ApiRequest>,
    response_rx: Receiver<ApiResponse>,
    thread: Option<JoinHandle<()>>,
}

impl ApiWorker {
    pub fn new(api: Arc<dyn AnalysisApi>) -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();

        let ctx = WorkerContext { api, response_tx };
        let thread = thread::spawn(move || {
            ctx.run(request_rx);
        });

        Self {
            request_tx,
            response_rx,
            thread: Some(thread),
        }
    }

    /// Send a request to the worker. Returns false if the worker is gone.
    pub fn send(&self, request: ApiRequest) -> bool {
        self.request_tx.send(request).is_ok()
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Option<ApiResponse> {
        self.response_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a response
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiResponse> {
        self.response_rx.recv_timeout(timeout).ok()
    }

    pub fn shutdown(&self) {
        let _ = self.request_tx.send(ApiRequest::Shutdown);
    }
}

impl Drop for ApiWorker {
    fn drop(&mut self) {
        self.shutdown();
        // Only the dispatcher is joined; in-flight requests finish on their own
        // and their responses are dropped with the channel.
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

struct WorkerContext {
    api: Arc<dyn AnalysisApi>,
    response_tx: Sender<ApiResponse>,
}

impl WorkerContext {
    fn run(&self, request_rx: Receiver<ApiRequest>) {
        while let Ok(request) = request_rx.recv() {
            let api = Arc::clone(&self.api);
            let response_tx = self.response_tx.clone();

            match request {
                ApiRequest::Shutdown => break,

                ApiRequest::Analyze(ticket) => {
                    tracing::debug!(request = %ticket.id, "Dispatching analyze request");
                    thread::spawn(move || {
                        let result = api.analyze(&ticket.text, &ticket.identity);
                        let _ = response_tx.send(ApiResponse::Analyzed {
                            id: ticket.id,
                            result,
                        });
                    });
                }

                ApiRequest::History(ticket) => {
                    tracing::debug!(request = %ticket.id, "Dispatching history request");
                    thread::spawn(move || {
                        let result = api.history(&ticket.identity);
                        let _ = response_tx.send(ApiResponse::HistoryLoaded {
                            id: ticket.id,
                            result,
                        });
                    });
                }
            }
        }
        tracing::debug!("API worker stopped");
    }
}
