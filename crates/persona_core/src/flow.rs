//! Per-flow request status.
//!
//! Each network flow (submit, history) tracks its own status instead of
//! sharing a single loading flag. A flow only accepts the result of the
//! request it is currently waiting on; anything else is stale and dropped.

use std::fmt;

/// Identifies one dispatched request. Unique for the lifetime of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of request ids.
#[derive(Debug, Default)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    pub fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowStatus {
    #[default]
    Idle,
    Pending(RequestId),
    Succeeded,
    Failed,
}

impl FlowStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, FlowStatus::Pending(_))
    }
}

/// Whether a resolved request was applied to the screen or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

impl Resolution {
    pub fn is_applied(&self) -> bool {
        matches!(self, Resolution::Applied)
    }
}

#[derive(Debug, Default)]
pub struct Flow {
    status: FlowStatus,
}

impl Flow {
    pub fn status(&self) -> FlowStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Mark `id` as the request this flow is waiting on.
    ///
    /// A request that was already pending is superseded; its result will be
    /// rejected by [`Flow::resolve`].
    pub fn dispatch(&mut self, id: RequestId) {
        if let FlowStatus::Pending(previous) = self.status {
            tracing::debug!(%previous, superseded_by = %id, "Superseding pending request");
        }
        self.status = FlowStatus::Pending(id);
    }

    /// Resolve the pending request. Returns [`Resolution::Stale`] and leaves
    /// the status untouched when `id` is not the request being waited on.
    pub fn resolve(&mut self, id: RequestId, succeeded: bool) -> Resolution {
        match self.status {
            FlowStatus::Pending(pending) if pending == id => {
                self.status = if succeeded {
                    FlowStatus::Succeeded
                } else {
                    FlowStatus::Failed
                };
                Resolution::Applied
            }
            _ => Resolution::Stale,
        }
    }

    /// Stop waiting on the pending request, if any, and return to idle.
    pub fn cancel(&mut self) -> Option<RequestId> {
        let cancelled = match self.status {
            FlowStatus::Pending(id) => Some(id),
            _ => None,
        };
        self.status = FlowStatus::Idle;
        cancelled
    }
}
