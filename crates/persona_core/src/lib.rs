//! Core of the personality analysis client.
//!
//! This crate holds everything about the analysis screen that does not depend
//! on a terminal:
//! - The data model (history entries, analysis outcomes, pages, identity)
//! - The [`AnalysisScreen`] state store and its two network flows
//! - Per-flow request status with stale-result rejection
//! - The HTTP client for the analyze and history endpoints
//!
//! ```ignore
//! use persona_core::{AnalysisApi, AnalysisScreen, HttpApi, Identity, ScreenOptions};
//!
//! let api = HttpApi::default();
//! let identity = Identity::new("me@example.com");
//! let mut screen = AnalysisScreen::new(ScreenOptions::default());
//!
//! if let Some(ticket) = screen.mount(&identity) {
//!     screen.finish_history(ticket.id, api.history(&ticket.identity));
//! }
//!
//! screen.set_input("I love systems design");
//! if let Ok(ticket) = screen.begin_submit(&identity) {
//!     screen.finish_submit(ticket.id, api.analyze(&ticket.text, &ticket.identity));
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod api;
pub mod error;
pub mod flow;
pub mod model;
pub mod screen;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use api::{AnalysisApi, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpApi};
pub use error::{AnalysisError, Endpoint};
pub use flow::{FlowStatus, RequestId, Resolution};
pub use model::{AnalysisOutcome, HistoryEntry, Identity, NO_RESULT, Page};
pub use screen::{
    AnalysisScreen, AnalyzeTicket, HistoryMerge, HistoryTicket, LogoutPolicy, LogoutSignal,
    ModalView, ScreenOptions,
};
