//! Terminal client for the personality analysis service.
//!
//! Renders the analysis screen from [`persona_core`] with ratatui, runs its
//! network flows on a background worker, and supplies the ambient pieces
//! (configuration, session identity, logging).

mod app;
pub mod components;
pub mod config;
pub mod logging;
pub mod modals;
pub mod screens;
pub mod session;
pub mod state;
pub mod worker;

#[cfg(test)]
mod tests;

pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use logging::init_logging;
pub use session::SessionStore;
pub use state::{AppState, ExitReason};
