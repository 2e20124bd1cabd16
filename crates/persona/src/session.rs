//! Session store holding the signed-in user's email.
//!
//! The email is read once at startup and passed into the screen's flows as an
//! [`Identity`]. A missing or unreadable session means an anonymous user.

use std::path::{Path, PathBuf};

use persona_core::Identity;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

pub const SESSION_FILE_NAME: &str = "session.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn identity(&self) -> Identity {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Identity::anonymous(),
        };
        match serde_saphyr::from_str::<SessionData>(&content) {
            Ok(data) => Identity::from(data.user_email),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Ignoring unreadable session"
                );
                Identity::anonymous()
            }
        }
    }

    pub fn save(&self, identity: &Identity) -> Result<(), ConfigError> {
        let data = SessionData {
            user_email: identity.email().map(str::to_string),
        };
        let yaml =
            serde_saphyr::to_string(&data).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Forget the signed-in user.
    pub fn clear(&self) -> Result<(), ConfigError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
