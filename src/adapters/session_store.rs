use crate::core::session::Session;
use crate::domain::model::Sphere;
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SESSION_PATH: &str = ".femoral-head-session.json";

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    sphere: Option<Sphere>,
    fitted_at: Option<DateTime<Utc>>,
}

/// Keeps the latest-sphere slot on disk between CLI invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty session.
    pub fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            tracing::debug!("No session file at {}", self.path.display());
            return Ok(Session::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let file: SessionFile =
            serde_json::from_str(&content).map_err(|e| AppError::SessionError {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Session::restore(file.sphere, file.fitted_at))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let file = SessionFile {
            sphere: session.latest().copied(),
            fitted_at: session.fitted_at(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_PATH)
    }
}
