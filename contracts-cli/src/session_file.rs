//! The saved session between runs

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use contracts_lib::auth::Session;

/// JSON file holding the last [`Session`].
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: Option<PathBuf>,
}

impl SessionFile {
    /// The file in the platform data directory. Without one, sessions are
    /// not persisted.
    pub fn default_location() -> Self {
        Self {
            path: crate::paths::session_file(),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Reads the saved session. A file that no longer parses is discarded
    /// and treated as signed out.
    pub fn load(&self) -> anyhow::Result<Option<Session>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    log::warn!("discarding unreadable session {}: {e}", path.display());
                    self.remove()?;
                    Ok(None)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            log::warn!("no data directory; session not saved");
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("session saved to {}", path.display());
        Ok(())
    }

    pub fn remove(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}
