//! Path management for client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/boardroom/         # Config directory
//! ├── config.toml              # Endpoint configuration
//! ├── state.toml               # Session, theme and vote ledger
//! └── logs/                    # Application logs
//!     └── boardroom.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use boardroom_core::error::{BoardroomError, Result};

const APP_DIR: &str = "boardroom";

/// Resolves the client's file locations.
///
/// `root` replaces the platform config directory when set, which keeps tests
/// and portable installs away from the user's real files.
#[derive(Debug, Clone, Default)]
pub struct BoardroomPaths {
    root: Option<PathBuf>,
}

impl BoardroomPaths {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Returns the config directory (e.g. `~/.config/boardroom/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| BoardroomError::config("Cannot find config directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn state_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("state.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_dir_ends_with_app_dir() {
        // Platforms without a config dir make this an error, not a panic.
        if let Ok(dir) = BoardroomPaths::default().config_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }

    #[test]
    fn test_files_live_under_root() {
        let paths = BoardroomPaths::new(Some(PathBuf::from("/tmp/bb")));
        assert_eq!(paths.config_file().unwrap(), PathBuf::from("/tmp/bb/config.toml"));
        assert_eq!(paths.state_file().unwrap(), PathBuf::from("/tmp/bb/state.toml"));
        assert_eq!(paths.logs_dir().unwrap(), PathBuf::from("/tmp/bb/logs"));
    }
}
