use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub const SAVE_FILE: &'static str = "save.json";
    pub const SCORES_FILE: &'static str = "scores.json";
    pub const LOG_FILE: &'static str = "hangman.log";

    /// `$HOME/.local/state/hangman`, or the platform data dir without a HOME
    pub fn state_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("hangman")
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "hangman") {
            proj_dirs.data_local_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }

    pub fn save_path() -> PathBuf {
        Self::state_dir().join(Self::SAVE_FILE)
    }

    pub fn scores_path() -> PathBuf {
        Self::state_dir().join(Self::SCORES_FILE)
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir().join(Self::LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_files_share_state_dir() {
        let dir = AppDirs::state_dir();
        assert_eq!(AppDirs::save_path(), dir.join("save.json"));
        assert_eq!(AppDirs::scores_path(), dir.join("scores.json"));
        assert_eq!(AppDirs::log_path().parent(), Some(dir.as_path()));
    }
}
