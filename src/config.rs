use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Player-editable settings, read once at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Embedded word list used for single-player games
    pub vocabulary: String,
    pub color: bool,
    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: "english".to_string(),
            color: true,
            log_level: "info".to_string(),
        }
    }
}

pub trait ConfigStore {
    /// Never fails: anything unusable on disk yields [`Config::default`]
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> io::Result<()>;
    fn exists(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub const FILE_NAME: &'static str = "config.json";

    /// `<platform config dir>/hangman/config.json`
    pub fn new() -> Self {
        let path = ProjectDirs::from("", "", "hangman")
            .map(|dirs| dirs.config_dir().join(Self::FILE_NAME))
            .unwrap_or_else(|| PathBuf::from("hangman_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                return Config::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read config, using defaults");
                return Config::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "could not parse config, using defaults");
            Config::default()
        })
    }

    /// Replaces the file atomically, so a crash mid-write keeps the old settings.
    fn save(&self, cfg: &Config) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, cfg)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), "wrote config");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}
