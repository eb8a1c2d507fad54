use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::app_dirs::AppDirs;
use crate::guess::is_guessed;
use crate::session::{Session, MAX_ATTEMPTS};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No saved game found")]
    NotFound,
    #[error("The saved game has already finished")]
    StaleSave,
    #[error("Could not parse {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Saved game in {} is invalid: {reason}", path.display())]
    InvalidSnapshot { path: PathBuf, reason: String },
    #[error("Player name must not be empty")]
    EmptyPlayerName,
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Persisted data exists but cannot be trusted
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            StoreError::Corrupt { .. } | StoreError::InvalidSnapshot { .. }
        )
    }
}

/// Durable form of a [`Session`].
///
/// `hidden_word` and `hangman_figure` are written for humans reading the
/// file and are ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub player1: String,
    pub player2: String,
    pub current_word: String,
    pub guessed_letters: Vec<String>,
    pub remaining_attempts: u8,
    #[serde(default)]
    pub hidden_word: String,
    #[serde(default)]
    pub hangman_figure: String,
    #[serde(default)]
    pub saved_at: Option<DateTime<Local>>,
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        Self {
            player1: session.player1.clone(),
            player2: session.player2.clone(),
            current_word: session.secret_word.clone(),
            guessed_letters: session
                .guessed_letters
                .iter()
                .map(|c| c.to_string())
                .collect(),
            remaining_attempts: session.remaining_attempts,
            hidden_word: session.reveal_pattern(),
            hangman_figure: session.figure().to_string(),
            saved_at: Some(Local::now()),
        }
    }
}

impl Snapshot {
    /// Rebuild the session, checking the stored fields against the data model.
    pub fn into_session(self) -> Result<Session, String> {
        let secret_word = self.current_word.trim().to_lowercase();
        if secret_word.is_empty() {
            return Err("current_word is empty".to_string());
        }
        if self.player1.trim().is_empty() {
            return Err("player1 is empty".to_string());
        }
        if self.remaining_attempts > MAX_ATTEMPTS {
            return Err(format!(
                "remaining_attempts {} exceeds {}",
                self.remaining_attempts, MAX_ATTEMPTS
            ));
        }

        let mut guessed_letters = Vec::with_capacity(self.guessed_letters.len());
        for entry in &self.guessed_letters {
            let letter = crate::guess::parse_guess(entry)
                .map_err(|_| format!("guessed letter {entry:?} is not a single letter"))?;
            if is_guessed(letter, &guessed_letters) {
                return Err(format!("guessed letter {letter:?} appears twice"));
            }
            guessed_letters.push(letter);
        }

        Ok(Session {
            player1: self.player1.trim().to_string(),
            player2: self.player2.trim().to_string(),
            secret_word,
            guessed_letters,
            remaining_attempts: self.remaining_attempts,
        })
    }
}

/// Player name to number of wins
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Scoreboard(BTreeMap<String, u32>);

impl Scoreboard {
    pub fn wins(&self, player: &str) -> u32 {
        self.0.get(player).copied().unwrap_or(0)
    }

    /// Add one win and return the new total
    pub fn increment(&mut self, player: &str) -> u32 {
        let wins = self.0.entry(player.to_string()).or_insert(0);
        *wins = wins.saturating_add(1);
        *wins
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries ordered by wins (most first), ties broken by name
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        self.0
            .iter()
            .map(|(name, wins)| (name.as_str(), *wins))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }
}

impl FromIterator<(String, u32)> for Scoreboard {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Save slot and scoreboard persistence
pub trait GameStore {
    fn save_session(&self, session: &Session) -> Result<(), StoreError>;
    /// Load the saved game if it can still be played
    fn load_session(&self) -> Result<Session, StoreError>;
    fn load_scoreboard(&self) -> Result<Scoreboard, StoreError>;
    /// Record one win for `player`, returning the new total
    fn increment_score(&self, player: &str) -> Result<u32, StoreError>;
}

/// JSON files on local disk, replaced atomically on every write
#[derive(Debug, Clone)]
pub struct FileGameStore {
    save_path: PathBuf,
    scores_path: PathBuf,
}

impl FileGameStore {
    pub fn new() -> Self {
        Self {
            save_path: AppDirs::save_path(),
            scores_path: AppDirs::scores_path(),
        }
    }

    pub fn with_paths<P: AsRef<Path>, Q: AsRef<Path>>(save_path: P, scores_path: Q) -> Self {
        Self {
            save_path: save_path.as_ref().to_path_buf(),
            scores_path: scores_path.as_ref().to_path_buf(),
        }
    }

    /// Both files inside `dir`, using the default file names
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_paths(
            dir.as_ref().join(AppDirs::SAVE_FILE),
            dir.as_ref().join(AppDirs::SCORES_FILE),
        )
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn scores_path(&self) -> &Path {
        &self.scores_path
    }
}

impl Default for FileGameStore {
    fn default() -> Self {
        Self::new()
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse a JSON document, `None` if the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path)(e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `value` to a temp file beside `path`, then rename it into place.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let data = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    tmp.write_all(&data).map_err(io_error(path))?;
    tmp.as_file().sync_all().map_err(io_error(path))?;
    tmp.persist(path).map_err(|e| io_error(path)(e.error))?;

    debug!(path = %path.display(), bytes = data.len(), "wrote document");
    Ok(())
}

impl GameStore for FileGameStore {
    fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        write_json_atomic(&self.save_path, &Snapshot::from(session))?;
        info!(
            player1 = %session.player1,
            player2 = %session.player2,
            remaining_attempts = session.remaining_attempts,
            "saved game"
        );
        Ok(())
    }

    fn load_session(&self) -> Result<Session, StoreError> {
        let snapshot: Snapshot = read_json(&self.save_path)?.ok_or(StoreError::NotFound)?;

        let session = snapshot
            .into_session()
            .map_err(|reason| StoreError::InvalidSnapshot {
                path: self.save_path.clone(),
                reason,
            })?;

        if session.is_finished() {
            warn!(path = %self.save_path.display(), status = %session.status(), "saved game is not resumable");
            return Err(StoreError::StaleSave);
        }

        info!(
            player1 = %session.player1,
            remaining_attempts = session.remaining_attempts,
            "loaded saved game"
        );
        Ok(session)
    }

    fn load_scoreboard(&self) -> Result<Scoreboard, StoreError> {
        Ok(read_json(&self.scores_path)?.unwrap_or_default())
    }

    fn increment_score(&self, player: &str) -> Result<u32, StoreError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(StoreError::EmptyPlayerName);
        }

        let mut scoreboard = self.load_scoreboard()?;
        let wins = scoreboard.increment(player);
        write_json_atomic(&self.scores_path, &scoreboard)?;

        info!(player, wins, "recorded win");
        Ok(wins)
    }
}
