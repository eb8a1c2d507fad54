use crate::figure::figure_for_stage;
use crate::guess::{self, GuessError, GuessOutcome};
use strum_macros::Display;
use thiserror::Error;

/// Number of wrong guesses allowed before the game is lost
pub const MAX_ATTEMPTS: u8 = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("The secret word must not be empty")]
    EmptySecretWord,
    #[error("Player name must not be empty")]
    EmptyPlayerName,
}

/// Where a session stands after the latest guess
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Status {
    Ongoing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Mode {
    #[strum(serialize = "Single player")]
    Single,
    #[strum(serialize = "Multiplayer")]
    Multi,
}

impl Mode {
    /// Parse a mode-menu selection
    pub fn from_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Mode::Single),
            "2" => Some(Mode::Multi),
            _ => None,
        }
    }
}

/// One game of hangman, in progress or finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub player1: String,
    /// Empty in single-player mode
    pub player2: String,
    pub secret_word: String,
    pub guessed_letters: Vec<char>,
    pub remaining_attempts: u8,
}

impl Session {
    /// Start a fresh game. The word is trimmed and lowercased.
    pub fn new(
        player1: impl Into<String>,
        player2: impl Into<String>,
        secret_word: &str,
    ) -> Result<Self, SessionError> {
        let player1 = player1.into().trim().to_string();
        if player1.is_empty() {
            return Err(SessionError::EmptyPlayerName);
        }

        let secret_word = secret_word.trim().to_lowercase();
        if secret_word.is_empty() {
            return Err(SessionError::EmptySecretWord);
        }

        Ok(Self {
            player1,
            player2: player2.into().trim().to_string(),
            secret_word,
            guessed_letters: Vec::new(),
            remaining_attempts: MAX_ATTEMPTS,
        })
    }

    pub fn mode(&self) -> Mode {
        if self.player2.is_empty() {
            Mode::Single
        } else {
            Mode::Multi
        }
    }

    /// The guessing player: player2 in multiplayer, otherwise player1.
    pub fn guesser(&self) -> &str {
        match self.mode() {
            Mode::Single => &self.player1,
            Mode::Multi => &self.player2,
        }
    }

    pub fn reveal_pattern(&self) -> String {
        guess::reveal_pattern(&self.secret_word, &self.guessed_letters)
    }

    pub fn status(&self) -> Status {
        if guess::is_revealed(&self.secret_word, &self.guessed_letters) {
            Status::Won
        } else if self.remaining_attempts == 0 {
            Status::Lost
        } else {
            Status::Ongoing
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() != Status::Ongoing
    }

    /// Index into the figure stages: 0 is an empty gallows, 6 the full figure.
    pub fn figure_stage(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.remaining_attempts) as usize
    }

    pub fn figure(&self) -> &'static str {
        figure_for_stage(self.figure_stage())
    }

    pub fn guess(&mut self, candidate: &str) -> Result<GuessOutcome, GuessError> {
        guess::evaluate_guess(self, candidate)
    }
}
