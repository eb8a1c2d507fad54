// Library surface for the binary and for integration tests.
pub mod app_dirs;
pub mod config;
pub mod console;
pub mod figure;
pub mod guess;
pub mod runtime;
pub mod session;
pub mod store;
pub mod ui;
pub mod vocabulary;
pub mod word_source;

pub use guess::{evaluate_guess, reveal_pattern, GuessError, GuessOutcome, Verdict};
pub use session::{Mode, Session, Status, MAX_ATTEMPTS};
pub use store::{FileGameStore, GameStore, Scoreboard, StoreError};
