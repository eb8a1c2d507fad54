use std::io;

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::console::{Console, Tone};
use crate::guess::{GuessError, Verdict};
use crate::session::{Mode, Session, Status};
use crate::store::{GameStore, StoreError};
use crate::ui::{scoreboard_lines, spaced, BoardView, MAIN_MENU, MODE_MENU};
use crate::vocabulary::Vocabulary;
use crate::word_source::{acquire_secret_word, random_secret_word};

/// Token that suspends the current round
pub const SAVE_COMMAND: &str = "save";

/// What the menu loop shows next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    NewGame,
    Continue,
    Scoreboard,
    Exit,
}

impl Screen {
    /// Parse a main-menu selection
    pub fn from_menu_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Screen::NewGame),
            "2" => Some(Screen::Continue),
            "3" => Some(Screen::Scoreboard),
            "4" => Some(Screen::Exit),
            _ => None,
        }
    }
}

/// How a round left the guessing loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    Won { winner: String },
    Lost,
    Suspended,
}

/// Drives the menu and game rounds over a console and a store
pub struct Runner<C: Console, S: GameStore, R: Rng> {
    console: C,
    store: S,
    vocabulary: Vocabulary,
    rng: R,
}

impl<C: Console, S: GameStore, R: Rng> Runner<C, S, R> {
    pub fn new(console: C, store: S, vocabulary: Vocabulary, rng: R) -> Self {
        Self {
            console,
            store,
            vocabulary,
            rng,
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run until the player exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let mut screen = Screen::MainMenu;
        loop {
            screen = match self.step(screen) {
                Ok(next) => next,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    info!("input closed, exiting");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            if screen == Screen::Exit {
                self.console.say("Goodbye!")?;
                return Ok(());
            }
        }
    }

    /// Show one screen and return the one to show next
    pub fn step(&mut self, screen: Screen) -> io::Result<Screen> {
        debug!(?screen, "entering screen");
        match screen {
            Screen::MainMenu => self.main_menu(),
            Screen::NewGame => self.new_game(),
            Screen::Continue => self.continue_game(),
            Screen::Scoreboard => self.show_scoreboard(),
            Screen::Exit => Ok(Screen::Exit),
        }
    }

    fn main_menu(&mut self) -> io::Result<Screen> {
        self.console.say(MAIN_MENU)?;
        loop {
            let choice = self.console.read_line("Select an option (1-4): ")?;
            if let Some(screen) = Screen::from_menu_choice(&choice) {
                return Ok(screen);
            }
            self.console
                .notice(Tone::Warning, "Invalid choice, please enter 1, 2, 3 or 4.")?;
        }
    }

    fn read_mode(&mut self) -> io::Result<Mode> {
        self.console.say(MODE_MENU)?;
        loop {
            let choice = self.console.read_line("Select a mode (1-2): ")?;
            if let Some(mode) = Mode::from_choice(&choice) {
                return Ok(mode);
            }
            self.console
                .notice(Tone::Warning, "Invalid choice, please enter 1 or 2.")?;
        }
    }

    fn read_name(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let name = self.console.read_line(prompt)?;
            let name = name.trim();
            if !name.is_empty() {
                return Ok(name.to_string());
            }
            self.console
                .notice(Tone::Warning, "Name cannot be empty.")?;
        }
    }

    /// Build a fresh session, asking for mode, names and (in multiplayer) the word.
    pub fn create_session(&mut self) -> io::Result<Session> {
        let mode = self.read_mode()?;
        let player1 = self.read_name("Player 1 name: ")?;

        let (player2, word) = match mode {
            Mode::Single => {
                let word = random_secret_word(&self.vocabulary, &mut self.rng).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidData, "vocabulary has no words")
                })?;
                (String::new(), word)
            }
            Mode::Multi => {
                let player2 = self.read_name("Player 2 name: ")?;
                let word = acquire_secret_word(&mut self.console, &player1)?;
                (player2, word)
            }
        };

        let session = Session::new(player1, player2, &word)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        info!(
            mode = %session.mode(),
            player1 = %session.player1,
            player2 = %session.player2,
            word_len = session.secret_word.chars().count(),
            "new game"
        );
        Ok(session)
    }

    fn new_game(&mut self) -> io::Result<Screen> {
        let session = self.create_session()?;
        self.play_round(session)?;
        Ok(Screen::MainMenu)
    }

    fn continue_game(&mut self) -> io::Result<Screen> {
        match self.store.load_session() {
            Ok(session) => {
                self.console.notice(
                    Tone::Info,
                    &format!("Resuming {}'s game.", session.guesser()),
                )?;
                self.play_round(session)?;
                Ok(Screen::MainMenu)
            }
            Err(StoreError::NotFound) => {
                self.console
                    .notice(Tone::Info, "No saved game found. Starting a new game.")?;
                Ok(Screen::NewGame)
            }
            Err(StoreError::StaleSave) => {
                self.console.notice(
                    Tone::Warning,
                    "The saved game has already finished. Starting a new game.",
                )?;
                Ok(Screen::NewGame)
            }
            Err(e) if e.is_corrupt() => {
                error!(error = %e, "saved game is damaged");
                self.console.notice(
                    Tone::Error,
                    &format!(
                        "The saved game is damaged ({e}). It will be replaced by your next save. Starting a new game."
                    ),
                )?;
                Ok(Screen::NewGame)
            }
            Err(e) => {
                error!(error = %e, "could not load saved game");
                self.console.notice(
                    Tone::Error,
                    &format!("Could not load the saved game ({e}). Starting a new game."),
                )?;
                Ok(Screen::NewGame)
            }
        }
    }

    fn show_scoreboard(&mut self) -> io::Result<Screen> {
        match self.store.load_scoreboard() {
            Ok(scoreboard) => {
                let lines = scoreboard_lines(&scoreboard);
                self.console.say(&lines.join("\n"))?;
            }
            Err(e) => {
                error!(error = %e, "could not load scoreboard");
                self.console
                    .notice(Tone::Error, &format!("Could not load the scoreboard ({e})."))?;
            }
        }
        Ok(Screen::MainMenu)
    }

    /// Play guesses until the session is won, lost or saved.
    pub fn play_round(&mut self, mut session: Session) -> io::Result<RoundEnd> {
        self.console.notice(
            Tone::Info,
            &format!("{} is guessing. Good luck!", session.guesser()),
        )?;

        loop {
            self.console.show_board(&BoardView::from(&session))?;
            let input = self.console.read_line("Your guess: ")?;

            if input.trim().eq_ignore_ascii_case(SAVE_COMMAND) {
                match self.store.save_session(&session) {
                    Ok(()) => {
                        self.console
                            .notice(Tone::Success, "Game saved. Choose Continue to resume it.")?;
                        return Ok(RoundEnd::Suspended);
                    }
                    Err(e) => {
                        error!(error = %e, "could not save game");
                        self.console
                            .notice(Tone::Error, &format!("Could not save the game ({e})."))?;
                        continue;
                    }
                }
            }

            let outcome = match session.guess(&input) {
                Ok(outcome) => outcome,
                Err(GuessError::GameOver) => break,
                Err(e) => {
                    self.console.notice(Tone::Warning, &e.to_string())?;
                    continue;
                }
            };

            debug!(
                letter = %outcome.letter,
                verdict = ?outcome.verdict,
                remaining_attempts = outcome.remaining_attempts,
                "guess evaluated"
            );

            match outcome.verdict {
                Verdict::Hit => self
                    .console
                    .notice(Tone::Success, &format!("Yes! '{}' is in the word.", outcome.letter))?,
                Verdict::Miss => self.console.notice(
                    Tone::Warning,
                    &format!(
                        "Sorry, '{}' is not in the word. {} attempts left.",
                        outcome.letter, outcome.remaining_attempts
                    ),
                )?,
            }

            if outcome.status != Status::Ongoing {
                break;
            }
        }

        self.finish(&session)
    }

    fn finish(&mut self, session: &Session) -> io::Result<RoundEnd> {
        self.console.show_board(&BoardView::from(session))?;

        let end = match session.status() {
            Status::Won => {
                let winner = session.guesser().to_string();
                self.console.notice(
                    Tone::Success,
                    &format!(
                        "Congratulations {winner}, you guessed the word: {}",
                        spaced(&session.secret_word)
                    ),
                )?;
                match self.store.increment_score(&winner) {
                    Ok(wins) => self
                        .console
                        .notice(Tone::Info, &format!("{winner} now has {wins} win(s)."))?,
                    Err(e) => {
                        error!(error = %e, player = %winner, "could not update scoreboard");
                        self.console
                            .notice(Tone::Error, &format!("Could not update the scoreboard ({e})."))?;
                    }
                }
                info!(winner = %winner, "game won");
                RoundEnd::Won { winner }
            }
            Status::Lost | Status::Ongoing => {
                self.console.notice(
                    Tone::Error,
                    &format!("Game over! The word was: {}", session.secret_word),
                )?;
                info!(guesser = %session.guesser(), "game lost");
                RoundEnd::Lost
            }
        };

        // Overwrite the slot so a finished game can no longer be resumed
        if let Err(e) = self.store.save_session(session) {
            warn!(error = %e, "could not persist finished game");
        }

        Ok(end)
    }
}
