use clap::Parser;
use hangman::{
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    console::TerminalConsole,
    runtime::Runner,
    store::FileGameStore,
    vocabulary::Vocabulary,
};
use std::{error::Error, fs::OpenOptions, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// terminal hangman with save/resume and a persistent scoreboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the secret word one letter at a time. Play alone against a random word or let a friend pick the word. Games can be saved and resumed, and wins are kept on a scoreboard."
)]
pub struct Cli {}

/// Log to a file in the state dir so output never mixes with the game.
fn init_logging(default_level: &str) -> Result<(), Box<dyn Error>> {
    let log_path = AppDirs::log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();

    let config_store = FileConfigStore::new();
    let config = config_store.load();

    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("warning: logging disabled: {e}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting hangman");

    if !config_store.exists() {
        // Write defaults so the file is there to edit
        if let Err(e) = config_store.save(&config) {
            warn!(error = %e, path = %config_store.path().display(), "could not write default config");
        }
    }

    let vocabulary = match Vocabulary::load(&config.vocabulary) {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            warn!(error = %e, available = ?Vocabulary::available(), "falling back to english");
            Vocabulary::load("english")?
        }
    };

    let mut runner = Runner::new(
        TerminalConsole::new(config.color),
        FileGameStore::new(),
        vocabulary,
        rand::thread_rng(),
    );
    runner.run()?;

    info!("exiting");
    Ok(())
}
