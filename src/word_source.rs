use std::io;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::console::{Console, Tone};
use crate::vocabulary::Vocabulary;

/// Uniform pick from `words`; `None` only when the slice is empty.
pub fn pick_random_word<'a, R: Rng + ?Sized>(words: &'a [String], rng: &mut R) -> Option<&'a str> {
    words.choose(rng).map(String::as_str)
}

/// Secret word for a single-player game
pub fn random_secret_word<R: Rng + ?Sized>(vocabulary: &Vocabulary, rng: &mut R) -> Option<String> {
    pick_random_word(&vocabulary.words, rng).map(str::to_lowercase)
}

/// Ask `setter` for a secret word without echoing it.
///
/// Any non-empty line is accepted, including words outside the vocabulary.
pub fn acquire_secret_word<C: Console + ?Sized>(console: &mut C, setter: &str) -> io::Result<String> {
    loop {
        let word = console.read_hidden_line(&format!("{setter}, enter the secret word (hidden): "))?;
        let word = word.trim();
        if !word.is_empty() {
            return Ok(word.to_lowercase());
        }
        console.notice(Tone::Warning, "The secret word cannot be empty.")?;
    }
}
