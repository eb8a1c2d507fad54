use crate::session::{Session, Status};
use thiserror::Error;

/// Placeholder shown for letters that have not been guessed yet
pub const PLACEHOLDER: char = '_';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("Please enter a single letter (got {0:?})")]
    InvalidFormat(String),
    #[error("You already guessed '{0}'")]
    Duplicate(char),
    #[error("The game is already over")]
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Hit,
    Miss,
}

/// Result of applying one accepted guess to a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessOutcome {
    pub letter: char,
    pub verdict: Verdict,
    pub pattern: String,
    pub remaining_attempts: u8,
    pub status: Status,
}

fn same_letter(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

/// Returns true when `c` matches any guessed letter, ignoring case.
pub fn is_guessed(c: char, guessed: &[char]) -> bool {
    guessed.iter().any(|&g| same_letter(c, g))
}

/// The secret word with every unguessed position replaced by [`PLACEHOLDER`].
pub fn reveal_pattern(word: &str, guessed: &[char]) -> String {
    word.chars()
        .map(|c| if is_guessed(c, guessed) { c } else { PLACEHOLDER })
        .collect()
}

/// True once the reveal pattern reads the same as the word itself.
pub fn is_revealed(word: &str, guessed: &[char]) -> bool {
    reveal_pattern(word, guessed) == word
}

/// Validate raw input as a guess and normalize it to a lowercase letter.
pub fn parse_guess(input: &str) -> Result<char, GuessError> {
    let invalid = || GuessError::InvalidFormat(input.to_string());

    let mut chars = input.trim().chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => c,
        _ => return Err(invalid()),
    };

    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Ok(l),
        _ => Err(invalid()),
    }
}

/// Apply one guess to `session`.
///
/// Validation happens before any mutation: a rejected guess leaves the
/// guessed letters and the attempt count untouched.
pub fn evaluate_guess(session: &mut Session, candidate: &str) -> Result<GuessOutcome, GuessError> {
    if session.status() != Status::Ongoing {
        return Err(GuessError::GameOver);
    }

    let letter = parse_guess(candidate)?;
    if is_guessed(letter, &session.guessed_letters) {
        return Err(GuessError::Duplicate(letter));
    }

    session.guessed_letters.push(letter);

    let verdict = if session.secret_word.chars().any(|c| same_letter(c, letter)) {
        Verdict::Hit
    } else {
        session.remaining_attempts = session.remaining_attempts.saturating_sub(1);
        Verdict::Miss
    };

    Ok(GuessOutcome {
        letter,
        verdict,
        pattern: session.reveal_pattern(),
        remaining_attempts: session.remaining_attempts,
        status: session.status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MAX_ATTEMPTS;
    use assert_matches::assert_matches;

    fn cat_session() -> Session {
        Session::new("alice", "", "cat").unwrap()
    }

    #[test]
    fn test_reveal_pattern_masks_unguessed_positions() {
        assert_eq!(reveal_pattern("cat", &[]), "___");
        assert_eq!(reveal_pattern("cat", &['c']), "c__");
        assert_eq!(reveal_pattern("banana", &['a']), "_a_a_a");
        assert_eq!(reveal_pattern("banana", &['a', 'n', 'b']), "banana");
    }

    #[test]
    fn test_reveal_pattern_ignores_case() {
        assert_eq!(reveal_pattern("Energy", &['e']), "E_e___");
        assert_eq!(reveal_pattern("cat", &['C', 'T']), "c_t");
    }

    #[test]
    fn test_reveal_pattern_is_idempotent() {
        let guessed = ['e', 'n', 'y'];
        let once = reveal_pattern("energy", &guessed);
        let twice = reveal_pattern("energy", &guessed);
        assert_eq!(once, "ene__y");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_is_revealed() {
        assert!(!is_revealed("cat", &['c', 'a']));
        assert!(is_revealed("cat", &['c', 'a', 't', 'z']));
    }

    #[test]
    fn test_placeholder_in_word_counts_as_revealed() {
        assert_eq!(reveal_pattern("a_b", &['a', 'b']), "a_b");
        assert!(is_revealed("a_b", &['a', 'b']));
        assert!(!is_revealed("a_b", &['a']));
    }

    #[test]
    fn test_underscore_word_is_won_once_letters_are_guessed() {
        let mut session = Session::new("alice", "bob", "a_b").unwrap();
        assert_eq!(evaluate_guess(&mut session, "a").unwrap().status, Status::Ongoing);

        let outcome = evaluate_guess(&mut session, "b").unwrap();
        assert_eq!(outcome.pattern, "a_b");
        assert_eq!(outcome.status, Status::Won);
        assert_eq!(evaluate_guess(&mut session, "c"), Err(GuessError::GameOver));
    }

    #[test]
    fn test_parse_guess_accepts_single_letters() {
        assert_eq!(parse_guess("a"), Ok('a'));
        assert_eq!(parse_guess("Q"), Ok('q'));
        assert_eq!(parse_guess(" e \n"), Ok('e'));
        assert_eq!(parse_guess("é"), Ok('é'));
    }

    #[test]
    fn test_parse_guess_rejects_bad_input() {
        for input in ["5", "ab", "", " ", "?", "save1"] {
            assert_matches!(parse_guess(input), Err(GuessError::InvalidFormat(_)), "{input:?}");
        }
    }

    #[test]
    fn test_hit_keeps_attempts() {
        let mut session = cat_session();
        let outcome = evaluate_guess(&mut session, "c").unwrap();

        assert_eq!(outcome.verdict, Verdict::Hit);
        assert_eq!(outcome.pattern, "c__");
        assert_eq!(outcome.remaining_attempts, MAX_ATTEMPTS);
        assert_eq!(outcome.status, Status::Ongoing);
        assert_eq!(session.guessed_letters, vec!['c']);
    }

    #[test]
    fn test_miss_costs_one_attempt() {
        let mut session = cat_session();
        let outcome = evaluate_guess(&mut session, "x").unwrap();

        assert_eq!(outcome.verdict, Verdict::Miss);
        assert_eq!(outcome.pattern, "___");
        assert_eq!(outcome.remaining_attempts, MAX_ATTEMPTS - 1);
        assert_eq!(session.remaining_attempts, MAX_ATTEMPTS - 1);
    }

    #[test]
    fn test_uppercase_guess_is_normalized() {
        let mut session = cat_session();
        let outcome = evaluate_guess(&mut session, "A").unwrap();
        assert_eq!(outcome.letter, 'a');
        assert_eq!(outcome.pattern, "_a_");

        assert_eq!(evaluate_guess(&mut session, "a"), Err(GuessError::Duplicate('a')));
    }

    #[test]
    fn test_duplicate_guess_is_a_no_op() {
        let mut session = cat_session();
        evaluate_guess(&mut session, "x").unwrap();
        let before = session.clone();

        assert_eq!(evaluate_guess(&mut session, "x"), Err(GuessError::Duplicate('x')));
        assert_eq!(evaluate_guess(&mut session, "X"), Err(GuessError::Duplicate('x')));
        assert_eq!(session, before);
    }

    #[test]
    fn test_invalid_guess_is_a_no_op() {
        let mut session = cat_session();
        let before = session.clone();

        for input in ["5", "ab", ""] {
            assert_matches!(
                evaluate_guess(&mut session, input),
                Err(GuessError::InvalidFormat(_))
            );
        }
        assert_eq!(session, before);
    }

    #[test]
    fn test_win_sequence() {
        let mut session = cat_session();

        let c = evaluate_guess(&mut session, "c").unwrap();
        assert_eq!((c.verdict, c.pattern.as_str()), (Verdict::Hit, "c__"));
        let a = evaluate_guess(&mut session, "a").unwrap();
        assert_eq!((a.verdict, a.pattern.as_str()), (Verdict::Hit, "ca_"));
        let t = evaluate_guess(&mut session, "t").unwrap();
        assert_eq!((t.verdict, t.pattern.as_str()), (Verdict::Hit, "cat"));
        assert_eq!(t.status, Status::Won);

        assert_eq!(evaluate_guess(&mut session, "z"), Err(GuessError::GameOver));
    }

    #[test]
    fn test_loss_sequence() {
        let mut session = cat_session();
        let mut last = None;

        for (guess, expected) in ["x", "y", "q", "w", "e", "r"].iter().zip((0..6).rev()) {
            let outcome = evaluate_guess(&mut session, guess).unwrap();
            assert_eq!(outcome.verdict, Verdict::Miss);
            assert_eq!(outcome.remaining_attempts, expected);
            last = Some(outcome);
        }

        assert_eq!(last.map(|o| o.status), Some(Status::Lost));
        assert_eq!(evaluate_guess(&mut session, "c"), Err(GuessError::GameOver));
        assert_eq!(session.remaining_attempts, 0);
    }

    #[test]
    fn test_winning_on_last_attempt_is_a_win() {
        let mut session = cat_session();
        for guess in ["x", "y", "q", "w", "e"] {
            evaluate_guess(&mut session, guess).unwrap();
        }
        evaluate_guess(&mut session, "c").unwrap();
        evaluate_guess(&mut session, "a").unwrap();
        let outcome = evaluate_guess(&mut session, "t").unwrap();

        assert_eq!(outcome.remaining_attempts, 1);
        assert_eq!(outcome.status, Status::Won);
    }

    #[test]
    fn test_attempts_never_increase() {
        let mut session = Session::new("bob", "", "energy").unwrap();
        let mut previous = session.remaining_attempts;

        for guess in "abcdefghijklmnopqrstuvwxyz".chars() {
            let _ = evaluate_guess(&mut session, &guess.to_string());
            assert!(session.remaining_attempts <= previous);
            previous = session.remaining_attempts;
        }
    }
}
