use include_dir::{include_dir, Dir};
use serde::Deserialize;
use thiserror::Error;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Unknown vocabulary: {0}")]
    UnknownVocabulary(String),
    #[error("Vocabulary {name} is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Vocabulary {0} has no words")]
    Empty(String),
}

/// A fixed word list shipped inside the binary
#[derive(Deserialize, Clone, Debug)]
pub struct Vocabulary {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Vocabulary {
    /// Load an embedded vocabulary by file stem, e.g. `"english"`.
    pub fn load(name: &str) -> Result<Self, VocabularyError> {
        let file = WORDS_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| VocabularyError::UnknownVocabulary(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| VocabularyError::UnknownVocabulary(name.to_string()))?;

        Self::from_json(name, contents)
    }

    fn from_json(name: &str, contents: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary =
            serde_json::from_str(contents).map_err(|source| VocabularyError::Malformed {
                name: name.to_string(),
                source,
            })?;

        if vocabulary.words.iter().all(|w| w.trim().is_empty()) {
            return Err(VocabularyError::Empty(name.to_string()));
        }

        Ok(vocabulary)
    }

    /// Names of every embedded vocabulary
    pub fn available() -> Vec<String> {
        WORDS_DIR
            .files()
            .filter_map(|f| f.path().file_stem())
            .filter_map(|s| s.to_str())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_vocabulary_load_english() {
        let vocab = Vocabulary::load("english").unwrap();

        assert_eq!(vocab.name, "english");
        assert!(!vocab.words.is_empty());
        assert_eq!(vocab.size as usize, vocab.words.len());
    }

    #[test]
    fn test_english_words_are_lowercase_letters() {
        let vocab = Vocabulary::load("english").unwrap();
        for word in &vocab.words {
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "unexpected word {word:?}"
            );
        }
    }

    #[test]
    fn test_unknown_vocabulary() {
        assert_matches!(
            Vocabulary::load("klingon"),
            Err(VocabularyError::UnknownVocabulary(name)) if name == "klingon"
        );
    }

    #[test]
    fn test_vocabulary_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["hello", "world", "test"]
        }
        "#;

        let vocab = Vocabulary::from_json("test", json_data).unwrap();
        assert_eq!(vocab.name, "test");
        assert_eq!(vocab.words, vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_malformed_and_empty_vocabularies() {
        assert_matches!(
            Vocabulary::from_json("bad", "{ not json"),
            Err(VocabularyError::Malformed { .. })
        );
        assert_matches!(
            Vocabulary::from_json("blank", r#"{"name":"blank","size":0,"words":[]}"#),
            Err(VocabularyError::Empty(_))
        );
    }

    #[test]
    fn test_available_lists_english() {
        assert!(Vocabulary::available().contains(&"english".to_string()));
    }
}
