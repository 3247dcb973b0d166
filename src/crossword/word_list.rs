use thiserror::Error;

use crate::config::CrosswordConfig;

/// Limits applied when turning request text into a word list
#[derive(Debug, Clone)]
pub struct WordListRules {
    pub delimiter: char,
    pub min_words: usize,
    pub min_word_length: usize,
    pub max_word_length: usize,
}

impl Default for WordListRules {
    fn default() -> Self {
        Self {
            delimiter: ',',
            min_words: 2,
            min_word_length: 2,
            max_word_length: 20,
        }
    }
}

impl From<&CrosswordConfig> for WordListRules {
    fn from(config: &CrosswordConfig) -> Self {
        Self {
            delimiter: config.word_delimiter,
            min_words: config.min_words,
            min_word_length: config.min_word_length,
            max_word_length: config.max_word_length,
        }
    }
}

/// Messages here are shown to the user as-is
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordListError {
    #[error("Please enter a list of words")]
    EmptyInput,
    #[error("Please enter at least {min} words")]
    TooFewWords { min: usize },
    #[error("Word '{word}' is longer than {max} characters")]
    WordTooLong { word: String, max: usize },
}

/// Split `text` on the delimiter, trim each entry and drop the short ones
pub fn parse_word_list(text: &str, rules: &WordListRules) -> Result<Vec<String>, WordListError> {
    if text.is_empty() {
        return Err(WordListError::EmptyInput);
    }

    let words: Vec<String> = text
        .split(rules.delimiter)
        .map(str::trim)
        .filter(|word| word.chars().count() >= rules.min_word_length)
        .map(String::from)
        .collect();

    if let Some(word) = words
        .iter()
        .find(|word| word.chars().count() > rules.max_word_length)
    {
        return Err(WordListError::WordTooLong {
            word: word.clone(),
            max: rules.max_word_length,
        });
    }

    if words.len() < rules.min_words {
        return Err(WordListError::TooFewWords {
            min: rules.min_words,
        });
    }

    Ok(words)
}
