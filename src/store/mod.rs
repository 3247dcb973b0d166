use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use crate::models::{Placement, Word};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Word not found: {0}")]
    WordNotFound(i64),
}

/// Storage for submitted words and their placements
#[async_trait]
pub trait WordStore: Send + Sync {
    /// All stored words, ordered by id
    async fn get_words(&self) -> Vec<Word>;

    /// Store each word under a fresh id, in the order given
    async fn create_words(&self, words: &[String]) -> Vec<Word>;

    /// Attach a placement to a stored word
    async fn update_word_position(&self, id: i64, position: Placement) -> Result<Word, StoreError>;
}

/// In-memory store; contents are lost on restart
pub struct MemStorage {
    words: DashMap<i64, Word>,
    next_id: AtomicI64,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            words: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WordStore for MemStorage {
    async fn get_words(&self) -> Vec<Word> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut words: Vec<Word> = self.words.iter().map(|entry| entry.value().clone()).collect();
        words.sort_by_key(|word| word.id);
        words
    }

    async fn create_words(&self, words: &[String]) -> Vec<Word> {
        let created: Vec<Word> = words
            .iter()
            .map(|text| {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let word = Word::new(id, text.clone());
                self.words.insert(id, word.clone());
                word
            })
            .collect();

        tracing::debug!("Stored {} words ({} total)", created.len(), self.len());
        created
    }

    async fn update_word_position(&self, id: i64, position: Placement) -> Result<Word, StoreError> {
        let mut word = self.words.get_mut(&id).ok_or(StoreError::WordNotFound(id))?;
        word.position = Some(position);
        Ok(word.clone())
    }
}
