use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Placement;

/// A stored input word and, once laid out, its position on the grid
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: i64,
    pub word: String,
    /// `None` until a layout places the word (and forever if it was dropped)
    pub position: Option<Placement>,
    pub created_at: DateTime<Utc>,
}

impl Word {
    pub fn new(id: i64, word: String) -> Self {
        Self {
            id,
            word,
            position: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }
}
