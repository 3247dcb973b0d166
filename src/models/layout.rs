use serde::{Deserialize, Serialize};

/// Orientation of a placed word
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    Across,
    /// Top to bottom
    Down,
}

impl Direction {
    /// Row and column step taken when moving one character along the word
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// Where a word landed on the grid.
///
/// `(x, y)` is the cell of the word's first character, so the word starts at
/// `grid[y][x]`. Numbers follow placement order, not grid position.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
    pub number: u32,
    /// Index of the input word this placement belongs to
    #[serde(skip)]
    pub word_index: usize,
}

impl Placement {
    /// Cells covered by a word of `len` characters, as (row, col) pairs
    pub fn cells(&self, len: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.step();
        (0..len).map(move |i| (self.y + dr * i, self.x + dc * i))
    }
}
