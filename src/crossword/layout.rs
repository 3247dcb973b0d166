use thiserror::Error;

use crate::models::{Direction, Placement};

use super::Grid;

/// Empty cells added to the longest word's length when sizing the grid
pub const GRID_MARGIN: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// A finished layout: the grid plus one placement per word that made it on
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    /// In placement order; numbers run 1, 2, 3, ...
    pub placements: Vec<Placement>,
}

impl Layout {
    /// Placement of the input word at `word_index`, if it was placed
    pub fn placement_for(&self, word_index: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.word_index == word_index)
    }

    /// Input words that did not get a placement, in input order
    pub fn unplaced<'a, S: AsRef<str>>(&self, words: &'a [S]) -> Vec<&'a str> {
        words
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.placement_for(*idx).is_none())
            .map(|(_, word)| word.as_ref())
            .collect()
    }
}

/// Lay out `words` on a square grid.
///
/// Words are processed longest first (stable for equal lengths). The longest
/// is placed across through the middle row; every other word is attached at
/// the first occupied cell, in row-major order, whose letter it contains,
/// aligning that cell with the word's first occurrence of the letter. Down is
/// tried before across. Words that fit nowhere are left out of the result.
///
/// Same input, same output: nothing here depends on state outside the call.
pub fn generate_layout<S: AsRef<str>>(words: &[S]) -> Result<Layout, LayoutError> {
    if words.is_empty() {
        return Err(LayoutError::InvalidInput("word list is empty"));
    }

    let entries: Vec<Vec<char>> = words.iter().map(|w| w.as_ref().chars().collect()).collect();

    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| entries[b].len().cmp(&entries[a].len()));

    let longest = entries[order[0]].len();
    let size = longest + GRID_MARGIN;
    let mut grid = Grid::new(size);
    let mut placements = Vec::with_capacity(entries.len());

    // Seed: longest word across, centred
    let seed = &entries[order[0]];
    let row = size / 2;
    let col = (size - seed.len()) / 2;
    grid.write(seed, row, col, Direction::Across);
    placements.push(Placement {
        x: col,
        y: row,
        direction: Direction::Across,
        number: 1,
        word_index: order[0],
    });

    for &word_index in &order[1..] {
        let word = &entries[word_index];
        match find_fit(&grid, word) {
            Some((row, col, direction)) => {
                grid.write(word, row, col, direction);
                let number = placements.len() as u32 + 1;
                tracing::trace!(
                    "Placed word {} {:?} at ({}, {}) as #{}",
                    word_index,
                    direction,
                    col,
                    row,
                    number
                );
                placements.push(Placement {
                    x: col,
                    y: row,
                    direction,
                    number,
                    word_index,
                });
            }
            None => {
                tracing::debug!("No intersection found for word {}, dropping it", word_index);
            }
        }
    }

    Ok(Layout { grid, placements })
}

/// First valid origin for `word`, scanning occupied cells row-major and
/// trying down before across at each one
fn find_fit(grid: &Grid, word: &[char]) -> Option<(usize, usize, Direction)> {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            let Some(letter) = grid.get(row, col) else {
                continue;
            };
            let Some(index) = word.iter().position(|&c| c == letter) else {
                continue;
            };

            if let Some(start_row) = row.checked_sub(index) {
                if grid.fits(word, start_row, col, Direction::Down) {
                    return Some((start_row, col, Direction::Down));
                }
            }
            if let Some(start_col) = col.checked_sub(index) {
                if grid.fits(word, row, start_col, Direction::Across) {
                    return Some((row, start_col, Direction::Across));
                }
            }
        }
    }
    None
}
