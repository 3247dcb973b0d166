use std::fmt;

use serde::{ser::SerializeSeq, Serialize, Serializer};

use crate::models::Direction;

/// Square character matrix a layout is built on.
///
/// Cells are stored row-major; `None` marks an empty cell. The size is fixed
/// at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Letter at (row, col), or `None` if the cell is empty or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row * self.size + col]
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_none()
    }

    /// Number of cells holding a letter
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Check whether `word` can start at (row, col) running in `direction`.
    ///
    /// The word must stay inside the grid and every cell it covers must be
    /// empty or already hold the same character.
    pub fn fits(&self, word: &[char], row: usize, col: usize, direction: Direction) -> bool {
        let end = match direction {
            Direction::Across => col + word.len(),
            Direction::Down => row + word.len(),
        };
        if row >= self.size || col >= self.size || end > self.size {
            return false;
        }

        let (dr, dc) = direction.step();
        word.iter().enumerate().all(|(i, &ch)| {
            let (r, c) = (row + dr * i, col + dc * i);
            self.is_empty_at(r, c) || self.get(r, c) == Some(ch)
        })
    }

    /// Write `word` starting at (row, col). Cells that already hold the right
    /// letter are left untouched. Callers check `fits` first.
    pub fn write(&mut self, word: &[char], row: usize, col: usize, direction: Direction) {
        let (dr, dc) = direction.step();
        for (i, &ch) in word.iter().enumerate() {
            let idx = (row + dr * i) * self.size + (col + dc * i);
            match self.cells[idx] {
                Some(existing) => debug_assert_eq!(existing, ch),
                None => self.cells[idx] = Some(ch),
            }
        }
    }

    /// Iterate rows as slices of cells
    pub fn row_cells(&self) -> impl Iterator<Item = &[Option<char>]> {
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    /// Transport form: one string per cell, `""` for empty cells
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.row_cells()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(String::from).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_cells() {
            let line: String = row.iter().map(|cell| cell.unwrap_or('.')).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.filled_count(), 0);
        assert!(grid.is_empty_at(3, 3));
        assert_eq!(grid.get(4, 0), None);
    }

    #[test]
    fn test_fits_rejects_out_of_bounds() {
        let grid = Grid::new(5);
        assert!(grid.fits(&chars("hello"), 0, 0, Direction::Across));
        assert!(!grid.fits(&chars("hello"), 0, 1, Direction::Across));
        assert!(!grid.fits(&chars("hello"), 1, 0, Direction::Down));
        assert!(!grid.fits(&chars("hi"), 5, 0, Direction::Across));
    }

    #[test]
    fn test_fits_checks_every_cell() {
        let mut grid = Grid::new(5);
        grid.write(&chars("cat"), 2, 1, Direction::Across);

        // Crosses 'a' at (2, 2) with a matching letter
        assert!(grid.fits(&chars("bar"), 1, 2, Direction::Down));
        // Crosses 'a' at (2, 2) with a different letter
        assert!(!grid.fits(&chars("bob"), 1, 2, Direction::Down));
        // Runs along the row over "cat" with a conflict at the last cell
        assert!(!grid.fits(&chars("cab"), 2, 1, Direction::Across));
        assert!(grid.fits(&chars("cat"), 2, 1, Direction::Across));
    }

    #[test]
    fn test_write_keeps_matching_cells() {
        let mut grid = Grid::new(5);
        grid.write(&chars("cat"), 2, 1, Direction::Across);
        let pivot_before = grid.get(2, 2);

        grid.write(&chars("bar"), 1, 2, Direction::Down);

        assert_eq!(grid.get(2, 2), pivot_before);
        assert_eq!(grid.get(1, 2), Some('b'));
        assert_eq!(grid.get(3, 2), Some('r'));
        assert_eq!(grid.filled_count(), 5);
    }

    #[test]
    fn test_rows_and_display() {
        let mut grid = Grid::new(3);
        grid.write(&chars("ab"), 1, 0, Direction::Across);

        assert_eq!(
            grid.rows(),
            vec![
                vec!["", "", ""],
                vec!["a", "b", ""],
                vec!["", "", ""],
            ]
        );
        assert_eq!(grid.to_string(), "...\nab.\n...\n");
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            serde_json::json!([["", "", ""], ["a", "b", ""], ["", "", ""]])
        );
    }
}
