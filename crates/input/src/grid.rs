//! Keyboard cursor over the card grid.

use crate::map::Direction;

/// Columns used to lay out `cards` cards.
pub fn columns_for(cards: usize) -> usize {
    match cards {
        0 => 1,
        1..=16 => 4.min(cards),
        _ => 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    index: usize,
    len: usize,
    columns: usize,
}

impl GridCursor {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            columns: columns_for(len),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resize for a new deal, keeping the index when still in range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.columns = columns_for(len);
        if self.index >= len {
            self.index = 0;
        }
    }

    /// Move one cell. Stops at the edges; the last row may be short.
    pub fn step(&mut self, dir: Direction) {
        if self.len == 0 {
            return;
        }
        let (row, col) = (self.index / self.columns, self.index % self.columns);
        let next = match dir {
            Direction::Left if col > 0 => self.index - 1,
            Direction::Right if col + 1 < self.columns => self.index + 1,
            Direction::Up if row > 0 => self.index - self.columns,
            Direction::Down => self.index + self.columns,
            _ => self.index,
        };
        if next < self.len {
            self.index = next;
        }
    }
}
