use std::fmt;

use super::types::{BOARD_SIZE, Mark};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; BOARD_SIZE],
        }
    }

    pub fn from_cells(cells: [Mark; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    /// Out-of-range indices read as `None`.
    pub fn get(&self, idx: usize) -> Option<Mark> {
        self.cells.get(idx).copied()
    }

    pub(crate) fn set(&mut self, idx: usize, mark: Mark) {
        self.cells[idx] = mark;
    }

    /// Copy of the board with `mark` placed at `idx`. The receiver is untouched.
    pub fn with_mark(&self, idx: usize, mark: Mark) -> Board {
        let mut board = *self;
        board.cells[idx] = mark;
        board
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_empty_cell(&self, idx: usize) -> bool {
        self.get(idx) == Some(Mark::Empty)
    }

    pub fn available_moves(&self) -> Vec<usize> {
        get_available_moves(self)
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(idx, _)| idx)
        .collect()
}

pub fn is_valid_move(board: &Board, idx: usize) -> bool {
    if idx >= BOARD_SIZE {
        return false;
    }
    board.cells[idx] == Mark::Empty
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            let line: Vec<String> = row.iter().map(|cell| cell.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
