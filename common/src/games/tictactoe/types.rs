use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 9;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn player(&self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn mark(&self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark().symbol())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    TwoPlayer,
    VsAi,
}

impl GameMode {
    pub fn is_vs_ai(&self) -> bool {
        *self == GameMode::VsAi
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::TwoPlayer => write!(f, "two player"),
            GameMode::VsAi => write!(f, "vs AI"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

/// Three board indices that win when they hold the same mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WinningLine(pub [usize; 3]);

impl WinningLine {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.0.contains(&idx)
    }
}

/// Identifies one pending AI move. Any reset or mode switch bumps the game's
/// epoch, after which the ticket no longer applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiTicket {
    pub(crate) epoch: u64,
}

impl AiTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
