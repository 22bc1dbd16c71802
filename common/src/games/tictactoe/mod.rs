mod board;
mod bot_controller;
mod game_state;
mod status;
mod types;
mod win_detector;

pub use board::{Board, get_available_moves, is_valid_move};
pub use bot_controller::{BotInput, calculate_move};
pub use game_state::TicTacToeGameState;
pub use status::status_text;
pub use types::{
    AiTicket, BOARD_SIZE, CENTER, CORNERS, GameMode, GameStatus, Mark, Player, SIDES, WinningLine,
};
pub use win_detector::{WIN_PATTERNS, check_win, check_win_with_line, would_win};
