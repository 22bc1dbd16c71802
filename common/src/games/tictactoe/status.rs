use super::game_state::TicTacToeGameState;
use super::types::{GameMode, GameStatus, Player};

pub fn status_text(state: &TicTacToeGameState) -> String {
    let vs_ai = state.mode() == GameMode::VsAi;

    match state.status() {
        GameStatus::XWon => "Player 1 (X) wins!".to_string(),
        GameStatus::OWon if vs_ai => "AI (O) wins!".to_string(),
        GameStatus::OWon => "Player 2 (O) wins!".to_string(),
        GameStatus::Draw => "It's a tie!".to_string(),
        GameStatus::InProgress => match state.current_player() {
            Player::X => "Player 1 (X), your move!".to_string(),
            Player::O if vs_ai => "AI is thinking...".to_string(),
            Player::O => "Player 2 (O), your move!".to_string(),
        },
    }
}
