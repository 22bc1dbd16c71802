use common::engine::session::GameBroadcaster;
use common::games::tictactoe::{TicTacToeGameState, status_text};

/// Prints the board after every state change a session reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleBroadcaster;

impl GameBroadcaster for ConsoleBroadcaster {
    async fn broadcast_state(&self, state: TicTacToeGameState) {
        println!("{}", render(&state));
    }
}

pub fn render(state: &TicTacToeGameState) -> String {
    let mut out = String::new();

    for (row_idx, row) in state.board().cells().chunks(3).enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, mark)| {
                let idx = row_idx * 3 + col;
                let symbol = if mark.is_empty() {
                    char::from_digit(idx as u32, 10).unwrap_or('.')
                } else {
                    mark.symbol()
                };
                if state.is_winning_cell(idx) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
        if row_idx < 2 {
            out.push_str("---+---+---\n");
        }
    }

    out.push_str(&format!("[{}] {}", state.mode(), status_text(state)));
    out
}
