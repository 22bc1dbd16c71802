use crate::games::SessionRng;
use super::board::{Board, get_available_moves};
use super::game_state::TicTacToeGameState;
use super::types::{CENTER, CORNERS, Player, SIDES};
use super::win_detector::would_win;

pub struct BotInput {
    pub board: Board,
    pub bot_player: Player,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            bot_player: state.current_player(),
        }
    }
}

/// One-ply heuristic: win now, block the opponent, center, random corner,
/// then the lowest free side. Returns `None` only when the board is full.
pub fn calculate_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let board = &input.board;
    let available_moves = get_available_moves(board);

    if available_moves.is_empty() {
        return None;
    }

    if let Some(idx) = find_winning_move(board, input.bot_player, &available_moves) {
        return Some(idx);
    }

    if let Some(idx) = find_winning_move(board, input.bot_player.opponent(), &available_moves) {
        return Some(idx);
    }

    if board.is_empty_cell(CENTER) {
        return Some(CENTER);
    }

    if let Some(idx) = pick_random_corner(board, rng) {
        return Some(idx);
    }

    SIDES
        .into_iter()
        .find(|&idx| board.is_empty_cell(idx))
        .or_else(|| available_moves.first().copied())
}

fn find_winning_move(board: &Board, player: Player, moves: &[usize]) -> Option<usize> {
    moves.iter().copied().find(|&idx| would_win(board, idx, player))
}

fn pick_random_corner(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    let corners: Vec<usize> = CORNERS
        .into_iter()
        .filter(|&idx| board.is_empty_cell(idx))
        .collect();

    if corners.is_empty() {
        return None;
    }
    Some(corners[rng.random_range(0..corners.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    fn board_from(marks: &str) -> Board {
        let mut cells = [Mark::Empty; 9];
        for (idx, ch) in marks.chars().filter(|c| !c.is_whitespace()).enumerate() {
            cells[idx] = match ch {
                'X' => Mark::X,
                'O' => Mark::O,
                _ => Mark::Empty,
            };
        }
        Board::from_cells(cells)
    }

    fn bot_move(board: Board) -> Option<usize> {
        let input = BotInput {
            board,
            bot_player: Player::O,
        };
        calculate_move(&input, &mut SessionRng::new(7))
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = board_from("XX. OO. ...");

        assert_eq!(bot_move(board), Some(5));
    }

    #[test]
    fn test_prefers_win_over_block() {
        let board = board_from("XX. ... OO.");

        assert_eq!(bot_move(board), Some(8));
    }

    #[test]
    fn test_blocks_opponent_row() {
        let board = board_from("XX. .O. ...");

        assert_eq!(bot_move(board), Some(2));
    }

    #[test]
    fn test_blocks_lowest_threat_first() {
        let board = board_from("X.X .O. X..");

        assert_eq!(bot_move(board), Some(1));
    }

    #[test]
    fn test_takes_center_on_empty_board() {
        assert_eq!(bot_move(Board::new()), Some(4));
    }

    #[test]
    fn test_takes_a_free_corner_when_center_is_gone() {
        let board = board_from("X.. .X. ..O");

        for seed in 0..32 {
            let input = BotInput {
                board,
                bot_player: Player::O,
            };
            let idx = calculate_move(&input, &mut SessionRng::new(seed));

            assert!(matches!(idx, Some(2) | Some(6)), "seed {} picked {:?}", seed, idx);
        }
    }

    #[test]
    fn test_corner_choice_is_reproducible_for_a_seed() {
        let board = board_from("... .X. ...");
        let input = BotInput {
            board,
            bot_player: Player::O,
        };

        let first = calculate_move(&input, &mut SessionRng::new(99));
        let second = calculate_move(&input, &mut SessionRng::new(99));

        assert_eq!(first, second);
    }

    #[test]
    fn test_falls_back_to_lowest_side() {
        let board = board_from("XOX .X. OXO");

        assert_eq!(bot_move(board), Some(3));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board_from("XOX XOO OXX");

        assert_eq!(bot_move(board), None);
    }

    #[test]
    fn test_does_not_look_past_one_ply() {
        // Only a side is safe here against a fork, but the heuristic takes a corner.
        let board = board_from("X.. .O. ..X");

        assert!(matches!(bot_move(board), Some(2) | Some(6)));
    }
}
