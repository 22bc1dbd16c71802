use super::board::Board;
use super::types::{Mark, Player, WinningLine};

/// Rows, then columns, then the two diagonals. Scan order is fixed.
pub const WIN_PATTERNS: [WinningLine; 8] = [
    WinningLine([0, 1, 2]),
    WinningLine([3, 4, 5]),
    WinningLine([6, 7, 8]),
    WinningLine([0, 3, 6]),
    WinningLine([1, 4, 7]),
    WinningLine([2, 5, 8]),
    WinningLine([0, 4, 8]),
    WinningLine([2, 4, 6]),
];

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|(player, _)| player)
}

pub fn check_win_with_line(board: &Board) -> Option<(Player, WinningLine)> {
    let cells = board.cells();

    for line in WIN_PATTERNS {
        let [a, b, c] = line.cells();
        let mark = cells[a];
        if mark == Mark::Empty {
            continue;
        }
        if mark == cells[b] && mark == cells[c] {
            return mark.player().map(|player| (player, line));
        }
    }

    None
}

/// Whether `player` taking `idx` would complete a line. Evaluated on a copy.
pub fn would_win(board: &Board, idx: usize, player: Player) -> bool {
    if !board.is_empty_cell(idx) {
        return false;
    }
    check_win(&board.with_mark(idx, player.mark())) == Some(player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_on_empty_board() {
        assert_eq!(check_win_with_line(&Board::new()), None);
    }

    #[test]
    fn test_every_pattern_is_detected_for_both_players() {
        for player in [Player::X, Player::O] {
            for line in WIN_PATTERNS {
                let mut board = Board::new();
                for idx in line.cells() {
                    board.set(idx, player.mark());
                }

                assert_eq!(check_win_with_line(&board), Some((player, line)));
            }
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = Board::new()
            .with_mark(0, Mark::X)
            .with_mark(1, Mark::O)
            .with_mark(2, Mark::X);

        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_would_win_does_not_touch_board() {
        let board = Board::new().with_mark(0, Mark::O).with_mark(1, Mark::O);

        assert!(would_win(&board, 2, Player::O));
        assert!(!would_win(&board, 2, Player::X));
        assert!(board.is_empty_cell(2));
    }

    #[test]
    fn test_would_win_on_occupied_cell_is_false() {
        let board = Board::new()
            .with_mark(0, Mark::O)
            .with_mark(1, Mark::O)
            .with_mark(2, Mark::X);

        assert!(!would_win(&board, 2, Player::O));
    }
}
