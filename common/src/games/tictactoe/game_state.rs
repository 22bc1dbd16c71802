use crate::games::SessionRng;
use super::board::{Board, is_valid_move};
use super::bot_controller::{BotInput, calculate_move};
use super::types::{AiTicket, BOARD_SIZE, GameMode, GameStatus, Player, WinningLine};
use super::win_detector::check_win_with_line;

/// A single game session's board and turn state. Mutated only through
/// [`apply_move`](Self::apply_move) and [`apply_ai_move`](Self::apply_ai_move);
/// `reset` and `set_mode` replace it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGameState {
    board: Board,
    current_player: Player,
    winner: Option<Player>,
    winning_line: Option<WinningLine>,
    game_over: bool,
    ai_engaged: bool,
    mode: GameMode,
    epoch: u64,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

impl TicTacToeGameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            winner: None,
            winning_line: None,
            game_over: false,
            ai_engaged: false,
            mode,
            epoch: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_ai_engaged(&self) -> bool {
        self.ai_engaged
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn reset(&mut self) {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            ..Self::new(self.mode)
        };
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn apply_move(&mut self, idx: usize) -> bool {
        self.try_apply_move(idx).is_ok()
    }

    pub fn try_apply_move(&mut self, idx: usize) -> Result<(), String> {
        if idx >= BOARD_SIZE {
            return Err("Position out of bounds".to_string());
        }

        if self.game_over {
            return Err("Game is already over".to_string());
        }

        if !is_valid_move(&self.board, idx) {
            return Err("Cell is already marked".to_string());
        }

        self.board.set(idx, self.current_player.mark());
        self.check_terminal();

        if !self.game_over {
            self.switch_turn();
            if self.mode.is_vs_ai() && self.current_player == Player::O {
                self.ai_engaged = true;
            }
        }

        Ok(())
    }

    /// What a front-end checks before forwarding a click: the game is live,
    /// no AI move is in flight, and the cell is free.
    pub fn can_accept_human_move(&self, idx: usize) -> bool {
        !self.game_over && !self.ai_engaged && is_valid_move(&self.board, idx)
    }

    pub fn pending_ai_ticket(&self) -> Option<AiTicket> {
        self.ai_engaged.then_some(AiTicket { epoch: self.epoch })
    }

    pub fn apply_ai_move(&mut self, ticket: AiTicket, idx: usize) -> bool {
        if ticket.epoch != self.epoch || !self.ai_engaged || self.game_over {
            return false;
        }

        if !is_valid_move(&self.board, idx) {
            return false;
        }

        self.board.set(idx, Player::O.mark());
        self.check_terminal();
        self.ai_engaged = false;

        if !self.game_over {
            self.current_player = Player::X;
        }

        true
    }

    /// Selects and applies the pending AI move without any delay.
    pub fn play_ai_turn(&mut self, rng: &mut SessionRng) -> Option<usize> {
        let ticket = self.pending_ai_ticket()?;
        let idx = calculate_move(&BotInput::from_game_state(self), rng)?;

        self.apply_ai_move(ticket, idx).then_some(idx)
    }

    pub fn status(&self) -> GameStatus {
        match (self.game_over, self.winner) {
            (false, _) => GameStatus::InProgress,
            (true, Some(Player::X)) => GameStatus::XWon,
            (true, Some(Player::O)) => GameStatus::OWon,
            (true, None) => GameStatus::Draw,
        }
    }

    pub fn is_winning_cell(&self, idx: usize) -> bool {
        self.winning_line.is_some_and(|line| line.contains(idx))
    }

    fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    fn check_terminal(&mut self) {
        if let Some((winner, line)) = check_win_with_line(&self.board) {
            self.winner = Some(winner);
            self.winning_line = Some(line);
            self.game_over = true;
            return;
        }

        if self.board.is_full() {
            self.winner = None;
            self.winning_line = None;
            self.game_over = true;
        }
    }
}
