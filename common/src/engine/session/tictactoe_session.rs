use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::games::tictactoe::{AiTicket, BotInput, GameMode, TicTacToeGameState, calculate_move};
use crate::games::{SessionRng, TicTacToeSettings};
use crate::{SessionId, log};
use super::GameBroadcaster;

struct PendingAiMove {
    ticket: AiTicket,
    handle: JoinHandle<Option<usize>>,
}

/// Drives one game: applies human moves, runs the delayed AI reply on the
/// tokio runtime, and makes sure a reset or mode switch supersedes it.
pub struct TicTacToeSession<B: GameBroadcaster> {
    session_id: SessionId,
    game_state: Arc<Mutex<TicTacToeGameState>>,
    rng: Arc<Mutex<SessionRng>>,
    ai_delay: Duration,
    broadcaster: B,
    pending_ai: Option<PendingAiMove>,
}

impl<B: GameBroadcaster> TicTacToeSession<B> {
    pub fn new(session_id: SessionId, settings: &TicTacToeSettings, broadcaster: B) -> Self {
        let rng = SessionRng::from_optional_seed(settings.seed);
        log!(
            "[session:{}] Created in {} mode, ai delay {}ms, seed {}",
            session_id,
            settings.mode,
            settings.ai_delay_ms,
            rng.seed()
        );

        Self {
            session_id,
            game_state: Arc::new(Mutex::new(TicTacToeGameState::new(settings.mode))),
            rng: Arc::new(Mutex::new(rng)),
            ai_delay: settings.ai_delay(),
            broadcaster,
            pending_ai: None,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub async fn snapshot(&self) -> TicTacToeGameState {
        self.game_state.lock().await.clone()
    }

    pub fn is_ai_pending(&self) -> bool {
        self.pending_ai
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// Human move. Refused while an AI move is pending, after game over, or
    /// on an occupied cell.
    pub async fn apply_move(&mut self, idx: usize) -> bool {
        let mut game_state = self.game_state.lock().await;

        if game_state.is_ai_engaged() {
            log!("[session:{}] Rejected move at {}: AI move pending", self.session_id, idx);
            return false;
        }

        let player = game_state.current_player();
        if let Err(e) = game_state.try_apply_move(idx) {
            log!("[session:{}] Player {} failed to place mark at {}: {}", self.session_id, player, idx, e);
            return false;
        }
        log!("[session:{}] Player {} placed mark at {}", self.session_id, player, idx);

        let ticket = game_state.pending_ai_ticket();
        let snapshot = game_state.clone();
        drop(game_state);

        self.broadcaster.broadcast_state(snapshot).await;

        if let Some(ticket) = ticket {
            self.schedule_ai_move(ticket);
        }

        true
    }

    pub async fn reset(&mut self) {
        self.cancel_pending_ai();

        let mut game_state = self.game_state.lock().await;
        game_state.reset();
        let snapshot = game_state.clone();
        drop(game_state);

        log!("[session:{}] Reset (epoch {})", self.session_id, snapshot.epoch());
        self.broadcaster.broadcast_state(snapshot).await;
    }

    pub async fn set_mode(&mut self, mode: GameMode) {
        self.cancel_pending_ai();

        let mut game_state = self.game_state.lock().await;
        game_state.set_mode(mode);
        let snapshot = game_state.clone();
        drop(game_state);

        log!("[session:{}] Switched to {} mode", self.session_id, mode);
        self.broadcaster.broadcast_state(snapshot).await;
    }

    /// Waits for the pending AI move, if any, and returns the cell it took.
    pub async fn wait_for_ai(&mut self) -> Option<usize> {
        let pending = self.pending_ai.take()?;

        match pending.handle.await {
            Ok(result) => result,
            Err(e) => {
                log!("[session:{}] AI task ended without a move: {}", self.session_id, e);
                None
            }
        }
    }

    fn schedule_ai_move(&mut self, ticket: AiTicket) {
        self.cancel_pending_ai();

        let session_id = self.session_id.clone();
        let game_state = Arc::clone(&self.game_state);
        let rng = Arc::clone(&self.rng);
        let broadcaster = self.broadcaster.clone();
        let delay = self.ai_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            play_ai_turn(&session_id, &game_state, &rng, ticket, &broadcaster).await
        });

        self.pending_ai = Some(PendingAiMove { ticket, handle });
    }

    fn cancel_pending_ai(&mut self) {
        let Some(pending) = self.pending_ai.take() else {
            return;
        };

        if !pending.handle.is_finished() {
            pending.handle.abort();
            log!(
                "[session:{}] Cancelled pending AI move (epoch {})",
                self.session_id,
                pending.ticket.epoch()
            );
        }
    }
}

impl<B: GameBroadcaster> Drop for TicTacToeSession<B> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_ai.take() {
            pending.handle.abort();
        }
    }
}

async fn play_ai_turn<B: GameBroadcaster>(
    session_id: &SessionId,
    game_state: &Mutex<TicTacToeGameState>,
    rng: &Mutex<SessionRng>,
    ticket: AiTicket,
    broadcaster: &B,
) -> Option<usize> {
    let mut state = game_state.lock().await;

    if state.pending_ai_ticket() != Some(ticket) {
        log!("[session:{}] Dropped stale AI move (epoch {})", session_id, ticket.epoch());
        return None;
    }

    let bot_input = BotInput::from_game_state(&state);
    let calculated_move = {
        let mut rng = rng.lock().await;
        calculate_move(&bot_input, &mut rng)
    };

    let Some(idx) = calculated_move else {
        log!("[session:{}] AI found no free cell", session_id);
        return None;
    };

    if !state.apply_ai_move(ticket, idx) {
        log!("[session:{}] AI failed to place mark at {}", session_id, idx);
        return None;
    }
    log!("[session:{}] AI placed mark at {}", session_id, idx);

    let snapshot = state.clone();
    drop(state);
    broadcaster.broadcast_state(snapshot).await;

    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::NoopBroadcaster;
    use crate::games::tictactoe::{Board, Mark, Player};

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        states: Arc<std::sync::Mutex<Vec<TicTacToeGameState>>>,
    }

    impl RecordingBroadcaster {
        fn recorded(&self) -> Vec<TicTacToeGameState> {
            self.states.lock().unwrap().clone()
        }
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, state: TicTacToeGameState) {
            self.states.lock().unwrap().push(state);
        }
    }

    fn vs_ai_settings() -> TicTacToeSettings {
        TicTacToeSettings {
            mode: GameMode::VsAi,
            ai_delay_ms: 550,
            seed: Some(11),
        }
    }

    fn create_session<B: GameBroadcaster>(broadcaster: B) -> TicTacToeSession<B> {
        TicTacToeSession::new(SessionId::new("test"), &vs_ai_settings(), broadcaster)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_moves_only_after_delay() {
        let mut session = create_session(NoopBroadcaster);

        assert!(session.apply_move(0).await);
        tokio::time::sleep(Duration::from_millis(549)).await;

        let state = session.snapshot().await;
        assert!(state.is_ai_engaged());
        assert_eq!(state.board().get(4), Some(Mark::Empty));

        assert_eq!(session.wait_for_ai().await, Some(4));

        let state = session.snapshot().await;
        assert_eq!(state.board().get(4), Some(Mark::O));
        assert_eq!(state.current_player(), Player::X);
        assert!(!state.is_ai_engaged());
        assert!(!session.is_ai_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_move_rejected_while_ai_pending() {
        let mut session = create_session(NoopBroadcaster);

        assert!(session.apply_move(0).await);
        assert!(session.is_ai_pending());
        assert!(!session.apply_move(1).await);

        assert_eq!(session.snapshot().await.board().get(1), Some(Mark::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_ai_move() {
        let mut session = create_session(NoopBroadcaster);
        assert!(session.apply_move(0).await);

        session.reset().await;
        tokio::time::sleep(Duration::from_secs(2)).await;

        let state = session.snapshot().await;
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.current_player(), Player::X);
        assert!(!state.is_ai_engaged());
        assert!(!session.is_ai_pending());
        assert_eq!(session.wait_for_ai().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_switch_cancels_pending_ai_move() {
        let mut session = create_session(NoopBroadcaster);
        assert!(session.apply_move(0).await);

        session.set_mode(GameMode::TwoPlayer).await;
        tokio::time::sleep(Duration::from_secs(2)).await;

        let state = session.snapshot().await;
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.mode(), GameMode::TwoPlayer);

        assert!(session.apply_move(0).await);
        assert!(session.apply_move(1).await);
        assert!(!session.is_ai_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_game_after_reset_gets_its_own_ai_move() {
        let mut session = create_session(NoopBroadcaster);
        assert!(session.apply_move(0).await);
        session.reset().await;

        assert!(session.apply_move(4).await);
        let ai_move = session.wait_for_ai().await;

        let state = session.snapshot().await;
        assert!(matches!(ai_move, Some(0) | Some(2) | Some(6) | Some(8)));
        assert_eq!(state.board().available_moves().len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_broadcasts_human_and_ai_moves() {
        let broadcaster = RecordingBroadcaster::default();
        let mut session = create_session(broadcaster.clone());

        assert!(session.apply_move(0).await);
        session.wait_for_ai().await;

        let states = broadcaster.recorded();
        assert_eq!(states.len(), 2);
        assert!(states[0].is_ai_engaged());
        assert_eq!(states[1].board().get(4), Some(Mark::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_wins_and_game_stops() {
        let mut session = create_session(NoopBroadcaster);

        for idx in [0, 1, 3] {
            assert!(session.apply_move(idx).await);
            session.wait_for_ai().await;
        }

        let state = session.snapshot().await;
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(Player::O));
        assert!(!session.apply_move(8).await);
    }
}
