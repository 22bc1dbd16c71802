pub mod tictactoe_session;

use std::future::Future;

use crate::games::tictactoe::TicTacToeGameState;

pub use tictactoe_session::TicTacToeSession;

/// Receives a snapshot after every state change a session makes, including
/// AI moves that land while the caller is not awaiting anything.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, state: TicTacToeGameState) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcaster;

impl GameBroadcaster for NoopBroadcaster {
    async fn broadcast_state(&self, _state: TicTacToeGameState) {}
}
