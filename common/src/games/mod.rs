mod session_rng;
mod settings;

pub mod tictactoe;

pub use session_rng::SessionRng;
pub use settings::TicTacToeSettings;
