use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::defaults::{DEFAULT_AI_DELAY_MS, MAX_AI_DELAY_MS};
use super::tictactoe::GameMode;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TicTacToeSettings {
    pub mode: GameMode,
    pub ai_delay_ms: u64,
    /// Seeds the AI's corner choice. Random per session when absent.
    pub seed: Option<u64>,
}

impl TicTacToeSettings {
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

impl Default for TicTacToeSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::TwoPlayer,
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            seed: None,
        }
    }
}

impl Validate for TicTacToeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.ai_delay_ms > MAX_AI_DELAY_MS {
            return Err(format!(
                "ai_delay_ms must not exceed {} (got {})",
                MAX_AI_DELAY_MS, self.ai_delay_ms
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = TicTacToeSettings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.ai_delay(), Duration::from_millis(550));
    }

    #[test]
    fn test_zero_delay_is_allowed() {
        let settings = TicTacToeSettings {
            ai_delay_ms: 0,
            ..TicTacToeSettings::default()
        };

        assert!(settings.validate().is_ok());
    }
}
