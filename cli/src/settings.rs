use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::TicTacToeSettings;
use common::games::tictactoe::GameMode;

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    #[value(name = "2p")]
    TwoPlayer,
    Ai,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TwoPlayer => GameMode::TwoPlayer,
            ModeArg::Ai => GameMode::VsAi,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tictactoe_cli", about = "Tic-tac-toe for two players or against the computer")]
pub struct Args {
    /// YAML settings file; defaults to tictactoe_config.yaml next to the binary
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Seed for the computer's corner choice
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub ai_delay_ms: Option<u64>,

    /// Write engine logs to stderr
    #[arg(long)]
    pub log: bool,

    #[arg(long)]
    pub use_log_prefix: bool,

    /// Write the effective settings to the config file and continue
    #[arg(long)]
    pub save_config: bool,
}

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    args: &Args,
) -> ConfigManager<FileContentConfigProvider, TicTacToeSettings, YamlConfigSerializer> {
    let path = args.config.clone().unwrap_or_else(get_config_path);
    ConfigManager::from_yaml_file(path)
}

/// Command-line flags win over the file.
pub fn apply_overrides(mut settings: TicTacToeSettings, args: &Args) -> Result<TicTacToeSettings, String> {
    if let Some(mode) = args.mode {
        settings.mode = mode.into();
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(ai_delay_ms) = args.ai_delay_ms {
        settings.ai_delay_ms = ai_delay_ms;
    }

    settings.validate()?;
    Ok(settings)
}
