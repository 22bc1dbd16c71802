use common::games::tictactoe::{BOARD_SIZE, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Reset,
    SetMode(GameMode),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Empty command".to_string());
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "reset" | "r" => Command::Reset,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "mode" | "m" => {
            let mode = parts
                .next()
                .ok_or_else(|| "Usage: mode <2p|ai>".to_string())?;
            Command::SetMode(parse_mode(mode)?)
        }
        cell => {
            let idx: usize = cell
                .parse()
                .map_err(|_| format!("Unknown command: {}", cell))?;
            if idx >= BOARD_SIZE {
                return Err(format!("Cell must be between 0 and {}", BOARD_SIZE - 1));
            }
            Command::Place(idx)
        }
    };

    if parts.next().is_some() {
        return Err(format!("Unexpected arguments after {}", head));
    }

    Ok(command)
}

fn parse_mode(mode: &str) -> Result<GameMode, String> {
    match mode.to_ascii_lowercase().as_str() {
        "2p" | "two" | "two_player" => Ok(GameMode::TwoPlayer),
        "ai" | "vs_ai" => Ok(GameMode::VsAi),
        other => Err(format!("Unknown mode: {} (expected 2p or ai)", other)),
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  0-8        place a mark (cells numbered left to right, top to bottom)
  reset      start a new game
  mode 2p    two players on one terminal
  mode ai    play X against the computer
  quit       leave";
