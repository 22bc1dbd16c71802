mod command;
mod renderer;
mod settings;

use clap::Parser;
use common::engine::session::TicTacToeSession;
use common::id_generator::generate_session_id;
use common::{log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use command::{Command, HELP_TEXT, parse_command};
use renderer::{ConsoleBroadcaster, render};
use settings::{Args, apply_overrides, get_config_manager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.log {
        let prefix = args.use_log_prefix.then(|| "TicTacToe".to_string());
        logger::init_logger(prefix);
    }

    let config_manager = get_config_manager(&args);
    let settings = apply_overrides(config_manager.get_config()?, &args)?;
    if args.save_config {
        config_manager.set_config(&settings)?;
        log!("Saved settings");
    }

    let mut session = TicTacToeSession::new(generate_session_id(), &settings, ConsoleBroadcaster);

    println!("{}", HELP_TEXT);
    println!();
    println!("{}", render(&session.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Place(idx) => {
                if !session.snapshot().await.can_accept_human_move(idx) {
                    println!("Cell {} is not available", idx);
                    continue;
                }
                if session.apply_move(idx).await && session.is_ai_pending() {
                    session.wait_for_ai().await;
                }
            }
            Command::Reset => session.reset().await,
            Command::SetMode(mode) => session.set_mode(mode).await,
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => break,
        }
    }

    log!("[session:{}] Finished", session.session_id());
    Ok(())
}
