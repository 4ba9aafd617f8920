//! Interactive read-eval loop around the turn orchestrator

use std::io::Write;

use colored::Colorize;
use eyre::Result;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::commands::ReplCommand;
use super::display;
use toolchat::llm::LlmClient;
use toolchat::orchestrator::{TurnObserver, TurnOrchestrator};

/// Read lines until exit, EOF or Ctrl-C. An interrupt during a turn
/// abandons that turn; the orchestrator rolls its history back.
pub async fn run<L>(orchestrator: &mut TurnOrchestrator<L>, observer: &dyn TurnObserver, verbose: bool) -> Result<()>
where
    L: LlmClient + ?Sized,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", ">>>".cyan().bold());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        // EOF
        let Some(line) = line else {
            println!();
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Exit => break,
            ReplCommand::Empty => continue,
            ReplCommand::Help => display::print_help(orchestrator.registry()),
            ReplCommand::Clear => {
                orchestrator.clear();
                display::print_cleared();
            }
            ReplCommand::Turn(text) => {
                let interrupted = tokio::select! {
                    outcome = orchestrator.run_turn(&text) => {
                        if let Err(e) = outcome {
                            warn!("Turn failed: {}", e);
                            observer.on_error(&e.to_string());
                        }
                        false
                    }
                    _ = tokio::signal::ctrl_c() => true,
                };

                if interrupted {
                    info!("Turn interrupted by user");
                    println!();
                    break;
                }

                if verbose {
                    display::print_usage(orchestrator.usage());
                }
            }
        }
    }

    display::print_goodbye();
    Ok(())
}
