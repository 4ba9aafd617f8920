//! CLI definitions using clap, plus parsing of the interactive commands.
//!
//! Inside the REPL:
//! - exit / quit: leave
//! - help / tools: list the registered tools
//! - clear: reset the conversation
//! - anything else: a chat turn

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// toolchat - chat with an LLM that can call local tools
#[derive(Parser, Debug)]
#[command(name = "toolchat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output (token usage after each turn)
    #[arg(short, long)]
    pub verbose: bool,

    /// Model identifier, overrides config and OPENAI_MODEL
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature, overrides config and OPENAI_TEMPERATURE
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Maximum tool rounds per turn
    #[arg(long)]
    pub max_rounds: Option<usize>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Command-line values win over config file and environment
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_rounds) = self.max_rounds {
            config.session.max_rounds = Some(max_rounds);
        }
    }
}

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Help,
    Clear,
    Empty,
    Turn(String),
}

impl ReplCommand {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "" => ReplCommand::Empty,
            "exit" | "quit" => ReplCommand::Exit,
            "help" | "tools" => ReplCommand::Help,
            "clear" => ReplCommand::Clear,
            _ => ReplCommand::Turn(trimmed.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("exit"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("  QUIT \n"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("Tools"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_turn_keeps_case() {
        assert_eq!(
            ReplCommand::parse("What is 15 * (4 + 3)?\n"),
            ReplCommand::Turn("What is 15 * (4 + 3)?".to_string())
        );
        assert_eq!(
            ReplCommand::parse("clear the table please"),
            ReplCommand::Turn("clear the table please".to_string())
        );
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["toolchat", "-v", "--model", "gpt-4o", "--max-rounds", "4"]);
        assert!(cli.is_verbose());
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.max_rounds, Some(4));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["toolchat", "--temperature", "0.1", "--max-rounds", "3"]);
        let mut config = Config::default();
        cli.apply_to(&mut config);

        assert!((config.llm.temperature - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.session.max_rounds, Some(3));
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
