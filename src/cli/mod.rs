//! CLI module for toolchat - command-line arguments and the interactive shell.

pub mod commands;
pub mod display;
pub mod repl;

pub use commands::Cli;
