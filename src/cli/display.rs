//! Terminal rendering and the console observer.

use colored::*;
use serde_json::Value;

use toolchat::ToolRegistry;
use toolchat::llm::Usage;
use toolchat::orchestrator::TurnObserver;
use toolchat::tools::ToolArguments;

pub fn print_welcome() {
    println!("{}", "toolchat - LLM assistant with tool support".blue().bold());
    println!("Type your message, or use special commands:");
    println!("  {}", "help, tools, clear, exit, quit".cyan());
    println!();
}

pub fn print_help(registry: &ToolRegistry) {
    let width = registry.all_tools().map(|t| t.name().len()).max().unwrap_or(0);
    println!("{}", "Available Tools".bold());
    for tool in registry.all_tools() {
        let name = format!("{:<width$}", tool.name(), width = width);
        println!("  {}  {}", name.cyan(), tool.description().green());
    }
}

pub fn print_cleared() {
    println!("{}", "Conversation history cleared.".green());
}

pub fn print_usage(usage: &Usage) {
    println!(
        "{}",
        format!(
            "tokens: {} prompt + {} completion = {}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total()
        )
        .bright_black()
    );
}

pub fn print_goodbye() {
    println!("{}", "Goodbye!".blue().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message.red());
}

/// Render one argument value without JSON quoting for plain strings
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prints tool activity and answers as they happen
pub struct ConsoleObserver;

impl TurnObserver for ConsoleObserver {
    fn on_tool_call_started(&self, name: &str, arguments: &ToolArguments) {
        println!("{} {}", "Calling tool:".magenta().bold(), name.cyan().bold());
        for (key, value) in arguments {
            println!("  {} = {}", key.magenta(), render_value(value).yellow());
        }
    }

    fn on_tool_call_finished(&self, name: &str, result: &str) {
        println!("{} {}", "Tool result".yellow().bold(), format!("({})", name).bright_black());
        for line in result.lines() {
            println!("  {}", line.bright_black());
        }
    }

    fn on_final_response(&self, text: &str) {
        println!("{}", "Assistant".green().bold());
        println!("{}", text);
        println!();
    }

    fn on_error(&self, message: &str) {
        print_error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("Paris")), "Paris");
        assert_eq!(render_value(&json!(3)), "3");
        assert_eq!(render_value(&json!({"a": true})), r#"{"a":true}"#);
    }
}
