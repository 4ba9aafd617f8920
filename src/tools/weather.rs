//! get_weather tool - canned weather report

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolArguments, ToolError, required_str};

pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &'static str {
        "get_weather"
    }

    fn description(&self) -> &'static str {
        "Provides the current weather for a specified city."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city name, e.g., 'San Francisco'."
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let location = required_str(arguments, "location")?;
        Ok(format!(
            "The weather in {} is currently sunny and 25°C (77°F).",
            location
        ))
    }
}
