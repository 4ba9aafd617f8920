//! Tool registry - name to tool lookup and the descriptor catalog

use std::collections::HashMap;

use super::{CalculatorTool, FileSystemTool, Tool, WeatherTool};
use crate::llm::ToolDescriptor;

/// Registered tools, in registration order.
///
/// Filled once at startup and read-only afterwards, so no locking.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry (for custom tool sets)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in tools
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CalculatorTool));
        registry.register(Box::new(WeatherTool));
        registry.register(Box::new(FileSystemTool));
        registry
    }

    /// Add a tool. Re-registering a name replaces the earlier tool in place.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&slot) => {
                log::debug!("Replacing registered tool {}", name);
                self.tools[slot] = tool;
            }
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Tool> {
        self.index.get(name).map(|&slot| self.tools[slot].as_ref())
    }

    /// Descriptors for every tool, in registration order
    pub fn all_descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    pub fn all_tools(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
