//! list_files tool - list the entries of a directory

use std::io::ErrorKind;

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolArguments, ToolError, optional_str};

pub struct FileSystemTool;

#[async_trait]
impl Tool for FileSystemTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        "Lists all files and directories in a specified path."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory path to list. Defaults to the current directory."
                }
            },
            "required": []
        })
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let path = optional_str(arguments, "path")?.unwrap_or(".");

        match list_entries(path).await {
            Ok(entries) if entries.is_empty() => Ok(format!("The directory '{}' is empty.", path)),
            Ok(entries) => Ok(format!("Files in '{}':\n- {}", path, entries.join("\n- "))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Ok(format!("Error: The directory '{}' does not exist.", path))
            }
            Err(e) => Ok(format!("An unexpected error occurred: {}", e)),
        }
    }
}

/// Sorted entry names, directories suffixed with `/`
async fn list_entries(path: &str) -> std::io::Result<Vec<String>> {
    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(path).await?;

    while let Some(entry) = dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        entries.push(if is_dir { format!("{}/", name) } else { name });
    }

    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn path_args(path: &str) -> ToolArguments {
        match json!({ "path": path }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_list_files_sorted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("zebra.txt"), "").unwrap();
        std::fs::write(dir.path().join("apple.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("banana")).unwrap();

        let path = dir.path().to_string_lossy().to_string();
        let result = FileSystemTool.execute(&path_args(&path)).await.unwrap();

        assert_eq!(
            result,
            format!("Files in '{}':\n- apple.txt\n- banana/\n- zebra.txt", path)
        );
    }

    #[tokio::test]
    async fn test_list_files_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();

        let result = FileSystemTool.execute(&path_args(&path)).await.unwrap();
        assert_eq!(result, format!("The directory '{}' is empty.", path));
    }

    #[tokio::test]
    async fn test_list_files_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent").to_string_lossy().to_string();

        let result = FileSystemTool.execute(&path_args(&path)).await.unwrap();
        assert_eq!(result, format!("Error: The directory '{}' does not exist.", path));
    }

    #[tokio::test]
    async fn test_list_files_on_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "content").unwrap();

        let result = FileSystemTool
            .execute(&path_args(&file.to_string_lossy()))
            .await
            .unwrap();
        assert!(result.starts_with("An unexpected error occurred:"));
    }

    #[tokio::test]
    async fn test_list_files_default_path() {
        let result = FileSystemTool.execute(&ToolArguments::new()).await.unwrap();
        // The crate root always has entries
        assert!(result.starts_with("Files in '.':"));
    }
}
