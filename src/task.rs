//! Task model, file loader, and template writer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One unit of work submitted to the pipeline. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_outcome: Option<String>,
}

impl Task {
    pub fn from_text(text: impl Into<String>) -> Self {
        Task {
            task: text.into(),
            context: None,
            constraints: None,
            priority: None,
            expected_outcome: None,
        }
    }
}

/// Load a task from a file.
///
/// `.yaml`/`.yml` and `.json` paths are parsed as structured data and
/// validated; any other path is read whole, trimmed, and becomes the task
/// text directly.
pub fn load_task(path: &Path) -> Result<Task, Error> {
    let raw = fs::read_to_string(path)?;
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let value = match ext {
        "yaml" | "yml" => {
            serde_yaml::from_str::<serde_json::Value>(&raw).map_err(|err| Error::parse(path, err))?
        }
        "json" => serde_json::from_str(&raw).map_err(|err| Error::parse(path, err))?,
        _ => serde_json::Value::String(raw.trim().to_string()),
    };

    validate_task(value)
}

/// Normalize loaded task data into a [`Task`].
///
/// A bare string becomes `{ task: text }`; a mapping must already contain a
/// `task` field; everything else is rejected.
pub fn validate_task(value: serde_json::Value) -> Result<Task, Error> {
    match value {
        serde_json::Value::String(text) => Ok(Task::from_text(text)),
        serde_json::Value::Object(map) => {
            if !map.contains_key("task") {
                return Err(Error::Validation(
                    "Task file must contain a 'task' field".to_string(),
                ));
            }
            serde_json::from_value(serde_json::Value::Object(map))
                .map_err(|_| Error::Validation("Invalid task file format".to_string()))
        }
        _ => Err(Error::Validation("Invalid task file format".to_string())),
    }
}

/// Write a pre-filled task template to `path`.
///
/// YAML by default, JSON when the target path ends `.json`.
pub fn write_template(path: &Path) -> Result<(), Error> {
    let template = Task {
        task: "Describe the task to accomplish".to_string(),
        context: Some("Optional: background the assistant should know".to_string()),
        constraints: Some("Optional: constraints the approach must respect".to_string()),
        priority: Some("Optional: how urgent this task is".to_string()),
        expected_outcome: Some("Optional: what a good result looks like".to_string()),
    };

    let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");
    let rendered = if is_json {
        serde_json::to_string_pretty(&template)
            .map_err(|err| Error::Template(err.to_string()))?
    } else {
        serde_yaml::to_string(&template).map_err(|err| Error::Template(err.to_string()))?
    };

    fs::write(path, rendered)
        .map_err(|err| Error::Template(format!("write {}: {err}", path.display())))
}
