use crate::error::{MorphError, Result};
use crate::payload::merge::Mapping;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Load a payload file as a mapping. `.yaml`/`.yml` files are read as YAML,
/// everything else as JSON.
pub async fn load_mapping(path: &Path) -> Result<Mapping> {
    if !path.exists() {
        return Err(MorphError::resource_not_found(format!("Payload file: {}", path.display())));
    }

    debug!("loading payload file (path={})", path.display());
    let content = fs::read_to_string(path).await?;
    parse_mapping(&content, path)
}

fn parse_mapping(content: &str, path: &Path) -> Result<Mapping> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let value: Value = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content)?,
        _ => serde_json::from_str(content)?,
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(MorphError::invalid_payload(
            path.display().to_string(),
            format!("expected a mapping at the document root, found {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
