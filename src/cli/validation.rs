//! Custom value parsers for CLI arguments

use serde_json::Value as JsonValue;
use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Parse template variables; only JSON objects are accepted
pub fn parse_json_vars(input: &str) -> Result<JsonValue, String> {
    let value: JsonValue =
        serde_json::from_str(input).map_err(|e| format!("Invalid JSON: {}", e))?;

    if !value.is_object() {
        return Err("Template variables must be a JSON object".to_string());
    }

    Ok(value)
}
