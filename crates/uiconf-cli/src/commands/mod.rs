pub mod clear_cache;
pub mod prepare;

use std::path::Path;

use uiconf_core::{ConfigMap, Value};
use uiconf_manager::ManagerOptions;

/// Options from `path`, or the defaults.
pub fn load_options(path: Option<&Path>) -> Result<ManagerOptions, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ManagerOptions::from_file(path)?),
        None => Ok(ManagerOptions::default()),
    }
}

/// Read a JSON file whose top level is an object.
pub fn read_json_map(path: &Path) -> Result<ConfigMap, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    match Value::from(json) {
        Value::Map(map) => Ok(map),
        _ => Err(format!("{} must contain a JSON object", path.display()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, r#"{"urls": {"render": "mui/index/render"}}"#).unwrap();

        let map = read_json_map(&path).unwrap();
        assert_eq!(
            map["urls"].get_path(&["render"]),
            Some(&Value::from("mui/index/render"))
        );
    }

    #[test]
    fn test_read_json_map_rejects_non_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = read_json_map(&path).unwrap_err();
        assert!(err.to_string().contains("must contain a JSON object"));
        assert!(read_json_map(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_default_options() {
        assert_eq!(load_options(None).unwrap(), ManagerOptions::default());
    }
}
