use crate::error::PbevError;
use crate::extraction::table::TableLayout;
use crate::parsing::classify::MIN_ROW_CELLS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "../data/raw/pbe-veicular-2024-1.pdf";
pub const DEFAULT_OUTPUT_DIR: &str = "../data/processed";

/// Run settings. Every key is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    /// Rows with fewer cells are never vehicle rows.
    pub min_row_cells: usize,
    pub layout: TableLayout,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            min_row_cells: MIN_ROW_CELLS,
            layout: TableLayout::default(),
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<Config, PbevError> {
    let content = std::fs::read_to_string(path).map_err(|e| PbevError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|e| PbevError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config).map_err(|reason| PbevError::ConfigLoad {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), String> {
    if config.min_row_cells == 0 {
        return Err("min_row_cells must be at least 1".into());
    }
    let layout = &config.layout;
    let distances = [
        ("row_tolerance", layout.row_tolerance),
        ("word_gap", layout.word_gap),
        ("region_gap", layout.region_gap),
        ("continuation_gap", layout.continuation_gap),
    ];
    for (name, value) in distances {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("layout.{name} must be a non-negative number"));
        }
    }
    for (name, value) in [
        ("dense_ratio", layout.dense_ratio),
        ("projection_ratio", layout.projection_ratio),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            return Err(format!("layout.{name} must be in (0, 1]"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let file = write_config(r#"{"output_dir": "out", "layout": {"word_gap": 4.0}}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.min_row_cells, 25);
        assert_eq!(config.layout.word_gap, 4.0);
        assert_eq!(config.layout.row_tolerance, 2.0);
    }

    #[test]
    fn test_empty_object_is_default() {
        let file = write_config("{}");
        assert_eq!(load_config(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config(r#"{"min_row_cells": 0}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, PbevError::ConfigLoad { .. }));

        let file = write_config(r#"{"layout": {"dense_ratio": 1.5}}"#);
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/pbev.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pbev.json"));
    }
}
