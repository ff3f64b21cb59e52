/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

/// Reader and writer settings. Backed by an optional JSON file; any field
/// missing from the file takes its default value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ShapefileConfigs {
    /// Reject headers with a bad file code or version instead of warning.
    pub strict: bool,
    /// Memory-map .shp and .shx files opened from disk.
    pub use_memory_mapped: bool,
    /// Drop Z and M ordinates while decoding.
    pub flatten: bool,
    /// Stop iteration when a record number is out of sequence.
    pub check_record_numbers: bool,
    /// Initial size of the read buffer in bytes.
    pub read_buffer_size: usize,
    /// Number of index entries held in memory for seekable .shx sources.
    pub index_window_records: usize,
}

impl Default for ShapefileConfigs {
    fn default() -> ShapefileConfigs {
        ShapefileConfigs {
            strict: true,
            use_memory_mapped: false,
            flatten: false,
            check_record_numbers: true,
            read_buffer_size: 8192,
            index_window_records: 2000,
        }
    }
}

impl ShapefileConfigs {
    pub fn new() -> ShapefileConfigs {
        ShapefileConfigs::default()
    }
}

/// Loads the settings stored at `config_file`. A missing file yields the
/// defaults; a malformed one is an error.
pub fn get_configs<P: AsRef<Path>>(config_file: P) -> Result<ShapefileConfigs> {
    let configs = match fs::read_to_string(config_file.as_ref()) {
        Ok(contents) => serde_json::from_str(&contents)?,
        Err(_) => {
            tracing::debug!(
                "no settings found at {}, using defaults",
                config_file.as_ref().display()
            );
            ShapefileConfigs::new()
        }
    };
    Ok(configs)
}

pub fn save_configs<P: AsRef<Path>>(config_file: P, configs: &ShapefileConfigs) -> Result<()> {
    let configs_json = serde_json::to_string_pretty(configs)?;
    let mut file = File::create(config_file)?;
    file.write_all(configs_json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let configs = get_configs(dir.path().join("settings.json")).unwrap();
        assert_eq!(configs, ShapefileConfigs::default());
    }

    #[test]
    fn test_partial_file_and_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "strict": false, "flatten": true }"#).unwrap();
        let configs = get_configs(&path).unwrap();
        assert!(!configs.strict);
        assert!(configs.flatten);
        assert_eq!(configs.read_buffer_size, 8192);

        save_configs(&path, &configs).unwrap();
        assert_eq!(get_configs(&path).unwrap(), configs);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ strict: ").unwrap();
        assert!(get_configs(&path).is_err());
    }
}
