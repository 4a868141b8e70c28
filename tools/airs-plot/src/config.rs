//! Runtime configuration for the plotting tool.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable naming the directory that holds input granules.
const DATA_DIR_VAR: &str = "HDFEOS_ZOO_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory searched for input granules.
    pub data_dir: PathBuf,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// `HDFEOS_ZOO_DIR` selects the data directory; when it is unset the
    /// current working directory is searched instead.
    pub fn from_env() -> Self {
        let data_dir = env::var(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Self { data_dir }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_from_environment() {
        // Set and unset in one test so parallel test threads never race
        // on the same variable.
        env::set_var(DATA_DIR_VAR, "/data/granules");
        assert_eq!(Config::from_env().data_dir, PathBuf::from("/data/granules"));

        env::remove_var(DATA_DIR_VAR);
        assert_eq!(Config::from_env().data_dir, PathBuf::from("."));
    }

    #[test]
    fn test_default_is_current_directory() {
        assert_eq!(Config::default().data_dir, PathBuf::from("."));
    }
}
