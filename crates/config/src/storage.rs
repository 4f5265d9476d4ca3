//! Data file location and save policy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_file() -> PathBuf {
    PathBuf::from("data/invmgr.txt")
}

const fn default_autosave() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Flat text file holding the item list.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Save after every command that changes the list.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            autosave: default_autosave(),
        }
    }
}
