use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::csv_store::CsvAircraftStore;
use crate::error::StoreResult;
use crate::json_store::JsonAircraftStore;
use crate::traits::AircraftStore;

/// On-disk record format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Csv,
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

/// Where and how records are persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend file format.
    pub format: StorageFormat,
    /// Directory holding the data files; created on open.
    pub data_dir: PathBuf,
    /// File name used by the JSON backend.
    pub json_file: String,
    /// File name used by the CSV backend.
    pub csv_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            format: StorageFormat::Json,
            data_dir: PathBuf::from("data"),
            json_file: "aircraft_data.json".to_string(),
            csv_file: "aircraft_data.csv".to_string(),
        }
    }
}

impl StoreConfig {
    /// Full path of the data file for the configured format.
    pub fn path(&self) -> PathBuf {
        let file = match self.format {
            StorageFormat::Json => &self.json_file,
            StorageFormat::Csv => &self.csv_file,
        };
        self.data_dir.join(file)
    }
}

/// Open the backend selected by `config`.
pub fn open_store(config: &StoreConfig) -> StoreResult<Box<dyn AircraftStore>> {
    let path = config.path();
    debug!(format = %config.format, path = %path.display(), "opening aircraft store");
    let store: Box<dyn AircraftStore> = match config.format {
        StorageFormat::Json => Box::new(JsonAircraftStore::open(path)?),
        StorageFormat::Csv => Box::new(CsvAircraftStore::open(path)?),
    };
    Ok(store)
}
