use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use skywatch_types::{Aircraft, AircraftMap};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::SnapshotBackend;

/// JSON-file backed aircraft store.
///
/// The file holds a pretty-printed array with one flat object per record,
/// exactly the fields of [`Aircraft::to_mapping`] in their native JSON types.
/// Non-ASCII text is written literally.
#[derive(Debug, Clone)]
pub struct JsonAircraftStore {
    path: PathBuf,
}

impl JsonAircraftStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// array file if they do not exist yet. Existing content is left alone.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !store.path.exists() {
            store.write_entries(&[])?;
            info!(path = %store.path.display(), "created JSON aircraft store");
        }
        Ok(store)
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StoreResult<Vec<AircraftMap>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let Value::Array(items) = serde_json::from_str::<Value>(&text)? else {
            return Err(StoreError::Malformed("top-level value is not an array".into()));
        };
        let mut entries = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => entries.push(map),
                other => warn!(
                    path = %self.path.display(),
                    index = i,
                    kind = json_kind(&other),
                    "skipping non-object entry"
                ),
            }
        }
        Ok(entries)
    }

    fn write_entries(&self, entries: &[AircraftMap]) -> StoreResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl SnapshotBackend for JsonAircraftStore {
    fn load(&self) -> StoreResult<Vec<Aircraft>> {
        Ok(Aircraft::from_mappings(&self.read_entries()?))
    }

    fn save(&self, records: &[Aircraft]) -> StoreResult<()> {
        let entries: Vec<AircraftMap> = records.iter().map(Aircraft::to_mapping).collect();
        self.write_entries(&entries)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
