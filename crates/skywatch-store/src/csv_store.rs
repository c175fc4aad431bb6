use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skywatch_types::{Aircraft, FIELD_NAMES};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::traits::SnapshotBackend;

/// One CSV row as text, columns in [`FIELD_NAMES`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CsvRow {
    callsign: String,
    origin_country: String,
    velocity: String,
    altitude: String,
    icao24: String,
    longitude: String,
    latitude: String,
    on_ground: String,
    vertical_rate: String,
}

impl From<&Aircraft> for CsvRow {
    fn from(a: &Aircraft) -> Self {
        Self {
            callsign: a.callsign().to_string(),
            origin_country: a.origin_country().to_string(),
            velocity: format!("{:.2}", a.velocity()),
            altitude: format!("{:.2}", a.altitude()),
            icao24: a.icao24().to_string(),
            longitude: format!("{:.6}", a.longitude()),
            latitude: format!("{:.6}", a.latitude()),
            on_ground: if a.on_ground() { "True" } else { "False" }.to_string(),
            vertical_rate: format!("{:.2}", a.vertical_rate()),
        }
    }
}

impl CsvRow {
    /// A row whose columns are all blank, e.g. a line of bare separators.
    fn is_blank(&self) -> bool {
        [
            &self.callsign,
            &self.origin_country,
            &self.velocity,
            &self.altitude,
            &self.icao24,
            &self.longitude,
            &self.latitude,
            &self.on_ground,
            &self.vertical_rate,
        ]
        .iter()
        .all(|column| column.trim().is_empty())
    }

    /// Decode the text columns. Unparsable numbers read as `0.0`; `on_ground`
    /// is `true` only for a case-insensitive `"true"`.
    fn to_aircraft(&self) -> Aircraft {
        Aircraft::new(
            &self.callsign,
            &self.origin_country,
            parse_number(&self.velocity),
            parse_number(&self.altitude),
        )
        .with_icao24(&self.icao24)
        .with_position(parse_number(&self.longitude), parse_number(&self.latitude))
        .with_on_ground(self.on_ground.trim().eq_ignore_ascii_case("true"))
        .with_vertical_rate(parse_number(&self.vertical_rate))
    }
}

fn parse_number(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

/// CSV-file backed aircraft store.
///
/// Layout: UTF-8, comma separated, a header row with the nine field names
/// followed by one row per record. Velocity, altitude and vertical rate keep
/// two decimals, longitude and latitude six, `on_ground` is `True`/`False`.
/// A file without any rows, header included, holds zero records.
#[derive(Debug, Clone)]
pub struct CsvAircraftStore {
    path: PathBuf,
}

impl CsvAircraftStore {
    /// Open the store at `path`, creating the parent directory and a
    /// header-only file if they do not exist yet.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                info!(dir = %parent.display(), "created data directory");
            }
        }
        if !store.path.exists() {
            store.write_rows(&[])?;
            info!(path = %store.path.display(), "created CSV aircraft store");
        }
        Ok(store)
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> StoreResult<Vec<CsvRow>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));
        let mut rows = reader.deserialize().collect::<Result<Vec<CsvRow>, _>>()?;
        let before = rows.len();
        rows.retain(|row| !row.is_blank());
        if rows.len() < before {
            debug!(
                path = %self.path.display(),
                skipped = before - rows.len(),
                "skipping blank rows"
            );
        }
        Ok(rows)
    }

    fn write_rows(&self, rows: &[CsvRow]) -> StoreResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(File::create(&self.path)?));
        writer.write_record(FIELD_NAMES)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SnapshotBackend for CsvAircraftStore {
    fn load(&self) -> StoreResult<Vec<Aircraft>> {
        let rows = self.read_rows()?;
        Ok(rows.iter().map(CsvRow::to_aircraft).collect())
    }

    fn save(&self, records: &[Aircraft]) -> StoreResult<()> {
        let rows: Vec<CsvRow> = records.iter().map(CsvRow::from).collect();
        self.write_rows(&rows)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
