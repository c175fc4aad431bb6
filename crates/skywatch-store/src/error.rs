/// Errors from store backends.
///
/// These surface from store construction and from the [`SnapshotBackend`]
/// load/save primitives. The [`AircraftStore`] operations built on top of
/// them log and absorb every variant.
///
/// [`SnapshotBackend`]: crate::SnapshotBackend
/// [`AircraftStore`]: crate::AircraftStore
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON file could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV file could not be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The persisted content parsed but does not have the expected shape.
    #[error("malformed store content: {0}")]
    Malformed(String),

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Returns `true` when the error means the content is unreadable rather
    /// than the storage being unavailable.
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::Json(e) => !e.is_io(),
            Self::Csv(e) => !e.is_io_error(),
            Self::Malformed(_) => true,
            Self::Io(_) | Self::Poisoned => false,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
