//! Persistent aircraft record storage.
//!
//! Records are kept in a single flat file and keyed by callsign. Every
//! operation is one load → mutate → store cycle over the whole collection;
//! nothing is cached between calls and no file handle outlives a call.
//!
//! # Storage Backends
//!
//! All backends implement the [`AircraftStore`] contract through the
//! [`SnapshotBackend`] trait:
//!
//! - [`JsonAircraftStore`] -- pretty-printed JSON array of flat objects
//! - [`CsvAircraftStore`] -- header row plus one fixed-format row per record
//! - [`InMemoryAircraftStore`] -- `Vec`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The callsign is the only key; at most one record per callsign is kept.
//! 2. Upsert replaces every field of the matched record.
//! 3. Storage and format errors never escape an operation: they are logged and
//!    reported as `false`, `0` or an empty list.
//! 4. Malformed persisted content reads as an empty store.
//! 5. Concurrent writers are unsupported; the last full rewrite wins.

pub mod config;
pub mod criteria;
pub mod csv_store;
pub mod error;
pub mod json_store;
pub mod memory;
pub mod traits;

pub use config::{open_store, StorageFormat, StoreConfig};
pub use criteria::{Criteria, Criterion};
pub use csv_store::CsvAircraftStore;
pub use error::{StoreError, StoreResult};
pub use json_store::JsonAircraftStore;
pub use memory::InMemoryAircraftStore;
pub use traits::{AircraftStore, SnapshotBackend};
