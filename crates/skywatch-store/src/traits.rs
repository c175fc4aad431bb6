use std::collections::HashMap;

use skywatch_types::Aircraft;
use tracing::{debug, warn};

use crate::criteria::Criteria;
use crate::error::StoreResult;

/// Aircraft record store keyed by callsign.
///
/// All implementations must satisfy these invariants:
/// - At most one record per callsign is stored.
/// - Upserting a record whose callsign exists replaces all of its fields and
///   leaves `count()` unchanged; otherwise the record is appended.
/// - No operation panics or returns an error: storage failures are reported
///   as `false`, `0` or an empty list, and unreadable content counts as an
///   empty store.
pub trait AircraftStore: Send + Sync {
    /// Upsert a single record. Returns `true` if the change was persisted.
    fn add_one(&self, aircraft: &Aircraft) -> bool;

    /// Upsert every record in order and persist once.
    ///
    /// Returns the number of records processed (inserts plus updates), or `0`
    /// if nothing could be persisted.
    fn add_many(&self, aircraft: &[Aircraft]) -> usize;

    /// Return the records matching every criterion, in stored order.
    ///
    /// `None` or empty criteria return the full set.
    fn query(&self, criteria: Option<&Criteria>) -> Vec<Aircraft>;

    /// Remove the record with the given callsign. Returns `true` if one was
    /// found and the removal was persisted.
    fn delete(&self, callsign: &str) -> bool;

    /// Remove every record, leaving a valid empty store behind.
    fn clear(&self) -> bool;

    /// Number of stored records.
    fn count(&self) -> usize;

    /// All records, in stored order.
    fn get_all(&self) -> Vec<Aircraft> {
        self.query(None)
    }

    /// Records registered in exactly `country`.
    fn by_country(&self, country: &str) -> Vec<Aircraft> {
        self.query(Some(&Criteria::new().origin_country(country)))
    }

    /// The `n` highest records, highest first. Ties keep stored order.
    fn top_by_altitude(&self, n: usize) -> Vec<Aircraft> {
        let mut all = self.get_all();
        all.sort_by(|a, b| b.altitude().total_cmp(&a.altitude()));
        all.truncate(n);
        all
    }
}

/// Whole-collection persistence primitive.
///
/// A backend only knows how to read and rewrite its full record set. Every
/// `SnapshotBackend` is an [`AircraftStore`]: the upsert, query and delete
/// logic runs in memory between one `load` and one `save`, so a new storage
/// format only has to implement these two methods.
pub trait SnapshotBackend: Send + Sync {
    /// Read every persisted record. A missing backing file is an empty set.
    fn load(&self) -> StoreResult<Vec<Aircraft>>;

    /// Replace the persisted records with `records`.
    fn save(&self, records: &[Aircraft]) -> StoreResult<()>;

    /// Short human-readable location used in log events.
    fn location(&self) -> String;
}

/// Load for reading: any failure reads as an empty store.
fn load_or_empty<B: SnapshotBackend + ?Sized>(backend: &B) -> Vec<Aircraft> {
    match backend.load() {
        Ok(records) => records,
        Err(e) => {
            warn!(location = %backend.location(), error = %e, "unreadable store; treating as empty");
            Vec::new()
        }
    }
}

/// Load for a read-modify-write cycle.
///
/// Malformed content is replaced by whatever the cycle writes. When the
/// storage itself is unavailable the cycle is abandoned so nothing is
/// overwritten blindly.
fn load_for_update<B: SnapshotBackend + ?Sized>(backend: &B) -> Option<Vec<Aircraft>> {
    match backend.load() {
        Ok(records) => Some(records),
        Err(e) if e.is_malformed() => {
            warn!(location = %backend.location(), error = %e, "malformed store; starting from empty");
            Some(Vec::new())
        }
        Err(e) => {
            warn!(location = %backend.location(), error = %e, "store unavailable; update abandoned");
            None
        }
    }
}

fn persist<B: SnapshotBackend + ?Sized>(backend: &B, records: &[Aircraft]) -> bool {
    match backend.save(records) {
        Ok(()) => {
            debug!(location = %backend.location(), count = records.len(), "store saved");
            true
        }
        Err(e) => {
            warn!(location = %backend.location(), error = %e, "failed to save store");
            false
        }
    }
}

impl<B: SnapshotBackend> AircraftStore for B {
    fn add_one(&self, aircraft: &Aircraft) -> bool {
        let Some(mut records) = load_for_update(self) else {
            return false;
        };
        match records.iter_mut().find(|r| r.callsign() == aircraft.callsign()) {
            Some(existing) => {
                debug!(callsign = aircraft.callsign(), "updating aircraft");
                *existing = aircraft.clone();
            }
            None => {
                debug!(callsign = aircraft.callsign(), "adding aircraft");
                records.push(aircraft.clone());
            }
        }
        persist(self, &records)
    }

    fn add_many(&self, aircraft: &[Aircraft]) -> usize {
        if aircraft.is_empty() {
            return 0;
        }
        let Some(mut records) = load_for_update(self) else {
            return 0;
        };

        let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            index.entry(r.callsign().to_string()).or_insert(i);
        }

        let mut updated = 0usize;
        for a in aircraft {
            match index.get(a.callsign()) {
                Some(&i) => {
                    records[i] = a.clone();
                    updated += 1;
                }
                None => {
                    index.insert(a.callsign().to_string(), records.len());
                    records.push(a.clone());
                }
            }
        }

        debug!(
            processed = aircraft.len(),
            updated,
            inserted = aircraft.len() - updated,
            "batch upsert"
        );
        if persist(self, &records) {
            aircraft.len()
        } else {
            0
        }
    }

    fn query(&self, criteria: Option<&Criteria>) -> Vec<Aircraft> {
        let records = load_or_empty(self);
        match criteria {
            Some(c) if !c.is_empty() => records.into_iter().filter(|r| c.matches(r)).collect(),
            _ => records,
        }
    }

    fn delete(&self, callsign: &str) -> bool {
        let Some(mut records) = load_for_update(self) else {
            return false;
        };
        let Some(pos) = records.iter().position(|r| r.callsign() == callsign) else {
            debug!(callsign, "aircraft not found; nothing deleted");
            return false;
        };
        records.remove(pos);
        debug!(callsign, "aircraft deleted");
        persist(self, &records)
    }

    fn clear(&self) -> bool {
        persist(self, &[])
    }

    fn count(&self) -> usize {
        load_or_empty(self).len()
    }
}
