//! Foundation types for skywatch.
//!
//! Every other skywatch crate depends on `skywatch-types`. The crate is
//! deliberately free of I/O: it only defines values and the rules that keep
//! them valid.
//!
//! # Key Types
//!
//! - [`Aircraft`] -- One observed aircraft, keyed by its callsign
//! - [`AircraftMap`] -- The flat, untyped key/value shape records are exchanged in
//! - [`BoundingBox`] -- A latitude/longitude rectangle used to scope queries
//! - [`TypeError`] -- Errors from parsing foreign representations
//!
//! # Validation
//!
//! Record construction never fails. Missing or malformed values degrade to
//! documented defaults (see [`aircraft`]). The standalone checks in
//! [`validate`] are stricter and report `false` instead of coercing.

pub mod aircraft;
pub mod bbox;
pub mod error;
pub mod validate;

pub use aircraft::{Aircraft, AircraftMap, FIELD_NAMES, UNKNOWN};
pub use bbox::BoundingBox;
pub use error::{TypeError, TypeResult};
