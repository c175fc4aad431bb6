use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A latitude/longitude rectangle, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    /// The whole globe.
    pub const GLOBAL: Self = Self {
        south: -90.0,
        north: 90.0,
        west: -180.0,
        east: 180.0,
    };

    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }

    /// Parse the `[south, north, west, east]` string quadruple geocoders return.
    pub fn from_strings<S: AsRef<str>>(parts: &[S]) -> TypeResult<Self> {
        if parts.len() != 4 {
            return Err(TypeError::BoundingBoxArity(parts.len()));
        }
        let mut coords = [0.0f64; 4];
        for (slot, part) in coords.iter_mut().zip(parts) {
            let raw = part.as_ref().trim();
            *slot = raw.parse::<f64>().map_err(|e| TypeError::InvalidCoordinate {
                value: raw.to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }

    /// Returns `true` if the point lies inside the box (edges included).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.south..=self.north).contains(&latitude) && (self.west..=self.east).contains(&longitude)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[S {:.4}, N {:.4}, W {:.4}, E {:.4}]",
            self.south, self.north, self.west, self.east
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_geocoder_strings() {
        let bbox = BoundingBox::from_strings(&["41.1850", "82.0586", "19.6389", "180.0000"]).unwrap();
        assert_eq!(bbox, BoundingBox::new(41.185, 82.0586, 19.6389, 180.0));
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        let err = BoundingBox::from_strings(&["1", "2", "3"]).unwrap_err();
        assert_eq!(err, TypeError::BoundingBoxArity(3));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        let err = BoundingBox::from_strings(&["1", "north", "3", "4"]).unwrap_err();
        assert!(matches!(err, TypeError::InvalidCoordinate { ref value, .. } if value == "north"));
    }

    #[test]
    fn contains_checks_both_axes() {
        let bbox = BoundingBox::new(40.0, 45.0, -75.0, -70.0);
        assert!(bbox.contains(42.0, -72.0));
        assert!(bbox.contains(40.0, -75.0));
        assert!(!bbox.contains(39.9, -72.0));
        assert!(!bbox.contains(42.0, -69.0));
        assert!(BoundingBox::GLOBAL.contains(-90.0, 180.0));
    }

    #[test]
    fn display() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bbox.to_string(), "[S 1.0000, N 2.0000, W 3.0000, E 4.0000]");
    }
}
