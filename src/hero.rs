//! Hero records and identity.
//!
//! A hero is the entity being compared: an integer id that is unique within a
//! snapshot, a display name, an image reference and a loosely typed
//! powerstat mapping. Records are immutable once loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::powerstat::Powerstats;

/// Stable hero identifier, unique within a snapshot.
///
/// # Examples
///
/// ```
/// use heroclash::HeroId;
///
/// let id = HeroId::parse("id1", " 70 ").unwrap();
/// assert_eq!(id.get(), 70);
/// assert!(HeroId::parse("id1", "abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(u64);

impl HeroId {
    /// Wraps a raw id without validation.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses a request identifier.
    ///
    /// Accepts surrounding whitespace and base-10 digits only. Zero, signs,
    /// fractions and anything non-numeric are rejected with an error naming
    /// `field`, so callers can report an invalid request before any lookup.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidId {
            field: field.to_string(),
            value: raw.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingId {
                field: field.to_string(),
            });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match trimmed.parse::<u64>() {
            Ok(0) | Err(_) => Err(invalid()),
            Ok(id) => Ok(Self(id)),
        }
    }

    /// Parses an optional request identifier, treating `None` as missing.
    pub fn parse_required(field: &str, raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            Some(raw) => Self::parse(field, raw),
            None => Err(ValidationError::MissingId {
                field: field.to_string(),
            }),
        }
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for HeroId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A hero record as supplied by the hero store.
///
/// Unknown fields in the source JSON are ignored. Two records are equal only
/// when every field, powerstats included, is equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    /// Identifier, unique within a snapshot.
    pub id: HeroId,

    /// Display name.
    pub name: String,

    /// Image URI.
    #[serde(default)]
    pub image: String,

    /// Raw powerstats; values may be missing or malformed.
    #[serde(default)]
    pub powerstats: Powerstats,
}

impl Hero {
    /// Creates a hero with no image and no powerstats.
    #[must_use]
    pub fn new(id: impl Into<HeroId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            powerstats: Powerstats::new(),
        }
    }

    /// Sets the image URI.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Replaces the powerstat mapping.
    #[must_use]
    pub fn with_powerstats(mut self, powerstats: Powerstats) -> Self {
        self.powerstats = powerstats;
        self
    }
}
