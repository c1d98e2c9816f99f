// # Record Identifier
//
// Store-assigned, opaque identifier for a production record.
//
// Identifiers are v4 UUIDs in their 32-character lowercase hex form. A string
// is well-formed iff it has exactly that shape; anything else is rejected before
// the store is consulted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Length of a well-formed identifier
pub const RECORD_ID_LEN: usize = 32;

/// Identifier of a [`ProductionRecord`](super::ProductionRecord)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse an identifier, rejecting anything that is not well-formed
    pub fn parse(raw: &str) -> Result<Self> {
        if Self::is_well_formed(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::invalid_id(format!("'{}' is not a valid record id", raw)))
        }
    }

    /// Check the shape of an identifier without allocating
    pub fn is_well_formed(raw: &str) -> bool {
        raw.len() == RECORD_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if Self::is_well_formed(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_id(format!("'{}' is not a valid record id", value)))
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
