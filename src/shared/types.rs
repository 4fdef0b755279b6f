//! Shared type definitions for the EZID client.
//!
//! Records, decoded responses and the vocabulary of reserved metadata fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ============================================================================
// Metadata
// ============================================================================

/// Metadata attached to an identifier: field name to value.
///
/// Field names beginning with `_` are reserved by EZID; names of the form
/// `profile.field` address one of the descriptive [`Profile`]s.
pub type Metadata = BTreeMap<String, String>;

/// Reserved field holding the identifier status.
pub const FIELD_STATUS: &str = "_status";
/// Reserved field holding the target URL.
pub const FIELD_TARGET: &str = "_target";
/// Reserved field holding the creation time (Unix seconds).
pub const FIELD_CREATED: &str = "_created";
/// Reserved field holding the last update time (Unix seconds).
pub const FIELD_UPDATED: &str = "_updated";
/// Reserved field holding the preferred display profile.
pub const FIELD_PROFILE: &str = "_profile";
/// Reserved field holding co-owners.
pub const FIELD_COOWNER: &str = "_coowner";

/// Whether `name` is an internal field managed by EZID.
pub fn is_reserved_field(name: &str) -> bool {
    name.starts_with('_')
}

/// Sample metadata used against the sandbox account.
pub fn test_metadata() -> Metadata {
    [
        (FIELD_TARGET, "http://example.org/opensociety"),
        ("erc.who", "Karl Popper"),
        ("erc.what", "The Open Society and Its Enemies"),
        ("erc.when", "1945"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

// ============================================================================
// Record / Response
// ============================================================================

/// An identifier together with its metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Fully qualified identifier, e.g. `ark:/99999/fk4abc`
    pub identifier: String,
    /// Metadata returned by the server
    pub metadata: Metadata,
}

impl Record {
    /// Look up a metadata field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).map(String::as_str)
    }
}

/// Decoded body of a successful EZID response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Identifier with metadata (get, create, modify, mint with echo)
    Record(Record),
    /// Bare identifier, the body carried no metadata lines (delete, mint)
    Identifier(String),
}

impl Response {
    /// The identifier this response is about.
    pub fn identifier(&self) -> &str {
        match self {
            Response::Record(record) => &record.identifier,
            Response::Identifier(identifier) => identifier,
        }
    }

    /// Metadata, if the response carried any.
    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Response::Record(record) => Some(&record.metadata),
            Response::Identifier(_) => None,
        }
    }

    /// Convert into a [`Record`], or `None` for a bare identifier.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Response::Record(record) => Some(record),
            Response::Identifier(_) => None,
        }
    }

    /// Consume and return the identifier.
    pub fn into_identifier(self) -> String {
        match self {
            Response::Record(record) => record.identifier,
            Response::Identifier(identifier) => identifier,
        }
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parse a `_created`/`_updated` value: Unix seconds, fractional allowed.
pub fn parse_unix_timestamp(value: &str) -> Result<DateTime<Utc>, ApiError> {
    let invalid = || ApiError::InvalidTimestamp(value.to_string());

    let seconds: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !seconds.is_finite() {
        return Err(invalid());
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).ok_or_else(invalid)
}

// ============================================================================
// Status / Profile
// ============================================================================

/// Identifier status, stored in the `_status` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not yet visible to resolvers; can still be deleted
    Reserved,
    /// Publicly resolvable
    Public,
    /// Public but temporarily withdrawn
    Unavailable,
    /// Any other value the server reports (e.g. `unavailable | withdrawn`)
    Other(String),
}

impl Status {
    /// Value written to `_status`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Reserved => "reserved",
            Self::Public => "public",
            Self::Unavailable => "unavailable",
            Self::Other(s) => s,
        }
    }

    /// Parse a `_status` value. Never fails; unknown values are kept verbatim.
    pub fn parse(value: &str) -> Self {
        match value {
            "reserved" => Self::Reserved,
            "public" => Self::Public,
            "unavailable" => Self::Unavailable,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive metadata profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Electronic Resource Citation (`erc.who`, `erc.what`, ...)
    Erc,
    /// Dublin Core (`dc.creator`, `dc.title`, ...)
    Dc,
    /// DataCite (`datacite.creator`, `datacite.publicationyear`, ...)
    Datacite,
}

impl Profile {
    /// Profile name as EZID spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Erc => "erc",
            Self::Dc => "dc",
            Self::Datacite => "datacite",
        }
    }

    /// Qualified field name within this profile, e.g. `erc.who`.
    pub fn field(&self, name: &str) -> String {
        format!("{}.{}", self.as_str(), name)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
