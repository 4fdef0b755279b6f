//! URL construction for EZID endpoints.
//!
//! Identifiers are placed in the path as-is; EZID expects the literal
//! `ark:/...` or `doi:...` form, not a percent-encoded one.

use crate::shared::Scheme;

/// URL that mints a new identifier under `scheme` + `naa`.
pub fn mint_url(scheme: Scheme, naa: &str, base_url: &str) -> String {
    format!("{}/shoulder/{}{}", base_url, scheme.prefix(), naa)
}

/// Fully qualify `identifier` against the session's scheme and naa.
///
/// Identifiers that already carry a known scheme prefix are returned
/// unchanged, even when it differs from `scheme`.
pub fn qualify(identifier: &str, scheme: Scheme, naa: &str) -> String {
    if Scheme::of_identifier(identifier).is_some() {
        identifier.to_string()
    } else {
        format!("{}{}{}", scheme.prefix(), naa, identifier)
    }
}

/// URL of a single identifier's record.
pub fn record_url(identifier: &str, scheme: Scheme, naa: &str, base_url: &str) -> String {
    format!("{}/id/{}", base_url, qualify(identifier, scheme, naa))
}
