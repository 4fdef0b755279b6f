//! Identifier schemes and their sandbox shoulders.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Identifier scheme supported by EZID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// Archival Resource Key, prefix `ark:/`
    #[serde(rename = "ark")]
    Ark,
    /// Digital Object Identifier, prefix `doi:`
    #[serde(rename = "doi")]
    Doi,
}

impl Scheme {
    /// All supported schemes.
    pub const ALL: [Scheme; 2] = [Scheme::Ark, Scheme::Doi];

    /// Look up a scheme by its exact code (`"ark"` or `"doi"`).
    pub fn from_code(code: &str) -> Result<Self, ApiError> {
        match code {
            "ark" => Ok(Self::Ark),
            "doi" => Ok(Self::Doi),
            other => Err(ApiError::UnknownScheme(other.to_string())),
        }
    }

    /// Look up a scheme by name, keeping only its first three characters.
    ///
    /// `"ark"`, `"arks"` and `"doi-test"` are all accepted.
    pub fn from_name(name: &str) -> Result<Self, ApiError> {
        let code: String = name.chars().take(3).collect();
        Self::from_code(&code)
    }

    /// Short code used to select the scheme.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ark => "ark",
            Self::Doi => "doi",
        }
    }

    /// Identifier prefix, e.g. `ark:/`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Ark => "ark:/",
            Self::Doi => "doi:",
        }
    }

    /// Shoulder reserved for the sandbox account.
    pub fn test_shoulder(&self) -> &'static str {
        match self {
            Self::Ark => "99999/fk4",
            Self::Doi => "10.5072/FK2",
        }
    }

    /// Scheme whose prefix starts `identifier`, if any.
    pub fn of_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| identifier.starts_with(scheme.prefix()))
    }
}

impl FromStr for Scheme {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Scheme::from_code("ark").unwrap(), Scheme::Ark);
        assert_eq!(Scheme::from_code("doi").unwrap(), Scheme::Doi);
        assert!(matches!(
            Scheme::from_code("urn"),
            Err(ApiError::UnknownScheme(code)) if code == "urn"
        ));
    }

    #[test]
    fn test_from_name_truncates() {
        assert_eq!(Scheme::from_name("arks").unwrap(), Scheme::Ark);
        assert_eq!(Scheme::from_name("doi-sandbox").unwrap(), Scheme::Doi);
        assert!(Scheme::from_name("ar").is_err());
        assert!(Scheme::from_name("").is_err());
    }

    #[test]
    fn test_prefixes_and_shoulders() {
        assert_eq!(Scheme::Ark.prefix(), "ark:/");
        assert_eq!(Scheme::Doi.prefix(), "doi:");
        assert_eq!(Scheme::Ark.test_shoulder(), "99999/fk4");
        assert_eq!(Scheme::Doi.test_shoulder(), "10.5072/FK2");
        assert_eq!(Scheme::Doi.to_string(), "doi:");
    }

    #[test]
    fn test_of_identifier() {
        assert_eq!(Scheme::of_identifier("ark:/99999/fk4abc"), Some(Scheme::Ark));
        assert_eq!(Scheme::of_identifier("doi:10.5072/FK2X"), Some(Scheme::Doi));
        assert_eq!(Scheme::of_identifier("ark:99999"), None);
        assert_eq!(Scheme::of_identifier("abc"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Scheme::Ark).unwrap(), r#""ark""#);
        let scheme: Scheme = serde_json::from_str(r#""doi""#).unwrap();
        assert_eq!(scheme, Scheme::Doi);
    }
}
