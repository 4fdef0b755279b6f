//! # EZID Rust Client
//!
//! A Rust client for the EZID identifier service: mint, create, read,
//! modify and delete ARK and DOI identifiers and their metadata.
//!
//! ## Modules
//!
//! - [`codec`]: the `name: value` text format used in request and response bodies
//! - [`api`]: URL construction and the authenticated [`api::EzidSession`]
//! - [`shared`]: schemes, records, statuses and profiles
//! - [`auth`]: Basic-auth credentials and the sandbox account
//! - [`network`]: server URL and protocol constants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ezid::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = EzidSession::new("myuser", "mypassword", "ark", "13030/c7")?;
//!
//!     let mut metadata = Metadata::new();
//!     metadata.insert("_target".into(), "https://example.org/thing".into());
//!     metadata.insert("erc.who".into(), "Karl Popper".into());
//!
//!     let ark = session.mint(metadata).await?.into_identifier();
//!     session.make_public(&ark).await?;
//!     println!("{} -> {}", ark, session.get_target(&ark).await?);
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Error types shared by every module.
pub mod error;

/// Server URL and protocol constants.
pub mod network;

/// Credentials and the sandbox account.
pub mod auth;

/// Schemes, records, statuses and profiles.
pub mod shared;

/// Request/response body encoding.
pub mod codec;

/// URL construction and (with the `http` feature) the session client.
pub mod api;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use ezid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ApiError, ApiResult};

    pub use crate::shared::{
        is_reserved_field, test_metadata, Metadata, Profile, Record, Response, Scheme, Status,
    };

    pub use crate::auth::{Credentials, TEST_PASSWORD, TEST_USERNAME};

    pub use crate::network::{API_VERSION, DEFAULT_SERVER_URL};

    #[cfg(feature = "http")]
    pub use crate::api::{EzidSession, EzidSessionBuilder};
}
