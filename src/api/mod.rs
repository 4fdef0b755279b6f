//! EZID API: URL construction and the authenticated session.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ezid::api::EzidSession;
//! use ezid::shared::{test_metadata, Profile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Sandbox session; the naa is forced to the test shoulder
//!     let session = EzidSession::test("doi")?;
//!
//!     let doi = session.create("MYID01", test_metadata()).await?.into_identifier();
//!     session.change_profile(&doi, Profile::Datacite).await?;
//!     println!("status: {}", session.get_status(&doi).await?);
//!
//!     session.delete(&doi).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Operations return `ApiResult<T>`. A rejection by the server carries the
//! server's text unchanged:
//!
//! ```rust,ignore
//! use ezid::api::{ApiError, EzidSession};
//!
//! match session.get("no-such-id").await {
//!     Ok(response) => println!("{:?}", response),
//!     Err(ApiError::Rejected { status, body }) => println!("{}: {}", status, body),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

#[cfg(feature = "http")]
pub mod client;
pub mod url;

// Re-export main types for convenience
#[cfg(feature = "http")]
pub use client::{EzidSession, EzidSessionBuilder};
pub use crate::error::{ApiError, ApiResult};
pub use url::{mint_url, qualify, record_url};
