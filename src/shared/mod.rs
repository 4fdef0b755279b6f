//! Shared vocabulary: schemes, records, statuses and profiles.

pub mod scheme;
pub mod types;

// Re-export commonly used items
pub use scheme::Scheme;
pub use types::*;
