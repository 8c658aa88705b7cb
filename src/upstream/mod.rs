//! Upstream fetch subsystem.
//!
//! # Data Flow
//! ```text
//! /users handler
//!     → fetcher.rs (GET with deadline, status check)
//!     → types.rs (JSON array of generic objects)
//!     → error.rs (failure kind for logs/metrics)
//! ```

pub mod error;
pub mod fetcher;
pub mod types;

pub use error::FetchError;
pub use fetcher::{parse_users, UpstreamFetcher};
pub use types::{UserCollection, UserRecord};
