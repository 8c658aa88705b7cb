//! Fetch relay library.
//!
//! A small HTTP relay: `/` answers with a greeting and `/users` republishes a
//! remote JSON array verbatim.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request       ┌──────────────────────────────────────────────┐
//!     ─────────────────────┼─▶ http::server ──▶ http::handlers            │
//!                          │   (request id,      │  `/`      → greeting   │
//!                          │    trace, deadline) │  `/users` ──┐          │
//!                          │                     │             ▼          │
//!     Client Response      │                     │   upstream::fetcher ───┼──▶ Upstream
//!     ◀────────────────────┼── http::response ◀──┘   (GET + timeout)  ◀───┼─── JSON array
//!                          │                                              │
//!                          │   config · observability · lifecycle         │
//!                          └──────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{FetchError, UpstreamFetcher, UserCollection, UserRecord};
