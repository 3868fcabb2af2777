// crates/api/src/lib.rs
//! Presswatch API client library.
//!
//! Typed access to the remote media-monitoring backend: dashboard stats,
//! media items, bulk AI-processing progress, scraping, thematic areas, and
//! AI insight reports. The poll scheduler that drives live progress views
//! lives in `presswatch-monitor`; this crate only knows how to talk JSON.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use types::*;
