//! Remote API access
//!
//! This module contains everything that talks HTTP:
//! - Building the shared HTTP client
//! - Walking the paginated listing endpoint
//! - Fetching and projecting individual detail records
//!
//! Nothing here retries. Any non-success status or unexpected payload is
//! returned as a [`RemoteError`](crate::RemoteError).

mod client;
mod detail;
mod listing;
mod payload;

pub use client::{build_http_client, get_json};
pub use detail::DetailFetcher;
pub use listing::ListingFetcher;
pub use payload::{DetailPayload, ListingEntry, ListingPage, NamedRef, TypeSlot};
