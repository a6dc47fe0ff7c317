//! Response shapes for the listing and detail endpoints
//!
//! Only the fields the harvester reads are declared; serde ignores the rest.

use serde::Deserialize;

/// One page of the paginated listing
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    /// URL of the next page, null or absent on the last page
    #[serde(default)]
    pub next: Option<String>,

    /// Items on this page, in listing order
    pub results: Vec<ListingEntry>,
}

/// A single listing item
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    /// Detail URL for this item
    pub url: String,
}

/// Detail record for a single item
#[derive(Debug, Clone, Deserialize)]
pub struct DetailPayload {
    pub id: i64,
    pub name: String,
    pub types: Vec<TypeSlot>,
}

/// Category slot in a detail record
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

/// A `{ "name": ... }` reference
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
}
