//! Detail record fetching
//!
//! Turns one detail URL into one [`Record`]. The fetcher holds no mutable
//! state, so a single instance is shared by every worker.

use crate::fetch::client::get_json;
use crate::fetch::payload::DetailPayload;
use crate::record::Record;
use crate::{RemoteError, RemoteResult};
use reqwest::Client;

/// Fetches and projects detail records
#[derive(Debug, Clone)]
pub struct DetailFetcher {
    client: Client,
}

impl DetailFetcher {
    /// Creates a detail fetcher sharing the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches the detail record at `url`
    ///
    /// # Errors
    ///
    /// * Any [`RemoteError`] from the request or payload decode
    /// * `RemoteError::Shape` - the record lists no categories
    pub async fn fetch(&self, url: &str) -> RemoteResult<Record> {
        let DetailPayload { id, name, types } = get_json::<DetailPayload>(&self.client, url).await?;
        let categories = types.into_iter().map(|slot| slot.kind.name);

        Record::from_categories(id, name, categories).ok_or_else(|| {
            RemoteError::Shape {
                url: url.to_string(),
                message: format!("item {} lists no types", id),
            }
        })
    }
}
