//! Paginated listing discovery
//!
//! Walks the listing endpoint page by page, following each page's `next`
//! cursor, and collects detail URLs in listing order until the requested
//! count is reached.

use crate::fetch::client::get_json;
use crate::fetch::payload::ListingPage;
use crate::{RemoteError, RemoteResult};
use reqwest::Client;

/// Sequential walker over a paginated listing endpoint
#[derive(Debug, Clone)]
pub struct ListingFetcher {
    client: Client,
    root_url: String,
}

impl ListingFetcher {
    /// Creates a fetcher rooted at `root_url`
    pub fn new(client: Client, root_url: impl Into<String>) -> Self {
        Self {
            client,
            root_url: root_url.into(),
        }
    }

    /// Root URL the walk starts from
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Collects exactly `target_count` detail URLs in listing order
    ///
    /// Pages are fetched one at a time. Once the accumulator is full the
    /// rest of the current page is discarded and no further page is
    /// requested. If the listing keeps handing out `next` cursors without
    /// ever reaching `target_count`, this keeps walking.
    ///
    /// # Errors
    ///
    /// * Any [`RemoteError`] from a page request; the walk stops immediately
    /// * `RemoteError::Exhausted` - a page has no `next` cursor and the
    ///   accumulator is still short
    pub async fn fetch(&self, target_count: usize) -> RemoteResult<Vec<String>> {
        let mut urls = Vec::with_capacity(target_count);
        if target_count == 0 {
            return Ok(urls);
        }

        let mut cursor = self.root_url.clone();
        let mut pages = 0usize;

        loop {
            let page: ListingPage = get_json(&self.client, &cursor).await?;
            pages += 1;

            tracing::debug!(
                "Listing page {} ({}) returned {} items",
                pages,
                cursor,
                page.results.len()
            );

            for entry in page.results {
                urls.push(entry.url);
                if urls.len() == target_count {
                    tracing::info!(
                        "Discovered {} detail URLs across {} listing pages",
                        urls.len(),
                        pages
                    );
                    tracing::trace!("Discovered URLs: {:?}", urls);
                    return Ok(urls);
                }
            }

            cursor = match page.next {
                Some(next) => next,
                None => {
                    return Err(RemoteError::Exhausted {
                        found: urls.len(),
                        wanted: target_count,
                    })
                }
            };
        }
    }
}
