//! Fixed-size worker pool for the detail fan-out
//!
//! Two distribution strategies are supported:
//! - `Queue`: W long-lived workers pop URLs from a shared queue until it is
//!   empty and send records to a single collector over a channel
//! - `Map`: one task per URL, gated by a semaphore with W permits, with
//!   results reassembled in input order
//!
//! In both cases the first failing fetch aborts the whole pool.

use crate::config::PoolStrategy;
use crate::record::Record;
use crate::{HarvestError, RemoteError, RemoteResult, Result};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Pre-populated queue of detail URLs
///
/// Nothing is pushed after construction. The lock is held only for the pop
/// itself, never across a fetch.
#[derive(Debug, Default)]
pub struct UrlQueue {
    inner: Mutex<VecDeque<String>>,
}

impl UrlQueue {
    /// Creates a queue holding `urls` in order
    pub fn new(urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            inner: Mutex::new(urls.into_iter().collect()),
        }
    }

    /// Removes and returns the next URL, or `None` once drained
    pub fn pop(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

/// A pool of `worker_count` concurrent workers
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    worker_count: usize,
    strategy: PoolStrategy,
}

impl WorkerPool {
    /// Creates a pool; a zero worker count is raised to one
    pub fn new(worker_count: usize, strategy: PoolStrategy) -> Self {
        Self {
            worker_count: worker_count.max(1),
            strategy,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn strategy(&self) -> PoolStrategy {
        self.strategy
    }

    /// Fetches one record per URL using the configured strategy
    ///
    /// Blocks until every worker has finished. On success the result holds
    /// exactly one record per input URL. On failure all outstanding tasks
    /// are aborted and no partial result is returned.
    pub async fn run<F, Fut>(&self, urls: Vec<String>, fetch: F) -> Result<Vec<Record>>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteResult<Record>> + Send + 'static,
    {
        match self.strategy {
            PoolStrategy::Queue => self.drain_queue(urls, fetch).await,
            PoolStrategy::Map => self.map_ordered(urls, fetch).await,
        }
    }

    async fn drain_queue<F, Fut>(&self, urls: Vec<String>, fetch: F) -> Result<Vec<Record>>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteResult<Record>> + Send + 'static,
    {
        let expected = urls.len();
        let queue = Arc::new(UrlQueue::new(urls));
        let fetch = Arc::new(fetch);
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Record>();

        let mut workers = JoinSet::new();
        for worker_id in 0..self.worker_count {
            let queue = Arc::clone(&queue);
            let fetch = Arc::clone(&fetch);
            let result_tx = result_tx.clone();

            workers.spawn(async move {
                let mut handled = 0usize;
                while let Some(url) = queue.pop() {
                    let record = (*fetch)(url).await?;
                    tracing::debug!(
                        "Worker {} fetched #{} {}",
                        worker_id,
                        record.id,
                        record.name
                    );
                    // The collector holds the receiver until every worker is joined
                    let _ = result_tx.send(record);
                    handled += 1;
                }
                tracing::debug!("Worker {} exiting after {} items", worker_id, handled);
                Ok::<usize, RemoteError>(handled)
            });
        }
        drop(result_tx);

        while let Some(joined) = workers.join_next().await {
            joined.map_err(|e| HarvestError::Worker(e.to_string()))??;
        }

        let mut records = Vec::with_capacity(expected);
        while let Some(record) = result_rx.recv().await {
            records.push(record);
        }

        if records.len() != expected {
            return Err(HarvestError::Worker(format!(
                "collected {} records for {} URLs",
                records.len(),
                expected
            )));
        }

        Ok(records)
    }

    async fn map_ordered<F, Fut>(&self, urls: Vec<String>, fetch: F) -> Result<Vec<Record>>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteResult<Record>> + Send + 'static,
    {
        let expected = urls.len();
        let permits = Arc::new(Semaphore::new(self.worker_count));
        let fetch = Arc::new(fetch);

        let mut tasks = JoinSet::new();
        for (index, url) in urls.into_iter().enumerate() {
            let permits = Arc::clone(&permits);
            let fetch = Arc::clone(&fetch);

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| HarvestError::Worker(e.to_string()))?;
                let record = (*fetch)(url).await?;
                tracing::debug!("Task {} fetched #{} {}", index, record.id, record.name);
                Ok::<(usize, Record), HarvestError>((index, record))
            });
        }

        let mut slots: Vec<Option<Record>> = vec![None; expected];
        while let Some(joined) = tasks.join_next().await {
            let (index, record) = joined.map_err(|e| HarvestError::Worker(e.to_string()))??;
            slots[index] = Some(record);
        }

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| HarvestError::Worker("a task finished without a record".to_string()))
    }
}
