//! Batch detail lookups against a [`DetailSource`].
//!
//! [`ConcurrentFetcher::fetch_many`] spawns one task per requested ID and waits
//! for all of them before returning. Successful lookups are collected in
//! completion order, so the result order is unspecified and generally differs
//! from the input order. Failed lookups are dropped from the result and only
//! reported through the log. There is no timeout and no cancellation: one slow
//! lookup holds up the whole batch.
//!
//! By default every task runs at once. A concurrency limit caps how many
//! lookups of a single batch are in flight at the same time.

use std::sync::Arc;
use stockroom_core::{DetailSource, FetchError, Product, ProductId};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrentFetcher {
    limit: Option<usize>,
}

impl ConcurrentFetcher {
    /// One in-flight lookup per requested ID, no cap.
    pub fn unbounded() -> Self {
        Self { limit: None }
    }

    /// At most `limit` lookups in flight per batch (a limit of 0 is raised to 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
        }
    }

    /// Build from a config value where 0 means unbounded.
    pub fn from_limit(limit: usize) -> Self {
        if limit == 0 {
            Self::unbounded()
        } else {
            Self::with_limit(limit)
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Fetch details for every ID in `ids` and return the ones that succeeded.
    ///
    /// Duplicate IDs are fetched once per occurrence.
    pub async fn fetch_many(&self, source: Arc<dyn DetailSource>, ids: &[ProductId]) -> Vec<Product> {
        let semaphore = self.limit.map(|limit| Arc::new(Semaphore::new(limit)));
        let mut tasks = JoinSet::new();

        for &id in ids {
            let source = Arc::clone(&source);
            let semaphore = semaphore.clone();

            tasks.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(_) => return (id, Err(FetchError::FetchFailed(id))),
                    },
                    None => None,
                };

                (id, source.fetch_product_details(id).await)
            });
        }

        let mut products = Vec::with_capacity(ids.len());
        let mut failed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(product))) => products.push(product),
                Ok((id, Err(e))) => {
                    failed += 1;
                    warn!(product_id = id, error = %e, "Dropping failed detail fetch");
                }
                Err(e) => {
                    failed += 1;
                    error!(error = %e, "Detail fetch task aborted");
                }
            }
        }

        info!(
            requested = ids.len(),
            fetched = products.len(),
            failed,
            "Batch detail fetch complete"
        );

        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SimulatedDetailSource;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use stockroom_core::SimulatedLatency;

    /// Records how many lookups overlap; fails for odd IDs.
    #[derive(Default)]
    struct TrackingSource {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl DetailSource for TrackingSource {
        async fn fetch_product_details(&self, id: ProductId) -> Result<Product, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(50)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if id % 2 == 1 {
                return Err(FetchError::FetchFailed(id));
            }
            Ok(Product::new(id, format!("Product {}", id), 1.0, 1, "Category"))
        }
    }

    #[tokio::test]
    async fn test_fetch_many_returns_subset_of_requested() {
        let source: Arc<dyn DetailSource> =
            Arc::new(SimulatedDetailSource::new(SimulatedLatency::instant().with_failure_rate(0.5)));
        let ids: Vec<ProductId> = (1..=50).collect();

        let products = ConcurrentFetcher::unbounded().fetch_many(source, &ids).await;

        assert!(products.len() <= ids.len());
        let requested: HashSet<ProductId> = ids.iter().copied().collect();
        assert!(products.iter().all(|p| requested.contains(&p.id)));
    }

    #[tokio::test]
    async fn test_fetch_many_without_failures_returns_everything() {
        let source: Arc<dyn DetailSource> =
            Arc::new(SimulatedDetailSource::new(SimulatedLatency::instant()));
        let ids = vec![3, 1, 2, 2];

        let products = ConcurrentFetcher::with_limit(2).fetch_many(source, &ids).await;

        let mut fetched: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        fetched.sort();
        assert_eq!(fetched, vec![1, 2, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_many_drops_failures() {
        let source = Arc::new(TrackingSource::default());
        let ids: Vec<ProductId> = (1..=10).collect();

        let products = ConcurrentFetcher::unbounded().fetch_many(source, &ids).await;

        let mut fetched: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        fetched.sort();
        assert_eq!(fetched, vec![2, 4, 6, 8, 10]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let source: Arc<dyn DetailSource> = Arc::new(TrackingSource::default());
        assert!(ConcurrentFetcher::unbounded().fetch_many(source, &[]).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_runs_every_lookup_at_once() {
        let source = Arc::new(TrackingSource::default());
        let ids: Vec<ProductId> = (1..=20).collect();

        ConcurrentFetcher::unbounded()
            .fetch_many(source.clone(), &ids)
            .await;

        assert_eq!(source.peak.load(Ordering::SeqCst), 20);
        assert_eq!(source.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_limit_caps_in_flight_lookups() {
        let source = Arc::new(TrackingSource::default());
        let ids: Vec<ProductId> = (1..=20).collect();

        let products = ConcurrentFetcher::with_limit(3)
            .fetch_many(source.clone(), &ids)
            .await;

        assert_eq!(products.len(), 10);
        assert!(source.peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_limit_from_config() {
        assert_eq!(ConcurrentFetcher::from_limit(0).limit(), None);
        assert_eq!(ConcurrentFetcher::from_limit(8).limit(), Some(8));
        assert_eq!(ConcurrentFetcher::with_limit(0).limit(), Some(1));
    }
}
