//! Fan-out coordinator
//!
//! Fetches every candidate's descriptor concurrently, at most
//! `max_concurrent` at a time. Each fetch yields a [`FetchOutcome`];
//! outcomes are merged only after all of them have completed, and failed
//! candidates are left out of the result.

use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Semaphore;

use crate::error::CatalogError;
use crate::remote::RemoteEntry;
use crate::{log_debug, log_info, log_warn};

use super::fetcher::MetadataFetcher;
use super::models::{Device, DeviceDescriptor};

const MODULE: &str = "catalog::fanout";

/// Result of one candidate's fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Success(T),
    Failure(CatalogError),
}

impl<T> From<Result<T, CatalogError>> for FetchOutcome<T> {
    fn from(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Success(value),
            Err(err) => FetchOutcome::Failure(err),
        }
    }
}

/// Concurrency bounds for one fan-out
#[derive(Debug, Clone, Copy)]
pub struct FanOutLimits {
    pub max_concurrent: usize,
    /// Wall clock for one descriptor, backoff included
    pub per_fetch_timeout: Duration,
}

/// Devices that were fetched, plus identifiers left out and why
#[derive(Debug, Clone, Default)]
pub struct FanOutResult {
    pub devices: Vec<Device>,
    pub omitted: Vec<(String, CatalogError)>,
}

/// Fetch one outcome per candidate, in candidate order
pub async fn fetch_outcomes(
    fetcher: &MetadataFetcher,
    candidates: &[RemoteEntry],
    limits: FanOutLimits,
) -> Vec<FetchOutcome<DeviceDescriptor>> {
    let permits = Semaphore::new(limits.max_concurrent.max(1));

    let fetches = candidates.iter().map(|candidate| {
        let permits = &permits;
        async move {
            let _permit = match permits.acquire().await {
                Ok(permit) => permit,
                Err(e) => {
                    return FetchOutcome::Failure(CatalogError::Network {
                        url: candidate.name.clone(),
                        message: format!("fetch slot unavailable: {}", e),
                    })
                }
            };

            log_debug!(MODULE, "Fetching descriptor for {}", candidate.name);
            let fetched = tokio::time::timeout(
                limits.per_fetch_timeout,
                fetcher.get_descriptor(&candidate.name),
            )
            .await
            .unwrap_or_else(|_| {
                Err(CatalogError::Network {
                    url: candidate.name.clone(),
                    message: format!(
                        "timed out after {}s",
                        limits.per_fetch_timeout.as_secs_f64()
                    ),
                })
            });

            FetchOutcome::from(fetched)
        }
    });

    join_all(fetches).await
}

/// Fetch all candidates and keep the ones that succeeded
pub async fn fetch_all(
    fetcher: &MetadataFetcher,
    candidates: &[RemoteEntry],
    limits: FanOutLimits,
) -> FanOutResult {
    let outcomes = fetch_outcomes(fetcher, candidates, limits).await;

    let mut result = FanOutResult::default();
    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            FetchOutcome::Success(descriptor) => result
                .devices
                .push(Device::from_descriptor(&candidate.name, descriptor)),
            FetchOutcome::Failure(err) => {
                log_warn!(MODULE, "Omitting {}: {}", candidate.name, err);
                result.omitted.push((candidate.name.clone(), err));
            }
        }
    }

    log_info!(
        MODULE,
        "Fetched {} of {} devices ({} omitted)",
        result.devices.len(),
        candidates.len(),
        result.omitted.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::scripted::{rate_limited, ScriptedStore};
    use crate::remote::{ContentStore, FileContent};
    use crate::retry::RetryPolicy;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn limits(max_concurrent: usize) -> FanOutLimits {
        FanOutLimits {
            max_concurrent,
            per_fetch_timeout: Duration::from_secs(60),
        }
    }

    fn fetcher(store: Arc<dyn ContentStore>) -> MetadataFetcher {
        MetadataFetcher::new(store, RetryPolicy::new(3, Duration::from_millis(100)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_isolated() {
        let store = ScriptedStore::new()
            .with_text("a/a.json", r#"{"name": "Alpha One"}"#)
            .with_text("b/b.json", "not json")
            .with_error("c/c.json", rate_limited("c/c.json"))
            .with_text("d/d.json", r#"{"name": "Delta Two", "status": "official"}"#);
        let candidates: Vec<RemoteEntry> =
            ["a", "b", "c", "d", "e"].into_iter().map(RemoteEntry::directory).collect();

        let result = fetch_all(&fetcher(Arc::new(store)), &candidates, limits(2)).await;

        let ids: Vec<&str> = result.devices.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);

        let omitted: Vec<&str> = result.omitted.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(omitted, vec!["b", "c", "e"]);
        assert!(matches!(result.omitted[0].1, CatalogError::Parse { .. }));
        assert!(result.omitted[1].1.is_rate_limited());
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcomes_follow_candidate_order() {
        let store = ScriptedStore::new()
            .with_text("x/x.json", r#"{"name": "X"}"#)
            .with_text("y/y.json", "[]");
        let candidates = vec![RemoteEntry::directory("y"), RemoteEntry::directory("x")];

        let outcomes = fetch_outcomes(&fetcher(Arc::new(store)), &candidates, limits(4)).await;

        assert!(matches!(outcomes[0], FetchOutcome::Failure(CatalogError::Parse { .. })));
        match &outcomes[1] {
            FetchOutcome::Success(descriptor) => assert_eq!(descriptor.name, "X"),
            FetchOutcome::Failure(err) => panic!("expected a descriptor, got {}", err),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_fan_out_stops_backoff() {
        let store = Arc::new(
            ScriptedStore::new()
                .with_error("a/a.json", rate_limited("a/a.json"))
                .with_error("b/b.json", rate_limited("b/b.json")),
        );
        let policy = RetryPolicy::new(5, Duration::from_millis(1000));
        let fetcher = MetadataFetcher::new(store.clone(), policy);
        let candidates = vec![RemoteEntry::directory("a"), RemoteEntry::directory("b")];

        // Second attempts land at 1s; give up halfway through the 2s backoff
        let abandoned = tokio::time::timeout(
            Duration::from_millis(1500),
            fetch_all(&fetcher, &candidates, limits(4)),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(store.hits("a/a.json"), 2);
        assert_eq!(store.hits("b/b.json"), 2);

        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(store.hits("a/a.json"), 2);
        assert_eq!(store.hits("b/b.json"), 2);
    }

    /// Store that sleeps on every read and records peak concurrency
    struct SlowStore {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        delay: Duration,
    }

    #[async_trait]
    impl ContentStore for SlowStore {
        async fn list_root(&self) -> Result<Vec<RemoteEntry>, CatalogError> {
            Ok(Vec::new())
        }

        async fn read_file(&self, path: &str) -> Result<FileContent, CatalogError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            let name = path.split('/').next().unwrap_or(path);
            Ok(FileContent::encode(&format!(r#"{{"name": "Vendor {}"}}"#, name)))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let store = Arc::new(SlowStore {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            delay: Duration::from_millis(500),
        });
        let candidates: Vec<RemoteEntry> = (0..20)
            .map(|i| RemoteEntry::directory(format!("dev{}", i)))
            .collect();

        let result = fetch_all(&fetcher(store.clone()), &candidates, limits(3)).await;

        assert_eq!(result.devices.len(), 20);
        assert_eq!(store.peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_times_out_and_is_omitted() {
        let store = Arc::new(SlowStore {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            delay: Duration::from_secs(30),
        });
        let candidates = vec![RemoteEntry::directory("slow")];
        let tight = FanOutLimits {
            max_concurrent: 1,
            per_fetch_timeout: Duration::from_secs(5),
        };

        let result = fetch_all(&fetcher(store), &candidates, tight).await;

        assert!(result.devices.is_empty());
        assert_eq!(result.omitted.len(), 1);
        assert!(matches!(result.omitted[0].1, CatalogError::Network { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_candidates() {
        let store: Arc<dyn ContentStore> = Arc::new(ScriptedStore::new());
        let result = fetch_all(&fetcher(store), &[], limits(5)).await;
        assert!(result.devices.is_empty());
        assert!(result.omitted.is_empty());
    }
}
