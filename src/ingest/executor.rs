// src/ingest/executor.rs
//! Fetch Executor: one isolated, time-bounded fetch per source.
//!
//! Sources are fetched concurrently (bounded), results are joined before
//! anything downstream runs and come back in registry order. A failure or
//! timeout only empties that source's contribution. No retries.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ingest::feed::decode_rss;
use crate::ingest::types::{FeedTransport, RawRecord, Source, SourceRegistry};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    Fetched { records: usize },
    Failed { reason: String },
    TimedOut,
}

impl FetchStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchStatus::Fetched { .. })
    }
}

/// Output of one source fetch. `records` is empty unless `status` is `Fetched`.
#[derive(Debug, Clone)]
pub struct SourceFetch {
    pub source: Source,
    pub status: FetchStatus,
    pub records: Vec<RawRecord>,
    pub elapsed: Duration,
}

#[derive(Clone)]
pub struct FetchExecutor {
    transport: Arc<dyn FeedTransport>,
    timeout: Duration,
    max_concurrency: usize,
}

impl FetchExecutor {
    pub fn new(transport: Arc<dyn FeedTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pool size is `min(cap, number of sources)`; a cap of 0 is treated as 1.
    pub fn with_max_concurrency(mut self, cap: usize) -> Self {
        self.max_concurrency = cap.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch every source in the registry. Always returns one entry per source.
    pub async fn fetch_all(&self, registry: &SourceRegistry) -> Vec<SourceFetch> {
        let pool = self.max_concurrency.min(registry.len()).max(1);
        debug!(target: "ingest", sources = registry.len(), pool, transport = self.transport.name(), "fetch start");

        // `buffered` yields in input order, so results line up with the registry.
        let out: Vec<SourceFetch> = stream::iter(registry.sources().iter().cloned())
            .map(|source| self.fetch_one(source))
            .buffered(pool)
            .collect()
            .await;

        let ok = out.iter().filter(|f| f.status.is_ok()).count();
        info!(target: "ingest", ok, failed = out.len() - ok, "fetch joined");
        out
    }

    async fn fetch_one(&self, source: Source) -> SourceFetch {
        let t0 = Instant::now();
        let res = tokio::time::timeout(self.timeout, self.transport.fetch_body(&source)).await;
        let elapsed = t0.elapsed();
        histogram!("digest_fetch_ms").record(elapsed.as_secs_f64() * 1_000.0);

        let (status, records) = match res {
            Err(_) => {
                warn!(target: "ingest", source = %source.name, timeout_ms = self.timeout.as_millis() as u64, "source fetch timed out");
                (FetchStatus::TimedOut, Vec::new())
            }
            Ok(Err(e)) => {
                warn!(target: "ingest", source = %source.name, error = %e, "source fetch failed");
                (
                    FetchStatus::Failed {
                        reason: format!("{e:#}"),
                    },
                    Vec::new(),
                )
            }
            Ok(Ok(body)) => match decode_rss(&body) {
                Ok(records) => {
                    info!(target: "ingest", source = %source.name, count = records.len(), "source fetched");
                    counter!("digest_records_total").increment(records.len() as u64);
                    (
                        FetchStatus::Fetched {
                            records: records.len(),
                        },
                        records,
                    )
                }
                Err(e) => {
                    warn!(target: "ingest", source = %source.name, error = %e, "malformed feed");
                    (
                        FetchStatus::Failed {
                            reason: format!("{e:#}"),
                        },
                        Vec::new(),
                    )
                }
            },
        };

        if !status.is_ok() {
            counter!("digest_fetch_errors_total").increment(1);
        }

        SourceFetch {
            source,
            status,
            records,
            elapsed,
        }
    }
}
