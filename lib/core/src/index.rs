//! TTL-cached candidate index
//!
//! Readers clone an `Arc` to the current snapshot and drop the read lock
//! immediately. Rebuilds are serialized by `rebuild_lock`; a caller that
//! queued behind an in-flight rebuild takes that attempt's outcome (detected
//! by the attempt counter) instead of fetching a second time, whether the
//! attempt succeeded or failed.

use crate::candidate::{CandidateRecord, CandidateSource};
use crate::clock::{Clock, SystemClock};
use crate::config::MatchConfig;
use crate::snapshot::{IndexSnapshot, SearchOptions};
use crate::{Error, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Counters describing an index's rebuild history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Calls made to the candidate source
    pub fetches: u64,
    /// Fetches that produced a new snapshot
    pub rebuilds: u64,
    /// Fetches that failed
    pub failures: u64,
    /// Failed rebuilds answered with the previous snapshot
    pub stale_serves: u64,
    /// Generation of the current snapshot (0 before the first build)
    pub generation: u64,
    /// Records in the current snapshot
    pub records: usize,
}

#[derive(Debug, Default)]
struct Counters {
    fetches: AtomicU64,
    rebuilds: AtomicU64,
    failures: AtomicU64,
    stale_serves: AtomicU64,
}

/// Cached, rebuildable search structure over one candidate domain
pub struct CandidateIndex {
    name: String,
    source: Arc<dyn CandidateSource>,
    options: SearchOptions,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    snapshot: RwLock<Option<Arc<IndexSnapshot>>>,
    /// Held for the whole rebuild; guards the last failure message
    rebuild_lock: Mutex<Option<String>>,
    /// Completed rebuild attempts, successful or not
    attempts: AtomicU64,
    generation: AtomicU64,
    invalidated: AtomicBool,
    counters: Counters,
}

impl std::fmt::Debug for CandidateIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateIndex")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish()
    }
}

impl CandidateIndex {
    /// Create an empty index; the first [`get`](Self::get) triggers the build
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn CandidateSource>,
        config: &MatchConfig,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            options: SearchOptions::from(config),
            ttl: config.cache_ttl(),
            clock: Arc::new(SystemClock),
            snapshot: RwLock::new(None),
            rebuild_lock: Mutex::new(None),
            attempts: AtomicU64::new(0),
            generation: AtomicU64::new(0),
            invalidated: AtomicBool::new(false),
            counters: Counters::default(),
        }
    }

    /// Replace the time source used for expiry checks
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current snapshot, rebuilding first if it is missing, expired or invalidated
    ///
    /// Fails with [`Error::SourceUnavailable`] only when the source fails and
    /// there is no previous snapshot to serve.
    pub fn get(&self) -> Result<Arc<IndexSnapshot>> {
        let observed_attempt = self.attempts.load(Ordering::Acquire);
        if let Some(snapshot) = self.snapshot.read().clone() {
            if self.is_usable(&snapshot) {
                return Ok(snapshot);
            }
        }

        let mut last_error = self.rebuild_lock.lock();
        let current = self.snapshot.read().clone();

        if self.attempts.load(Ordering::Acquire) != observed_attempt {
            // an attempt finished while we waited: share its outcome
            return match (current, last_error.as_ref()) {
                (Some(snapshot), failure) => {
                    if failure.is_some() {
                        self.counters.stale_serves.fetch_add(1, Ordering::Relaxed);
                    }
                    debug!("{}: joined in-flight rebuild (generation {})", self.name, snapshot.generation());
                    Ok(snapshot)
                }
                (None, failure) => Err(Error::SourceUnavailable(
                    failure.cloned().unwrap_or_else(|| format!("{}: rebuild failed", self.name)),
                )),
            };
        }

        self.rebuild_locked(&mut last_error, current)
    }

    /// Rebuild now, regardless of TTL
    ///
    /// Same failure policy as [`get`](Self::get).
    pub fn refresh(&self) -> Result<Arc<IndexSnapshot>> {
        let mut last_error = self.rebuild_lock.lock();
        let current = self.snapshot.read().clone();
        self.rebuild_locked(&mut last_error, current)
    }

    /// Force the next [`get`](Self::get) to rebuild; the current snapshot is
    /// kept as the stale fallback
    pub fn invalidate(&self) {
        self.invalidated.store(true, Ordering::Release);
    }

    /// Current snapshot without triggering a rebuild
    pub fn peek(&self) -> Option<Arc<IndexSnapshot>> {
        self.snapshot.read().clone()
    }

    pub fn stats(&self) -> IndexStats {
        let snapshot = self.snapshot.read();
        IndexStats {
            fetches: self.counters.fetches.load(Ordering::Relaxed),
            rebuilds: self.counters.rebuilds.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            stale_serves: self.counters.stale_serves.load(Ordering::Relaxed),
            generation: snapshot.as_ref().map(|s| s.generation()).unwrap_or(0),
            records: snapshot.as_ref().map(|s| s.len()).unwrap_or(0),
        }
    }

    fn is_usable(&self, snapshot: &IndexSnapshot) -> bool {
        !self.invalidated.load(Ordering::Acquire)
            && snapshot.is_fresh(self.clock.now(), self.ttl)
    }

    /// `last_error` is the guarded content of `rebuild_lock`
    fn rebuild_locked(
        &self,
        last_error: &mut Option<String>,
        previous: Option<Arc<IndexSnapshot>>,
    ) -> Result<Arc<IndexSnapshot>> {
        // invalidations arriving during the fetch must survive it
        let was_invalidated = self.invalidated.swap(false, Ordering::AcqRel);
        self.counters.fetches.fetch_add(1, Ordering::Relaxed);

        let outcome = self.source.fetch_all();
        let result = self.publish(outcome, last_error, previous, was_invalidated);
        self.attempts.fetch_add(1, Ordering::Release);
        result
    }

    fn publish(
        &self,
        outcome: Result<Vec<CandidateRecord>>,
        last_error: &mut Option<String>,
        previous: Option<Arc<IndexSnapshot>>,
        was_invalidated: bool,
    ) -> Result<Arc<IndexSnapshot>> {
        match outcome {
            Ok(records) => {
                let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
                let snapshot = Arc::new(IndexSnapshot::build(
                    records,
                    self.options,
                    self.clock.now(),
                    generation,
                ));

                *self.snapshot.write() = Some(Arc::clone(&snapshot));
                *last_error = None;
                self.counters.rebuilds.fetch_add(1, Ordering::Relaxed);

                debug!(
                    "{}: rebuilt index generation {} with {} candidates",
                    self.name,
                    generation,
                    snapshot.len()
                );
                Ok(snapshot)
            }
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                if was_invalidated {
                    self.invalidated.store(true, Ordering::Release);
                }
                let message = match &e {
                    Error::SourceUnavailable(msg) => msg.clone(),
                    other => other.to_string(),
                };
                *last_error = Some(message.clone());
                match previous {
                    Some(stale) => {
                        self.counters.stale_serves.fetch_add(1, Ordering::Relaxed);
                        warn!(
                            "{}: candidate fetch failed, serving generation {}: {}",
                            self.name,
                            stale.generation(),
                            e
                        );
                        Ok(stale)
                    }
                    None => Err(Error::SourceUnavailable(message)),
                }
            }
        }
    }
}
