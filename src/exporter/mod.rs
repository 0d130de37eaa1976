mod metrics;

pub use metrics::build_document;

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::anilist::{AnilistConnector, Requester};
use crate::error::{AlpeError, ApiError, IsRetryable};
use crate::model::LibrarySnapshot;

/// Shape of one rendered `/metrics` document. Attached to the response so
/// the access log can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub groups: usize,
    pub points: usize,
    pub cached: bool,
}

pub struct Scrape {
    pub body: String,
    pub summary: ScrapeSummary,
}

/// Fetches the AniList library on demand and renders it as metrics.
///
/// The requester sits behind a mutex so only one pass talks to AniList at a
/// time. Finished snapshots are kept for the configured TTL.
pub struct Exporter {
    requester: Mutex<Requester>,
    cache: Option<Cache<(), Arc<LibrarySnapshot>>>,
}

impl Exporter {
    pub fn new(requester: Requester, cache_ttl: Option<Duration>) -> Self {
        let cache = cache_ttl.map(|ttl| Cache::builder().max_capacity(1).time_to_live(ttl).build());
        Self {
            requester: Mutex::new(requester),
            cache,
        }
    }

    /// Current library snapshot and whether it came from the cache.
    pub async fn snapshot(&self) -> Result<(Arc<LibrarySnapshot>, bool), ApiError> {
        if let Some(snapshot) = self.cached().await {
            return Ok((snapshot, true));
        }

        let mut requester = self.requester.lock().await;
        // Another scrape may have filled the cache while we waited.
        if let Some(snapshot) = self.cached().await {
            return Ok((snapshot, true));
        }

        let snapshot = match AnilistConnector::new(&mut requester).snapshot().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(err) if err.is_retryable() => {
                warn!(error = %err, "AniList fetch failed, will retry on next scrape");
                return Err(err);
            }
            Err(err) => {
                error!(error = %err, "AniList fetch failed");
                return Err(err);
            }
        };
        info!(
            user_id = snapshot.user.user_id,
            anime = snapshot.animes.media.len(),
            manga = snapshot.mangas.media.len(),
            "AniList library fetched"
        );

        if let Some(cache) = &self.cache {
            cache.insert((), snapshot.clone()).await;
        }
        Ok((snapshot, false))
    }

    pub async fn render(&self) -> Result<Scrape, AlpeError> {
        let (snapshot, cached) = self.snapshot().await?;
        let doc = build_document(&snapshot)?;
        Ok(Scrape {
            body: doc.format(),
            summary: ScrapeSummary {
                groups: doc.nb_groups(),
                points: doc.nb_points(),
                cached,
            },
        })
    }

    async fn cached(&self) -> Option<Arc<LibrarySnapshot>> {
        match &self.cache {
            Some(cache) => cache.get(&()).await,
            None => None,
        }
    }
}
