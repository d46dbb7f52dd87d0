use std::sync::{
    Arc, Mutex, RwLock,
    atomic::{AtomicU64, Ordering},
};

use chrono::Utc;

use crate::{
    config::CatalogConfig,
    error::Result,
    models::{AggregateResult, SnapshotInfo},
    services::aggregator,
    source::ProductSource,
};

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub file_suffix: String,
    pub cache: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            file_suffix: ".json".to_string(),
            cache: true,
        }
    }
}

impl From<&CatalogConfig> for CatalogOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            file_suffix: config.file_suffix.clone(),
            cache: config.cache,
        }
    }
}

struct Snapshot {
    info: SnapshotInfo,
    result: Arc<AggregateResult>,
}

/// Owns the aggregated catalog and decides when a pass runs.
///
/// With caching on, one snapshot is served until `refresh` replaces it as a
/// whole. With caching off, every `list` runs a fresh pass.
pub struct CatalogService {
    source: Arc<dyn ProductSource>,
    options: CatalogOptions,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    // Held for the duration of a pass so concurrent refreshes don't race.
    pass_lock: Mutex<()>,
    passes: AtomicU64,
}

impl CatalogService {
    pub fn new(source: Arc<dyn ProductSource>, options: CatalogOptions) -> Self {
        Self {
            source,
            options,
            snapshot: RwLock::new(None),
            pass_lock: Mutex::new(()),
            passes: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &dyn ProductSource {
        self.source.as_ref()
    }

    pub fn is_cached(&self) -> bool {
        self.options.cache
    }

    /// Builds the first snapshot.
    pub fn init(&self) -> Result<Arc<AggregateResult>> {
        self.refresh()
    }

    pub fn list(&self) -> Result<Arc<AggregateResult>> {
        if !self.options.cache {
            return self.refresh();
        }

        if let Some(snapshot) = self.current() {
            return Ok(snapshot.result.clone());
        }

        let _guard = self.pass_lock.lock().unwrap_or_else(|e| e.into_inner());
        // Another caller may have finished a pass while we waited.
        if let Some(snapshot) = self.current() {
            return Ok(snapshot.result.clone());
        }
        self.run_pass()
    }

    /// Runs a new pass and swaps it in. On failure the previous snapshot
    /// stays in place.
    pub fn refresh(&self) -> Result<Arc<AggregateResult>> {
        let _guard = self.pass_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.run_pass()
    }

    pub fn snapshot_info(&self) -> Option<SnapshotInfo> {
        self.current().map(|s| s.info)
    }

    pub async fn list_async(self: &Arc<Self>) -> Result<Arc<AggregateResult>> {
        let catalog = Arc::clone(self);
        tokio::task::spawn_blocking(move || catalog.list()).await?
    }

    pub async fn refresh_async(self: &Arc<Self>) -> Result<Arc<AggregateResult>> {
        let catalog = Arc::clone(self);
        tokio::task::spawn_blocking(move || catalog.refresh()).await?
    }

    /// Lists the source without aggregating, returning the entry count.
    pub async fn check_source(self: &Arc<Self>) -> Result<usize> {
        let catalog = Arc::clone(self);
        tokio::task::spawn_blocking(move || catalog.source.list().map(|names| names.len())).await?
    }

    fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn run_pass(&self) -> Result<Arc<AggregateResult>> {
        let result = Arc::new(aggregator::aggregate(
            self.source.as_ref(),
            &self.options.file_suffix,
        )?);

        let pass = self.passes.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = Arc::new(Snapshot {
            info: SnapshotInfo {
                pass,
                built_at: Utc::now(),
                products: result.products.len(),
            },
            result: result.clone(),
        });

        *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = Some(snapshot);
        tracing::debug!("Catalog snapshot #{} installed", pass);

        Ok(result)
    }
}
