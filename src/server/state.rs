//! Server shared state
//!
//! Holds configuration, the simulation engine and shared resources for the
//! HTTP server.

use crate::config::Config;
use crate::insight::InsightFetcher;
use crate::random::RandomSource;
use crate::supplier::engine::SupplierEngine;
use std::time::Instant;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// The one engine all requests act on
    engine: RwLock<SupplierEngine>,

    insight: InsightFetcher,

    started_at: Instant,
}

impl AppState {
    /// Create new application state with an uninitialized engine
    pub fn new(config: Config, rng: Box<dyn RandomSource>) -> Self {
        let engine = SupplierEngine::new(config.region_table(), config.engine_settings(), rng);
        Self::with_engine(config, engine)
    }

    /// Create application state around an existing engine
    pub fn with_engine(config: Config, engine: SupplierEngine) -> Self {
        Self {
            insight: InsightFetcher::new(engine.regions().clone()),
            engine: RwLock::new(engine),
            config,
            started_at: Instant::now(),
        }
    }

    /// Shared access to the engine
    pub async fn engine(&self) -> RwLockReadGuard<'_, SupplierEngine> {
        self.engine.read().await
    }

    /// Exclusive access to the engine
    pub async fn engine_mut(&self) -> RwLockWriteGuard<'_, SupplierEngine> {
        self.engine.write().await
    }

    pub fn insight(&self) -> &InsightFetcher {
        &self.insight
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
