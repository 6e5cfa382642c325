//! Supplier simulation engine
//!
//! Holds the current batch and the three candidate reference points
//! (pinned, GPS, base) and reacts to location events. Two kinds of update:
//!
//! - Resample: a new base point (start, pin, GPS move, visibility on)
//!   replaces the batch wholesale with fresh identities and positions.
//! - Re-derive: the reference point moved but the base did not; every
//!   supplier keeps its identity and position and only `distance_km` is
//!   recomputed.
//!
//! The current batch lives behind an `Arc` and is swapped, never edited, so
//! a renderer holding a snapshot never sees a half-updated list.

use crate::catalog::sampler::{DistanceBand, EntitySampler, NamePool};
use crate::coord::{resolve_active_reference, ActiveReference, Coordinates, ReferenceKind};
use crate::random::RandomSource;
use crate::region::{LocationCheck, RegionTable};
use crate::supplier::Batch;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Inclusive batch size band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSizeBand {
    pub min: usize,
    pub max: usize,
}

impl Default for BatchSizeBand {
    fn default() -> Self {
        Self { min: 5, max: 8 }
    }
}

/// Tunables for batch creation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    pub distance_band: DistanceBand,
    pub batch_size: BatchSizeBand,
}

/// A user-facing message produced by an engine operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub requested: Coordinates,
    pub resolved: Coordinates,
}

impl Notice {
    fn location_adjusted(check: &LocationCheck, requested: Coordinates) -> Self {
        Self {
            message: format!(
                "Location {} is outside the service area; using {} instead",
                requested, check.coords
            ),
            requested,
            resolved: check.coords,
        }
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub batch: Arc<Batch>,
    pub reference: Option<ActiveReference>,
    pub visible: bool,
}

/// Orchestrates sampling, validation and distance updates
pub struct SupplierEngine {
    regions: RegionTable,
    settings: EngineSettings,
    sampler: EntitySampler,
    rng: Box<dyn RandomSource>,
    batch: Arc<Batch>,
    base_location: Option<Coordinates>,
    pinned_location: Option<Coordinates>,
    user_location: Option<Coordinates>,
    /// Set by `on_reference_changed`, dropped when pin, GPS or base moves
    reference_override: Option<Coordinates>,
    visible: bool,
    notices: Vec<Notice>,
}

impl SupplierEngine {
    /// Create an engine with the built-in name pool
    pub fn new(regions: RegionTable, settings: EngineSettings, rng: Box<dyn RandomSource>) -> Self {
        Self::with_pool(regions, settings, NamePool::from_catalog(), rng)
    }

    /// Create an engine over a specific name pool
    pub fn with_pool(
        regions: RegionTable,
        settings: EngineSettings,
        pool: NamePool,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            sampler: EntitySampler::new(pool, settings.distance_band),
            regions,
            settings,
            rng,
            batch: Arc::new(Batch::empty()),
            base_location: None,
            pinned_location: None,
            user_location: None,
            reference_override: None,
            visible: true,
            notices: Vec::new(),
        }
    }

    /// Start from a resolved location (GPS fix or configured default)
    ///
    /// A corrected start queues a notice.
    pub fn initialize(&mut self, start: Coordinates) -> LocationCheck {
        let check = self.regions.check(start);
        if check.corrected {
            warn!(requested = %start, resolved = %check.coords, "Start location corrected");
            self.notices.push(Notice::location_adjusted(&check, start));
        }

        self.base_location = Some(check.coords);
        self.reference_override = None;
        if self.visible {
            self.resample(check.coords);
        }
        self.rederive();
        check
    }

    /// The reference point moved; update distances only
    ///
    /// `reference` becomes the active reference until the pin, GPS fix or
    /// base next changes. Identities, positions and order are untouched.
    pub fn on_reference_changed(&mut self, reference: Coordinates) {
        self.reference_override = Some(reference);
        self.remeasure(reference);
    }

    /// The user pinned a location: new base, new batch
    pub fn on_pin_location(&mut self, coords: Coordinates) -> LocationCheck {
        let check = self.regions.check(coords);
        if check.corrected {
            warn!(requested = %coords, resolved = %check.coords, "Pinned location corrected");
            self.notices.push(Notice::location_adjusted(&check, coords));
        }

        self.base_location = Some(check.coords);
        self.pinned_location = Some(check.coords);
        self.reference_override = None;
        if self.visible {
            self.resample(check.coords);
        }
        self.rederive();
        check
    }

    /// Forget the pin and any explicit reference, falling back to GPS,
    /// then base
    ///
    /// The batch is kept; only distances change.
    pub fn clear_pin(&mut self) {
        let had_override = self.reference_override.take().is_some();
        if self.pinned_location.take().is_some() || had_override {
            self.rederive();
        }
    }

    /// Show or hide nearby suppliers
    ///
    /// Enabling with a known base resamples there. Disabling empties the
    /// batch but keeps the base for later.
    pub fn on_toggle_visibility(&mut self, enabled: bool) {
        self.visible = enabled;

        if !enabled {
            self.batch = Arc::new(Batch::empty());
            return;
        }

        if let Some(base) = self.base_location {
            self.resample(base);
            self.rederive();
        }
    }

    /// A new GPS fix arrived
    ///
    /// Corrections are silent here; continuous tracking would otherwise
    /// spam the user. When suppliers are visible the base moves with the
    /// user and the batch is resampled.
    pub fn on_gps_update(&mut self, raw: Coordinates) -> LocationCheck {
        let check = self.regions.check(raw);
        if check.corrected {
            debug!(requested = %raw, resolved = %check.coords, "GPS fix corrected");
        }

        self.user_location = Some(check.coords);
        self.reference_override = None;
        if self.visible {
            self.base_location = Some(check.coords);
            self.resample(check.coords);
        }
        self.rederive();
        check
    }

    /// Reference distances are currently measured from
    ///
    /// An explicit reference change wins; otherwise pinned, then GPS, then
    /// base.
    pub fn active_reference(&self) -> Option<ActiveReference> {
        self.reference_override
            .map(|coords| ActiveReference {
                kind: ReferenceKind::Manual,
                coords,
            })
            .or_else(|| {
                resolve_active_reference(self.pinned_location, self.user_location, self.base_location)
            })
    }

    /// Current batch; cheap to clone and safe to hold across updates
    pub fn current_batch(&self) -> Arc<Batch> {
        Arc::clone(&self.batch)
    }

    /// Batch plus the reference it is measured from
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            batch: self.current_batch(),
            reference: self.active_reference(),
            visible: self.visible,
        }
    }

    /// Drain queued notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn base_location(&self) -> Option<Coordinates> {
        self.base_location
    }

    pub fn pinned_location(&self) -> Option<Coordinates> {
        self.pinned_location
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn sampler(&self) -> &EntitySampler {
        &self.sampler
    }

    /// Replace the batch with a fresh one around `base`
    fn resample(&mut self, base: Coordinates) {
        let created_at = Utc::now();
        let suppliers = self.sampler.sample_entities_at(
            base,
            self.settings.batch_size.min,
            self.settings.batch_size.max,
            created_at,
            self.rng.as_ref(),
        );

        let batch = Batch::new(base, created_at, suppliers);
        info!(batch = %batch.id, base = %base, suppliers = batch.len(), "Sampled new batch");
        self.batch = Arc::new(batch);
    }

    /// Re-measure distances from the active reference, if any
    fn rederive(&mut self) {
        if let Some(active) = self.active_reference() {
            self.remeasure(active.coords);
        }
    }

    /// Swap in a copy of the batch measured from `reference`
    fn remeasure(&mut self, reference: Coordinates) {
        debug!(reference = %reference, suppliers = self.batch.len(), "Re-deriving distances");
        self.batch = Arc::new(self.batch.measured_from(reference));
    }
}
