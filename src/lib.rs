//! supplier-radar: simulated nearby suppliers
//!
//! A library and CLI tool that places a small batch of synthetic suppliers
//! around a location, keeps their distances current as the user moves or
//! pins a spot, and keeps every location on land.
//!
//! ## Features
//!
//! - Haversine distances and deterministic supplier placement
//! - Rectangle-based land/water classification with anchor fallback
//! - Non-repeating name sampling across batches
//! - An event-driven engine (pin, GPS, reference change, visibility)
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use supplier_radar::coord::Coordinates;
//! use supplier_radar::random::pseudo::SeededPseudoSource;
//! use supplier_radar::region::RegionTable;
//! use supplier_radar::supplier::engine::{EngineSettings, SupplierEngine};
//!
//! let mut engine = SupplierEngine::new(
//!     RegionTable::default(),
//!     EngineSettings::default(),
//!     Box::new(SeededPseudoSource::new(42)),
//! );
//!
//! // Start in Mindanao
//! engine.initialize(Coordinates::new(9.0782, 126.1967));
//!
//! for placed in engine.current_batch().nearest_first() {
//!     println!("{} is {:.2} km away", placed.supplier.name, placed.distance_km);
//! }
//!
//! // Walking around only changes distances
//! engine.on_reference_changed(Coordinates::new(9.0800, 126.2000));
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod insight;
pub mod random;
pub mod region;
pub mod server;
pub mod supplier;

// Re-export commonly used types
pub use config::Config;
pub use coord::{ActiveReference, Coordinates, ReferenceKind};
pub use error::{Error, Result};
pub use region::{LocationCheck, RegionTable};
pub use supplier::engine::{Snapshot, SupplierEngine};
pub use supplier::{Batch, PlacedSupplier, Supplier};
