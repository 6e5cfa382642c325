//! Synthetic suppliers and batches
//!
//! A `Supplier` is fixed the moment it is created. A `PlacedSupplier` pairs
//! it with its marker position and the distance from whatever reference
//! point is active right now; only that distance ever changes.

pub mod engine;

use crate::catalog::products::{generate_products, generate_services};
use crate::catalog::{CLOSE_TIMES, OPEN_TIMES, SUPPLIER_CATEGORIES};
use crate::coord::distance::haversine_km;
use crate::coord::position::generate_position;
use crate::coord::Coordinates;
use crate::random::RandomSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lowest rating a supplier can get
pub const MIN_RATING: f64 = 4.5;

/// Highest rating a supplier can get
pub const MAX_RATING: f64 = 5.0;

/// Opening and closing time, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
}

impl std::fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.open, self.close)
    }
}

/// Synthesized contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// Derive contact details from a supplier name
    pub fn from_name(name: &str) -> Self {
        let compact: String = slug(name).chars().filter(|c| *c != '-').collect();
        let digits = name_digits(name);

        Self {
            email: format!("info@{}.ph", compact),
            phone: format!(
                "+63 9{:02} {:03} {:04}",
                digits % 100,
                (digits / 100) % 1000,
                (digits / 100_000) % 10_000
            ),
        }
    }
}

/// A synthetic operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// `{slug}-{created_at_millis}-{index}`, unique within a batch
    pub id: String,
    pub name: String,
    pub category: String,
    /// In [4.5, 5.0], one decimal
    pub rating: f64,
    pub products: Vec<String>,
    pub services: Vec<String>,
    pub hours: OperatingHours,
    pub contact: Contact,
    /// Draw order within the batch
    pub index: usize,
    /// Distance from the batch base this supplier was placed at
    pub target_distance_km: f64,
}

impl Supplier {
    /// Create a supplier, consulting `rng` for the random attributes
    ///
    /// # Arguments
    /// * `name` - Name drawn from the pool
    /// * `index` - Draw index within the batch
    /// * `created_at` - Batch creation time, baked into the id
    /// * `target_distance_km` - Distance the supplier will be placed at
    /// * `rng` - Creation-phase random source
    pub fn create(
        name: &str,
        index: usize,
        created_at: DateTime<Utc>,
        target_distance_km: f64,
        rng: &dyn RandomSource,
    ) -> Self {
        let id = format!("{}-{}-{}", slug(name), created_at.timestamp_millis(), index);

        let category = SUPPLIER_CATEGORIES[rng.range_usize(0, SUPPLIER_CATEGORIES.len() - 1)];
        let rating = ((MIN_RATING + (MAX_RATING - MIN_RATING) * rng.float()) * 10.0).round() / 10.0;
        let hours = OperatingHours {
            open: OPEN_TIMES[rng.range_usize(0, OPEN_TIMES.len() - 1)].to_string(),
            close: CLOSE_TIMES[rng.range_usize(0, CLOSE_TIMES.len() - 1)].to_string(),
        };

        Self {
            products: generate_products(&id),
            services: generate_services(rng),
            contact: Contact::from_name(name),
            id,
            name: name.to_string(),
            category: category.to_string(),
            rating: rating.clamp(MIN_RATING, MAX_RATING),
            hours,
            index,
            target_distance_km,
        }
    }
}

/// A supplier with its marker position and live distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSupplier {
    pub supplier: Arc<Supplier>,
    pub position: Coordinates,
    /// Distance from the active reference point; derived, never stored
    pub distance_km: f64,
}

impl PlacedSupplier {
    /// Place a freshly created supplier around the batch base
    pub fn place(supplier: Supplier, base: Coordinates) -> Self {
        let position = generate_position(
            &supplier.id,
            supplier.index,
            base,
            supplier.target_distance_km,
        );

        Self {
            supplier: Arc::new(supplier),
            position,
            distance_km: haversine_km(base, position),
        }
    }

    /// Same supplier and position, distance measured from `reference`
    pub fn measured_from(&self, reference: Coordinates) -> Self {
        Self {
            supplier: Arc::clone(&self.supplier),
            position: self.position,
            distance_km: haversine_km(reference, self.position),
        }
    }
}

/// A complete, atomically replaced set of suppliers tied to one base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    /// Point the batch was generated around; `None` for the empty batch
    pub base: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    /// In draw order
    pub suppliers: Vec<PlacedSupplier>,
}

impl Batch {
    /// Wrap freshly sampled suppliers
    pub fn new(base: Coordinates, created_at: DateTime<Utc>, suppliers: Vec<PlacedSupplier>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            base: Some(base),
            created_at,
            suppliers,
        }
    }

    /// A batch with nothing in it
    pub fn empty() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            base: None,
            created_at: Utc::now(),
            suppliers: Vec::new(),
        }
    }

    /// Same batch with every distance re-measured from `reference`
    ///
    /// Builds a new list; the receiver is never touched, so readers holding
    /// the old batch see a consistent view.
    pub fn measured_from(&self, reference: Coordinates) -> Self {
        Self {
            id: self.id.clone(),
            base: self.base,
            created_at: self.created_at,
            suppliers: self
                .suppliers
                .iter()
                .map(|placed| placed.measured_from(reference))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Look up a supplier by id
    pub fn get(&self, id: &str) -> Option<&PlacedSupplier> {
        self.suppliers.iter().find(|p| p.supplier.id == id)
    }

    /// Suppliers ordered nearest first. Returns a copy; batch order is kept.
    pub fn nearest_first(&self) -> Vec<&PlacedSupplier> {
        let mut sorted: Vec<&PlacedSupplier> = self.suppliers.iter().collect();
        sorted.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        sorted
    }
}

/// Lowercase alphanumeric runs joined with '-'
pub fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// FNV-1a over the name, for stable phone digits
fn name_digits(name: &str) -> u64 {
    name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
