// ── Storage unit domain types ──

use serde::{Deserialize, Serialize};

/// The storage center a unit belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCenter {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Read-only projection of the storage unit being booked.
///
/// Fetched once at wizard start and treated as immutable for the rest of
/// the session; a later catalog refresh never rewrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: u32,
    /// Box number, e.g. "B-112".
    pub box_number: String,
    /// Volume in cubic metres.
    pub volume_m3: f64,
    /// Floor surface in square metres, when the center publishes it.
    pub surface_m2: Option<f64>,
    pub price_per_month: f64,
    pub available: bool,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub center: Option<StorageCenter>,
}
