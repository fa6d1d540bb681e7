// ── Contract record ──
//
// The merged server + client data used to render the legal document.
// Created after payment confirmation, consumed by the composer, and
// discarded once the artifact is downloaded.

use chrono::NaiveDate;
use image::RgbaImage;

use crate::model::draft::CustomerDetails;
use crate::model::unit::UnitSnapshot;
use crate::signature::CapturedSignature;

/// Booking context returned by the backend once a payment settles.
#[derive(Debug, Clone)]
pub struct ContractContext {
    pub customer: CustomerDetails,
    pub unit: UnitSnapshot,
    pub start_date: NaiveDate,
    pub duration_months: u32,
    pub total_price: f64,
}

/// Everything the contract composer needs: the server-returned context
/// plus the two client-side raster artifacts.
#[derive(Debug, Clone)]
pub struct ContractRecord {
    pub context: ContractContext,
    /// Fixed company stamp; `None` when the embedded asset fails to
    /// decode (the document is still produced).
    pub stamp: Option<RgbaImage>,
    /// Captured customer signature; rendered only when present.
    pub signature: Option<CapturedSignature>,
}

impl ContractRecord {
    pub fn new(context: ContractContext) -> Self {
        Self {
            context,
            stamp: crate::contract::company_stamp(),
            signature: None,
        }
    }
}
