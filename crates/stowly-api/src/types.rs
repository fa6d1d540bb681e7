// Wire types for the Stowly backend API.
//
// The backend speaks camelCase JSON except where noted (the payment-status
// request body uses `session_id` -- a gateway-side convention preserved
// exactly). These structs stay in the api crate; `stowly-core` converts
// them into domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Storage ─────────────────────────────────────────────────────────

/// A storage center (site) a unit belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageCenterResponse {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// A storage unit as returned by `/storage/units`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitResponse {
    pub id: u32,
    /// Box number, e.g. "B-112".
    pub name: String,
    /// Volume in cubic metres.
    pub volume: f64,
    /// Floor surface in square metres.
    #[serde(default)]
    pub surface: Option<f64>,
    pub price_per_month: f64,
    pub available: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub storage_center: Option<StorageCenterResponse>,
}

/// An optional add-on service from `/storage/services`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

// ── Customer ────────────────────────────────────────────────────────

/// Customer profile used for best-effort wizard pre-fill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfileResponse {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Loyalty discount percentage ("solde") from `/soldes`.
#[derive(Debug, Clone, Deserialize)]
pub struct SoldeResponse {
    pub solde: f64,
}

// ── Bookings ────────────────────────────────────────────────────────

/// Request body for `POST /bookings`.
///
/// Exactly the wire shape the backend expects -- transient UI state never
/// lands here. `start_date` serializes as ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub unit_id: u32,
    pub start_date: NaiveDate,
    pub duration_months: u32,
    pub monthly_payment: bool,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub service_ids: Vec<u32>,
}

/// Response from `POST /bookings`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    /// Second-phase payment-session init URL; absent when the booking
    /// settled without payment (e.g. zero-amount promotions).
    #[serde(default)]
    pub payment_url: Option<String>,
}

// ── Payments ────────────────────────────────────────────────────────

/// Request body for `POST /payments/payment-status`.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatusRequest {
    pub session_id: String,
}

/// Response from `POST /payments/payment-status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub payment_status: String,
    /// Full booking context, present once the payment has settled.
    #[serde(default)]
    pub booking: Option<BookingContextResponse>,
}

/// Booking context returned alongside a settled payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingContextResponse {
    pub customer: CustomerProfileResponse,
    pub unit: UnitResponse,
    pub start_date: NaiveDate,
    pub duration_months: u32,
    pub total_price: f64,
}

/// Response from the gateway's payment-session init call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub checkout_url: String,
}

/// Request body for `POST /payments/customer-signature`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureSubmission {
    pub session_id: String,
    /// PNG data URL of the captured signature raster.
    pub signature: String,
}

/// Bare acknowledgement body -- any JSON object satisfies it.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {}
