// stowly-core: Reservation pricing and contract-finalization workflow
// between stowly-api and consumers (CLI).

pub mod config;
pub mod contract;
pub mod convert;
pub mod error;
pub mod model;
pub mod payment;
pub mod pricing;
pub mod signature;
pub mod signing;
pub mod wizard;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{PlatformConfig, TlsVerification};
pub use stowly_api::PlatformClient;
pub use error::CoreError;
pub use payment::{resolve_payment, PaymentResolution, PENDING_REDIRECT_DELAY};
pub use pricing::{compute_price, validate_duration, PricingResult};
pub use signature::{CapturedSignature, Point, SignaturePad};
pub use signing::SigningSession;
pub use wizard::{BookingWizard, Outcome, WizardStep};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AddOnService, ContractContext, ContractRecord, CustomerDetails, ReservationDraft,
    ServiceCatalog, StorageCenter, UnitSnapshot,
};
