// ── Domain model ──

pub mod contract;
pub mod draft;
pub mod service;
pub mod unit;

pub use contract::{ContractContext, ContractRecord};
pub use draft::{CustomerDetails, ReservationDraft};
pub use service::{AddOnService, ServiceCatalog};
pub use unit::{StorageCenter, UnitSnapshot};
