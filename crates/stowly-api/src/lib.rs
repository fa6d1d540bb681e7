// stowly-api: Async Rust client for the Stowly rental platform backend

pub mod bookings;
pub mod client;
pub mod customer;
pub mod error;
pub mod payments;
pub mod storage;
pub mod transport;
pub mod types;

pub use client::PlatformClient;
pub use error::Error;
