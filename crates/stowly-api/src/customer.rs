// Customer endpoints
//
// Profile pre-fill and the loyalty discount ("solde"). Both are
// best-effort bootstrap fetches -- callers degrade gracefully on failure.

use tracing::debug;

use crate::client::PlatformClient;
use crate::error::Error;
use crate::types::{CustomerProfileResponse, SoldeResponse};

impl PlatformClient {
    /// Fetch the authenticated customer's profile.
    ///
    /// `GET /customer/profile-customer`
    pub async fn get_profile(&self) -> Result<CustomerProfileResponse, Error> {
        let url = self.api_url("customer/profile-customer")?;
        debug!("fetching customer profile");
        self.get(url).await
    }

    /// Fetch the customer's loyalty discount percentage.
    ///
    /// `GET /soldes` -- a non-positive value disables the discount without
    /// being an error.
    pub async fn get_solde(&self) -> Result<SoldeResponse, Error> {
        let url = self.api_url("soldes")?;
        debug!("fetching loyalty discount");
        self.get(url).await
    }
}
