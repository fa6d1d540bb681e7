// Storage endpoints
//
// Unit snapshots and the add-on service catalog. Both are read-only
// projections fetched once per wizard session.

use tracing::debug;

use crate::client::PlatformClient;
use crate::error::Error;
use crate::types::{ServiceResponse, UnitResponse};

impl PlatformClient {
    /// List all storage units.
    ///
    /// `GET /storage/units`
    pub async fn list_units(&self) -> Result<Vec<UnitResponse>, Error> {
        let url = self.api_url("storage/units")?;
        debug!("listing storage units");
        self.get(url).await
    }

    /// Fetch a single unit snapshot by id.
    ///
    /// `GET /storage/units/:id`
    pub async fn get_unit(&self, id: u32) -> Result<UnitResponse, Error> {
        let url = self.api_url(&format!("storage/units/{id}"))?;
        debug!(unit_id = id, "fetching unit snapshot");
        self.get(url).await
    }

    /// Fetch the add-on service catalog.
    ///
    /// `GET /storage/services`
    pub async fn list_services(&self) -> Result<Vec<ServiceResponse>, Error> {
        let url = self.api_url("storage/services")?;
        debug!("fetching service catalog");
        self.get(url).await
    }
}
