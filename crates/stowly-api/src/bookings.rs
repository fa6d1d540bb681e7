// Booking endpoints

use tracing::debug;

use crate::client::PlatformClient;
use crate::error::Error;
use crate::types::{BookingCreate, BookingCreated};

impl PlatformClient {
    /// Create a booking from a finalized reservation draft.
    ///
    /// `POST /bookings` -- business rejections (unit taken, invalid window)
    /// come back as `Error::Rejected` with the server's verbatim message.
    pub async fn create_booking(&self, booking: &BookingCreate) -> Result<BookingCreated, Error> {
        let url = self.api_url("bookings")?;
        debug!(unit_id = booking.unit_id, "creating booking");
        self.post(url, booking).await
    }
}
