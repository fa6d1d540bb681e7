// Payment endpoints
//
// Status resolution, second-phase session init against the gateway's own
// URL, and signed-contract submission.

use tracing::debug;
use url::Url;

use crate::client::PlatformClient;
use crate::error::Error;
use crate::types::{
    Ack, PaymentSession, PaymentStatusRequest, PaymentStatusResponse, SignatureSubmission,
};

impl PlatformClient {
    /// Resolve the payment status for a gateway session.
    ///
    /// `POST /payments/payment-status {session_id}` -- the body key is
    /// snake_case by gateway convention.
    pub async fn payment_status(&self, session_id: &str) -> Result<PaymentStatusResponse, Error> {
        let url = self.api_url("payments/payment-status")?;
        debug!(session_id, "resolving payment status");
        self.post(
            url,
            &PaymentStatusRequest {
                session_id: session_id.to_owned(),
            },
        )
        .await
    }

    /// Initialize a payment session.
    ///
    /// `POST <payment_url>` -- the URL comes verbatim from the booking
    /// response and is called as-is. The returned checkout URL is where
    /// the customer completes payment.
    pub async fn init_payment_session(&self, payment_url: &str) -> Result<PaymentSession, Error> {
        let url = Url::parse(payment_url)?;
        debug!(%url, "initializing payment session");
        self.post_absolute(url).await
    }

    /// Submit the captured customer signature.
    ///
    /// `POST /payments/customer-signature {sessionId, signature}` -- NOT
    /// idempotent server-side; callers enforce at-most-once.
    pub async fn submit_signature(
        &self,
        session_id: &str,
        signature_data_url: &str,
    ) -> Result<(), Error> {
        let url = self.api_url("payments/customer-signature")?;
        debug!(session_id, "submitting customer signature");
        let _: Ack = self
            .post(
                url,
                &SignatureSubmission {
                    session_id: session_id.to_owned(),
                    signature: signature_data_url.to_owned(),
                },
            )
            .await?;
        Ok(())
    }
}
