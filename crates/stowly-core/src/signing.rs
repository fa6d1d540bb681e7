// ── Contract signing session ──
//
// Orchestrates the post-payment flow: holds the contract record, gates
// submission on capture + acceptance, and enforces at-most-once -- the
// server call is not idempotent and a double submit would create two
// consent records.

use tracing::{info, warn};

use stowly_api::PlatformClient;

use crate::contract;
use crate::error::CoreError;
use crate::model::{ContractContext, ContractRecord};
use crate::signature::CapturedSignature;

/// The signing session for one paid booking.
pub struct SigningSession {
    session_id: String,
    record: ContractRecord,
    accepted_terms: bool,
    submitted: bool,
}

impl SigningSession {
    /// Build a session from the resolver's paid context. The company
    /// stamp is loaded here; the signature arrives later via
    /// [`attach_signature`](Self::attach_signature).
    pub fn new(session_id: impl Into<String>, context: ContractContext) -> Self {
        Self {
            session_id: session_id.into(),
            record: ContractRecord::new(context),
            accepted_terms: false,
            submitted: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn record(&self) -> &ContractRecord {
        &self.record
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Attach a captured signature to the record.
    pub fn attach_signature(&mut self, signature: CapturedSignature) {
        self.record.signature = Some(signature);
    }

    /// Record the terms-acceptance checkbox state.
    pub fn accept_terms(&mut self, accepted: bool) {
        self.accepted_terms = accepted;
    }

    /// Whether submission is currently allowed: a signature has been
    /// captured, terms are accepted, and nothing has been sent yet.
    pub fn can_submit(&self) -> bool {
        self.record.signature.is_some() && self.accepted_terms && !self.submitted
    }

    /// Submit the captured signature as the authoritative record of
    /// consent. The local PDF is a convenience copy, not the legal one.
    ///
    /// On failure the captured signature is kept so the customer can
    /// retry without redrawing; nothing is retried automatically.
    pub async fn submit(&mut self, client: &PlatformClient) -> Result<(), CoreError> {
        if self.submitted {
            return Err(CoreError::AlreadySubmitted);
        }
        if !self.accepted_terms {
            return Err(CoreError::ValidationFailed {
                field: "terms".into(),
                reason: "the rental terms must be accepted before signing".into(),
            });
        }
        let Some(signature) = self.record.signature.as_ref() else {
            return Err(CoreError::ValidationFailed {
                field: "signature".into(),
                reason: "a signature must be captured before submitting".into(),
            });
        };

        match client
            .submit_signature(&self.session_id, &signature.data_url)
            .await
        {
            Ok(()) => {
                self.submitted = true;
                info!(session_id = %self.session_id, "signature submitted");
                Ok(())
            }
            Err(e) => {
                // Signature stays attached for a redraw-free retry.
                warn!(error = %e, "signature submission failed");
                Err(e.into())
            }
        }
    }

    /// Compose the downloadable contract, regenerated fresh each call.
    ///
    /// Server-side signed state stays authoritative even when this
    /// fails after a successful submit -- the two outcomes are reported
    /// separately by the caller.
    pub fn compose_contract(&self) -> Result<Option<Vec<u8>>, CoreError> {
        contract::compose(Some(&self.record))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CustomerDetails, UnitSnapshot};
    use crate::signature::{Point, SignaturePad};
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context() -> ContractContext {
        ContractContext {
            customer: CustomerDetails {
                first_name: "Claire".into(),
                last_name: "Moreau".into(),
                email: "claire@example.fr".into(),
                phone: "+33612345678".into(),
                address: "14 rue des Lilas".into(),
                city: "Lyon".into(),
                postal_code: "69003".into(),
                country: "France".into(),
            },
            unit: UnitSnapshot {
                id: 42,
                box_number: "B-112".into(),
                volume_m3: 6.0,
                surface_m2: Some(3.0),
                price_per_month: 100.0,
                available: false,
                features: vec![],
                images: vec![],
                center: None,
            },
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
            duration_months: 3,
            total_price: 320.0,
        }
    }

    fn captured_signature() -> CapturedSignature {
        let mut pad = SignaturePad::new();
        pad.begin(Point::new(10.0, 10.0));
        pad.extend(Point::new(120.0, 60.0));
        pad.end();
        pad.capture().expect("capture").clone()
    }

    async fn test_client(server: &MockServer) -> PlatformClient {
        let base = server.uri().parse().expect("mock server URI");
        PlatformClient::with_client(reqwest::Client::new(), base)
    }

    #[tokio::test]
    async fn submit_requires_signature_and_acceptance() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;
        let mut session = SigningSession::new("cs_test_123", context());

        assert!(!session.can_submit());
        assert!(session.submit(&client).await.is_err());

        session.attach_signature(captured_signature());
        assert!(!session.can_submit());
        assert!(session.submit(&client).await.is_err());

        session.accept_terms(true);
        assert!(session.can_submit());

        // The guards never issued a network call.
        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn submit_happens_at_most_once() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/payments/customer-signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "received": true })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = SigningSession::new("cs_test_123", context());
        session.attach_signature(captured_signature());
        session.accept_terms(true);

        session.submit(&client).await.expect("first submit");
        assert!(session.submitted());
        assert!(!session.can_submit());

        let err = session.submit(&client).await.unwrap_err();
        assert!(matches!(err, CoreError::AlreadySubmitted));
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_signature_for_retry() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/payments/customer-signature"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut session = SigningSession::new("cs_test_123", context());
        session.attach_signature(captured_signature());
        session.accept_terms(true);

        assert!(session.submit(&client).await.is_err());
        assert!(!session.submitted());
        assert!(session.record().signature.is_some());
        // Still eligible for a user-initiated retry.
        assert!(session.can_submit());
    }

    #[test]
    fn composed_contract_embeds_the_signature() {
        let mut session = SigningSession::new("cs_test_123", context());
        session.attach_signature(captured_signature());

        let bytes = session
            .compose_contract()
            .expect("compose")
            .expect("record present");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
