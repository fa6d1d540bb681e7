// ── Payment status resolver ──
//
// Invoked once when the customer lands back from the payment gateway,
// keyed by the opaque session identifier on the return URL. This is a
// one-shot check: a pending result schedules a single delayed redirect,
// not a polling loop, so a slow gateway confirmation can strand the
// customer on the pending path. Replace with a bounded-retry poll if
// asynchronous settlement ever needs to be awaited here.

use std::time::Duration;

use tracing::{debug, warn};

use stowly_api::PlatformClient;

use crate::model::ContractContext;

/// How long the caller waits before the one-shot redirect away from the
/// landing view when the payment is still pending.
pub const PENDING_REDIRECT_DELAY: Duration = Duration::from_secs(5);

/// Outcome of the post-payment status check.
#[derive(Debug)]
pub enum PaymentResolution {
    /// Payment settled; carries the full context for the contract record.
    Paid(Box<ContractContext>),
    /// Gateway has not confirmed yet; redirect away after the delay.
    Pending { redirect_after: Duration },
    /// Missing session id, transport failure, or a malformed response.
    Failed { message: String },
}

/// Resolve the payment status for a gateway session.
///
/// A missing session identifier fails immediately -- no network call is
/// made. Transport and server failures resolve to `Failed` with the
/// originating reason; nothing here is retried automatically.
pub async fn resolve_payment(
    client: &PlatformClient,
    session_id: Option<&str>,
) -> PaymentResolution {
    let Some(session_id) = session_id.filter(|s| !s.trim().is_empty()) else {
        return PaymentResolution::Failed {
            message: "no payment session identifier was provided".into(),
        };
    };

    let status = match client.payment_status(session_id).await {
        Ok(status) => status,
        Err(e) => {
            warn!(error = %e, "payment status check failed");
            return PaymentResolution::Failed {
                message: e.to_string(),
            };
        }
    };

    debug!(status = %status.payment_status, "payment status resolved");

    if status.payment_status == "paid" {
        match status.booking {
            Some(context) => PaymentResolution::Paid(Box::new(context.into())),
            // Paid without context cannot produce a contract record.
            None => PaymentResolution::Failed {
                message: "payment settled but the booking context is missing".into(),
            },
        }
    } else {
        PaymentResolution::Pending {
            redirect_after: PENDING_REDIRECT_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_client(server: &MockServer) -> PlatformClient {
        let base = server.uri().parse().expect("mock server URI");
        PlatformClient::with_client(reqwest::Client::new(), base)
    }

    fn paid_body() -> serde_json::Value {
        json!({
            "paymentStatus": "paid",
            "booking": {
                "customer": { "firstName": "Claire", "lastName": "Moreau" },
                "unit": {
                    "id": 42,
                    "name": "B-112",
                    "volume": 6.0,
                    "pricePerMonth": 100.0,
                    "available": false
                },
                "startDate": "2026-09-01",
                "durationMonths": 3,
                "totalPrice": 320.0
            }
        })
    }

    #[tokio::test]
    async fn missing_session_id_fails_without_network_call() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        let resolution = resolve_payment(&client, None).await;
        assert!(matches!(resolution, PaymentResolution::Failed { .. }));

        let blank = resolve_payment(&client, Some("   ")).await;
        assert!(matches!(blank, PaymentResolution::Failed { .. }));

        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn paid_status_carries_contract_context() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/payments/payment-status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paid_body()))
            .mount(&server)
            .await;

        match resolve_payment(&client, Some("cs_test_123")).await {
            PaymentResolution::Paid(context) => {
                assert_eq!(context.total_price, 320.0);
                assert_eq!(context.unit.box_number, "B-112");
                assert_eq!(context.customer.first_name, "Claire");
            }
            other => panic!("expected Paid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_paid_status_is_pending_with_fixed_delay() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/payments/payment-status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "paymentStatus": "processing"
            })))
            .mount(&server)
            .await;

        match resolve_payment(&client, Some("cs_test_123")).await {
            PaymentResolution::Pending { redirect_after } => {
                assert_eq!(redirect_after, PENDING_REDIRECT_DELAY);
            }
            other => panic!("expected Pending, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_failure_surfaces_reason() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/payments/payment-status"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        match resolve_payment(&client, Some("cs_test_123")).await {
            PaymentResolution::Failed { message } => {
                assert!(message.contains("500"), "message: {message}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn paid_without_context_fails() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/payments/payment-status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "paymentStatus": "paid"
            })))
            .mount(&server)
            .await;

        let resolution = resolve_payment(&client, Some("cs_test_123")).await;
        assert!(matches!(resolution, PaymentResolution::Failed { .. }));
    }
}
