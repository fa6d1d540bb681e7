// Integration tests for `PlatformClient` using wiremock.
#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stowly_api::types::BookingCreate;
use stowly_api::{Error, PlatformClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PlatformClient) {
    let server = MockServer::start().await;
    let base = server.uri().parse().expect("mock server URI");
    let client = PlatformClient::with_client(reqwest::Client::new(), base);
    (server, client)
}

fn sample_booking() -> BookingCreate {
    BookingCreate {
        unit_id: 42,
        start_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        duration_months: 3,
        monthly_payment: false,
        first_name: "Claire".into(),
        last_name: "Moreau".into(),
        email: "claire@example.fr".into(),
        phone: "+33612345678".into(),
        address: "14 rue des Lilas".into(),
        city: "Lyon".into(),
        postal_code: "69003".into(),
        country: "France".into(),
        service_ids: vec![2, 5],
    }
}

// ── Storage endpoints ───────────────────────────────────────────────

#[tokio::test]
async fn test_get_unit() {
    let (server, client) = setup().await;

    let body = json!({
        "id": 42,
        "name": "B-112",
        "volume": 6.0,
        "surface": 3.0,
        "pricePerMonth": 100.0,
        "available": true,
        "features": ["ground floor", "24/7 access"],
        "images": ["https://cdn.stowly.fr/units/42.jpg"],
        "storageCenter": {
            "id": 3,
            "name": "Stowly Lyon Part-Dieu",
            "address": "8 avenue Georges Pompidou",
            "city": "Lyon",
            "postalCode": "69003"
        }
    });

    Mock::given(method("GET"))
        .and(path("/storage/units/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let unit = client.get_unit(42).await.unwrap();

    assert_eq!(unit.id, 42);
    assert_eq!(unit.name, "B-112");
    assert_eq!(unit.price_per_month, 100.0);
    assert!(unit.available);
    assert_eq!(unit.features.len(), 2);
    assert_eq!(
        unit.storage_center.as_ref().map(|c| c.city.as_str()),
        Some("Lyon")
    );
}

#[tokio::test]
async fn test_list_services() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": 2, "name": "Assurance étendue", "description": "Couverture 10 000€", "price": 12.0 },
        { "id": 5, "name": "Cadenas", "price": 8.0 },
    ]);

    Mock::given(method("GET"))
        .and(path("/storage/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let services = client.list_services().await.unwrap();

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "Assurance étendue");
    assert_eq!(services[1].description, None);
    assert_eq!(services[1].price, 8.0);
}

#[tokio::test]
async fn test_get_solde() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/soldes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "solde": 10.0 })))
        .mount(&server)
        .await;

    let solde = client.get_solde().await.unwrap();
    assert_eq!(solde.solde, 10.0);
}

// ── Bookings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_booking_serializes_wire_shape() {
    let (server, client) = setup().await;

    // The backend expects camelCase keys and an ISO start date.
    let expected = json!({
        "unitId": 42,
        "startDate": "2026-09-01",
        "durationMonths": 3,
        "monthlyPayment": false,
        "firstName": "Claire",
        "lastName": "Moreau",
        "email": "claire@example.fr",
        "phone": "+33612345678",
        "address": "14 rue des Lilas",
        "city": "Lyon",
        "postalCode": "69003",
        "country": "France",
        "serviceIds": [2, 5]
    });

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paymentUrl": "https://pay.stowly.fr/sessions/bk_789"
        })))
        .mount(&server)
        .await;

    let created = client.create_booking(&sample_booking()).await.unwrap();
    assert_eq!(
        created.payment_url.as_deref(),
        Some("https://pay.stowly.fr/sessions/bk_789")
    );
}

#[tokio::test]
async fn test_create_booking_without_payment_url() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let created = client.create_booking(&sample_booking()).await.unwrap();
    assert!(created.payment_url.is_none());
}

#[tokio::test]
async fn test_create_booking_rejection_passes_message_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Le box B-112 n'est plus disponible"
        })))
        .mount(&server)
        .await;

    let err = client.create_booking(&sample_booking()).await.unwrap_err();
    match err {
        Error::Rejected { message } => {
            assert_eq!(message, "Le box B-112 n'est plus disponible");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

// ── Payments ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_payment_status_paid_carries_booking_context() {
    let (server, client) = setup().await;

    let body = json!({
        "paymentStatus": "paid",
        "booking": {
            "customer": {
                "firstName": "Claire",
                "lastName": "Moreau",
                "email": "claire@example.fr",
                "phone": "+33612345678",
                "address": "14 rue des Lilas",
                "city": "Lyon",
                "postalCode": "69003",
                "country": "France"
            },
            "unit": {
                "id": 42,
                "name": "B-112",
                "volume": 6.0,
                "surface": 3.0,
                "pricePerMonth": 100.0,
                "available": false,
                "storageCenter": {
                    "id": 3,
                    "name": "Stowly Lyon Part-Dieu",
                    "address": "8 avenue Georges Pompidou",
                    "city": "Lyon",
                    "postalCode": "69003"
                }
            },
            "startDate": "2026-09-01",
            "durationMonths": 3,
            "totalPrice": 320.0
        }
    });

    // Request body key is snake_case by gateway convention.
    Mock::given(method("POST"))
        .and(path("/payments/payment-status"))
        .and(body_json(json!({ "session_id": "cs_test_123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let status = client.payment_status("cs_test_123").await.unwrap();

    assert_eq!(status.payment_status, "paid");
    let booking = status.booking.expect("booking context");
    assert_eq!(booking.total_price, 320.0);
    assert_eq!(booking.unit.name, "B-112");
    assert_eq!(
        booking.customer.first_name.as_deref(),
        Some("Claire")
    );
}

#[tokio::test]
async fn test_init_payment_session_hits_absolute_url() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sessions/bk_789"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "checkoutUrl": "https://gateway.example/checkout/cs_test_123"
        })))
        .mount(&server)
        .await;

    let session = client
        .init_payment_session(&format!("{}/sessions/bk_789", server.uri()))
        .await
        .unwrap();

    assert_eq!(
        session.checkout_url,
        "https://gateway.example/checkout/cs_test_123"
    );
}

#[tokio::test]
async fn test_submit_signature() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/payments/customer-signature"))
        .and(body_json(json!({
            "sessionId": "cs_test_123",
            "signature": "data:image/png;base64,iVBORw0KGgo="
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "received": true })))
        .mount(&server)
        .await;

    client
        .submit_signature("cs_test_123", "data:image/png;base64,iVBORw0KGgo=")
        .await
        .unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/customer/profile-customer"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "token expired"
        })))
        .mount(&server)
        .await;

    let err = client.get_profile().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn test_server_error_maps_to_api_with_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/storage/units/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client.get_unit(42).await.unwrap_err();
    match err {
        Error::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Api, got {other:?}"),
    }
}
