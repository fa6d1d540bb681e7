// ── Booking wizard controller ──
//
// Four-step sequential flow holding the in-progress reservation draft:
// Details → Services → Summary → Confirmed. Forward transitions are
// gated on field validity; back-navigation never clears collected data.
// The wizard owns the draft exclusively until submission.

use strum::Display;
use tracing::{debug, warn};

use chrono::NaiveDate;
use stowly_api::PlatformClient;

use crate::error::CoreError;
use crate::model::{CustomerDetails, ReservationDraft, ServiceCatalog, UnitSnapshot};
use crate::pricing::{compute_price, PricingResult};

/// Result of a confirmed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The backend returned a payment URL; the session was initialized
    /// and the customer must complete checkout at this gateway URL.
    RedirectToGateway { checkout_url: String },
    /// No payment URL came back -- the booking settled immediately.
    Settled,
}

/// Current wizard step. `Confirmed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum WizardStep {
    Details,
    Services,
    Summary,
    Confirmed(Outcome),
}

/// The booking wizard.
///
/// Holds the draft, the immutable session snapshots (unit, catalog,
/// discount), and the derived pricing, which is recomputed synchronously
/// on every relevant mutation.
pub struct BookingWizard {
    step: WizardStep,
    draft: ReservationDraft,
    unit: Option<UnitSnapshot>,
    catalog: ServiceCatalog,
    discount_pct: f64,
    pricing: PricingResult,
}

impl BookingWizard {
    /// Create a wizard for the given unit. Does NOT fetch anything --
    /// call [`bootstrap()`](Self::bootstrap) to load the session snapshots.
    pub fn new(unit_id: u32) -> Self {
        Self {
            step: WizardStep::Details,
            draft: ReservationDraft::new(unit_id),
            unit: None,
            catalog: ServiceCatalog::default(),
            discount_pct: 0.0,
            pricing: PricingResult::default(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn unit(&self) -> Option<&UnitSnapshot> {
        self.unit.as_ref()
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn discount_pct(&self) -> f64 {
        self.discount_pct
    }

    /// The current pricing, always consistent with the draft.
    pub fn pricing(&self) -> PricingResult {
        self.pricing
    }

    // ── Bootstrap ────────────────────────────────────────────────────

    /// Load the session snapshots: unit, service catalog, loyalty
    /// discount, and customer profile for pre-fill.
    ///
    /// The fetches are independent and race freely; each failure
    /// degrades gracefully (the price engine treats missing data as
    /// zero/empty) rather than blocking the wizard.
    pub async fn bootstrap(&mut self, client: &PlatformClient) {
        let (unit, services, solde, profile) = tokio::join!(
            client.get_unit(self.draft.unit_id()),
            client.list_services(),
            client.get_solde(),
            client.get_profile(),
        );

        match unit {
            Ok(u) => self.unit = Some(u.into()),
            Err(e) => warn!(error = %e, "unit snapshot fetch failed"),
        }
        match services {
            Ok(list) => {
                self.catalog = ServiceCatalog::new(list.into_iter().map(Into::into).collect());
            }
            Err(e) => warn!(error = %e, "service catalog fetch failed"),
        }
        match solde {
            // A non-positive solde disables the discount without error.
            Ok(s) if s.solde > 0.0 => self.discount_pct = s.solde.min(100.0),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "loyalty discount fetch failed"),
        }
        match profile {
            Ok(p) => self.prefill_customer(p.into()),
            Err(e) => debug!(error = %e, "profile pre-fill unavailable"),
        }

        self.recompute();
    }

    /// Inject a unit snapshot directly (tests, offline rendering).
    pub fn load_unit(&mut self, unit: UnitSnapshot) {
        self.unit = Some(unit);
        self.recompute();
    }

    /// Inject a service catalog directly.
    pub fn load_catalog(&mut self, catalog: ServiceCatalog) {
        self.catalog = catalog;
        self.recompute();
    }

    /// Inject a loyalty discount percentage directly.
    pub fn load_discount(&mut self, pct: f64) {
        self.discount_pct = if pct > 0.0 { pct.min(100.0) } else { 0.0 };
        self.recompute();
    }

    /// Fill empty customer fields from an authenticated profile.
    /// Values the customer already typed are never overwritten.
    pub fn prefill_customer(&mut self, profile: CustomerDetails) {
        let customer = &mut self.draft.customer;
        let fill = |target: &mut String, source: String| {
            if target.trim().is_empty() && !source.trim().is_empty() {
                *target = source;
            }
        };
        fill(&mut customer.first_name, profile.first_name);
        fill(&mut customer.last_name, profile.last_name);
        fill(&mut customer.email, profile.email);
        fill(&mut customer.phone, profile.phone);
        fill(&mut customer.address, profile.address);
        fill(&mut customer.city, profile.city);
        fill(&mut customer.postal_code, profile.postal_code);
        fill(&mut customer.country, profile.country);
    }

    // ── Draft mutation ───────────────────────────────────────────────

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.draft.start_date = Some(date);
    }

    pub fn set_duration(&mut self, months: u32) {
        self.draft.duration_months = months.max(1);
        self.recompute();
    }

    /// Switch billing cadence; the annual plan pins duration to 1.
    pub fn set_annual_payment(&mut self, annual: bool) {
        self.draft.set_annual_payment(annual);
        self.recompute();
    }

    /// Toggle an add-on service. Ids outside the loaded catalog are
    /// refused, keeping the draft's selection invariant intact.
    pub fn toggle_service(&mut self, id: u32) -> bool {
        if !self.catalog.contains(id) {
            warn!(service_id = id, "ignoring toggle for unknown service");
            return false;
        }
        if !self.draft.service_ids.remove(&id) {
            self.draft.service_ids.insert(id);
        }
        self.recompute();
        true
    }

    /// Mutable access to the customer fields (they do not affect price).
    pub fn customer_mut(&mut self) -> &mut CustomerDetails {
        &mut self.draft.customer
    }

    fn recompute(&mut self) {
        self.pricing = compute_price(
            self.unit.as_ref(),
            self.draft.duration_months,
            self.draft.annual_payment,
            &self.draft.service_ids,
            &self.catalog,
            self.discount_pct,
        );
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Advance to the next step, re-validating the current guard.
    ///
    /// A failed guard leaves the step unchanged and reports the
    /// offending field; no network call is issued.
    pub fn next(&mut self) -> Result<&WizardStep, CoreError> {
        match self.step {
            WizardStep::Details => {
                self.draft.validate(&self.catalog)?;
                self.step = WizardStep::Services;
            }
            // An empty selection is a valid selection.
            WizardStep::Services => self.step = WizardStep::Summary,
            WizardStep::Summary => {
                return Err(CoreError::ValidationFailed {
                    field: "wizard".into(),
                    reason: "confirm the summary to submit the reservation".into(),
                });
            }
            WizardStep::Confirmed(_) => {
                return Err(CoreError::ValidationFailed {
                    field: "wizard".into(),
                    reason: "the reservation is already confirmed".into(),
                });
            }
        }
        Ok(&self.step)
    }

    /// Step back. Always allowed; collected data is never cleared, so
    /// returning forward finds every previously entered value intact.
    pub fn prev(&mut self) -> &WizardStep {
        self.step = match self.step {
            WizardStep::Services => WizardStep::Details,
            WizardStep::Summary => WizardStep::Services,
            // Details has nothing before it; Confirmed is terminal.
            ref other => other.clone(),
        };
        &self.step
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Submit the draft from the Summary step.
    ///
    /// On success the wizard moves to `Confirmed` with either a gateway
    /// redirect (payment URL returned, session initialized) or a settled
    /// outcome. On any failure the wizard STAYS on Summary -- the server
    /// message is surfaced verbatim and the user may retry; nothing is
    /// retried automatically.
    pub async fn confirm(&mut self, client: &PlatformClient) -> Result<Outcome, CoreError> {
        if self.step != WizardStep::Summary {
            return Err(CoreError::ValidationFailed {
                field: "wizard".into(),
                reason: "only the summary step can be confirmed".into(),
            });
        }

        let booking = self.draft.to_booking(&self.catalog)?;
        let created = client.create_booking(&booking).await?;

        let outcome = match created.payment_url {
            Some(url) => {
                debug!("payment URL returned, initializing payment session");
                let session = client.init_payment_session(&url).await?;
                Outcome::RedirectToGateway {
                    checkout_url: session.checkout_url,
                }
            }
            None => Outcome::Settled,
        };

        self.step = WizardStep::Confirmed(outcome.clone());
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::AddOnService;
    use chrono::{Duration, Local};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn unit() -> UnitSnapshot {
        UnitSnapshot {
            id: 42,
            box_number: "B-112".into(),
            volume_m3: 6.0,
            surface_m2: Some(3.0),
            price_per_month: 100.0,
            available: true,
            features: vec![],
            images: vec![],
            center: None,
        }
    }

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![AddOnService {
            id: 2,
            name: "Assurance".into(),
            description: None,
            price: 20.0,
        }])
    }

    fn fill_details(wizard: &mut BookingWizard) {
        wizard.set_start_date(Local::now().date_naive() + Duration::days(7));
        wizard.set_duration(3);
        *wizard.customer_mut() = CustomerDetails {
            first_name: "Claire".into(),
            last_name: "Moreau".into(),
            email: "claire@example.fr".into(),
            phone: "+33612345678".into(),
            address: "14 rue des Lilas".into(),
            city: "Lyon".into(),
            postal_code: "69003".into(),
            country: "France".into(),
        };
    }

    fn wizard_at_summary() -> BookingWizard {
        let mut wizard = BookingWizard::new(42);
        wizard.load_unit(unit());
        wizard.load_catalog(catalog());
        fill_details(&mut wizard);
        wizard.next().expect("details guard");
        wizard.next().expect("services always passable");
        assert_eq!(*wizard.step(), WizardStep::Summary);
        wizard
    }

    async fn test_client(server: &MockServer) -> PlatformClient {
        let base = server.uri().parse().expect("mock server URI");
        PlatformClient::with_client(reqwest::Client::new(), base)
    }

    // ── Guards ───────────────────────────────────────────────────────

    #[test]
    fn next_with_missing_field_stays_on_details() {
        let mut wizard = BookingWizard::new(42);
        wizard.load_catalog(catalog());
        fill_details(&mut wizard);
        wizard.customer_mut().phone.clear();

        let err = wizard.next().unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
        assert_eq!(*wizard.step(), WizardStep::Details);
    }

    #[test]
    fn services_step_is_always_passable() {
        let mut wizard = BookingWizard::new(42);
        wizard.load_catalog(catalog());
        fill_details(&mut wizard);
        wizard.next().expect("details");
        // No service selected -- still passable.
        wizard.next().expect("services");
        assert_eq!(*wizard.step(), WizardStep::Summary);
    }

    #[test]
    fn back_navigation_preserves_draft() {
        let mut wizard = wizard_at_summary();
        wizard.toggle_service(2);
        let before = wizard.draft().clone();

        wizard.prev();
        wizard.prev();
        assert_eq!(*wizard.step(), WizardStep::Details);
        wizard.next().expect("details");
        wizard.next().expect("services");

        assert_eq!(*wizard.draft(), before);
    }

    #[test]
    fn prev_from_details_is_a_no_op() {
        let mut wizard = BookingWizard::new(42);
        assert_eq!(*wizard.prev(), WizardStep::Details);
    }

    // ── Reactive pricing ─────────────────────────────────────────────

    #[test]
    fn pricing_recomputes_on_each_mutation() {
        let mut wizard = BookingWizard::new(42);
        wizard.load_unit(unit());
        wizard.load_catalog(catalog());

        wizard.set_duration(3);
        assert_eq!(wizard.pricing().total_price, 300.0);

        assert!(wizard.toggle_service(2));
        assert_eq!(wizard.pricing().total_price, 320.0);

        wizard.set_annual_payment(true);
        assert_eq!(wizard.draft().duration_months, 1);
        assert_eq!(wizard.pricing().total_price, 1220.0);

        wizard.load_discount(10.0);
        assert_eq!(wizard.pricing().total_price, 1220.0 - 122.0);
    }

    #[test]
    fn pricing_is_zero_until_unit_loads() {
        let mut wizard = BookingWizard::new(42);
        wizard.load_catalog(catalog());
        wizard.toggle_service(2);
        assert_eq!(wizard.pricing(), PricingResult::default());
    }

    #[test]
    fn unknown_service_toggle_is_refused() {
        let mut wizard = BookingWizard::new(42);
        wizard.load_catalog(catalog());
        assert!(!wizard.toggle_service(99));
        assert!(wizard.draft().service_ids.is_empty());
    }

    // ── Submission ───────────────────────────────────────────────────

    #[tokio::test]
    async fn confirm_redirects_to_gateway() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "paymentUrl": format!("{}/sessions/bk_789", server.uri())
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sessions/bk_789"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "checkoutUrl": "https://gateway.example/checkout/cs_1"
            })))
            .mount(&server)
            .await;

        let mut wizard = wizard_at_summary();
        let outcome = wizard.confirm(&client).await.expect("confirm");

        assert_eq!(
            outcome,
            Outcome::RedirectToGateway {
                checkout_url: "https://gateway.example/checkout/cs_1".into()
            }
        );
        assert!(matches!(wizard.step(), WizardStep::Confirmed(_)));
    }

    #[tokio::test]
    async fn confirm_without_payment_url_settles() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let mut wizard = wizard_at_summary();
        let outcome = wizard.confirm(&client).await.expect("confirm");
        assert_eq!(outcome, Outcome::Settled);
    }

    #[tokio::test]
    async fn rejected_submission_stays_on_summary_with_verbatim_message() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": "Le box B-112 n'est plus disponible"
            })))
            .mount(&server)
            .await;

        let mut wizard = wizard_at_summary();
        let err = wizard.confirm(&client).await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::Rejected { ref message } if message == "Le box B-112 n'est plus disponible"
        ));
        // Recoverable: the user stays on Summary and may retry.
        assert_eq!(*wizard.step(), WizardStep::Summary);
    }

    #[tokio::test]
    async fn confirm_outside_summary_is_refused_without_network() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        let mut wizard = BookingWizard::new(42);
        let err = wizard.confirm(&client).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
        assert!(server.received_requests().await.expect("requests").is_empty());
    }
}
