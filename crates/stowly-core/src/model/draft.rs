// ── Reservation draft ──
//
// The in-progress booking, owned exclusively by the wizard until
// submission, then mapped by value into the backend wire shape.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use stowly_api::types::BookingCreate;

use crate::error::CoreError;
use crate::model::service::ServiceCatalog;

/// Customer identity and address, collected in the Details step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl CustomerDetails {
    /// The required fields, paired with their user-facing names, for
    /// validation and inline error reporting.
    pub(crate) fn required_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("postal code", &self.postal_code),
            ("country", &self.country),
        ]
    }
}

/// The in-progress reservation.
///
/// `unit_id` is immutable once set from the route context. The cadence
/// flag follows the backend's historical naming: `monthly_payment = true`
/// on the wire means ONE annual lump-sum charge (discount-eligible), and
/// the stored duration is then forced to 1 while pricing uses a 12-month
/// billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    unit_id: u32,
    pub start_date: Option<NaiveDate>,
    pub duration_months: u32,
    pub annual_payment: bool,
    pub service_ids: BTreeSet<u32>,
    pub customer: CustomerDetails,
}

impl ReservationDraft {
    pub fn new(unit_id: u32) -> Self {
        Self {
            unit_id,
            start_date: None,
            duration_months: 1,
            annual_payment: false,
            service_ids: BTreeSet::new(),
            customer: CustomerDetails::default(),
        }
    }

    pub fn unit_id(&self) -> u32 {
        self.unit_id
    }

    /// Switch the billing cadence. Selecting the annual plan pins the
    /// stored duration to 1.
    pub fn set_annual_payment(&mut self, annual: bool) {
        self.annual_payment = annual;
        if annual {
            self.duration_months = 1;
        }
    }

    /// Validate every Details-step field, reporting the first offender.
    ///
    /// Runs synchronously before any network call is enqueued.
    pub fn validate(&self, catalog: &ServiceCatalog) -> Result<(), CoreError> {
        let Some(start) = self.start_date else {
            return Err(CoreError::ValidationFailed {
                field: "start date".into(),
                reason: "a start date is required".into(),
            });
        };
        if start < Local::now().date_naive() {
            return Err(CoreError::ValidationFailed {
                field: "start date".into(),
                reason: "the start date cannot be in the past".into(),
            });
        }
        if self.duration_months < 1 {
            return Err(CoreError::ValidationFailed {
                field: "duration".into(),
                reason: "duration must be at least one month".into(),
            });
        }
        for (name, value) in self.customer.required_fields() {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationFailed {
                    field: name.into(),
                    reason: format!("{name} is required"),
                });
            }
        }
        if let Some(&id) = self.service_ids.iter().find(|&&id| !catalog.contains(id)) {
            return Err(CoreError::ValidationFailed {
                field: "services".into(),
                reason: format!("unknown service id {id}"),
            });
        }
        Ok(())
    }

    /// Map the draft into the backend wire shape.
    ///
    /// Validates first; transient UI state never crosses this boundary.
    pub fn to_booking(&self, catalog: &ServiceCatalog) -> Result<BookingCreate, CoreError> {
        self.validate(catalog)?;
        let start_date = self.start_date.ok_or_else(|| CoreError::Internal(
            "validated draft lost its start date".into(),
        ))?;

        Ok(BookingCreate {
            unit_id: self.unit_id,
            start_date,
            duration_months: self.duration_months,
            monthly_payment: self.annual_payment,
            first_name: self.customer.first_name.clone(),
            last_name: self.customer.last_name.clone(),
            email: self.customer.email.clone(),
            phone: self.customer.phone.clone(),
            address: self.customer.address.clone(),
            city: self.customer.city.clone(),
            postal_code: self.customer.postal_code.clone(),
            country: self.customer.country.clone(),
            service_ids: self.service_ids.iter().copied().collect(),
        })
    }
}
