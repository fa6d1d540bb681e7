// ── Price engine ──
//
// Pure pricing for the booking wizard. No I/O, no internal state; safe
// to re-run on every draft mutation, including every keystroke.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::model::{ServiceCatalog, UnitSnapshot};

/// Billing period, in months, applied on the annual lump-sum plan
/// regardless of the stored draft duration.
const ANNUAL_MONTHS: f64 = 12.0;

/// Derived pricing, recomputed from the current draft + snapshots.
/// Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PricingResult {
    pub base_price: f64,
    pub services_total: f64,
    pub discount_amount: f64,
    pub total_price: f64,
}

/// Compute the total price for the current draft state.
///
/// Rules:
/// - base = unit rate x stored duration;
/// - add-on services are summed by id membership in the catalog;
/// - on the annual plan the billable base is rate x 12 (the stored
///   duration is pinned to 1 and does not participate), and a positive
///   loyalty discount percentage applies to base + services;
/// - otherwise total = base + services, no discount.
///
/// A unit snapshot that has not loaded yet yields the zero result, not
/// an error -- the bootstrap fetches race and the caller keeps rendering.
pub fn compute_price(
    unit: Option<&UnitSnapshot>,
    duration_months: u32,
    annual_payment: bool,
    selected: &BTreeSet<u32>,
    catalog: &ServiceCatalog,
    discount_pct: f64,
) -> PricingResult {
    let Some(unit) = unit else {
        return PricingResult::default();
    };

    let base_price = unit.price_per_month * f64::from(duration_months);
    let services_total: f64 = selected
        .iter()
        .filter_map(|&id| catalog.price_of(id))
        .sum();

    if annual_payment {
        let annual_before_discount = unit.price_per_month * ANNUAL_MONTHS + services_total;
        let discount_amount = if discount_pct > 0.0 {
            annual_before_discount * discount_pct / 100.0
        } else {
            0.0
        };
        PricingResult {
            base_price,
            services_total,
            discount_amount,
            total_price: annual_before_discount - discount_amount,
        }
    } else {
        PricingResult {
            base_price,
            services_total,
            discount_amount: 0.0,
            total_price: base_price + services_total,
        }
    }
}

/// Parse and validate a raw duration input.
///
/// Fails fast on non-integer or non-positive values, naming the field;
/// callers must not silently coerce.
pub fn validate_duration(raw: &str) -> Result<u32, CoreError> {
    let trimmed = raw.trim();
    let months: u32 = trimmed.parse().map_err(|_| CoreError::ValidationFailed {
        field: "duration".into(),
        reason: format!("'{trimmed}' is not a whole number of months"),
    })?;
    if months == 0 {
        return Err(CoreError::ValidationFailed {
            field: "duration".into(),
            reason: "duration must be at least one month".into(),
        });
    }
    Ok(months)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::AddOnService;

    fn unit(price_per_month: f64) -> UnitSnapshot {
        UnitSnapshot {
            id: 42,
            box_number: "B-112".into(),
            volume_m3: 6.0,
            surface_m2: Some(3.0),
            price_per_month,
            available: true,
            features: vec![],
            images: vec![],
            center: None,
        }
    }

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            AddOnService {
                id: 2,
                name: "Assurance".into(),
                description: None,
                price: 20.0,
            },
            AddOnService {
                id: 5,
                name: "Cadenas".into(),
                description: None,
                price: 8.0,
            },
        ])
    }

    #[test]
    fn pay_per_duration_with_one_service() {
        // 100€/month x 3 months + one 20€ service = 320€.
        let selected = BTreeSet::from([2]);
        let result = compute_price(Some(&unit(100.0)), 3, false, &selected, &catalog(), 0.0);
        assert_eq!(result.base_price, 300.0);
        assert_eq!(result.services_total, 20.0);
        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.total_price, 320.0);
    }

    #[test]
    fn annual_plan_with_discount() {
        // 100€/month annually = 1200€; 10% discount = 120€; total 1080€.
        let selected = BTreeSet::new();
        let result = compute_price(Some(&unit(100.0)), 1, true, &selected, &catalog(), 10.0);
        assert_eq!(result.discount_amount, 120.0);
        assert_eq!(result.total_price, 1080.0);
    }

    #[test]
    fn annual_multiplier_ignores_stored_duration() {
        // Whatever duration the draft still carries, the annual base is
        // always rate x 12.
        let selected = BTreeSet::new();
        for stored_duration in [1, 3, 7, 24] {
            let result = compute_price(
                Some(&unit(50.0)),
                stored_duration,
                true,
                &selected,
                &catalog(),
                0.0,
            );
            assert_eq!(result.total_price, 600.0, "duration {stored_duration}");
        }
    }

    #[test]
    fn zero_discount_is_exact() {
        let selected = BTreeSet::from([5]);
        let result = compute_price(Some(&unit(80.0)), 1, true, &selected, &catalog(), 0.0);
        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.total_price, 80.0 * 12.0 + 8.0);
    }

    #[test]
    fn negative_discount_is_treated_as_absent() {
        let selected = BTreeSet::new();
        let result = compute_price(Some(&unit(100.0)), 1, true, &selected, &catalog(), -5.0);
        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.total_price, 1200.0);
    }

    #[test]
    fn total_decreases_as_discount_increases() {
        let selected = BTreeSet::from([2, 5]);
        let mut previous = f64::INFINITY;
        for pct in [0.0, 5.0, 10.0, 25.0, 50.0, 100.0] {
            let result =
                compute_price(Some(&unit(100.0)), 1, true, &selected, &catalog(), pct);
            assert!(result.total_price >= 0.0);
            assert!(
                result.total_price < previous || pct == 0.0,
                "total must strictly decrease at {pct}%"
            );
            previous = result.total_price;
        }
    }

    #[test]
    fn missing_unit_yields_zero_result() {
        let selected = BTreeSet::from([2]);
        let result = compute_price(None, 3, false, &selected, &catalog(), 10.0);
        assert_eq!(result, PricingResult::default());
    }

    #[test]
    fn unknown_service_ids_do_not_price() {
        let selected = BTreeSet::from([2, 99]);
        let result = compute_price(Some(&unit(100.0)), 1, false, &selected, &catalog(), 0.0);
        assert_eq!(result.services_total, 20.0);
    }

    #[test]
    fn duration_parsing_rejects_bad_input() {
        assert!(validate_duration("3").is_ok());
        assert!(validate_duration(" 12 ").is_ok());
        for bad in ["0", "-1", "2.5", "abc", ""] {
            let err = validate_duration(bad).unwrap_err();
            assert!(
                matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "duration"),
                "input {bad:?}"
            );
        }
    }
}
