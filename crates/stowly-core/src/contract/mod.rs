// ── Contract composer ──
//
// Assembles the fixed rental-contract document from a ContractRecord.
// The content is a declarative block list (template), walked by a layout
// engine that draws onto PDF pages (layout) -- what the contract contains
// is decoupled from how it is drawn.

pub mod blocks;
pub mod layout;
pub mod template;

use chrono::NaiveDate;
use image::RgbaImage;
use tracing::warn;

pub use blocks::Block;

use crate::error::CoreError;
use crate::model::ContractRecord;

/// Fixed artifact filename -- deterministic, no per-download randomness.
pub const CONTRACT_FILENAME: &str = "contrat-stowly.pdf";

/// Fixed security deposit collected with every contract.
pub const SECURITY_DEPOSIT_EUR: f64 = 150.0;

/// Fixed filing fee collected with every contract.
pub const FILING_FEE_EUR: f64 = 25.0;

static STAMP_PNG: &[u8] = include_bytes!("../../assets/stamp.png");

/// Decode the embedded company stamp.
///
/// A decode failure degrades to `None` -- the document is still
/// produced without the stamp.
pub fn company_stamp() -> Option<RgbaImage> {
    match image::load_from_memory(STAMP_PNG) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            warn!(error = %e, "company stamp failed to decode");
            None
        }
    }
}

/// Compose the contract document.
///
/// Returns `Ok(None)` when the record is absent -- the caller must not
/// offer a download. The artifact is regenerated fresh on every call,
/// never cached.
pub fn compose(record: Option<&ContractRecord>) -> Result<Option<Vec<u8>>, CoreError> {
    let Some(record) = record else {
        return Ok(None);
    };
    let blocks = template::contract_blocks(record);
    let bytes = layout::render(&blocks)?;
    Ok(Some(bytes))
}

/// Render a monetary value with a trailing `€`.
///
/// Whole amounts print without decimals; fractional amounts keep two.
pub fn format_eur(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}€")
    } else {
        format!("{value:.2}€")
    }
}

/// Render a calendar date as `DD/MM/YYYY` with leading zeros.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_print_without_decimals() {
        assert_eq!(format_eur(320.0), "320€");
        assert_eq!(format_eur(1200.0), "1200€");
        assert_eq!(format_eur(0.0), "0€");
    }

    #[test]
    fn fractional_amounts_keep_two_decimals() {
        assert_eq!(format_eur(12.5), "12.50€");
        assert_eq!(format_eur(99.99), "99.99€");
    }

    #[test]
    fn dates_use_day_month_year_with_leading_zeros() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date");
        assert_eq!(format_date(date), "01/09/2026");
    }

    #[test]
    fn stamp_asset_decodes() {
        let stamp = company_stamp().expect("embedded stamp decodes");
        assert!(stamp.width() > 0 && stamp.height() > 0);
    }

    #[test]
    fn compose_without_record_yields_none() {
        assert!(compose(None).expect("compose").is_none());
    }
}
