//! Table rendering and progress helpers for command output.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use stowly_core::pricing::PricingResult;
use stowly_core::{AddOnService, UnitSnapshot};

// ── Row types ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct UnitRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Box")]
    pub box_number: String,
    #[tabled(rename = "Volume")]
    pub volume: String,
    #[tabled(rename = "Monthly")]
    pub monthly: String,
    #[tabled(rename = "Available")]
    pub available: String,
    #[tabled(rename = "Center")]
    pub center: String,
}

impl From<&UnitSnapshot> for UnitRow {
    fn from(unit: &UnitSnapshot) -> Self {
        Self {
            id: unit.id,
            box_number: unit.box_number.clone(),
            volume: format!("{} m³", unit.volume_m3),
            monthly: stowly_core::contract::format_eur(unit.price_per_month),
            available: if unit.available { "yes".into() } else { "no".into() },
            center: unit
                .center
                .as_ref()
                .map(|c| format!("{} ({})", c.name, c.city))
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct ServiceRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Service")]
    pub name: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&AddOnService> for ServiceRow {
    fn from(service: &AddOnService) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            price: stowly_core::contract::format_eur(service.price),
            description: service.description.clone().unwrap_or_default(),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────

pub fn print_table<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

/// Print the pricing breakdown the way the summary step shows it.
pub fn print_pricing(pricing: &PricingResult, annual: bool) {
    use stowly_core::contract::format_eur;

    // On the annual plan the billable base is the 12-month amount, not
    // the stored-duration base.
    let (label, base) = if annual {
        (
            "Annual base",
            pricing.total_price + pricing.discount_amount - pricing.services_total,
        )
    } else {
        ("Base price", pricing.base_price)
    };
    println!("  {label}: {}", format_eur(base));
    if pricing.services_total > 0.0 {
        println!("  Services: {}", format_eur(pricing.services_total));
    }
    if pricing.discount_amount > 0.0 {
        println!(
            "  Loyalty discount: -{}",
            format_eur(pricing.discount_amount).green()
        );
    }
    println!(
        "  {}: {}",
        "Total".bold(),
        format_eur(pricing.total_price).bold()
    );
}

/// Spinner for in-flight calls; hidden in quiet mode.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
