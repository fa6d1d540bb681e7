//! Reservation wizard handler.
//!
//! Drives the core `BookingWizard` through its four steps. Flags pre-fill
//! fields; with `--yes` the wizard runs non-interactively and any guard
//! failure is fatal instead of re-prompted.

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect};
use owo_colors::OwoColorize;

use stowly_core::pricing::validate_duration;
use stowly_core::{BookingWizard, Outcome, PlatformClient};

use crate::cli::{BookArgs, GlobalOpts};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &PlatformClient,
    args: BookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut wizard = BookingWizard::new(args.unit_id);

    let spinner = output::spinner("Loading reservation data...", global.quiet);
    wizard.bootstrap(client).await;
    spinner.finish_and_clear();

    match wizard.unit() {
        Some(unit) => {
            if !global.quiet {
                println!(
                    "Booking unit {} -- box {} ({} m³, {}/month)",
                    unit.id,
                    unit.box_number,
                    unit.volume_m3,
                    stowly_core::contract::format_eur(unit.price_per_month)
                );
            }
            if !unit.available {
                eprintln!(
                    "{}",
                    "Warning: this unit is currently marked unavailable; the platform may refuse the booking."
                        .yellow()
                );
            }
        }
        None => eprintln!(
            "{}",
            "Warning: unit details could not be loaded; pricing will show 0 until submission."
                .yellow()
        ),
    }

    apply_flags(&mut wizard, &args)?;
    let interactive = !global.yes;

    // ── Details ──────────────────────────────────────────────────────
    loop {
        if interactive {
            prompt_details(&mut wizard)?;
        }
        match wizard.next() {
            Ok(_) => break,
            Err(e) if interactive => eprintln!("{}", e.to_string().red()),
            Err(e) => return Err(e.into()),
        }
    }

    // ── Services ─────────────────────────────────────────────────────
    if interactive && !wizard.catalog().is_empty() {
        prompt_services(&mut wizard)?;
    }
    wizard.next()?;

    // ── Summary ──────────────────────────────────────────────────────
    print_summary(&wizard);
    if !util::confirm("Confirm the reservation and proceed to payment?", global.yes)? {
        println!("Reservation cancelled; nothing was submitted.");
        return Ok(());
    }

    let spinner = output::spinner("Submitting reservation...", global.quiet);
    let outcome = wizard.confirm(client).await;
    spinner.finish_and_clear();

    match outcome? {
        Outcome::RedirectToGateway { checkout_url } => {
            println!("{}", "Reservation created.".green().bold());
            println!("Complete your payment at:\n  {}", checkout_url.underline());
            println!(
                "\nAfter payment, finish with:\n  stowly payment status --session <SESSION_ID>"
            );
        }
        Outcome::Settled => {
            println!("{}", "Reservation confirmed -- no payment required.".green().bold());
        }
    }
    Ok(())
}

/// Pre-fill the draft from command-line flags.
fn apply_flags(wizard: &mut BookingWizard, args: &BookArgs) -> Result<(), CliError> {
    if let Some(ref raw) = args.start_date {
        wizard.set_start_date(parse_date(raw)?);
    }
    if args.annual {
        wizard.set_annual_payment(true);
    }
    if let Some(ref raw) = args.duration {
        wizard.set_duration(validate_duration(raw).map_err(CliError::from)?);
    }
    for &id in &args.services {
        if !wizard.toggle_service(id) {
            return Err(CliError::Validation {
                field: "service".into(),
                reason: format!("service id {id} is not in the catalog"),
            });
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: "start date".into(),
        reason: format!("'{raw}' is not a YYYY-MM-DD date"),
    })
}

// ── Prompts ─────────────────────────────────────────────────────────

fn prompt_details(wizard: &mut BookingWizard) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();

    let initial_date = wizard
        .draft()
        .start_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let date_raw: String = Input::with_theme(&theme)
        .with_prompt("Start date (YYYY-MM-DD)")
        .with_initial_text(initial_date)
        .interact_text()?;
    wizard.set_start_date(parse_date(&date_raw)?);

    let annual = Confirm::with_theme(&theme)
        .with_prompt("Pay the first year as one lump sum? (loyalty discount applies)")
        .default(wizard.draft().annual_payment)
        .interact()?;
    wizard.set_annual_payment(annual);

    if !annual {
        let duration_raw: String = Input::with_theme(&theme)
            .with_prompt("Duration in months")
            .with_initial_text(wizard.draft().duration_months.to_string())
            .interact_text()?;
        wizard.set_duration(validate_duration(&duration_raw).map_err(CliError::from)?);
    }

    prompt_customer(wizard, &theme)?;
    Ok(())
}

fn prompt_customer(
    wizard: &mut BookingWizard,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    // Pre-filled values (profile lookup or a previous pass through this
    // step) appear as initial text and are never lost.
    let fields: [(&str, fn(&mut stowly_core::CustomerDetails) -> &mut String); 8] = [
        ("First name", |c| &mut c.first_name),
        ("Last name", |c| &mut c.last_name),
        ("Email", |c| &mut c.email),
        ("Phone", |c| &mut c.phone),
        ("Address", |c| &mut c.address),
        ("City", |c| &mut c.city),
        ("Postal code", |c| &mut c.postal_code),
        ("Country", |c| &mut c.country),
    ];

    for (label, accessor) in fields {
        let current = accessor(wizard.customer_mut()).clone();
        let value: String = Input::with_theme(theme)
            .with_prompt(label)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        *accessor(wizard.customer_mut()) = value;
    }
    Ok(())
}

fn prompt_services(wizard: &mut BookingWizard) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();

    let entries: Vec<(u32, String)> = wizard
        .catalog()
        .iter()
        .map(|s| {
            (
                s.id,
                format!(
                    "{} ({})",
                    s.name,
                    stowly_core::contract::format_eur(s.price)
                ),
            )
        })
        .collect();
    let labels: Vec<&String> = entries.iter().map(|(_, label)| label).collect();
    let defaults: Vec<bool> = entries
        .iter()
        .map(|(id, _)| wizard.draft().service_ids.contains(id))
        .collect();

    let chosen = MultiSelect::with_theme(&theme)
        .with_prompt("Add-on services (space to toggle, enter to continue)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    // Reconcile the selection with the draft via toggles.
    let wanted: Vec<u32> = chosen.iter().map(|&i| entries[i].0).collect();
    let current: Vec<u32> = wizard.draft().service_ids.iter().copied().collect();
    for id in &current {
        if !wanted.contains(id) {
            wizard.toggle_service(*id);
        }
    }
    for id in wanted {
        if !wizard.draft().service_ids.contains(&id) {
            wizard.toggle_service(id);
        }
    }
    Ok(())
}

// ── Summary ─────────────────────────────────────────────────────────

fn print_summary(wizard: &BookingWizard) {
    let draft = wizard.draft();

    println!("\n{}", "Reservation summary".bold());
    if let Some(unit) = wizard.unit() {
        println!("  Box: {}", unit.box_number);
    }
    if let Some(date) = draft.start_date {
        println!("  Start date: {}", date.format("%d/%m/%Y"));
    }
    if draft.annual_payment {
        println!("  Billing: one annual payment");
    } else {
        println!("  Billing: {} month(s)", draft.duration_months);
    }
    println!(
        "  Customer: {} {} <{}>",
        draft.customer.first_name, draft.customer.last_name, draft.customer.email
    );
    for id in &draft.service_ids {
        if let Some(service) = wizard.catalog().get(*id) {
            println!(
                "  Service: {} ({})",
                service.name,
                stowly_core::contract::format_eur(service.price)
            );
        }
    }
    output::print_pricing(&wizard.pricing(), draft.annual_payment);
    println!();
}
