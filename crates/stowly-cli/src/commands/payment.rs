//! Post-payment landing handlers.

use owo_colors::OwoColorize;

use stowly_core::{resolve_payment, PaymentResolution, PlatformClient};

use crate::cli::{GlobalOpts, PaymentArgs, PaymentCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &PlatformClient,
    args: PaymentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PaymentCommand::Status { session } => {
            if session.as_deref().is_none_or(|s| s.trim().is_empty()) {
                return Err(CliError::MissingPaymentSession);
            }

            let spinner = output::spinner("Checking payment status...", global.quiet);
            let resolution = resolve_payment(client, session.as_deref()).await;
            spinner.finish_and_clear();

            match resolution {
                PaymentResolution::Paid(context) => {
                    println!("{}", "Payment confirmed.".green().bold());
                    println!(
                        "  Box {} -- {} month(s) starting {}",
                        context.unit.box_number,
                        context.duration_months,
                        context.start_date.format("%d/%m/%Y")
                    );
                    println!(
                        "  Total paid: {}",
                        stowly_core::contract::format_eur(context.total_price)
                    );
                    println!(
                        "\nSign your rental contract with:\n  \
                         stowly contract sign --session {} --strokes <FILE> --accept-terms",
                        session.unwrap_or_default()
                    );
                    Ok(())
                }

                PaymentResolution::Pending { redirect_after } => {
                    println!(
                        "Payment not confirmed yet -- returning to your bookings in {}s.",
                        redirect_after.as_secs()
                    );
                    // One-shot wait, not a poll: a slow gateway confirmation
                    // means checking again later from the bookings view.
                    tokio::time::sleep(redirect_after).await;
                    println!("Check again later with: stowly payment status --session <SESSION_ID>");
                    Ok(())
                }

                PaymentResolution::Failed { message } => Err(CliError::ApiError {
                    message,
                    status: None,
                }),
            }
        }
    }
}
