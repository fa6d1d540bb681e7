//! Unit browsing handlers.

use stowly_core::PlatformClient;
use stowly_core::UnitSnapshot;

use crate::cli::{GlobalOpts, UnitsArgs, UnitsCommand};
use crate::error::CliError;
use crate::output::{self, UnitRow};

pub async fn handle(
    client: &PlatformClient,
    args: UnitsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UnitsCommand::List { available } => {
            let spinner = output::spinner("Fetching units...", global.quiet);
            let result = client.list_units().await;
            spinner.finish_and_clear();

            let units: Vec<UnitSnapshot> = result
                .map_err(stowly_core::CoreError::from)?
                .into_iter()
                .map(Into::into)
                .filter(|u: &UnitSnapshot| !available || u.available)
                .collect();

            output::print_table(units.iter().map(UnitRow::from).collect());
            Ok(())
        }

        UnitsCommand::Show { id } => {
            let spinner = output::spinner("Fetching unit...", global.quiet);
            let result = client.get_unit(id).await;
            spinner.finish_and_clear();

            let unit: UnitSnapshot = result
                .map_err(|e| match stowly_core::CoreError::from(e) {
                    stowly_core::CoreError::Api {
                        status: Some(404), ..
                    } => CliError::NotFound {
                        resource_type: "unit".into(),
                        identifier: id.to_string(),
                        list_command: "units list".into(),
                    },
                    other => other.into(),
                })?
                .into();

            println!("Unit {} -- box {}", unit.id, unit.box_number);
            println!("  Volume: {} m³", unit.volume_m3);
            if let Some(surface) = unit.surface_m2 {
                println!("  Surface: {surface} m²");
            }
            println!(
                "  Monthly price: {}",
                stowly_core::contract::format_eur(unit.price_per_month)
            );
            println!("  Available: {}", if unit.available { "yes" } else { "no" });
            if let Some(center) = &unit.center {
                println!(
                    "  Center: {}, {}, {} {}",
                    center.name, center.address, center.postal_code, center.city
                );
            }
            for feature in &unit.features {
                println!("  - {feature}");
            }
            Ok(())
        }
    }
}
