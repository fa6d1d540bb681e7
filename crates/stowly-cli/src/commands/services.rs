//! Service catalog handlers.

use stowly_core::PlatformClient;
use stowly_core::AddOnService;

use crate::cli::{GlobalOpts, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output::{self, ServiceRow};

pub async fn handle(
    client: &PlatformClient,
    args: ServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ServicesCommand::List => {
            let spinner = output::spinner("Fetching services...", global.quiet);
            let result = client.list_services().await;
            spinner.finish_and_clear();

            let services: Vec<AddOnService> = result
                .map_err(stowly_core::CoreError::from)?
                .into_iter()
                .map(Into::into)
                .collect();

            output::print_table(services.iter().map(ServiceRow::from).collect());
            Ok(())
        }
    }
}
