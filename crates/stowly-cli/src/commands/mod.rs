//! Command dispatch: bridges CLI args -> core workflow -> output formatting.

pub mod book;
pub mod config_cmd;
pub mod contract;
pub mod payment;
pub mod services;
pub mod units;
pub mod util;

use stowly_core::PlatformClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a platform-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &PlatformClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Units(args) => units::handle(client, args, global).await,
        Command::Services(args) => services::handle(client, args, global).await,
        Command::Book(args) => book::handle(client, args, global).await,
        Command::Payment(args) => payment::handle(client, args, global).await,
        Command::Contract(args) => contract::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
