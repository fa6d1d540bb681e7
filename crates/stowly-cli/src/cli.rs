//! Clap definitions for the `stowly` binary.
//!
//! This file is also included by `build.rs` for man-page generation, so
//! it must only depend on `clap` and `clap_complete`.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Book Stowly storage units from the command line: browse centers and
/// units, run the reservation wizard, check payment status, and sign
/// the rental contract.
#[derive(Debug, Parser)]
#[command(name = "stowly", version, about, arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use.
    #[arg(long, short = 'p', global = true, env = "STOWLY_PROFILE")]
    pub profile: Option<String>,

    /// Backend API root (overrides the profile).
    #[arg(long, global = true, env = "STOWLY_PLATFORM")]
    pub platform: Option<String>,

    /// Customer auth token (overrides keyring and config).
    #[arg(long, global = true, env = "STOWLY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Accept invalid TLS certificates (staging environments).
    #[arg(long, short = 'k', global = true, env = "STOWLY_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[arg(long, global = true, default_value = "30", env = "STOWLY_TIMEOUT")]
    pub timeout: u64,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Assume "yes" for confirmation prompts.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse storage units
    Units(UnitsArgs),

    /// List optional add-on services
    Services(ServicesArgs),

    /// Run the reservation wizard for a unit
    Book(BookArgs),

    /// Check the payment status after returning from the gateway
    Payment(PaymentArgs),

    /// Sign and download the rental contract
    Contract(ContractArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Units ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UnitsArgs {
    #[command(subcommand)]
    pub command: UnitsCommand,
}

#[derive(Debug, Subcommand)]
pub enum UnitsCommand {
    /// List storage units
    List {
        /// Only show units currently available for booking.
        #[arg(long)]
        available: bool,
    },
    /// Show a single unit
    Show {
        /// Unit id
        id: u32,
    },
}

// ── Services ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List the add-on service catalog
    List,
}

// ── Book ────────────────────────────────────────────────────────────

/// Reservation wizard. Flags pre-fill the corresponding step; anything
/// missing is prompted for interactively.
#[derive(Debug, Args)]
pub struct BookArgs {
    /// Unit id to book
    pub unit_id: u32,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Rental duration in months
    #[arg(long)]
    pub duration: Option<String>,

    /// Pay the first year as one lump sum (loyalty discount applies)
    #[arg(long)]
    pub annual: bool,

    /// Add-on service id (repeatable)
    #[arg(long = "service", value_name = "ID")]
    pub services: Vec<u32>,
}

// ── Payment ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PaymentArgs {
    #[command(subcommand)]
    pub command: PaymentCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentCommand {
    /// Resolve the payment status for a gateway session
    Status {
        /// Session identifier from the gateway return URL
        #[arg(long)]
        session: Option<String>,
    },
}

// ── Contract ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ContractArgs {
    #[command(subcommand)]
    pub command: ContractCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContractCommand {
    /// Capture a signature, submit it, and download the signed contract
    #[command(long_about = "Capture a signature, submit it, and download the contract.\n\n\
        The signature is replayed from a recorded stroke trace: a JSON\n\
        array of strokes, each stroke an array of [x, y] points in\n\
        surface coordinates, e.g.\n\n\
        [[[12,40],[80,52],[150,38]],[[40,90],[60,95]]]")]
    Sign {
        /// Session identifier from the gateway return URL
        #[arg(long)]
        session: String,

        /// Path to the recorded stroke trace (JSON)
        #[arg(long, value_name = "FILE")]
        strokes: std::path::PathBuf,

        /// Accept the rental terms (required to submit)
        #[arg(long)]
        accept_terms: bool,

        /// Where to write the contract PDF (defaults to the fixed name)
        #[arg(long, short = 'o')]
        output: Option<std::path::PathBuf>,
    },

    /// Regenerate and download the contract without submitting
    Download {
        /// Session identifier from the gateway return URL
        #[arg(long)]
        session: String,

        /// Where to write the contract PDF (defaults to the fixed name)
        #[arg(long, short = 'o')]
        output: Option<std::path::PathBuf>,
    },
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile interactively
    Init,
    /// Print the resolved configuration
    Show,
    /// Store the auth token for a profile in the system keyring
    SetToken,
    /// Print the config file path
    Path,
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
