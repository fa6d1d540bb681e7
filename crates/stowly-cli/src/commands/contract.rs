//! Contract signing and download handlers.

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;

use stowly_core::contract::CONTRACT_FILENAME;
use stowly_core::{
    resolve_payment, PaymentResolution, PlatformClient, Point, SignaturePad, SigningSession,
};

use crate::cli::{ContractArgs, ContractCommand, GlobalOpts};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

/// A recorded freehand trace: strokes of [x, y] points in surface
/// coordinates.
type StrokeTrace = Vec<Vec<[f32; 2]>>;

pub async fn handle(
    client: &PlatformClient,
    args: ContractArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ContractCommand::Sign {
            session,
            strokes,
            accept_terms,
            output: output_path,
        } => sign(client, &session, &strokes, accept_terms, output_path, global).await,

        ContractCommand::Download {
            session,
            output: output_path,
        } => download(client, &session, output_path, global).await,
    }
}

// ── Sign ────────────────────────────────────────────────────────────

async fn sign(
    client: &PlatformClient,
    session_id: &str,
    strokes_path: &Path,
    accept_terms: bool,
    output_path: Option<PathBuf>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !accept_terms {
        return Err(CliError::Validation {
            field: "terms".into(),
            reason: "pass --accept-terms after reading the rental terms".into(),
        });
    }

    let context = paid_context(client, session_id, global).await?;
    let mut session = SigningSession::new(session_id, context);

    // Replay the recorded trace onto the capture surface.
    let trace: StrokeTrace = serde_json::from_str(&std::fs::read_to_string(strokes_path)?)?;
    let mut pad = SignaturePad::new();
    replay(&mut pad, &trace);

    if !pad.can_capture() {
        return Err(CliError::Validation {
            field: "signature".into(),
            reason: "the stroke trace contains no drawable stroke".into(),
        });
    }
    let captured = pad.capture().map_err(CliError::from)?.clone();
    session.attach_signature(captured);
    session.accept_terms(true);

    if !util::confirm(
        "Submit this signature as your binding consent?",
        global.yes,
    )? {
        println!("Nothing was submitted; the drawn signature is kept locally.");
        return Ok(());
    }

    let spinner = output::spinner("Submitting signature...", global.quiet);
    let submit_result = session.submit(client).await;
    spinner.finish_and_clear();
    submit_result?;

    println!(
        "{}",
        "Signature submitted -- the platform now holds your signed consent."
            .green()
            .bold()
    );

    // The server-side signed state stays authoritative even if the local
    // copy fails to render; the two outcomes are reported separately.
    match write_contract(&session, output_path) {
        Ok(path) => {
            println!("Contract saved to {}", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!(
                "{}",
                "The signed contract could not be rendered locally. Your signature \
                 was recorded; re-download any time with: stowly contract download"
                    .yellow()
            );
            Err(e)
        }
    }
}

// ── Download ────────────────────────────────────────────────────────

async fn download(
    client: &PlatformClient,
    session_id: &str,
    output_path: Option<PathBuf>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let context = paid_context(client, session_id, global).await?;
    let session = SigningSession::new(session_id, context);

    let path = write_contract(&session, output_path)?;
    println!("Contract saved to {}", path.display());
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Resolve the session and insist on a settled payment.
async fn paid_context(
    client: &PlatformClient,
    session_id: &str,
    global: &GlobalOpts,
) -> Result<stowly_core::ContractContext, CliError> {
    let spinner = output::spinner("Checking payment status...", global.quiet);
    let resolution = resolve_payment(client, Some(session_id)).await;
    spinner.finish_and_clear();

    match resolution {
        PaymentResolution::Paid(context) => Ok(*context),
        PaymentResolution::Pending { .. } => Err(CliError::Validation {
            field: "session".into(),
            reason: "the payment has not been confirmed yet".into(),
        }),
        PaymentResolution::Failed { message } => Err(CliError::ApiError {
            message,
            status: None,
        }),
    }
}

fn replay(pad: &mut SignaturePad, trace: &StrokeTrace) {
    for stroke in trace {
        let mut points = stroke.iter().map(|&[x, y]| Point::new(x, y));
        let Some(first) = points.next() else {
            continue;
        };
        pad.begin(first);
        for point in points {
            pad.extend(point);
        }
        pad.end();
    }
}

/// Compose the document (regenerated fresh) and write it out.
fn write_contract(
    session: &SigningSession,
    output_path: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    let bytes = session
        .compose_contract()?
        .ok_or_else(|| CliError::Composition {
            reason: "no contract record is available".into(),
        })?;
    let path = output_path.unwrap_or_else(|| PathBuf::from(CONTRACT_FILENAME));
    std::fs::write(&path, bytes)?;
    Ok(path)
}
