//! TIA command-line tool
//!
//! Reads an invoice file, accumulates its items and writes the rendered
//! document to stdout or a file.

mod args;
mod invoice_file;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Cli, Command, RenderArgs};
use invoice_file::InvoiceFile;
use tia_core::invoice::InvoiceState;
use tia_core::render::{RenderOptions, render};
use tia_shared::{AppConfig, AppError};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tia=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Render(args) => run_render(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report(&err)),
    }
}

/// Logs a failed run and returns its exit code. Errors that are not an
/// `AppError` are reported as `AppError::Internal`.
fn report(err: &anyhow::Error) -> u8 {
    let internal;
    let app = if let Some(app) = err.downcast_ref::<AppError>() {
        app
    } else {
        internal = AppError::Internal(format!("{err:#}"));
        &internal
    };
    error!(error_code = app.error_code(), "{err:#}");
    eprintln!("error: {err:#}");
    u8::try_from(app.exit_code()).unwrap_or(1)
}

fn run_render(args: &RenderArgs) -> anyhow::Result<()> {
    let document = render_to_string(args)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &document)
                .map_err(|e| AppError::Io(format!("cannot write {}: {e}", path.display())))?;
            info!(path = %path.display(), "Document written");
        }
        None => print!("{document}"),
    }
    Ok(())
}

/// Runs the whole pipeline in memory; nothing is written unless it succeeds.
fn render_to_string(args: &RenderArgs) -> anyhow::Result<String> {
    let config = match &args.config {
        Some(path) => AppConfig::load_from(Some(path.as_path())),
        None => AppConfig::load(),
    }
    .map_err(AppError::from)?;
    let options = RenderOptions::from_config(&config.render).map_err(AppError::from)?;

    let file = InvoiceFile::read(&args.invoice)?;
    let (meta, mut items) = file.into_parts(&config.invoice)?;
    items.extend(args.items.iter().cloned());

    let number = meta.number;
    let mut state = InvoiceState::new(meta).map_err(AppError::from)?;
    state.add_items(items).map_err(AppError::from)?;
    let invoice = state.finalize();
    info!(
        number,
        items = invoice.items().len(),
        grand_total = %invoice.totals().grand_total,
        "Invoice finalized"
    );

    let document = render(&invoice, &options).map_err(AppError::from)?;
    let output = args
        .format
        .writer()
        .write(&document)
        .map_err(AppError::from)
        .with_context(|| format!("rendering invoice {number}"))?;
    Ok(output)
}
