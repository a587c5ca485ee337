//! Appclacks Terraform provider
//!
//! Prints the provider's schema document as JSON.

use anyhow::Context;
use appclacks_provider::utils::logging::{LogFormat, init_logging};
use appclacks_provider::{GIT_HASH, Provider, VERSION};
use clap::Parser;
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "terraform-provider-appclacks", version, about)]
struct Cli {
    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Log output format
    #[arg(long, value_enum, env = "APPCLACKS_LOG_FORMAT", default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

/// Accept the single-dash `-debug` spelling Terraform tooling passes
fn normalise_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| if arg == "-debug" { OsString::from("--debug") } else { arg })
        .collect()
}

fn run() -> anyhow::Result<()> {
    let provider = Provider::new();
    info!(version = VERSION, git = GIT_HASH, "Appclacks provider starting");

    let document = serde_json::to_string_pretty(&provider.schema_document())
        .context("failed to render provider schema")?;
    println!("{}", document);
    Ok(())
}

fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_from(normalise_args(std::env::args_os()));
    init_logging(cli.debug, cli.log_format);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
