//! escctl - ESC parameter image tool
//!
//! Inspects and edits the persisted parameter table of an ESC firmware
//! image on disk, using the same validation, group views and flash write
//! sequence as the firmware.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod image_file;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use escfw_params::StoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ParamKey, Session, View};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "escctl")]
#[command(about = "ESC parameter tool - inspect and edit persisted parameter images")]
#[command(version)]
#[command(long_about = "
escctl reads and writes the parameter flash region of an ESC firmware image.

Every write is bounds-checked against the compiled parameter table and
persisted with the firmware's unprotect, erase, write, protect sequence.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Flash image file holding the parameter region
    #[arg(long, global = true, env = "ESCCTL_IMAGE", default_value = "params.img")]
    image: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every parameter with its bounds
    List,

    /// Show one parameter
    Get {
        /// Parameter index or name
        key: ParamKey,
    },

    /// Set a parameter and persist the image
    Set {
        /// Parameter index or name
        key: ParamKey,
        /// New value, checked against the parameter bounds
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },

    /// Restore a parameter, or all of them, to the compiled default
    Reset {
        /// Parameter index or name; omit to reset the whole table
        key: Option<ParamKey>,
    },

    /// Show a typed, unit-converted view
    Show {
        #[arg(value_enum)]
        view: View,
    },

    /// Hex dump of the encoded parameter image
    Dump,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("escctl={log_level},escfw_params={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    if let Commands::Completion { shell } = &cli.command {
        completion::generate_completion(*shell);
        return Ok(());
    }

    let mut session = Session::open(&cli.image, StoreConfig::default())?;
    match &cli.command {
        Commands::List => commands::list(&session, cli.json),
        Commands::Get { key } => commands::get(&session, key, cli.json),
        Commands::Set { key, value } => commands::set(&mut session, key, *value, cli.json),
        Commands::Reset { key } => commands::reset(&mut session, key.as_ref(), cli.json),
        Commands::Show { view } => commands::show(&session, *view, cli.json),
        Commands::Dump => commands::dump(&session, cli.json),
        Commands::Completion { .. } => Ok(()),
    }
}
