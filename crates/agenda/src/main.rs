// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agenda - calendar-aware tool server and synchronous tool bridge.
//!
//! `serve` exposes the built-in tools over HTTP; `tools` and `call` reach
//! them through the blocking invocation bridge.

mod call;
mod serve;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Agenda - calendar-aware tool server and synchronous tool bridge.
#[derive(Parser, Debug)]
#[command(name = "agenda", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the tool server.
    Serve,
    /// List the tools the bridge discovers.
    Tools {
        /// Use an in-process registry instead of the configured server.
        #[arg(long)]
        local: bool,
    },
    /// Invoke one tool and print its text result.
    Call {
        /// Tool name, e.g. `google_calendar`.
        tool: String,
        /// `key=value` pairs bind by name, bare values bind by position.
        /// Values are parsed as JSON when possible.
        args: Vec<String>,
        /// Use an in-process registry instead of the configured server.
        #[arg(long)]
        local: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => agenda_config::load_and_validate_path(path),
        None => agenda_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            agenda_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    serve::init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run(config),
        Commands::Tools { local } => call::list_tools(&config, local),
        Commands::Call { tool, args, local } => call::call_tool(&config, local, &tool, &args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("agenda: {err}");
            ExitCode::FAILURE
        }
    }
}
