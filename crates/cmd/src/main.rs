// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::commands;
use cmd::common::{CollectorContext, config_path_with_override, parse_assignments};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "amr")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to $AMR_CONFIG, then ./amr-config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an example configuration file
    Init,
    /// Connect to the worksheet and report its header and record count
    Check,
    /// List records, numbered from 1
    List {
        /// Fields to show, in order (default: all)
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Describe the entry form fields and accepted values
    Fields,
    /// Add a record; unset fields take their defaults
    Add {
        /// FIELD=VALUE assignments
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Change fields of an existing record
    Edit {
        /// Record number as shown by 'list'
        number: usize,
        /// FIELD=VALUE assignments
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Delete a record from the worksheet
    Delete {
        /// Record number as shown by 'list'
        number: usize,
    },
    /// Export all records as CSV
    Export {
        /// Output file (default: amr_data_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    diagnostics::init_diagnostics();

    let cli = Cli::parse();
    let config_path = config_path_with_override(cli.config);

    if let Commands::Init = cli.command {
        return commands::init_command(&config_path);
    }

    let ctx = CollectorContext::load(&config_path)?;
    let now = chrono::Local::now().naive_local();

    match &cli.command {
        Commands::Init => Ok(()),
        Commands::Check => commands::check_command(&ctx),
        Commands::Fields => {
            commands::fields_command(&ctx.form());
            Ok(())
        }
        Commands::List { fields } => {
            let session = ctx.open_session()?;
            commands::list_command(session.schema(), session.records(), fields)
        }
        Commands::Add { set } => {
            let inputs = parse_assignments(set)?;
            let mut session = ctx.open_session()?;
            commands::add_command(&mut session, &ctx.form(), &inputs, now)
        }
        Commands::Edit { number, set } => {
            let inputs = parse_assignments(set)?;
            let mut session = ctx.open_session()?;
            commands::edit_command(&mut session, &ctx.form(), *number, &inputs, now)
        }
        Commands::Delete { number } => {
            let mut session = ctx.open_session()?;
            commands::delete_command(&mut session, *number)
        }
        Commands::Export { output } => {
            let session = ctx.open_session()?;
            commands::export_command(
                session.schema(),
                session.records(),
                output.as_deref(),
                now.date(),
            )
        }
    }
}
