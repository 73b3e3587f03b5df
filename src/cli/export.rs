//! Data export CLI commands

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::export::{export_expenses_csv, export_goals_csv};

use super::AppContext;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export all expenses as CSV
    Expenses {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export all savings goals as CSV
    Goals {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(ctx: &AppContext, cmd: ExportCommands) -> SpendwiseResult<()> {
    match cmd {
        ExportCommands::Expenses { output } => {
            write_to(output, |w| export_expenses_csv(ctx.store.as_ref(), w))
        }
        ExportCommands::Goals { output } => {
            write_to(output, |w| export_goals_csv(ctx.store.as_ref(), w))
        }
    }
}

fn write_to<F>(output: Option<PathBuf>, export: F) -> SpendwiseResult<()>
where
    F: FnOnce(&mut dyn Write) -> SpendwiseResult<()>,
{
    match output {
        Some(path) => {
            let mut file = File::create(&path).map_err(|e| {
                SpendwiseError::Export(format!("Could not create {}: {}", path.display(), e))
            })?;
            export(&mut file)?;
            println!("Exported to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            export(&mut lock)?;
        }
    }
    Ok(())
}
