//! DELETE command - Delete one notebook or all of them.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notebook_core::ObjectId;

use super::{Done, output, send_request};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Notebook ID to delete
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub notebook_id: Option<ObjectId>,

    /// Delete every notebook
    #[arg(long)]
    pub all: bool,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute the delete command.
pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: DeleteArgs) -> Result<()> {
    let target = match args.notebook_id {
        Some(id) => format!("notebook {}", id),
        None => "ALL notebooks".to_string(),
    };

    // Confirmation prompt for interactive use
    if human && !args.yes {
        eprint!(
            "{} Are you sure you want to delete {}? [y/N] ",
            "Warning:".yellow().bold(),
            target
        );

        use std::io::Write;
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let url = match args.notebook_id {
        Some(id) => format!("{}/notebooks/{}", base_url, id),
        None => format!("{}/notebooks/removeAll", base_url),
    };

    send_request(client.delete(&url)).await?;

    output(&Done::new(format!("Deleted {}", target)), human)
}
