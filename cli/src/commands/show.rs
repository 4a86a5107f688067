//! SHOW command - Fetch one notebook with its notes.
//!
//! Fetching a notebook refreshes its last access time on the server.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notebook_core::{Data, Notebook, ObjectId};

use super::{HumanReadable, format_timestamp, make_request, output, truncate};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Notebook ID
    pub notebook_id: ObjectId,
}

/// Print the info line and queries of a data payload.
pub(crate) fn print_data(data: &Data, indent: &str) {
    if data.is_empty() {
        println!("{}{}", indent, "(no data)".dimmed());
        return;
    }
    if !data.info.is_empty() {
        println!("{}{} {}", indent, "Info:".cyan(), data.info);
    }
    for query in &data.queries {
        println!("{}{} {}", indent, "Q:".yellow(), query.question);
        println!("{}{} {}", indent, "A:".yellow(), query.response);
    }
}

impl HumanReadable for Notebook {
    fn print_human(&self) {
        println!("{}", self.title.green().bold());
        println!("{}", "=".repeat(80));
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.created));
        println!(
            "  {} {}",
            "Last Access:".cyan(),
            format_timestamp(&self.last_access)
        );
        if !self.data.is_empty() {
            print_data(&self.data, "  ");
        }
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        for note in &self.notes {
            println!("  {} {}", note.title.bold(), note.id.to_string().dimmed());
            if !note.text.is_empty() {
                println!("    {}", truncate(&note.text, 72));
            }
            if !note.data.is_empty() {
                println!(
                    "    {} {} queries",
                    "Data:".cyan(),
                    note.data.queries.len()
                );
            }
        }
    }
}

/// Execute the show command.
pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: ShowArgs) -> Result<()> {
    let url = format!("{}/notebooks/{}", base_url, args.notebook_id);

    let notebook: Notebook = make_request(client.get(&url)).await?;

    output(&notebook, human)
}
