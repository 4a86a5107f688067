//! LIST command - List every notebook.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notebook_core::Notebook;

use super::{HumanReadable, format_timestamp, make_request, output};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    // No additional arguments needed
}

impl HumanReadable for Vec<Notebook> {
    fn print_human(&self) {
        println!("{}", "Notebooks".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.is_empty() {
            println!("  {}", "(No notebooks)".dimmed());
            return;
        }

        for notebook in self {
            let title = if notebook.title.is_empty() {
                "(untitled)".dimmed()
            } else {
                notebook.title.bold()
            };
            println!("  {} {}", title, format!("[{} notes]", notebook.notes.len()).dimmed());
            println!("    {} {}", "ID:".cyan(), notebook.id);
            println!("    {} {}", "Created:".cyan(), format_timestamp(&notebook.created));
            println!(
                "    {} {}",
                "Last Access:".cyan(),
                format_timestamp(&notebook.last_access)
            );
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.len());
    }
}

/// Execute the list command.
pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, _args: ListArgs) -> Result<()> {
    let url = format!("{}/notebooks", base_url);

    let notebooks: Vec<Notebook> = make_request(client.get(&url)).await?;

    output(&notebooks, human)
}
