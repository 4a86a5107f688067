//! FIND command - Look up a notebook by its exact title.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notebook_core::NotebookSummary;

use super::{HumanReadable, format_timestamp, make_request, output};

/// Arguments for the find command.
#[derive(Args)]
pub struct FindArgs {
    /// Exact notebook title
    pub title: String,
}

impl HumanReadable for NotebookSummary {
    fn print_human(&self) {
        println!("  {} {}", "Title:".cyan(), self.title.bold());
        println!("  {} {}", "ID:".cyan(), self.id);
        println!(
            "  {} {}",
            "Last Access:".cyan(),
            format_timestamp(&self.last_access)
        );
    }
}

/// Execute the find command.
pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: FindArgs) -> Result<()> {
    let url = reqwest::Url::parse(base_url)?;
    let mut url = url.join("notebooks/title/")?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Base URL cannot carry a path: {}", base_url))?
        .pop_if_empty()
        .push(&args.title);

    let summary: NotebookSummary = make_request(client.get(url)).await?;

    output(&summary, human)
}
