//! RENAME command - Change a notebook's title.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notebook_core::{Notebook, NotebookPatch, ObjectId};

use super::{make_request, output};

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Notebook ID to rename
    pub notebook_id: ObjectId,

    /// New title for the notebook
    pub title: String,
}

/// Execute the rename command.
pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: RenameArgs) -> Result<()> {
    let url = format!("{}/notebooks/{}/data", base_url, args.notebook_id);

    // Only the title is sent; the server leaves absent fields alone.
    let request_body = NotebookPatch {
        title: Some(args.title),
        ..NotebookPatch::default()
    };

    let notebook: Notebook = make_request(client.patch(&url).json(&request_body)).await?;

    if human {
        println!("{}", "Notebook renamed successfully!".green().bold());
        println!();
    }
    output(&notebook, human)
}
