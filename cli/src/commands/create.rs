//! CREATE command - Create a new notebook.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notebook_core::{NewNote, NewNotebook, Notebook};

use super::{make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Title for the new notebook
    pub title: String,

    /// Initial note title (repeat for several notes)
    #[arg(long = "note", value_name = "TITLE")]
    pub notes: Vec<String>,
}

/// Execute the create command.
pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: CreateArgs) -> Result<()> {
    let url = format!("{}/notebooks", base_url);

    let request_body = NewNotebook {
        title: args.title,
        notes: args.notes.into_iter().map(|t| NewNote::new(t, "")).collect(),
    };

    let notebook: Notebook = make_request(client.post(&url).json(&request_body)).await?;

    if human {
        println!("{}", "Notebook created successfully!".green().bold());
        println!();
    }
    output(&notebook, human)
}
