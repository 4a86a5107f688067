//! DATA command - Read, replace and clear data payloads.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use notebook_core::{Data, ObjectId, Query};

use super::show::print_data;
use super::{Done, HumanReadable, make_request, output, send_request};

/// Arguments for the data command.
#[derive(Args)]
pub struct DataArgs {
    /// Notebook ID
    pub notebook_id: ObjectId,

    #[command(subcommand)]
    pub action: DataAction,
}

#[derive(Subcommand)]
pub enum DataAction {
    /// Show one note's data, or the data of every note
    Show {
        /// Note ID (omit for all notes)
        note_id: Option<ObjectId>,
    },

    /// Replace one note's data
    Set {
        /// Note ID
        note_id: ObjectId,

        /// Info string
        #[arg(long, default_value = "")]
        info: String,

        /// Question and response as QUESTION=RESPONSE (repeatable)
        #[arg(long = "query", value_name = "QUESTION=RESPONSE", value_parser = parse_query)]
        queries: Vec<Query>,
    },

    /// Clear one note's data, or the data of every note
    Clear {
        /// Note ID (omit for all notes)
        note_id: Option<ObjectId>,
    },
}

/// Arguments for the wipe-data command.
#[derive(Args)]
pub struct WipeDataArgs {
    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Parse `question=response`; the response may itself contain `=`.
fn parse_query(s: &str) -> Result<Query, String> {
    match s.split_once('=') {
        Some((question, response)) if !question.is_empty() => Ok(Query::new(question, response)),
        _ => Err(format!("expected QUESTION=RESPONSE, got {:?}", s)),
    }
}

impl HumanReadable for Data {
    fn print_human(&self) {
        print_data(self, "  ");
    }
}

impl HumanReadable for Vec<Data> {
    fn print_human(&self) {
        if self.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }
        for (i, data) in self.iter().enumerate() {
            println!("{}", format!("Note #{}", i + 1).bold());
            print_data(data, "  ");
        }
    }
}

pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: DataArgs) -> Result<()> {
    let notebook_url = format!("{}/notebooks/{}", base_url, args.notebook_id);

    match args.action {
        DataAction::Show { note_id: None } => {
            let all: Vec<Data> = make_request(client.get(format!("{}/data", notebook_url))).await?;
            output(&all, human)
        }

        DataAction::Show {
            note_id: Some(note_id),
        } => {
            let url = format!("{}/notes/{}/data", notebook_url, note_id);
            let data: Data = make_request(client.get(&url)).await?;
            output(&data, human)
        }

        DataAction::Set {
            note_id,
            info,
            queries,
        } => {
            let url = format!("{}/notes/{}/data", notebook_url, note_id);
            let request_body = Data { info, queries };
            let data: Data = make_request(client.patch(&url).json(&request_body)).await?;
            output(&data, human)
        }

        DataAction::Clear { note_id } => {
            let url = match note_id {
                Some(note_id) => format!("{}/notes/{}/data", notebook_url, note_id),
                None => format!("{}/data", notebook_url),
            };
            send_request(client.delete(&url)).await?;
            output(&Done::new("Data cleared"), human)
        }
    }
}

/// Clear the data of every note in every notebook.
pub async fn wipe(client: &reqwest::Client, base_url: &str, human: bool, args: WipeDataArgs) -> Result<()> {
    if human && !args.yes {
        eprint!(
            "{} Clear the data of every note in every notebook? [y/N] ",
            "Warning:".yellow().bold()
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

    let url = format!("{}/notebooks/removeAllData", base_url);
    send_request(client.delete(&url)).await?;

    output(&Done::new("Cleared data in all notebooks"), human)
}
