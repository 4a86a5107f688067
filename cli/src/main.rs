//! Command-line client for the notebook document service.
//!
//! Commands:
//! - list: List every notebook
//! - show: Fetch a notebook with its notes
//! - find: Look up a notebook by title
//! - create: Create a notebook
//! - rename: Change a notebook's title
//! - delete: Delete a notebook (or all of them)
//! - access: Read or refresh a notebook's last access time
//! - note: Add, show, edit and remove notes
//! - data: Read, replace and clear data payloads
//! - wipe-data: Clear note data in every notebook
//!
//! Configuration via environment:
//! - NOTEBOOK_URL: Base URL of the notebook server (default: http://localhost:8000)

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    access::AccessArgs,
    create::CreateArgs,
    data::{DataArgs, WipeDataArgs},
    delete::DeleteArgs,
    find::FindArgs,
    list::ListArgs,
    note::NoteArgs,
    rename::RenameArgs,
    show::ShowArgs,
};

/// Notebook CLI
///
/// Work with notebooks from the command line. Prints JSON by default;
/// pass --human for formatted output.
#[derive(Parser)]
#[command(name = "notebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notebook server URL
    #[arg(
        long,
        env = "NOTEBOOK_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every notebook
    List(ListArgs),

    /// Show a notebook with its notes
    Show(ShowArgs),

    /// Find a notebook by exact title
    Find(FindArgs),

    /// Create a new notebook
    Create(CreateArgs),

    /// Rename a notebook
    Rename(RenameArgs),

    /// Delete a notebook
    Delete(DeleteArgs),

    /// Read or refresh a notebook's last access time
    Access(AccessArgs),

    /// Manage the notes of a notebook
    Note(NoteArgs),

    /// Manage data payloads
    Data(DataArgs),

    /// Clear note data in every notebook
    WipeData(WipeDataArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&client, url, cli.human, args).await,
        Commands::Show(args) => commands::show::execute(&client, url, cli.human, args).await,
        Commands::Find(args) => commands::find::execute(&client, url, cli.human, args).await,
        Commands::Create(args) => commands::create::execute(&client, url, cli.human, args).await,
        Commands::Rename(args) => commands::rename::execute(&client, url, cli.human, args).await,
        Commands::Delete(args) => commands::delete::execute(&client, url, cli.human, args).await,
        Commands::Access(args) => commands::access::execute(&client, url, cli.human, args).await,
        Commands::Note(args) => commands::note::execute(&client, url, cli.human, args).await,
        Commands::Data(args) => commands::data::execute(&client, url, cli.human, args).await,
        Commands::WipeData(args) => commands::data::wipe(&client, url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_note_command() {
        let cli = Cli::try_parse_from([
            "notebook",
            "--url",
            "http://example.org:9000",
            "note",
            "0123456789abcdef01234567",
            "title",
            "89abcdef0123456789abcdef",
            "Chapter 1",
        ])
        .unwrap();
        assert_eq!(cli.url, "http://example.org:9000");
        assert!(matches!(
            cli.command,
            Commands::Note(NoteArgs {
                action: commands::note::NoteAction::Title { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_malformed_ids() {
        assert!(Cli::try_parse_from(["notebook", "show", "not-an-id"]).is_err());
    }
}
