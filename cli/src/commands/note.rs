//! NOTE command - Manage the notes of a notebook.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use notebook_core::{NewNote, Note, NoteText, NoteTitle, NoteView, ObjectId};

use super::show::print_data;
use super::{Done, HumanReadable, format_timestamp, make_request, output, send_request};

/// Arguments for the note command.
#[derive(Args)]
pub struct NoteArgs {
    /// Notebook ID the notes belong to
    pub notebook_id: ObjectId,

    #[command(subcommand)]
    pub action: NoteAction,
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// Append a note
    Add {
        /// Note title
        title: String,

        /// Note text
        #[arg(long, default_value = "")]
        text: String,

        /// Use this note ID instead of letting the server pick one
        #[arg(long)]
        id: Option<ObjectId>,
    },

    /// List all notes with their data
    List,

    /// Show one note
    Show {
        /// Note ID
        note_id: ObjectId,
    },

    /// Remove a note
    Remove {
        /// Note ID
        note_id: ObjectId,
    },

    /// Set a note's title
    Title {
        /// Note ID
        note_id: ObjectId,

        /// New title
        title: String,
    },

    /// Set a note's text
    Text {
        /// Note ID
        note_id: ObjectId,

        /// New text
        text: String,
    },
}

impl HumanReadable for Note {
    fn print_human(&self) {
        println!("{}", self.title.green().bold());
        println!("  {} {}", "ID:".cyan(), self.id);
        if let Some(ts) = &self.last_access {
            println!("  {} {}", "Last Access:".cyan(), format_timestamp(ts));
        }
        if !self.text.is_empty() {
            println!();
            println!("{}", self.text);
        }
        println!();
        print_data(&self.data, "  ");
    }
}

impl HumanReadable for NoteView {
    fn print_human(&self) {
        println!("{}", self.title.green().bold());
        println!("  {} {}", "ID:".cyan(), self.id);
        if let Some(ts) = &self.last_access {
            println!("  {} {}", "Last Access:".cyan(), format_timestamp(ts));
        }
        if !self.text.is_empty() {
            println!();
            println!("{}", self.text);
        }
    }
}

impl HumanReadable for Vec<Note> {
    fn print_human(&self) {
        if self.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }
        for note in self {
            note.print_human();
            println!("{}", "-".repeat(80));
        }
    }
}

pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: NoteArgs) -> Result<()> {
    let notes_url = format!("{}/notebooks/{}/notes", base_url, args.notebook_id);

    match args.action {
        NoteAction::Add { title, text, id } => {
            let request_body = NewNote {
                id,
                ..NewNote::new(title, text)
            };
            let note: Note = make_request(client.post(&notes_url).json(&request_body)).await?;
            output(&note, human)
        }

        NoteAction::List => {
            let notes: Vec<Note> = make_request(client.get(&notes_url)).await?;
            output(&notes, human)
        }

        NoteAction::Show { note_id } => {
            let url = format!("{}/{}", notes_url, note_id);
            let note: NoteView = make_request(client.get(&url)).await?;
            output(&note, human)
        }

        NoteAction::Remove { note_id } => {
            let url = format!("{}/{}", notes_url, note_id);
            send_request(client.delete(&url)).await?;
            output(&Done::new(format!("Removed note {}", note_id)), human)
        }

        NoteAction::Title { note_id, title } => {
            let url = format!("{}/{}/title", notes_url, note_id);
            let note: Note = make_request(client.patch(&url).json(&NoteTitle { title })).await?;
            output(&note, human)
        }

        NoteAction::Text { note_id, text } => {
            let url = format!("{}/{}/text", notes_url, note_id);
            let note: Note = make_request(client.patch(&url).json(&NoteText { text })).await?;
            output(&note, human)
        }
    }
}
