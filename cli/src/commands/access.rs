//! ACCESS command - Read or refresh a notebook's last access time.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notebook_core::{LastAccess, ObjectId};

use super::{HumanReadable, format_timestamp, make_request, output};

/// Arguments for the access command.
#[derive(Args)]
pub struct AccessArgs {
    /// Notebook ID
    pub notebook_id: ObjectId,

    /// Refresh the access time instead of only reading it
    #[arg(long)]
    pub touch: bool,
}

impl HumanReadable for LastAccess {
    fn print_human(&self) {
        println!("  {} {}", "Last Access:".cyan(), format_timestamp(&self.last_access));
    }
}

/// Execute the access command.
pub async fn execute(client: &reqwest::Client, base_url: &str, human: bool, args: AccessArgs) -> Result<()> {
    let request = if args.touch {
        client.post(format!("{}/notebooks/{}/lastaccess", base_url, args.notebook_id))
    } else {
        client.get(format!("{}/notebooks/{}/lastaccessdate", base_url, args.notebook_id))
    };

    let last_access: LastAccess = make_request(request).await?;

    output(&last_access, human)
}
