//! Command-line surface for the guest list tool.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch an event's guest list, merge local favorites, and export it
#[derive(Debug, Parser)]
#[command(name = "guest-list")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level unless RUST_LOG says otherwise)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the ordered guest list
    List(ListArgs),
    /// Export the ordered guest list as CSV
    Csv(CsvArgs),
    /// Mark or unmark a guest as favorite
    Favorite(FavoriteArgs),
    /// Print the event id embedded in an event page
    EventId(EventIdArgs),
}

/// Where the event to load comes from.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct EventSource {
    /// Event page to read the event id from (file path or http(s) URL)
    #[arg(long)]
    pub page: Option<String>,

    /// Event id to use directly
    #[arg(long)]
    pub event_id: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: EventSource,

    /// Print the view model as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CsvArgs {
    #[command(flatten)]
    pub source: EventSource,

    /// Write the CSV to this file instead of stdout
    #[arg(short, long, conflicts_with = "clipboard")]
    pub output: Option<PathBuf>,

    /// Copy the CSV to the system clipboard instead of stdout
    #[arg(long)]
    pub clipboard: bool,
}

#[derive(Debug, Args)]
pub struct FavoriteArgs {
    /// Guest id to update
    pub guest_id: String,

    /// Remove the favorite mark instead of setting it
    #[arg(long)]
    pub off: bool,
}

#[derive(Debug, Args)]
pub struct EventIdArgs {
    /// Event page (file path or http(s) URL)
    #[arg(long)]
    pub page: String,
}
