//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{RevisionId, Visibility};
use crate::store::DEFAULT_LIST_LIMIT;
use output::OutputFormat;

/// notegraph - linked notes with tags and revision history
#[derive(Parser, Debug)]
#[command(name = "notegraph", version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding notes.db (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Author recorded on changes (overrides config file and $USER)
    #[arg(long, global = true)]
    pub author: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// Replace a note's content, inline or in your editor
    Edit(EditArgs),

    /// Change a note's title, visibility or favorite flag
    Set(SetArgs),

    /// Delete a note with its links and history
    Rm(RmArgs),

    /// List notes, most recently updated first
    #[command(name = "ls")]
    List(ListArgs),

    /// Show notes that link to a given note
    Backlinks(BacklinksArgs),

    /// Export the whole graph as JSON
    Graph(GraphArgs),

    /// List all tags
    Tags(TagsArgs),

    /// Show a note's revision history
    Revisions(RevisionsArgs),

    /// Delete a single revision
    #[command(name = "drop-revision")]
    DropRevision(DropRevisionArgs),

    /// Re-derive links and tags from every note's content
    Reindex(ReindexArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Note content (wikilinks and #tags are picked up)
    #[arg(short, long, conflicts_with = "edit")]
    pub content: Option<String>,

    /// Visibility: public, team or private
    #[arg(long)]
    pub visibility: Option<Visibility>,

    /// Write the content in your editor
    #[arg(short, long)]
    pub edit: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// New content; opens the editor when omitted
    #[arg(short, long)]
    pub content: Option<String>,
}

/// Arguments for the `set` command
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// New title (the slug is kept)
    #[arg(long)]
    pub title: Option<String>,

    /// Visibility: public, team or private
    #[arg(long)]
    pub visibility: Option<Visibility>,

    /// Mark as favorite
    #[arg(long, conflicts_with = "unfavorite")]
    pub favorite: bool,

    /// Clear the favorite mark
    #[arg(long)]
    pub unfavorite: bool,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID, ID prefix or title
    pub note: String,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Title substring, or #tag for an exact tag match
    pub search: Option<String>,

    /// Only favorites
    #[arg(long)]
    pub favorites: bool,

    /// Maximum number of notes
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub limit: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `revisions` command
#[derive(Parser, Debug)]
pub struct RevisionsArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Print each snapshot in full
    #[arg(long)]
    pub full: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `drop-revision` command
#[derive(Parser, Debug)]
pub struct DropRevisionArgs {
    /// Revision ID as shown by `revisions`
    pub id: RevisionId,
}

/// Arguments for the `reindex` command
#[derive(Parser, Debug)]
pub struct ReindexArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
