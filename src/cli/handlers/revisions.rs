//! Revision history command handlers.

use anyhow::{Context, Result};

use super::resolve::resolve_unique;
use super::{first_line, truncate_str};
use crate::cli::output::{OutputFormat, print_json};
use crate::cli::{DropRevisionArgs, RevisionsArgs};
use crate::graph::NoteGraphService;

pub fn handle_revisions(args: &RevisionsArgs, service: &NoteGraphService) -> Result<()> {
    let note = resolve_unique(service, &args.note)?;
    let revisions = service
        .list_revisions(note.id())
        .context("failed to list revisions")?;

    match args.format {
        OutputFormat::Human => {
            if revisions.is_empty() {
                println!("No revisions for {}.", note.title());
                return Ok(());
            }
            for revision in &revisions {
                println!(
                    "{:>6}  {}  {:<16}  {}",
                    revision.id.0,
                    revision.created_at.format("%Y-%m-%d %H:%M:%S"),
                    truncate_str(revision.author.as_str(), 16),
                    if args.full {
                        String::new()
                    } else {
                        truncate_str(first_line(&revision.content_snapshot), 40)
                    }
                );
                if args.full {
                    println!("{}", revision.content_snapshot);
                    println!();
                }
            }
        }
        OutputFormat::Json => print_json(&revisions)?,
    }
    Ok(())
}

pub fn handle_drop_revision(args: &DropRevisionArgs, service: &NoteGraphService) -> Result<()> {
    service
        .delete_revision(args.id)
        .with_context(|| format!("failed to delete revision {}", args.id))?;
    println!("Deleted revision {}", args.id);
    Ok(())
}
