//! Show, Set, Rm and List command handlers.

use anyhow::{Context, Result, bail};

use super::resolve::resolve_unique;
use super::{first_line, truncate_str};
use crate::cli::output::{NoteListing, OutputFormat, print_json};
use crate::cli::{ListArgs, RmArgs, SetArgs, ShowArgs};
use crate::domain::{AuthorId, NoteChanges};
use crate::graph::NoteGraphService;
use crate::store::NoteQuery;

pub fn handle_show(args: &ShowArgs, service: &NoteGraphService) -> Result<()> {
    let note = resolve_unique(service, &args.note)?;

    match args.format {
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!(
                "ID: {}  Slug: {}  Visibility: {}{}",
                note.id().prefix(),
                note.slug(),
                note.visibility(),
                if note.is_favorite() { "  ★" } else { "" }
            );
            println!(
                "Owner: {}  Created: {}  Updated: {}",
                note.owner(),
                note.created_at().format("%Y-%m-%d %H:%M"),
                note.updated_at().format("%Y-%m-%d %H:%M")
            );

            if !note.tags().is_empty() {
                let tags: Vec<_> = note.tags().iter().map(|t| t.to_string()).collect();
                println!("Tags: {}", tags.join(" "));
            }

            println!();
            if !note.content().is_empty() {
                println!("{}", note.content());
            }
        }
        OutputFormat::Json => print_json(&note)?,
    }
    Ok(())
}

pub fn handle_set(args: &SetArgs, service: &NoteGraphService, author: &AuthorId) -> Result<()> {
    let changes = NoteChanges {
        content: None,
        title: args.title.clone(),
        visibility: args.visibility,
        favorite: match (args.favorite, args.unfavorite) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
    };

    if changes.is_empty() {
        bail!("nothing to change; pass --title, --visibility, --favorite or --unfavorite");
    }
    if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        bail!("title cannot be empty");
    }

    let note = resolve_unique(service, &args.note)?;
    let updated = service
        .update_note(note.id(), &changes, author)
        .with_context(|| format!("failed to update '{}'", note.title()))?;

    println!("Updated: {} [{}]", updated.title(), updated.id().prefix());
    Ok(())
}

pub fn handle_rm(args: &RmArgs, service: &NoteGraphService) -> Result<()> {
    let note = resolve_unique(service, &args.note)?;
    service
        .delete_note(note.id())
        .with_context(|| format!("failed to delete '{}'", note.title()))?;

    println!("Deleted: {} [{}]", note.title(), note.id().prefix());
    Ok(())
}

pub fn handle_list(args: &ListArgs, service: &NoteGraphService) -> Result<()> {
    let mut query = NoteQuery::default().limit(args.limit);
    if let Some(search) = &args.search {
        query = query.search(search.clone());
    }
    if args.favorites {
        query = query.favorite(true);
    }

    let notes = service.list_notes(&query).context("failed to list notes")?;

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                println!("{:<10}  {:<40}  {:<30}  {:>10}", "ID", "Title", "Preview", "Updated");
                println!(
                    "{:<10}  {:<40}  {:<30}  {:>10}",
                    "----------",
                    "----------------------------------------",
                    "------------------------------",
                    "----------"
                );

                for note in &notes {
                    println!(
                        "{:<10}  {:<40}  {:<30}  {:>10}",
                        note.id().prefix(),
                        truncate_str(note.title(), 40),
                        truncate_str(first_line(note.content()), 30),
                        note.updated_at().format("%Y-%m-%d")
                    );
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            print_json(listings)?;
        }
    }
    Ok(())
}
