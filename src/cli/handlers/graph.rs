//! Graph-level command handlers (backlinks, graph, reindex).

use anyhow::{Context, Result};

use super::resolve::resolve_unique;
use super::truncate_str;
use crate::cli::output::{OutputFormat, print_json};
use crate::cli::{BacklinksArgs, GraphArgs, ReindexArgs};
use crate::graph::NoteGraphService;

pub fn handle_backlinks(args: &BacklinksArgs, service: &NoteGraphService) -> Result<()> {
    let note = resolve_unique(service, &args.note)?;
    let backlinks = service
        .backlinks(note.id())
        .context("failed to query backlinks")?;

    match args.format {
        OutputFormat::Human => {
            if backlinks.is_empty() {
                println!("No backlinks found.");
            } else {
                for backlink in &backlinks {
                    println!(
                        "{}  {}",
                        backlink.source_id.prefix(),
                        truncate_str(&backlink.source_title, 50)
                    );
                    if !backlink.snippet.is_empty() {
                        println!("    {}", backlink.snippet.replace('\n', " "));
                    }
                }
                println!();
                println!("{} backlink(s)", backlinks.len());
            }
        }
        OutputFormat::Json => print_json(&backlinks)?,
    }
    Ok(())
}

/// Writes the bare graph export, without the `data` wrapper, so it can be
/// fed straight to a renderer.
pub fn handle_graph(args: &GraphArgs, service: &NoteGraphService) -> Result<()> {
    let export = service.export_graph().context("failed to export graph")?;
    let json = serde_json::to_string_pretty(&export)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} notes, {} links to {}",
                export.nodes.len(),
                export.links.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn handle_reindex(args: &ReindexArgs, service: &NoteGraphService) -> Result<()> {
    let summary = service.rebuild_graph().context("failed to rebuild graph")?;

    match args.format {
        OutputFormat::Human => println!(
            "Reindexed {} notes: {} links, {} tag memberships",
            summary.notes, summary.links, summary.memberships
        ),
        OutputFormat::Json => print_json(summary)?,
    }
    Ok(())
}
