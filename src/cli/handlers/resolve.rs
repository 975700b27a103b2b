//! Note resolution utilities.

use anyhow::{Context, Result, bail};

use crate::domain::{Note, NoteId};
use crate::graph::NoteGraphService;
use crate::infra::slugify;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

/// Prints detailed information about ambiguous notes to help distinguish them.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id().prefix(), note.title());
        if !note.tags().is_empty() {
            let tags: Vec<_> = note.tags().iter().map(|t| t.to_string()).collect();
            eprintln!("      tags: {}", tags.join(" "));
        }
    }
    eprintln!();
    eprintln!("Use a longer ID prefix to specify which note you mean.");
}

/// Resolves a note identifier to a unique note.
///
/// Resolution order:
/// 1. Full note ID
/// 2. ID prefix match (if input looks like a ULID prefix)
/// 3. Slug of the input, so any spelling of the title works
///
/// Returns `Unique` if exactly one note matches across all methods,
/// `Ambiguous` if multiple notes match, or `NotFound` if no match.
pub fn resolve_note(service: &NoteGraphService, identifier: &str) -> Result<ResolveResult> {
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<NoteId>() {
        match service.get_note(&id) {
            Ok(note) => return Ok(ResolveResult::Unique(note)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e).context("failed to look up note by ID"),
        }
    }

    let looks_like_id =
        identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_alphanumeric());

    let mut candidates: Vec<Note> = Vec::new();

    if looks_like_id {
        let id_matches = service
            .find_by_id_prefix(identifier)
            .context("failed to search by ID prefix")?;

        // ID matches are the most precise
        if id_matches.len() == 1 {
            candidates.extend(id_matches);
            return Ok(ResolveResult::Unique(candidates.remove(0)));
        }

        candidates.extend(id_matches);
    }

    let slug_match = service
        .find_by_slug(&slugify(identifier))
        .context("failed to search by title")?;
    candidates.extend(slug_match);

    candidates.sort_by_key(|n| n.id().to_string());
    candidates.dedup_by(|a, b| a.id() == b.id());

    match candidates.len() {
        0 => Ok(ResolveResult::NotFound),
        1 => Ok(ResolveResult::Unique(candidates.remove(0))),
        _ => Ok(ResolveResult::Ambiguous(candidates)),
    }
}

/// Resolves `identifier`, failing unless exactly one note matches.
pub(crate) fn resolve_unique(service: &NoteGraphService, identifier: &str) -> Result<Note> {
    match resolve_note(service, identifier)? {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => bail!("note not found: '{}'", identifier),
    }
}
