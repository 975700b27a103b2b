//! Command handlers for the CLI.

mod completions;
mod edit;
mod graph;
mod notes;
mod resolve;
mod revisions;
mod tags;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::config::Config;
use crate::graph::NoteGraphService;

pub use completions::handle_completions;
pub use edit::{handle_edit, handle_new};
pub use graph::{handle_backlinks, handle_graph, handle_reindex};
pub use notes::{handle_list, handle_rm, handle_set, handle_show};
pub use resolve::{ResolveResult, resolve_note};
pub use revisions::{handle_drop_revision, handle_revisions};
pub use tags::handle_tags;

// ===========================================
// Shared Utilities
// ===========================================

/// Returns the database path inside a data directory.
pub(crate) fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("notes.db")
}

/// Opens the note graph stored under `data_dir`.
pub fn open_service(data_dir: &Path, config: &Config) -> Result<NoteGraphService> {
    let path = db_path(data_dir);
    NoteGraphService::open(&path, config.store_options())
        .with_context(|| format!("failed to open database at {}", path.display()))
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// First line of `text`, for one-line previews.
pub(crate) fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn db_path_is_inside_data_dir() {
        assert_eq!(db_path(Path::new("/data")), PathBuf::from("/data/notes.db"));
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("short", 10), "short");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_str("ééééé", 3), "éé…");
    }

    #[test]
    fn first_line_of_multiline_and_empty() {
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line(""), "");
    }
}
