//! New and Edit command handlers.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

use super::resolve::resolve_unique;
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, OutputFormat, print_json};
use crate::cli::{EditArgs, NewArgs};
use crate::domain::{AuthorId, NewNote};
use crate::graph::NoteGraphService;

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Launches the configured editor command and waits for it.
struct ConfiguredEditor<'a>(&'a Config);

impl EditorLauncher for ConfiguredEditor<'_> {
    fn open(&self, path: &Path) -> Result<()> {
        let editor = self.0.editor();

        // Parse editor command (may include args like "code --wait")
        let parts: Vec<&str> = editor.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            bail!("editor command is empty");
        };

        let status = Command::new(cmd)
            .args(args)
            .arg(path)
            .status()
            .with_context(|| format!("failed to launch editor '{}'", editor))?;

        if !status.success() {
            bail!("editor '{}' exited with non-zero status", editor);
        }

        Ok(())
    }
}

/// Writes `initial` to a scratch file, lets the user edit it and returns
/// the result.
pub(crate) fn edit_text<E: EditorLauncher>(initial: &str, editor: &E) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("notegraph-")
        .suffix(".md")
        .tempfile()
        .context("failed to create scratch file")?;
    std::fs::write(file.path(), initial).context("failed to write scratch file")?;

    editor.open(file.path())?;

    std::fs::read_to_string(file.path()).context("failed to read edited content")
}

// ===========================================
// new
// ===========================================

pub(crate) fn handle_new_impl<E: EditorLauncher>(
    args: &NewArgs,
    service: &NoteGraphService,
    author: &AuthorId,
    editor: &E,
) -> Result<()> {
    if args.title.trim().is_empty() {
        bail!("title cannot be empty");
    }

    let content = match (&args.content, args.edit) {
        (Some(content), _) => content.clone(),
        (None, true) => edit_text("", editor)?,
        (None, false) => String::new(),
    };

    let mut new = NewNote::new(args.title.trim()).content(content);
    if let Some(visibility) = args.visibility {
        new = new.visibility(visibility);
    }

    let note = service
        .create_note(new, author)
        .with_context(|| format!("failed to create note '{}'", args.title.trim()))?;

    match args.format {
        OutputFormat::Human => {
            println!("Created: {} [{}]", note.title(), note.id().prefix());
        }
        OutputFormat::Json => print_json(NoteListing::from(&note))?,
    }
    Ok(())
}

pub fn handle_new(
    args: &NewArgs,
    service: &NoteGraphService,
    author: &AuthorId,
    config: &Config,
) -> Result<()> {
    handle_new_impl(args, service, author, &ConfiguredEditor(config))
}

// ===========================================
// edit
// ===========================================

pub(crate) fn handle_edit_impl<E: EditorLauncher>(
    args: &EditArgs,
    service: &NoteGraphService,
    author: &AuthorId,
    editor: &E,
) -> Result<()> {
    let note = resolve_unique(service, &args.note)?;

    let content = match &args.content {
        Some(content) => content.clone(),
        None => edit_text(note.content(), editor)?,
    };

    if content == note.content() {
        println!("No changes: {} [{}]", note.title(), note.id().prefix());
        return Ok(());
    }

    let updated = service
        .update_note_content(note.id(), content, author)
        .with_context(|| format!("failed to update '{}'", note.title()))?;

    println!("Edited: {} [{}]", updated.title(), updated.id().prefix());
    Ok(())
}

pub fn handle_edit(
    args: &EditArgs,
    service: &NoteGraphService,
    author: &AuthorId,
    config: &Config,
) -> Result<()> {
    handle_edit_impl(args, service, author, &ConfiguredEditor(config))
}
