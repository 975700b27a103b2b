//! NoteGraphService: the single entry point for reading and mutating notes.

use super::NoteLocks;
use crate::domain::{
    AuthorId, Backlink, GraphExport, NewNote, Note, NoteChanges, NoteId, Revision, RevisionId,
    Tag, TagWithCount, parse_references,
};
use crate::infra::slugify;
use crate::store::{
    NoteQuery, SqliteStore, StoreError, StoreOptions, StoreResult, Transaction,
};
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Totals after re-deriving every note's links and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RebuildSummary {
    pub notes: usize,
    pub links: usize,
    pub memberships: usize,
}

/// Shared handle on a note graph database.
///
/// Each call opens its own connection, so one service can be shared across
/// threads. Every mutation is one `BEGIN IMMEDIATE` transaction; mutations
/// of the same note are additionally serialized in-process.
#[derive(Debug)]
pub struct NoteGraphService {
    path: PathBuf,
    options: StoreOptions,
    locks: NoteLocks,
}

impl NoteGraphService {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> StoreResult<Self> {
        let path = path.into();
        SqliteStore::open(&path, &options)?;
        debug!(path = %path.display(), "opened note graph");
        Ok(Self {
            path,
            options,
            locks: NoteLocks::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ===========================================
    // Mutations
    // ===========================================

    /// Creates a note and derives its links and tags.
    ///
    /// Fails with `SlugConflict` when the title's slug is taken; nothing is
    /// written in that case.
    pub fn create_note(&self, new: NewNote, author: &AuthorId) -> StoreResult<Note> {
        let title = new.title.trim();
        let slug = slugify(title);
        let now = now();
        let note = Note::builder(NoteId::new(), title, slug, author.clone(), now)
            .content(new.content)
            .visibility(new.visibility)
            .build();
        let refs = parse_references(note.content());

        let note = self.write(|tx| {
            tx.insert_note(&note)?;
            let links = tx.reconcile_links(note.id(), &refs.titles)?;
            let memberships = tx.reconcile_tags(note.id(), &refs.tags)?;
            debug!(id = %note.id(), links, memberships, "derived references");
            tx.require_note(note.id())
        })?;

        info!(id = %note.id(), slug = note.slug(), owner = %author, "note created");
        Ok(note)
    }

    /// Replaces a note's content, keeping links, tags and history in step.
    pub fn update_note_content(
        &self,
        id: &NoteId,
        content: impl Into<String>,
        author: &AuthorId,
    ) -> StoreResult<Note> {
        self.update_note(id, &NoteChanges::content(content), author)
    }

    /// Applies `changes` to a note in one transaction.
    ///
    /// A content change first snapshots the old content, then replaces the
    /// note's edges and memberships. Identical content is a no-op. Other
    /// fields are written only when they differ; `updated_at` moves when
    /// anything did.
    pub fn update_note(
        &self,
        id: &NoteId,
        changes: &NoteChanges,
        author: &AuthorId,
    ) -> StoreResult<Note> {
        self.locks.with_lock(id, || {
            self.write(|tx| {
                let current = tx.require_note(id)?;
                let now = now();

                if let Some(content) = changes.content.as_deref() {
                    let refs = parse_references(content);
                    if let Some(revision) = tx.record_if_changed(id, content, author, now)? {
                        let links = tx.reconcile_links(id, &refs.titles)?;
                        let memberships = tx.reconcile_tags(id, &refs.tags)?;
                        tx.update_note_content(id, content, now)?;
                        debug!(%id, %revision, links, memberships, editor = %author, "content updated");
                    }
                }

                if let Some(title) = changes.title.as_deref().map(str::trim)
                    && title != current.title()
                {
                    tx.update_note_title(id, title, now)?;
                    debug!(%id, title, "title updated");
                }

                if let Some(visibility) = changes.visibility
                    && visibility != current.visibility()
                {
                    tx.update_note_visibility(id, visibility, now)?;
                }

                if let Some(favorite) = changes.favorite
                    && favorite != current.is_favorite()
                {
                    tx.update_note_favorite(id, favorite, now)?;
                }

                tx.require_note(id)
            })
        })
    }

    /// Deletes a note with its edges in both directions, its tag
    /// memberships and its revisions. Tags themselves stay.
    pub fn delete_note(&self, id: &NoteId) -> StoreResult<()> {
        self.locks.with_lock(id, || {
            self.write(|tx| {
                if !tx.note_exists(id)? {
                    return Err(StoreError::note_not_found(id));
                }
                let links = tx.delete_links_touching(id)?;
                let memberships = tx.delete_memberships(id)?;
                let revisions = tx.delete_revisions_for(id)?;
                tx.delete_note_row(id)?;
                debug!(%id, links, memberships, revisions, "removed dependents");
                Ok(())
            })
        })?;

        info!(%id, "note deleted");
        Ok(())
    }

    /// Deletes one revision from a note's history.
    pub fn delete_revision(&self, id: RevisionId) -> StoreResult<()> {
        let note_id = self
            .read(|tx| tx.get_revision(id))?
            .ok_or_else(|| StoreError::RevisionNotFound { id: id.to_string() })?
            .note_id;

        self.locks
            .with_lock(&note_id, || self.write(|tx| tx.delete_revision(id)))?;
        debug!(%id, note = %note_id, "revision deleted");
        Ok(())
    }

    /// Re-derives links and tags for every note from its stored content.
    ///
    /// Picks up wikilinks written before their target existed. Content,
    /// history and timestamps are left alone.
    pub fn rebuild_graph(&self) -> StoreResult<RebuildSummary> {
        let summary = self.write(|tx| {
            let notes = tx.all_note_contents()?;
            let mut summary = RebuildSummary {
                notes: notes.len(),
                links: 0,
                memberships: 0,
            };
            for (id, content) in &notes {
                let refs = parse_references(content);
                summary.links += tx.reconcile_links(id, &refs.titles)?;
                summary.memberships += tx.reconcile_tags(id, &refs.tags)?;
            }
            Ok(summary)
        })?;

        info!(
            notes = summary.notes,
            links = summary.links,
            memberships = summary.memberships,
            "graph rebuilt"
        );
        Ok(summary)
    }

    // ===========================================
    // Reads
    // ===========================================

    pub fn get_note(&self, id: &NoteId) -> StoreResult<Note> {
        self.read(|tx| tx.require_note(id))
    }

    pub fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        self.read(|tx| tx.find_note_by_slug(slug))
    }

    pub fn find_by_id_prefix(&self, prefix: &str) -> StoreResult<Vec<Note>> {
        self.read(|tx| tx.find_notes_by_id_prefix(prefix))
    }

    pub fn list_notes(&self, query: &NoteQuery) -> StoreResult<Vec<Note>> {
        self.read(|tx| tx.list_notes(query))
    }

    /// The whole graph, read from one snapshot.
    pub fn export_graph(&self) -> StoreResult<GraphExport> {
        self.read(|tx| tx.export_graph())
    }

    /// Every tag, ordered by name.
    pub fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        self.read(|tx| tx.all_tags())
    }

    pub fn tag_counts(&self) -> StoreResult<Vec<TagWithCount>> {
        self.read(|tx| tx.tag_counts())
    }

    /// Notes linking to `id`, with a snippet around each reference.
    pub fn backlinks(&self, id: &NoteId) -> StoreResult<Vec<Backlink>> {
        self.read(|tx| tx.backlinks(id))
    }

    /// History of a note, newest first.
    pub fn list_revisions(&self, id: &NoteId) -> StoreResult<Vec<Revision>> {
        self.read(|tx| {
            if !tx.note_exists(id)? {
                return Err(StoreError::note_not_found(id));
            }
            tx.list_revisions(id)
        })
    }

    // ===========================================
    // Transactions
    // ===========================================

    fn connect(&self) -> StoreResult<SqliteStore> {
        SqliteStore::connect(&self.path, &self.options)
    }

    fn read<T>(&self, f: impl FnOnce(&Transaction<'_>) -> StoreResult<T>) -> StoreResult<T> {
        let store = self.connect()?;
        let tx = store.read_transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn write<T>(&self, f: impl FnOnce(&Transaction<'_>) -> StoreResult<T>) -> StoreResult<T> {
        let mut store = self.connect()?;
        let tx = store.write_transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

/// Current time at the precision timestamps are stored with.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
