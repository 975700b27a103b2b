//! Core types: Note, NoteId (ULID), Tag, Revision, graph read models, and the
//! pure text routines that derive references and snippets from content.

mod author;
mod graph;
mod note;
mod note_id;
mod references;
mod revision;
mod snippet;
mod tag;
mod visibility;

pub use author::{AuthorId, ParseAuthorError};
pub use graph::{Backlink, GraphExport, GraphLink, GraphNode, TagLink, TagNode};
pub use note::{NewNote, Note, NoteBuilder, NoteChanges};
pub use note_id::{NoteId, ParseNoteIdError};
pub use references::{References, parse_references};
pub use revision::{MAX_REVISIONS_PER_NOTE, Revision, RevisionId};
pub use snippet::{SNIPPET_CONTEXT_CHARS, extract_snippet};
pub use tag::{Tag, TagId, TagWithCount};
pub use visibility::{ParseVisibilityError, Visibility};
