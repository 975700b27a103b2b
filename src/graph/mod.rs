//! The note graph service: atomic mutations that keep links, tags and
//! revisions in step with note content.

mod locks;
mod service;

pub use locks::NoteLocks;
pub use service::{NoteGraphService, RebuildSummary};
