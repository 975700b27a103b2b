//! Text normalisation helpers

mod slug;

pub use slug::{EMPTY_SLUG, slugify};
