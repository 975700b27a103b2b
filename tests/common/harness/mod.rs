//! Test harness for CLI integration tests.
//!
//! Provides isolated data directories, programmatic note creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod note;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::NoteGraphCommand;
#[allow(unused_imports)]
pub use env::{TEST_AUTHOR, TestEnv};
#[allow(unused_imports)]
pub use note::TestNote;
