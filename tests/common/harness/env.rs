//! Isolated test environment with temp directory.

use super::{NoteGraphCommand, TestNote};
use notegraph::domain::{AuthorId, Note, NoteChanges};
use notegraph::graph::NoteGraphService;
use notegraph::store::StoreOptions;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Author passed to every command the harness builds.
pub const TEST_AUTHOR: &str = "tester";

/// Isolated test environment with a temporary data directory.
///
/// The directory is removed when the TestEnv is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the data directory
    data_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path where the database is stored.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("notes.db")
    }

    /// Opens the environment's note graph directly.
    pub fn service(&self) -> NoteGraphService {
        NoteGraphService::open(self.db_path(), StoreOptions::default())
            .expect("Failed to open note graph")
    }

    /// Creates a note through the library and returns it.
    pub fn add_note(&self, test_note: &TestNote) -> Note {
        let service = self.service();
        let author = AuthorId::new(TEST_AUTHOR).expect("valid author");
        let note = service
            .create_note(test_note.to_new_note(), &author)
            .expect("Failed to create test note");
        if test_note.is_favorite() {
            let changes = NoteChanges {
                favorite: Some(true),
                ..NoteChanges::default()
            };
            return service
                .update_note(note.id(), &changes, &author)
                .expect("Failed to mark favorite");
        }
        note
    }

    /// Creates a command configured for this test environment.
    pub fn cmd(&self) -> NoteGraphCommand {
        NoteGraphCommand::new()
            .dir(&self.data_dir)
            .author(TEST_AUTHOR)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.data_dir().is_dir());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.data_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_db_path() {
        let env = TestEnv::new();
        assert!(env.db_path().starts_with(env.data_dir()));
        assert!(env.db_path().ends_with("notes.db"));
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
        assert_eq!(args[2], "--author");
        assert_eq!(args[3], TEST_AUTHOR);
    }

    #[test]
    fn test_env_add_note_persists() {
        let env = TestEnv::new();
        let note = env.add_note(&TestNote::new("Seeded").content("#seed").favorite());

        let stored = env.service().get_note(note.id()).unwrap();
        assert_eq!(stored.title(), "Seeded");
        assert!(stored.is_favorite());
        assert_eq!(stored.owner().as_str(), TEST_AUTHOR);
        assert!(env.db_path().exists());
    }
}
