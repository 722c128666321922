//! Integration tests for Chawkbazar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p chawkbazar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_persistence` - File-backed sessions across fresh store instances
//! - `cli_session` - CLI commands against a real storage directory
//!
//! Each test gets its own temporary storage directory from [`TestContext`].

use std::path::Path;

use chawkbazar_checkout::{CheckoutConfig, CheckoutStore, FileStorage};
use tempfile::TempDir;

/// Isolated storage directory plus helpers for opening stores on it.
pub struct TestContext {
    dir: TempDir,
    key: String,
}

impl TestContext {
    /// Create a context with a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
            key: "integration-checkout".to_string(),
        }
    }

    /// Storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Open a new store instance on the shared directory, as a fresh process would.
    #[must_use]
    pub fn open_store(&self) -> CheckoutStore {
        CheckoutStore::open(FileStorage::new(self.dir()), self.key.clone())
    }

    /// Configuration pointing at this context's storage.
    #[must_use]
    pub fn config(&self) -> CheckoutConfig {
        CheckoutConfig {
            storage_dir: self.dir().to_path_buf(),
            storage_key: self.key.clone(),
            ..CheckoutConfig::default()
        }
    }

    /// Path of the session file.
    #[must_use]
    pub fn session_file(&self) -> std::path::PathBuf {
        self.dir().join(format!("{}.json", self.key))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
