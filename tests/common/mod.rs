#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory tree for collector and engine tests
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the temporary directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree
    pub fn abs(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }

    /// Same as [`abs`](Self::abs), as a string for config fields
    pub fn abs_str(&self, rel: &str) -> String {
        self.abs(rel).display().to_string()
    }

    /// Write `content` to `rel`, creating parent directories
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.abs(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.abs(rel)).expect("Failed to read file")
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
