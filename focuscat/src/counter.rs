//! Persisted meow click counter: one integer in a text file.

use catcore::storage::write_file;
use std::path::{Path, PathBuf};

pub const COUNTER_FILE: &str = "meow_count.txt";

#[derive(Debug, Clone)]
pub struct MeowCounter {
    count: u64,
    path: PathBuf,
}

impl MeowCounter {
    /// Load the count from `path`. Missing or unreadable files count as zero.
    pub fn load(path: PathBuf) -> Self {
        let count = read_count(&path);
        log::debug!("meow count {} loaded from {}", count, path.display());
        Self { count, path }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Count one click and write the new total straight away.
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.save();
        self.count
    }

    pub fn save(&self) {
        if let Err(e) = write_file(&self.path, &self.count.to_string()) {
            log::warn!("failed to save meow count to {}: {}", self.path.display(), e);
        }
    }
}

fn read_count(path: &Path) -> u64 {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}
