//! The writing session: editor text plus where it lives on disk.

use std::path::{Path, PathBuf};

pub const AUTOSAVE_FILE: &str = "autosave.txt";

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub text: String,
    /// File chosen through open / save as. `None` means only autosaved.
    pub path: Option<PathBuf>,
    /// Changed since the last explicit save or open
    pub modified: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: String) -> Self {
        Self { text, path: None, modified: false }
    }

    pub fn open(path: PathBuf) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(&path)?;
        Ok(Self { text, path: Some(path), modified: false })
    }

    /// Restore the autosave snapshot, if one exists.
    pub fn restore(autosave: &Path) -> Option<Self> {
        match std::fs::read_to_string(autosave) {
            Ok(text) => Some(Self::from_text(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("could not read autosave {}: {}", autosave.display(), e);
                None
            }
        }
    }

    /// Write to the current path. Returns `Ok(false)` when there is none yet
    /// and the caller has to ask for one.
    pub fn save(&mut self) -> std::io::Result<bool> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };
        std::fs::write(&path, &self.text)?;
        self.modified = false;
        Ok(true)
    }

    pub fn save_as(&mut self, path: PathBuf) -> std::io::Result<()> {
        std::fs::write(&path, &self.text)?;
        self.path = Some(path);
        self.modified = false;
        Ok(())
    }

    /// Snapshot the text to the autosave file. Does not touch `modified`.
    pub fn autosave(&self, autosave: &Path) {
        if let Err(e) = catcore::storage::write_file(autosave, &self.text) {
            log::warn!("autosave to {} failed: {}", autosave.display(), e);
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn title(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Title with a `*` when there are unsaved changes.
    pub fn display_title(&self) -> String {
        if self.modified {
            format!("{}*", self.title())
        } else {
            self.title()
        }
    }
}
