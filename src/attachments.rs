//! Image attachments for note entries.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores note attachments as plain files under a fixed upload directory.
///
/// Files keep the basename of their original name; a second upload with
/// the same name overwrites the first. Entries reference an attachment by
/// the relative path this store hands back.
pub struct AttachmentStore {
    dir: PathBuf,
}

impl AttachmentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves `bytes` under the basename of `original_name` and returns the
    /// relative path to store as an entry's `image_ref`.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let file_name = Path::new(original_name)
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| {
                format!("Attachment name {:?} has no usable file name", original_name)
            })?;

        let target = self.dir.join(file_name);
        fs::write(&target, bytes)
            .with_context(|| format!("Failed to write attachment {}", target.display()))?;

        info!("Stored attachment {} ({} bytes)", target.display(), bytes.len());
        Ok(file_name.to_string())
    }

    /// Reads an attachment back by the `image_ref` stored on an entry.
    pub fn read(&self, image_ref: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(image_ref);
        fs::read(&path).with_context(|| format!("Failed to read attachment {}", path.display()))
    }
}
