use std::fs::File;
use std::path::{Path, PathBuf};
use memmap2::{Mmap, MmapOptions};
use crate::error::ClassifyError;

/// Read-only memory map of a model stored inside a packaged asset file.
#[derive(Debug)]
pub struct ModelAsset {
    path: PathBuf,
    offset: u64,
    map: Mmap,
}

impl ModelAsset {
    /// Maps `length` bytes starting at `offset`. A `None` length runs to the end of the file.
    pub fn map(path: &Path, offset: u64, length: Option<u64>) -> Result<Self, ClassifyError> {
        let file = File::open(path).map_err(|e| ClassifyError::resource(path, e))?;
        let file_len = file.metadata().map_err(|e| ClassifyError::resource(path, e))?.len();

        if offset > file_len {
            return Err(ClassifyError::resource(
                path,
                format!("offset {} is past the end of the file ({} bytes)", offset, file_len),
            ));
        }
        let length = length.unwrap_or(file_len - offset);
        if length == 0 {
            return Err(ClassifyError::resource(path, "model region is empty"));
        }
        match offset.checked_add(length) {
            Some(end) if end <= file_len => {}
            _ => {
                return Err(ClassifyError::resource(
                    path,
                    format!("region {}+{} exceeds file size {}", offset, length, file_len),
                ))
            }
        }
        let len = usize::try_from(length).map_err(|e| ClassifyError::resource(path, e))?;

        // SAFETY: the asset is bundled and read-only; nothing in this process writes to it.
        let map = unsafe { MmapOptions::new().offset(offset).len(len).map(&file) }
            .map_err(|e| ClassifyError::resource(path, e))?;

        log::info!("Mapped model asset {} ({} bytes at offset {})", path.display(), len, offset);
        Ok(Self {
            path: path.to_path_buf(),
            offset,
            map,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
