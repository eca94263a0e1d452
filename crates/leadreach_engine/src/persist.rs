//! Local writes for exported CSVs and saved messages.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::ClientError;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("export directory {} is unusable: {reason}", dir.display())]
    ExportDir { dir: PathBuf, reason: String },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<PersistError> for ClientError {
    fn from(err: PersistError) -> Self {
        ClientError::Storage(err.to_string())
    }
}

/// Creates `dir` (and parents) when absent; rejects a path that exists but is
/// not a directory.
pub fn ensure_export_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::ExportDir {
        dir: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(unusable("not a directory".into())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| unusable(err.to_string()))
        }
        Err(err) => Err(unusable(err.to_string())),
    }
}

/// Writes files into one directory so that `{dir}/{filename}` holds either
/// the previous content or the complete new content, never a partial file.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_export_dir(&self.dir)?;
        let target = self.dir.join(filename);
        let failed = |source: io::Error| PersistError::Write {
            path: target.clone(),
            source,
        };

        let staged = self.stage(content).map_err(failed)?;
        // The rename replaces an existing file in one step. On failure the
        // staged file is dropped and removed; the old target is untouched.
        staged.persist(&target).map_err(|err| failed(err.error))?;
        Ok(target)
    }

    pub fn write_text(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        self.write(filename, content.as_bytes())
    }

    /// Hidden temp file in the target directory, so the final rename stays on
    /// one filesystem.
    fn stage(&self, content: &[u8]) -> io::Result<NamedTempFile> {
        let mut staged = tempfile::Builder::new()
            .prefix(".leadreach-")
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;
        Ok(staged)
    }
}
