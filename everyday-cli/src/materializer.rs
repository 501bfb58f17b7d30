//! Persists applied entries: the per-entry file and the rewritten document.
//!
//! The document is read and replaced while holding an exclusive advisory lock
//! on `<document>.lock`, so two concurrent `add` runs cannot interleave.

use crate::error::{CliError, CliResult};
use chrono::NaiveDate;
use everyday_core::{Identifier, Markers, RawEntry};
use everyday_index::{AppliedEntry, IndexTableEngine, TableReport};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Outcome of a persisted `add`.
#[derive(Debug, Clone)]
pub struct MaterializedEntry {
    pub applied: AppliedEntry,
    /// Absolute location of the new entry file
    pub entry_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FileMaterializer {
    engine: IndexTableEngine,
    markers: Markers,
    document_path: PathBuf,
    root: PathBuf,
}

impl FileMaterializer {
    /// `root` is the directory entry file paths are relative to.
    pub fn new(engine: IndexTableEngine, document_path: PathBuf, root: PathBuf) -> Self {
        Self {
            engine,
            markers: Markers::default(),
            document_path,
            root,
        }
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .document_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.document_path.with_file_name(name)
    }

    /// Apply `raw` without touching the file system.
    pub fn preview(&self, raw: &RawEntry) -> CliResult<AppliedEntry> {
        let text = fs::read_to_string(&self.document_path)?;
        Ok(self.engine.apply(&text, &self.markers, raw)?)
    }

    pub fn next_identifier(&self, date: NaiveDate, forced: Option<&str>) -> CliResult<Identifier> {
        let text = fs::read_to_string(&self.document_path)?;
        Ok(self
            .engine
            .preview_identifier(&text, &self.markers, date, forced)?)
    }

    pub fn inspect(&self) -> CliResult<TableReport> {
        let text = fs::read_to_string(&self.document_path)?;
        Ok(self.engine.inspect(&text, &self.markers)?)
    }

    /// Apply `raw` and write both files.
    ///
    /// The entry file is created first and never overwritten. If replacing
    /// the document then fails, the new entry file is removed again.
    pub fn materialize(&self, raw: &RawEntry) -> CliResult<MaterializedEntry> {
        let lock = self.acquire_lock()?;

        let text = fs::read_to_string(&self.document_path)?;
        let applied = self.engine.apply(&text, &self.markers, raw)?;

        let entry_path = self.root.join(&applied.file_path);
        write_new_file(&entry_path, &applied.file_content)?;

        if let Err(err) = self.replace_document(&applied.document) {
            if let Err(cleanup) = fs::remove_file(&entry_path) {
                tracing::warn!(
                    path = %entry_path.display(),
                    error = %cleanup,
                    "Failed to remove entry file after document write error"
                );
            }
            return Err(err);
        }

        if let Err(err) = FileExt::unlock(&lock) {
            tracing::warn!(
                path = %self.lock_path().display(),
                error = %err,
                "Failed to release document lock"
            );
        }

        tracing::info!(
            identifier = %applied.identifier,
            document = %self.document_path.display(),
            entry = %entry_path.display(),
            "Entry recorded"
        );
        Ok(MaterializedEntry {
            applied,
            entry_path,
        })
    }

    fn acquire_lock(&self) -> CliResult<File> {
        let lock_path = self.lock_path();
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)?;
        FileExt::try_lock_exclusive(&lock).map_err(|_| CliError::Locked {
            path: self.document_path.clone(),
        })?;
        tracing::debug!(path = %lock_path.display(), "Acquired document lock");
        Ok(lock)
    }

    fn replace_document(&self, contents: &str) -> CliResult<()> {
        let dir = match self.document_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.document_path)
            .map_err(|err| CliError::Persist {
                path: self.document_path.clone(),
                source: err.error,
            })?;
        Ok(())
    }
}

fn write_new_file(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(CliError::EntryExists {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
