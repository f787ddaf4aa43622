//! ---
//! pcw_section: "02-invocation-driver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Directory enumeration and per-directory schema batches."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{DirRole, Error, Result};
use crate::resolver::{display, reject_spaces};

/// Extension of schema-definition files.
pub const SCHEMA_EXTENSION: &str = "proto";

/// Schema files found directly inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryBatch {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
}

impl DirectoryBatch {
    /// List the schema files directly in `directory`, sorted by name.
    /// Returns `None` when there are none.
    pub fn scan(directory: &Path) -> Result<Option<Self>> {
        let read_err = |source| Error::ReadDir {
            directory: directory.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(directory).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if is_schema_file(&path) {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Ok(None);
        }
        files.sort();
        Ok(Some(Self {
            directory: directory.to_path_buf(),
            files,
        }))
    }

    /// Space-joined absolute file list.
    pub fn file_list(&self) -> String {
        self.files
            .iter()
            .map(|file| display(file))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_schema_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION) && path.is_file()
}

/// Walk `root` and every directory beneath it, returning one batch per
/// directory that directly holds schema files.
///
/// Any visited directory whose path contains a space aborts the walk.
pub fn collect_batches(root: &Path) -> Result<Vec<DirectoryBatch>> {
    let mut batches = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        reject_spaces(DirRole::Source, entry.path())?;
        if let Some(batch) = DirectoryBatch::scan(entry.path())? {
            batches.push(batch);
        }
    }
    Ok(batches)
}
