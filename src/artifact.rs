//! File artifacts: naming, collision handling, persistence.
//!
//! Every job ends by writing a file under the project working directory.
//! Paths follow a single convention: `{directory}/{slug(name)}.{extension}`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::Result;

/// A persisted (or about to be persisted) file: path plus final content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifact {
    /// Destination path. Empty for the "no document" sentinel.
    pub path: PathBuf,
    /// Final text content. Empty for the "no document" sentinel.
    pub content: String,
}

impl FileArtifact {
    /// Creates an artifact.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// The empty-content sentinel: a job that produced nothing.
    pub fn empty() -> Self {
        Self {
            path: PathBuf::new(),
            content: String::new(),
        }
    }

    /// Returns true if this is the empty sentinel. Consumers must treat it
    /// as "no document" and never try to parse its content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Normalizes a name for use as a file stem: lowercase, internal whitespace
/// runs become underscores, filename-unsafe characters are dropped.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace {
            out.push('_');
            in_whitespace = false;
        }
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
            out.push(c);
        }
    }
    out
}

/// Builds the destination path for an artifact:
/// `{cwd}/{directory}/{slug(name)}.{extension}`.
pub fn artifact_path(cwd: &Path, directory: &str, name: &str, extension: &str) -> PathBuf {
    cwd.join(directory).join(format!("{}.{extension}", slug(name)))
}

/// Trims the text and terminates it with a single newline.
pub fn ensure_trailing_newline(text: &str) -> String {
    format!("{}\n", text.trim())
}

/// Writes content to `path`, creating parent directories as needed.
/// An existing file is replaced silently.
pub async fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}

/// Per-run guard against silent duplicate-filename collisions.
///
/// Similar feature names can slug to the same stem; last-writer-wins would
/// silently drop an artifact. The first reservation keeps the derived name,
/// later collisions within the same run get an index suffix and a warning.
/// Re-running a sprint still overwrites files from prior runs.
#[derive(Debug, Default)]
pub struct PathRegistry {
    reserved: Mutex<HashSet<PathBuf>>,
}

impl PathRegistry {
    /// Creates an empty registry for one orchestration run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a path, disambiguating collisions with `-2`, `-3`, …
    /// suffixes before the extension.
    pub fn reserve(&self, path: PathBuf) -> PathBuf {
        let mut reserved = self.reserved.lock().unwrap_or_else(|e| e.into_inner());
        if reserved.insert(path.clone()) {
            return path;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut index = 2;
        loop {
            let candidate = path.with_file_name(if extension.is_empty() {
                format!("{stem}-{index}")
            } else {
                format!("{stem}-{index}.{extension}")
            });
            if reserved.insert(candidate.clone()) {
                warn!(
                    original = %path.display(),
                    resolved = %candidate.display(),
                    "artifact filename collision, disambiguated with index"
                );
                return candidate;
            }
            index += 1;
        }
    }
}
