//! On-device file storage.
//!
//! A [`FileStore`] owns one data directory and offers whole-file text
//! read/write within it. Failures are soft: reads report absence, writes
//! report `false`, and every failure is logged where it is detected.
//! Callers never see an error type from this layer.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::StorageConfig;

/// How the store treats a data directory that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataDirPolicy {
    /// Resolve once at construction. A startup failure is permanent for
    /// the lifetime of the store; no access ever retries.
    CacheAtStartup,
    /// Re-resolve on each failed access until one succeeds, then cache
    /// the resolved directory.
    #[default]
    RetryOnFailure,
}

/// Text file storage rooted at one fixed directory.
///
/// The directory is resolved (created if needed, checked readable) when
/// the store is built; what happens after a failed resolution is governed
/// by [`DataDirPolicy`]. File names are caller-supplied and the stored
/// content carries no imposed structure or encoding beyond UTF-8 text.
#[derive(Debug)]
pub struct FileStore {
    /// Directory the store resolves into; `None` when no base directory
    /// could be determined at all.
    target: Option<PathBuf>,
    policy: DataDirPolicy,
    /// Set once resolution succeeds; never holds a failed resolution.
    resolved: OnceLock<PathBuf>,
}

impl FileStore {
    /// Build a store rooted at `target`, resolving it immediately.
    pub fn new(target: impl Into<PathBuf>, policy: DataDirPolicy) -> Self {
        let store = Self {
            target: Some(target.into()),
            policy,
            resolved: OnceLock::new(),
        };
        store.resolve();
        store
    }

    /// Build a store from configuration.
    ///
    /// Uses the configured directory override when present, otherwise the
    /// platform data directory joined with the configured subpath.
    pub fn from_config(config: &StorageConfig) -> Self {
        let target = config
            .data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(&config.subpath)));

        if target.is_none() {
            error!("No platform data directory is available, storage is disabled");
        }

        let store = Self {
            target,
            policy: config.dir_policy,
            resolved: OnceLock::new(),
        };
        store.resolve();
        store
    }

    /// The resolved data directory, or `None` when it is unavailable
    /// under the store's policy.
    pub fn data_dir(&self) -> Option<&Path> {
        if let Some(path) = self.resolved.get() {
            return Some(path);
        }
        match self.policy {
            DataDirPolicy::CacheAtStartup => None,
            DataDirPolicy::RetryOnFailure => self.resolve(),
        }
    }

    /// Read the whole file with the given name into a string.
    ///
    /// Returns `None` when the file name is empty, the data directory is
    /// unavailable, the file does not exist or cannot be read, or any I/O
    /// error occurs. The content is rebuilt line by line with a `\n`
    /// appended after every line, including the last.
    pub fn read_file(&self, file_name: &str) -> Option<String> {
        if file_name.is_empty() {
            error!("Failed to read file, file name is empty!");
            return None;
        }

        let Some(dir) = self.data_dir() else {
            error!("Failed to read file {file_name}, data directory is unavailable!");
            return None;
        };

        let path = dir.join(file_name);
        if !path.exists() {
            // Missing files are a normal absence, not worth a log line.
            return None;
        }

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) => {
                error!("Failed to read file {path:?}, it cannot be accessed: {error}");
                return None;
            }
        };

        let mut content = String::new();
        for line in BufReader::new(file).lines() {
            match line {
                Ok(line) => {
                    content.push_str(&line);
                    content.push('\n');
                }
                Err(error) => {
                    error!("Failed to read file {path:?}: {error}");
                    return None;
                }
            }
        }

        Some(content)
    }

    /// Write `data` to the file with the given name, creating or fully
    /// overwriting it.
    ///
    /// Returns `false` when the data or file name is empty, the data
    /// directory is unavailable, or any I/O error occurs; the argument
    /// checks happen before any filesystem access. The content is flushed
    /// before this returns `true`.
    pub fn write_file(&self, data: &str, file_name: &str) -> bool {
        if data.is_empty() {
            error!("Failed to write file {file_name}, data is empty!");
            return false;
        }
        if file_name.is_empty() {
            error!("Failed to write file, file name is empty!");
            return false;
        }

        let Some(dir) = self.data_dir() else {
            error!("Failed to write file {file_name}, data directory is unavailable!");
            return false;
        };

        let path = dir.join(file_name);
        let file = match File::create(&path) {
            Ok(file) => file,
            Err(error) => {
                error!("Failed to write file {path:?}: {error}");
                return false;
            }
        };

        let mut writer = BufWriter::new(file);
        if let Err(error) = writer
            .write_all(data.as_bytes())
            .and_then(|()| writer.flush())
        {
            error!("Failed to write file {path:?}: {error}");
            return false;
        }

        true
    }

    /// Attempt to resolve the target directory, caching on success.
    fn resolve(&self) -> Option<&Path> {
        let target = self.target.as_deref()?;
        let path = resolve_dir(target)?;
        Some(self.resolved.get_or_init(|| path).as_path())
    }
}

/// Ensure `path` exists (creating intermediate directories) and is
/// readable. Failures are logged and reported as absence.
fn resolve_dir(path: &Path) -> Option<PathBuf> {
    if let Err(error) = fs::create_dir_all(path) {
        error!("Failed to create data directory {path:?}: {error}");
        return None;
    }
    if let Err(error) = fs::read_dir(path) {
        error!("Data directory {path:?} cannot be accessed: {error}");
        return None;
    }
    Some(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> FileStore {
        FileStore::new(tmp.path().join("data"), DataDirPolicy::RetryOnFailure)
    }

    #[test]
    fn test_new_creates_data_directory() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert_eq!(store.data_dir(), Some(tmp.path().join("data").as_path()));
        assert!(tmp.path().join("data").is_dir());
    }

    #[test]
    fn test_read_missing_file_returns_none() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert_eq!(store.read_file("never-written.json"), None);
    }

    #[test]
    fn test_write_then_read_appends_line_terminator() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert!(store.write_file("single line", "single.txt"));
        assert_eq!(store.read_file("single.txt"), Some("single line\n".to_string()));

        assert!(store.write_file("first\nsecond", "multi.txt"));
        assert_eq!(store.read_file("multi.txt"), Some("first\nsecond\n".to_string()));
    }

    #[test]
    fn test_write_overwrites_existing_content() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert!(store.write_file("a much longer first version", "file.txt"));
        assert!(store.write_file("short", "file.txt"));
        assert_eq!(store.read_file("file.txt"), Some("short\n".to_string()));
    }

    #[test]
    fn test_empty_data_is_rejected_without_touching_the_file() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert!(!store.write_file("", "untouched.txt"));
        assert!(!tmp.path().join("data/untouched.txt").exists());

        assert!(store.write_file("kept", "untouched.txt"));
        assert!(!store.write_file("", "untouched.txt"));
        assert_eq!(store.read_file("untouched.txt"), Some("kept\n".to_string()));
    }

    #[test]
    fn test_empty_file_name_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert_eq!(store.read_file(""), None);
        assert!(!store.write_file("data", ""));
    }

    #[test]
    fn test_cache_at_startup_failure_is_permanent() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the directory should go makes creation fail.
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "in the way").unwrap();

        let store = FileStore::new(blocker.join("data"), DataDirPolicy::CacheAtStartup);
        assert!(!store.write_file("data", "file.txt"));

        // Even after the filesystem recovers, the startup failure sticks.
        fs::remove_file(&blocker).unwrap();
        assert_eq!(store.data_dir(), None);
        assert!(!store.write_file("data", "file.txt"));
        assert_eq!(store.read_file("file.txt"), None);
    }

    #[test]
    fn test_retry_on_failure_recovers() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "in the way").unwrap();

        let store = FileStore::new(blocker.join("data"), DataDirPolicy::RetryOnFailure);
        assert!(!store.write_file("data", "file.txt"));

        fs::remove_file(&blocker).unwrap();
        assert!(store.write_file("data", "file.txt"));
        assert_eq!(store.read_file("file.txt"), Some("data\n".to_string()));
    }

    #[test]
    fn test_from_config_uses_directory_override() {
        let tmp = TempDir::new().unwrap();
        let config = StorageConfig {
            data_dir: Some(tmp.path().join("override")),
            ..StorageConfig::default()
        };

        let store = FileStore::from_config(&config);
        assert_eq!(store.data_dir(), Some(tmp.path().join("override").as_path()));
    }
}
