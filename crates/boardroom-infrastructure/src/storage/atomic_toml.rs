//! Atomic TOML file operations.
//!
//! A write either fully replaces the previous file or leaves it untouched,
//! so a crash mid-save never loses the persisted session.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use boardroom_core::error::{BoardroomError, Result};
use serde::{Serialize, de::DeserializeOwned};

/// A handle to a TOML document on disk.
///
/// - **Atomicity**: writes go to a temp file that is renamed into place
/// - **Durability**: the temp file is fsynced before the rename
/// - **Isolation**: [`update`](Self::update) holds an exclusive lock for its
///   read-modify-write cycle
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist or is blank.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` and atomically replaces the file with it.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Loads the file (or `default_value`), applies `f`, and saves the result
    /// while holding an exclusive lock.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| BoardroomError::io(format!("{:?} has no file name", self.path)))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Exclusive lock on a sibling `.lock` file, released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| BoardroomError::io(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        api_url: String,
        visits: u32,
    }

    fn prefs(visits: u32) -> Prefs {
        Prefs {
            api_url: "https://example.test/exec".to_string(),
            visits,
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Prefs>::new(temp_dir.path().join("prefs.toml"));

        file.save(&prefs(42)).unwrap();
        assert_eq!(file.load().unwrap(), Some(prefs(42)));
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.toml");
        let file = AtomicTomlFile::<Prefs>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_a_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.toml");
        fs::write(&path, "visits = [").unwrap();

        let err = AtomicTomlFile::<Prefs>::new(path).load().unwrap_err();
        assert!(matches!(err, BoardroomError::Serialization { .. }));
    }

    #[test]
    fn test_update_starts_from_default_then_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Prefs>::new(temp_dir.path().join("prefs.toml"));

        file.update(prefs(0), |p| {
            p.visits += 10;
            Ok(())
        })
        .unwrap();
        file.update(prefs(0), |p| {
            p.visits += 5;
            Ok(())
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap().visits, 15);
        assert!(!temp_dir.path().join("prefs.lock").exists());
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Prefs>::new(temp_dir.path().join("prefs.toml"));
        file.save(&prefs(1)).unwrap();

        let result = file.update(prefs(0), |p| {
            p.visits = 99;
            Err(BoardroomError::config("rejected"))
        });
        assert!(result.is_err());
        assert_eq!(file.load().unwrap(), Some(prefs(1)));
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("prefs.toml");
        let file = AtomicTomlFile::<Prefs>::new(path.clone());

        file.save(&prefs(3)).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join(".prefs.toml.tmp").exists());
    }
}
