//! Whole-collection blob store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use emprof_core::{Profile, ProfileStatus, STORAGE_NAMESPACE};

use crate::error::StoreError;

/// Single source of truth for the profile collection.
///
/// Backed by one JSON array file named after [`STORAGE_NAMESPACE`]. There
/// is no per-record key: every mutation rewrites the entire blob, and all
/// mutations are funneled through [`ProfileStore::mutate`] so each one
/// operates on the freshest stored snapshot under the write lock.
pub struct ProfileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ProfileStore {
    /// Opens (creating the data directory if needed) the store rooted at
    /// `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        Ok(ProfileStore {
            path: data_dir.join(format!("{STORAGE_NAMESPACE}.json")),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the collection blob.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current collection.
    ///
    /// A missing blob is an empty collection. A blob that fails to parse is
    /// also an empty collection — logged, never surfaced as an error, so
    /// startup stays resilient to a corrupted file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] only for I/O failures other than
    /// not-found.
    pub fn load(&self) -> Result<Vec<Profile>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(profiles) => Ok(profiles),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "stored collection did not parse; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Serializes and persists the entire collection, replacing prior
    /// content wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on serialization or write failure.
    pub fn save(&self, profiles: &[Profile]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(profiles)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    /// The single mutation entry point: loads the freshest snapshot under
    /// the write lock, applies `apply`, and saves the result.
    ///
    /// Callers never mutate a collection vector they are holding; settling
    /// generations in particular must re-locate their record here rather
    /// than writing back a snapshot captured at submission time, or a
    /// concurrent save would be silently lost.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on load or save failure.
    pub fn mutate<T>(&self, apply: impl FnOnce(&mut Vec<Profile>) -> T) -> Result<T, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut profiles = self.load()?;
        let out = apply(&mut profiles);
        self.save(&profiles)?;
        Ok(out)
    }

    /// Prepends a new profile so the newest submission is first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on load or save failure.
    pub fn prepend(&self, profile: Profile) -> Result<(), StoreError> {
        self.mutate(|profiles| profiles.insert(0, profile))
    }

    /// Applies `apply` to the profile with the given id in the freshest
    /// snapshot. Returns whether the record was found; a record deleted
    /// mid-flight leaves the collection untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on load or save failure.
    pub fn update_profile(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Profile),
    ) -> Result<bool, StoreError> {
        self.mutate(|profiles| match profiles.iter_mut().find(|p| p.id == id) {
            Some(profile) => {
                apply(profile);
                true
            }
            None => false,
        })
    }

    /// Removes the profile with the given id. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on load or save failure.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        self.mutate(|profiles| {
            let before = profiles.len();
            profiles.retain(|p| p.id != id);
            profiles.len() != before
        })
    }

    /// Bulk-deletes every profile with the given status. Returns the
    /// number removed; all other statuses are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on load or save failure.
    pub fn purge_status(&self, status: ProfileStatus) -> Result<usize, StoreError> {
        self.mutate(|profiles| {
            let before = profiles.len();
            profiles.retain(|p| p.status != status);
            before - profiles.len()
        })
    }

    /// Removes the entire collection blob.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on removal failure other than not-found.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
