//! Flat-file persistence for the post collection.
//!
//! The whole collection lives in one JSON array that is re-read on every
//! request and overwritten in one shot on every mutation. There is no atomic
//! rename, no backup copy, and no cross-process locking; concurrent
//! load/modify/save cycles can lose the intervening write. Corruption is
//! absorbed rather than surfaced: an unreadable or invalid file reads as an
//! empty collection.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{error, warn};

use crate::domain::posts::Post;

/// Errors that can occur while reading or writing the backing file.
///
/// Callers of [`PostStore::load`] and [`PostStore::save`] never see these;
/// they exist so tests and the health endpoint can observe failures through
/// the `try_` variants without changing the absorbing contract.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("backing file holds malformed post data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Filesystem-backed store for the canonical post collection.
#[derive(Debug)]
pub struct PostStore {
    path: PathBuf,
}

impl PostStore {
    /// Open a store over the given backing file, creating it (and any missing
    /// parent directory) with an empty collection when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let store = Self { path: path.into() };
        store.ensure_exists()?;
        Ok(store)
    }

    /// Create the backing file containing an empty collection when it does not
    /// exist yet. Idempotent; an existing file is left untouched.
    pub fn ensure_exists(&self) -> Result<(), std::io::Error> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, "[]")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection, treating every failure as "no data".
    ///
    /// An absent, unreadable, or malformed file, or any record missing one of
    /// its required fields, yields an empty vec. The cause is logged but not
    /// surfaced; "no posts yet" and "corrupt file" are indistinguishable to
    /// the caller.
    pub async fn load(&self) -> Vec<Post> {
        match self.try_load().await {
            Ok(posts) => posts,
            Err(err) => {
                warn!(
                    target = "foglio::store",
                    path = %self.path.display(),
                    error = %err,
                    "treating unreadable post collection as empty",
                );
                Vec::new()
            }
        }
    }

    /// Fallible variant of [`load`](Self::load); deserializes the array as a
    /// whole, so one invalid record rejects the entire collection.
    pub async fn try_load(&self) -> Result<Vec<Post>, StoreError> {
        let raw = fs::read_to_string(&self.path).await?;
        let posts = serde_json::from_str(&raw)?;
        Ok(posts)
    }

    /// Overwrite the backing file with the full collection, pretty-printed.
    ///
    /// A write failure is logged and swallowed; callers proceed as if the save
    /// succeeded and the next load serves the previous contents.
    pub async fn save(&self, posts: &[Post]) {
        if let Err(err) = self.try_save(posts).await {
            error!(
                target = "foglio::store",
                path = %self.path.display(),
                error = %err,
                "failed to persist post collection",
            );
        }
    }

    /// Fallible variant of [`save`](Self::save).
    pub async fn try_save(&self, posts: &[Post]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(posts)?;
        fs::write(&self.path, serialized).await?;
        Ok(())
    }
}
