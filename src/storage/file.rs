// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{error::Result, metadata};

use super::Storage;

/// JSON-on-disk storage in the platform data directory. Writes go through a
/// staging file and a rename so a crash never leaves a half-written value.
pub(crate) struct File {
    path: PathBuf,
}

impl File {
    pub(crate) fn new<P: AsRef<Path>>(file: P) -> Option<Self> {
        metadata::PROJECT_DIRS.as_ref().map(|dirs| Self {
            path: dirs.data_dir().to_owned().join(file),
        })
    }

    #[cfg(test)]
    pub(crate) fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl<T: Send + Serialize + Sync + for<'de> Deserialize<'de>> Storage<T> for File {
    async fn get(&mut self) -> Result<Option<T>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&mut self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staged = self.path.with_extension("tmp");
        fs::write(&staged, serde_json::to_vec(data)?)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = File::at(dir.path().join("value.json"));

        assert!(Storage::<Vec<String>>::get(&mut storage)
            .await
            .unwrap()
            .is_none());

        let value = vec!["a".to_owned(), "b".to_owned()];
        storage.update(&value).await.unwrap();
        assert_eq!(storage.get().await.unwrap(), Some(value));

        Storage::<Vec<String>>::clear(&mut storage).await.unwrap();
        assert!(Storage::<Vec<String>>::get(&mut storage)
            .await
            .unwrap()
            .is_none());

        // Clearing an already-empty slot stays successful.
        Storage::<Vec<String>>::clear(&mut storage).await.unwrap();
    }
}
