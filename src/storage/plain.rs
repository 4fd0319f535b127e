// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{
    error::{self, Result},
    metadata,
};

use super::Storage;

/// Raw-text storage for the bearer token: the file holds nothing but the
/// token itself, so other tooling (and a rescue `rm`) can operate on it
/// without knowing any framing. An empty or whitespace-only file reads back
/// as no value.
pub(crate) struct Plain {
    path: PathBuf,
}

impl Plain {
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
impl Storage<String> for Plain {
    async fn get(&mut self) -> Result<Option<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = String::from_utf8(bytes).map_err(error::Storage::from)?;
        let value = value.trim();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value.to_owned()))
        }
    }

    async fn update(&mut self, data: &String) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staged = self.path.with_extension("tmp");
        fs::write(&staged, data.as_bytes())?;
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
    async fn token_survives_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Plain::at(dir.path().join("token"));

        assert_eq!(storage.get().await.unwrap(), None);

        storage.update(&"abc.def.ghi".to_owned()).await.unwrap();
        assert_eq!(storage.get().await.unwrap().as_deref(), Some("abc.def.ghi"));

        storage.clear().await.unwrap();
        assert_eq!(storage.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \n").unwrap();

        let mut storage = Plain::at(path);
        assert_eq!(storage.get().await.unwrap(), None);
    }
}
