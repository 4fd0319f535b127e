// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::{self, Result},
    metadata,
};

use super::Storage;

/// Keyring-backed token storage keyed by the server URL, so sessions against
/// different consoles do not clobber each other. The token is stored as its
/// raw bytes.
pub(crate) struct SecretService {
    keyring: oo7::Keyring,
    attributes: HashMap<String, String>,
}

impl SecretService {
    async fn item(&self) -> Result<Option<oo7::Item>> {
        Ok(self
            .keyring
            .search_items(
                self.attributes
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect(),
            )
            .await
            .map_err(error::Storage::from)?
            .into_iter()
            .next())
    }

    pub(crate) async fn new(url: &url::Url) -> Result<Self> {
        Ok(Self {
            keyring: oo7::Keyring::new().await.map_err(error::Storage::from)?,
            attributes: HashMap::from([
                ("userctl.kind".to_owned(), "token".to_owned()),
                ("userctl.url".to_owned(), url.as_str().to_owned()),
            ]),
        })
    }
}

#[async_trait]
impl Storage<String> for SecretService {
    async fn get(&mut self) -> Result<Option<String>> {
        let token = match self.item().await? {
            Some(item) => {
                let secret = item.secret().await.map_err(error::Storage::from)?;
                Some(String::from_utf8(secret.to_vec()).map_err(error::Storage::from)?)
            }
            None => None,
        };
        Ok(token.filter(|value| !value.is_empty()))
    }

    async fn update(&mut self, data: &String) -> Result<()> {
        self.keyring
            .create_item(
                &metadata::CLIENT_DISPLAY_NAME,
                self.attributes
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect(),
                data.as_bytes(),
                true,
            )
            .await
            .map_err(error::Storage::from)?;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        if let Some(item) = self.item().await? {
            item.delete().await.map_err(error::Storage::from)?;
        }
        Ok(())
    }
}
