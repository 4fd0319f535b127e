// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use security_framework::os::macos::keychain::{SecKeychain, SecPreferencesDomain};

use crate::{
    error::{self, Result},
    metadata,
};

use super::Storage;

// Status code returned by Security.framework when no matching item exists.
const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;

/// macOS Keychain token storage, one generic-password item per server URL.
pub(crate) struct Keychain {
    delegate: SecKeychain,
    service: String,
    account: String,
}

impl Keychain {
    pub(crate) fn new(url: &url::Url) -> Result<Self> {
        Ok(Self {
            delegate: SecKeychain::default_for_domain(SecPreferencesDomain::User)
                .map_err(Into::<error::Storage>::into)?,
            service: metadata::PROJECT_DIRS
                .as_ref()
                .map(|dirs| dirs.project_path().as_os_str())
                .ok_or(error::Storage::NoProjectDirs)?
                .to_string_lossy()
                .to_string(),
            account: url.to_string(),
        })
    }
}

#[async_trait]
impl Storage<String> for Keychain {
    async fn get(&mut self) -> Result<Option<String>> {
        let result = self
            .delegate
            .find_generic_password(&self.service, &self.account);
        match result {
            Ok((password, _)) => {
                let token =
                    String::from_utf8(password.to_vec()).map_err(error::Storage::from)?;
                Ok(Some(token).filter(|value| !value.is_empty()))
            }
            Err(err) if err.code() == ERR_SEC_ITEM_NOT_FOUND => Ok(None),
            Err(err) => Err(Into::<error::Storage>::into(err).into()),
        }
    }

    async fn update(&mut self, data: &String) -> Result<()> {
        self.delegate
            .set_generic_password(&self.service, &self.account, data.as_bytes())
            .map_err(Into::<error::Storage>::into)?;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        let result = self
            .delegate
            .find_generic_password(&self.service, &self.account);
        match result {
            Ok((_, item)) => item.delete(),
            Err(err) if err.code() == ERR_SEC_ITEM_NOT_FOUND => {}
            Err(err) => return Err(Into::<error::Storage>::into(err).into()),
        };
        Ok(())
    }
}
