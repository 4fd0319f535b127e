// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    error::Result,
    model::{Gender, Profile, User},
};

/// Payload for creating an account. Registration does not sign the new
/// account in; the caller still has to log in afterwards.
#[derive(Debug)]
pub(crate) struct Registration {
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) phone: Option<String>,
    pub(crate) email: Option<String>,
}

/// Field set shared by the self-service profile update and the administrative
/// user update. Absent fields are left untouched server-side, so `None` must
/// not serialize at all.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserUpdate {
    pub(crate) username: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) real_name: Option<String>,
    pub(crate) gender: Option<Gender>,
    pub(crate) birthday: Option<String>,
    pub(crate) avatar: Option<String>,
}

/// The session-facing surface of the console API: exactly the calls the store
/// orchestrates. The HTTP transport implements this for real use; tests
/// substitute a scripted stub.
#[async_trait]
pub(crate) trait Client {
    async fn register(&self, registration: &Registration) -> Result<User>;

    async fn login(&self, username: &str, password: &SecretString) -> Result<String>;

    async fn current_user(&self) -> Result<User>;

    async fn current_profile(&self) -> Result<Profile>;

    async fn logout(&self) -> Result<()>;

    async fn change_password(&self, old: &SecretString, new: &SecretString) -> Result<()>;

    async fn update_profile(&self, update: &UserUpdate) -> Result<Profile>;

    async fn delete_account(&self) -> Result<()>;
}

#[async_trait]
impl<T: Client + Send + Sync + ?Sized> Client for Box<T> {
    async fn register(&self, registration: &Registration) -> Result<User> {
        (**self).register(registration).await
    }

    async fn login(&self, username: &str, password: &SecretString) -> Result<String> {
        (**self).login(username, password).await
    }

    async fn current_user(&self) -> Result<User> {
        (**self).current_user().await
    }

    async fn current_profile(&self) -> Result<Profile> {
        (**self).current_profile().await
    }

    async fn logout(&self) -> Result<()> {
        (**self).logout().await
    }

    async fn change_password(&self, old: &SecretString, new: &SecretString) -> Result<()> {
        (**self).change_password(old, new).await
    }

    async fn update_profile(&self, update: &UserUpdate) -> Result<Profile> {
        (**self).update_profile(update).await
    }

    async fn delete_account(&self) -> Result<()> {
        (**self).delete_account().await
    }
}
