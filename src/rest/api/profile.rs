// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;
use serde_json::Value;

use crate::{client::UserUpdate, error::Result, model::Profile, rest::Transport};

use super::Endpoint;

pub(crate) struct CurrentProfile;

impl Endpoint for CurrentProfile {
    type Response = Profile;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/user-profiles/me".to_owned()
    }
}

pub(crate) struct ProfileByUserId {
    pub(crate) user_id: i64,
}

impl Endpoint for ProfileByUserId {
    type Response = Profile;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/api/user-profiles/{}", self.user_id)
    }
}

pub(crate) struct ProfileByRealName<'req> {
    pub(crate) real_name: &'req str,
}

impl Endpoint for ProfileByRealName<'_> {
    type Response = Profile;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/api/user-profiles/name/{}", self.real_name)
    }
}

pub(crate) struct UpdateProfile<'req> {
    pub(crate) update: &'req UserUpdate,
}

impl Endpoint for UpdateProfile<'_> {
    type Response = Profile;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        "/api/user-profiles".to_owned()
    }

    fn body(&self) -> Result<Option<Value>> {
        Ok(Some(serde_json::to_value(self.update)?))
    }
}

/// Multipart upload of the current user's avatar. Not an [`Endpoint`]: the
/// body is a file part rather than JSON.
pub(crate) struct UploadAvatar {
    pub(crate) file_name: String,
    pub(crate) bytes: Vec<u8>,
}

impl UploadAvatar {
    pub(crate) async fn execute(self, transport: &Transport) -> Result<String> {
        let envelope = transport
            .upload("/api/user-profiles/avatar", "file", self.file_name, self.bytes)
            .await?;
        let data = envelope.into_data()?;
        Ok(serde_json::from_value(
            data.unwrap_or(serde_json::Value::Null),
        )?)
    }
}
