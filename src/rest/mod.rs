// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod api;
pub(crate) mod envelope;

use std::{sync::Arc, time::Duration};

use api::Endpoint;
use async_trait::async_trait;
use envelope::Envelope;
use log::warn;
use reqwest::StatusCode;
use secrecy::SecretString;
use tokio::sync::Mutex;
use url::Url;

use crate::{
    client::{self, Registration, UserUpdate},
    error::{self, Result},
    metadata,
    model::{Profile, User},
    storage::Storage,
};

// The server answers interactive requests well within this; anything slower
// is treated as a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP transport for the console API. Attaches the bearer credential from
/// the shared token storage on every request and unwraps the server's
/// response envelope. Cheap to clone; clones share the same token storage.
#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base: Url,
    token: Arc<Mutex<Box<dyn Storage<String>>>>,
}

impl Transport {
    pub(crate) fn new(base: Url, token: Arc<Mutex<Box<dyn Storage<String>>>>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(metadata::CLIENT_USER_AGENT.as_str())
            .build()?;
        Ok(Self { http, base, token })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(Into::into)
    }

    /// Sends a prepared request with the credential attached. A 401 means
    /// the credential is no longer honored anywhere, so the durable copy is
    /// cleared here, before any caller gets a say.
    async fn dispatch(&self, mut builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        if let Some(token) = self.token.lock().await.get().await? {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if let Err(err) = self.token.lock().await.clear().await {
                warn!("could not clear the stored credential: {}", err);
            }
            return Err(error::Api::CredentialRejected.into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Error statuses usually still carry the response envelope, and
            // its message beats a raw body dump.
            if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
                return Err(error::Api::Envelope {
                    code: envelope.code,
                    message: envelope.message,
                }
                .into());
            }
            return Err(error::Api::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }

    pub(crate) async fn send<E: Endpoint + ?Sized>(
        &self,
        endpoint: &E,
    ) -> Result<Envelope<serde_json::Value>> {
        let mut builder = self
            .http
            .request(endpoint.method(), self.url(&endpoint.path())?);
        let query = endpoint.query();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = endpoint.body()? {
            builder = builder.json(&body);
        }
        Ok(self.dispatch(builder).await?.json().await?)
    }

    pub(crate) async fn upload(
        &self,
        path: &str,
        field: &'static str,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Envelope<serde_json::Value>> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part(field, part);
        let builder = self.http.post(self.url(path)?).multipart(form);
        Ok(self.dispatch(builder).await?.json().await?)
    }

    pub(crate) async fn download(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<Vec<u8>> {
        let mut builder = self.http.get(self.url(path)?);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        Ok(self.dispatch(builder).await?.bytes().await?.to_vec())
    }
}

#[async_trait]
impl client::Client for Transport {
    async fn register(&self, registration: &Registration) -> Result<User> {
        api::auth::Register { registration }.execute(self).await
    }

    async fn login(&self, username: &str, password: &SecretString) -> Result<String> {
        api::auth::Login { username, password }.execute(self).await
    }

    async fn current_user(&self) -> Result<User> {
        api::auth::CurrentUser.execute(self).await
    }

    async fn current_profile(&self) -> Result<Profile> {
        api::profile::CurrentProfile.execute(self).await
    }

    async fn logout(&self) -> Result<()> {
        api::auth::Logout.execute(self).await.map(|_| ())
    }

    async fn change_password(&self, old: &SecretString, new: &SecretString) -> Result<()> {
        api::auth::ChangePassword {
            old_password: old,
            new_password: new,
        }
        .execute(self)
        .await
        .map(|_| ())
    }

    async fn update_profile(&self, update: &UserUpdate) -> Result<Profile> {
        api::profile::UpdateProfile { update }.execute(self).await
    }

    async fn delete_account(&self) -> Result<()> {
        api::auth::DeleteAccount.execute(self).await.map(|_| ())
    }
}
