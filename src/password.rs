// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};
use tokio::task;

use crate::error::{self, Result};

/// What to ask for. `confirm` makes the prompt ask twice and reject
/// mismatched entries, for flows that set a new password.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    label: String,
    confirm: bool,
}

pub(crate) struct RequestBuilder {
    label: String,
    confirm: bool,
}

impl RequestBuilder {
    pub(crate) fn new<L: Into<String>>(label: L) -> Self {
        Self {
            label: label.into(),
            confirm: false,
        }
    }

    pub(crate) fn with_confirmation(mut self) -> Self {
        self.confirm = true;
        self
    }

    pub(crate) fn into_request(self) -> Request {
        Request {
            label: self.label,
            confirm: self.confirm,
        }
    }
}

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }
}

/// Runs the chain and insists on an answer.
pub(crate) async fn read<P: Prompt + ?Sized>(prompt: &P, req: Request) -> Result<SecretString> {
    prompt
        .prompt(req)
        .await?
        .ok_or_else(|| error::Password::NoPrompt.into())
}

pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        let label = req.label.clone();
        let first = task::spawn_blocking(move || {
            rpassword::prompt_password(format!("{label}: ")).map(SecretString::new)
        })
        .await??;

        if req.confirm {
            let label = req.label;
            let second = task::spawn_blocking(move || {
                rpassword::prompt_password(format!("Confirm {}: ", label.to_lowercase()))
                    .map(SecretString::new)
            })
            .await??;

            if first.expose_secret() != second.expose_secret() {
                return Err(error::Password::ConfirmationMismatch.into());
            }
        }

        Ok(Some(first))
    }
}
