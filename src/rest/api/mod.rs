// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod auth;
pub(crate) mod export;
pub(crate) mod log;
pub(crate) mod profile;
pub(crate) mod role;
pub(crate) mod user;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::Result;

use super::Transport;

/// A declarative description of one server operation: verb, path, query, and
/// optional JSON body. `execute` sends it through the transport and decodes
/// the enveloped payload into the operation's response type.
#[async_trait]
pub(crate) trait Endpoint: Send + Sync {
    type Response: DeserializeOwned;

    fn method(&self) -> Method;

    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Result<Option<serde_json::Value>> {
        Ok(None)
    }

    async fn execute(&self, transport: &Transport) -> Result<Self::Response> {
        let data = transport.send(self).await?.into_data()?;
        Ok(serde_json::from_value(
            data.unwrap_or(serde_json::Value::Null),
        )?)
    }
}
