// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    error::Result,
    guard::RouteClass,
    password::{self, RequestBuilder},
};

use super::Context;

/// Change the password of the signed-in account. The session token stays
/// valid; the server does not rotate it on a password change.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::authenticated()).await?;

        let old = password::read(
            &cx.prompts,
            RequestBuilder::new("Current password").into_request(),
        )
        .await?;
        let new = password::read(
            &cx.prompts,
            RequestBuilder::new("New password")
                .with_confirmation()
                .into_request(),
        )
        .await?;

        super::finish(
            cx.store.change_password(&old, &new).await,
            "Password changed.",
        )
    }
}
