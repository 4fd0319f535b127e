// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use secrecy::SecretString;

use crate::{
    client::Registration,
    error::Result,
    guard::RouteClass,
    password::{self, RequestBuilder},
};

use super::Context;

/// Create an account. Registration does not sign you in; follow up with the
/// login command.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The username for the new account.
    #[clap()]
    username: String,

    /// Contact phone number.
    #[arg(long)]
    phone: Option<String>,

    /// Contact email address.
    #[arg(long)]
    email: Option<String>,

    /// Use this password instead of prompting for one.
    #[arg(long, env = "USERCTL_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::guest()).await?;

        let password = match self.password {
            Some(password) => SecretString::new(password),
            None => {
                password::read(
                    &cx.prompts,
                    RequestBuilder::new("Password")
                        .with_confirmation()
                        .into_request(),
                )
                .await?
            }
        };

        let registration = Registration {
            username: self.username,
            password,
            phone: self.phone,
            email: self.email,
        };

        super::finish(
            cx.store.register(&registration).await,
            "Account created; sign in with the login command.",
        )
    }
}
