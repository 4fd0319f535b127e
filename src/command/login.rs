// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;
use secrecy::SecretString;

use crate::{
    error::{self, Result},
    guard::RouteClass,
    password::{self, RequestBuilder},
    store::Outcome,
};

use super::Context;

/// Sign in to the console and cache the session locally.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The username to sign in as.
    #[clap()]
    username: String,

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
                password::read(&cx.prompts, RequestBuilder::new("Password").into_request()).await?
            }
        };

        match cx.store.login(&self.username, &password).await {
            Outcome::Success(()) => {
                match cx.store.identity() {
                    Some(user) => println!("Signed in as {} ({}).", user.username, user.roles),
                    // The identity refresh is best-effort; the session is
                    // established either way.
                    None => println!("Signed in as {}.", self.username),
                }
                Ok(())
            }
            Outcome::Failure { message } => {
                error!("sign-in failed: {}", message);
                Err(error::Error::Command)
            }
        }
    }
}
