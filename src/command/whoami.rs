// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{settings::Style, Table};

use crate::{
    error::Result,
    guard::RouteClass,
    rest::api::{auth, Endpoint as _},
};

use super::Context;

/// Show the signed-in identity and profile.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Also ask the server whether the cached token is still honored.
    #[arg(long)]
    validate: bool,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::authenticated()).await?;

        // The guard guarantees a cached identity past this point.
        if let Some(user) = cx.store.identity() {
            println!("{}", Table::new([user]).with(Style::rounded()));
        }

        match cx.store.profile() {
            Some(profile) => super::print_profile(profile),
            None => println!("No profile on record."),
        }

        if self.validate {
            if let Some(token) = cx.store.credential() {
                let verdict = auth::ValidateToken { token }.execute(&cx.transport).await?;
                println!("Token status: {verdict}");
            }
        }

        Ok(())
    }
}
