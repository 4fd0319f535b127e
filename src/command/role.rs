// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{settings::Style, Table};

use crate::{
    error::Result,
    guard::RouteClass,
    rest::api::{role, Endpoint as _},
};

use super::Context;

/// List the roles that can be assigned to accounts.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::admin()).await?;

        let roles = role::ListRoles.execute(&cx.transport).await?;
        if roles.is_empty() {
            println!("No roles defined.");
        } else {
            println!("{}", Table::new(&roles).with(Style::rounded()));
        }
        Ok(())
    }
}
