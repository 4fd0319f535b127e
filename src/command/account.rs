// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::error;

use crate::{
    error::{self, Result},
    guard::RouteClass,
};

use super::Context;

/// Manage the signed-in account itself.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Permanently delete the signed-in account and clear the local session.
    Delete {
        /// Skip the confirmation check.
        #[arg(long)]
        yes: bool,
    },
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::authenticated()).await?;

        match self.action {
            Action::Delete { yes } => {
                if !yes {
                    error!("deleting an account cannot be undone; re-run with --yes to confirm");
                    return Err(error::Error::Cancelled);
                }

                super::finish(
                    cx.store.delete_account().await,
                    "Account deleted; local session cleared.",
                )
            }
        }
    }
}
