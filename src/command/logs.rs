// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use crate::{
    error::Result,
    guard::RouteClass,
    rest::api::{log as log_api, Endpoint as _},
};

use super::Context;

/// Read the server's log files.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Print the newest lines of a log file.
    Tail {
        /// Maximum number of lines to fetch.
        #[arg(long, default_value_t = 200)]
        lines: u32,

        /// Log file name; the server's current file otherwise.
        #[arg(long)]
        file: Option<String>,
    },

    /// List the available log files.
    Files,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::admin()).await?;

        match self.action {
            Action::Tail { lines, file } => {
                let entries = log_api::LatestLogs {
                    lines,
                    file: file.as_deref(),
                }
                .execute(&cx.transport)
                .await?;
                for entry in entries {
                    println!("{entry}");
                }
            }

            Action::Files => {
                let files = log_api::LogFiles.execute(&cx.transport).await?;
                if files.is_empty() {
                    println!("No log files available.");
                }
                for file in files {
                    println!("{file}");
                }
            }
        }

        Ok(())
    }
}
