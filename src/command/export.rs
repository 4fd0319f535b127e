// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;

use crate::{
    error::Result,
    guard::RouteClass,
    model::StatusFilter,
    rest::api::export::ExportUsers,
};

use super::Context;

/// Export the user table as a spreadsheet.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Workbook name presented to the server.
    #[arg(long, default_value = "users")]
    file_name: String,

    /// Restrict the export to accounts in this status.
    #[arg(long, value_enum)]
    status: Option<StatusFilter>,

    /// Where to write the workbook. Defaults to "<file-name>.xlsx" in the
    /// current directory.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, mut cx: Context) -> Result<()> {
        super::ensure_route(&mut cx, RouteClass::admin()).await?;

        let bytes = ExportUsers {
            file_name: &self.file_name,
            status: self.status,
        }
        .execute(&cx.transport)
        .await?;

        let output = self
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}.xlsx", self.file_name)));
        fs::write(&output, &bytes)?;
        println!("Wrote {} bytes to {}.", bytes.len(), output.display());
        Ok(())
    }
}
