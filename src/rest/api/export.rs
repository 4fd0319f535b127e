// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use crate::{error::Result, model::StatusFilter, rest::Transport};

/// Spreadsheet export of the user table. Not an [`super::Endpoint`]: the
/// response is the raw workbook bytes, not an envelope.
pub(crate) struct ExportUsers<'req> {
    pub(crate) file_name: &'req str,
    pub(crate) status: Option<StatusFilter>,
}

impl ExportUsers<'_> {
    pub(crate) async fn execute(self, transport: &Transport) -> Result<Vec<u8>> {
        let mut query = vec![("fileName", self.file_name.to_owned())];
        if let Some(status) = self.status {
            query.push(("status", (status as u8).to_string()));
        }
        transport.download("/api/users/export", query).await
    }
}
