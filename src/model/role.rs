// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use tabled::Tabled;

/// One selectable role, as served by the role-option listing.
#[derive(Clone, Debug, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoleOption {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Role")]
    pub(crate) role_name: String,
}
