// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;

use crate::model::RoleOption;

use super::Endpoint;

pub(crate) struct ListRoles;

impl Endpoint for ListRoles {
    type Response = Vec<RoleOption>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/user-roles".to_owned()
    }
}
