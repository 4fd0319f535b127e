// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;
use secrecy::{ExposeSecret as _, SecretString};
use serde::Serialize;
use serde_json::{json, Value};
use serde_with::skip_serializing_none;

use crate::{
    client::UserUpdate,
    error::Result,
    model::{StatusFilter, User},
    rest::envelope::Page,
};

use super::Endpoint;

/// Administrative account creation.
pub(crate) struct Create<'req> {
    pub(crate) username: &'req str,
    pub(crate) password: &'req SecretString,
    pub(crate) phone: Option<&'req str>,
    pub(crate) email: Option<&'req str>,
    pub(crate) role_ids: &'req [i64],
}

impl Endpoint for Create<'_> {
    type Response = User;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/api/users".to_owned()
    }

    fn body(&self) -> Result<Option<Value>> {
        let mut body = serde_json::Map::new();
        let _ = body.insert("username".to_owned(), self.username.into());
        let _ = body.insert(
            "password".to_owned(),
            self.password.expose_secret().clone().into(),
        );
        if let Some(phone) = self.phone {
            let _ = body.insert("phone".to_owned(), phone.into());
        }
        if let Some(email) = self.email {
            let _ = body.insert("email".to_owned(), email.into());
        }
        if !self.role_ids.is_empty() {
            let _ = body.insert("roleIds".to_owned(), self.role_ids.into());
        }
        Ok(Some(body.into()))
    }
}

pub(crate) struct List {
    pub(crate) page_num: u64,
    pub(crate) page_size: u64,
}

impl Endpoint for List {
    type Response = Page<User>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/users".to_owned()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pageNum", self.page_num.to_string()),
            ("pageSize", self.page_size.to_string()),
        ]
    }
}

pub(crate) struct GetById {
    pub(crate) user_id: i64,
}

impl Endpoint for GetById {
    type Response = User;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/api/users/{}", self.user_id)
    }
}

pub(crate) struct GetByUsername<'req> {
    pub(crate) username: &'req str,
}

impl Endpoint for GetByUsername<'_> {
    type Response = User;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/api/users/username/{}", self.username)
    }
}

/// Column filters for the search endpoint. Absent fields do not constrain
/// the result, so `None` must not serialize.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchFilter {
    pub(crate) username: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) status: Option<StatusFilter>,
    pub(crate) roles: Option<String>,
    pub(crate) create_time_start: Option<String>,
    pub(crate) create_time_end: Option<String>,
}

pub(crate) struct Search<'req> {
    pub(crate) filter: &'req SearchFilter,
    pub(crate) page_num: u64,
    pub(crate) page_size: u64,
}

impl Endpoint for Search<'_> {
    type Response = Page<User>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/api/users/search".to_owned()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pageNum", self.page_num.to_string()),
            ("pageSize", self.page_size.to_string()),
        ]
    }

    fn body(&self) -> Result<Option<Value>> {
        Ok(Some(serde_json::to_value(self.filter)?))
    }
}

pub(crate) struct Update<'req> {
    pub(crate) user_id: i64,
    pub(crate) update: &'req UserUpdate,
}

impl Endpoint for Update<'_> {
    type Response = User;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/api/users/{}", self.user_id)
    }

    fn body(&self) -> Result<Option<Value>> {
        Ok(Some(serde_json::to_value(self.update)?))
    }
}

pub(crate) struct ChangeRoles<'req> {
    pub(crate) user_id: i64,
    pub(crate) role_ids: &'req [i64],
}

impl Endpoint for ChangeRoles<'_> {
    type Response = User;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/api/users/roles/{}", self.user_id)
    }

    fn body(&self) -> Result<Option<Value>> {
        Ok(Some(json!({ "roleIds": self.role_ids })))
    }
}

pub(crate) struct ResetPassword<'req> {
    pub(crate) user_id: i64,
    pub(crate) new_password: &'req SecretString,
}

impl Endpoint for ResetPassword<'_> {
    type Response = User;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/api/users/password/{}", self.user_id)
    }

    fn body(&self) -> Result<Option<Value>> {
        Ok(Some(json!({
            "newPassword": self.new_password.expose_secret(),
        })))
    }
}

pub(crate) struct Block {
    pub(crate) user_id: i64,
}

impl Endpoint for Block {
    type Response = User;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/api/users/block/{}", self.user_id)
    }
}

pub(crate) struct Unblock {
    pub(crate) user_id: i64,
}

impl Endpoint for Unblock {
    type Response = User;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/api/users/unblock/{}", self.user_id)
    }
}

/// Logical deletion; the response is the number of affected rows.
pub(crate) struct Delete {
    pub(crate) user_id: i64,
}

impl Endpoint for Delete {
    type Response = i64;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("/api/users/{}", self.user_id)
    }
}
