// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;
use secrecy::{ExposeSecret as _, SecretString};
use serde_json::{json, Value};

use crate::{
    client::Registration,
    error::Result,
    model::User,
    rest::envelope::Ack,
};

use super::Endpoint;

pub(crate) struct Register<'req> {
    pub(crate) registration: &'req Registration,
}

impl Endpoint for Register<'_> {
    type Response = User;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/api/auth/register".to_owned()
    }

    fn body(&self) -> Result<Option<Value>> {
        let mut body = serde_json::Map::new();
        let _ = body.insert(
            "username".to_owned(),
            self.registration.username.clone().into(),
        );
        let _ = body.insert(
            "password".to_owned(),
            self.registration.password.expose_secret().clone().into(),
        );
        if let Some(phone) = &self.registration.phone {
            let _ = body.insert("phoneNumber".to_owned(), phone.clone().into());
        }
        if let Some(email) = &self.registration.email {
            let _ = body.insert("email".to_owned(), email.clone().into());
        }
        Ok(Some(body.into()))
    }
}

pub(crate) struct Login<'req> {
    pub(crate) username: &'req str,
    pub(crate) password: &'req SecretString,
}

impl Endpoint for Login<'_> {
    type Response = String;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/api/auth/login".to_owned()
    }

    fn body(&self) -> Result<Option<Value>> {
        Ok(Some(json!({
            "username": self.username,
            "password": self.password.expose_secret(),
        })))
    }
}

pub(crate) struct CurrentUser;

impl Endpoint for CurrentUser {
    type Response = User;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/auth/me".to_owned()
    }
}

pub(crate) struct Logout;

impl Endpoint for Logout {
    type Response = Ack;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/auth/logout".to_owned()
    }
}

pub(crate) struct ChangePassword<'req> {
    pub(crate) old_password: &'req SecretString,
    pub(crate) new_password: &'req SecretString,
}

impl Endpoint for ChangePassword<'_> {
    type Response = Ack;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        "/api/auth/password".to_owned()
    }

    fn body(&self) -> Result<Option<Value>> {
        Ok(Some(json!({
            "oldPassword": self.old_password.expose_secret(),
            "newPassword": self.new_password.expose_secret(),
        })))
    }
}

pub(crate) struct DeleteAccount;

impl Endpoint for DeleteAccount {
    type Response = Ack;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        "/api/auth".to_owned()
    }
}

pub(crate) struct ValidateToken<'req> {
    pub(crate) token: &'req str,
}

impl Endpoint for ValidateToken<'_> {
    type Response = String;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/auth/validate".to_owned()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("token", self.token.to_owned())]
    }
}
