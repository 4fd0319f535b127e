// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::model::{Profile, User};

/// The serializable session snapshot: the bearer credential plus whatever the
/// server last told us about the signed-in account. All mutation funnels
/// through the store, which persists a copy after every change.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct Data {
    token: Option<String>,
    identity: Option<User>,
    profile: Option<Profile>,
}

impl Data {
    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn identity(&self) -> Option<&User> {
        self.identity.as_ref()
    }

    pub(crate) fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// An empty token means the same thing as no token at all.
    pub(crate) fn is_authenticated(&self) -> bool {
        self.token.as_deref().map_or(false, |token| !token.is_empty())
    }

    pub(crate) fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|value| !value.is_empty());
    }

    pub(crate) fn set_identity(&mut self, identity: User) {
        self.identity = Some(identity);
    }

    pub(crate) fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.identity = None;
        self.profile = None;
    }
}
