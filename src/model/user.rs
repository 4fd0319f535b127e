// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_repr::Serialize_repr;
use tabled::Tabled;

/// Role marker that grants access to the administrative surface. The server
/// hands roles back as a single comma-joined descriptor string.
pub(crate) const ROLE_ADMIN: &str = "ROLE_ADMIN";

#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum Status {
    Normal,
    Locked,
    Banned,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Normal => "Normal",
            Self::Locked => "Locked",
            Self::Banned => "Banned",
        })
    }
}

/// Integer-coded status used by the search and export endpoints, which filter
/// on the raw column value rather than the symbolic name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize_repr, ValueEnum)]
#[repr(u8)]
pub(crate) enum StatusFilter {
    Normal = 0,
    Banned = 1,
    Locked = 2,
}

/// The server-authoritative account record for a user.
#[derive(Clone, Debug, Deserialize, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Username")]
    pub(crate) username: String,
    #[serde(default)]
    #[tabled(rename = "Phone", display_with = "Self::format_opt")]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    #[tabled(rename = "Email", display_with = "Self::format_opt")]
    pub(crate) email: Option<String>,
    #[tabled(rename = "Status")]
    pub(crate) status: Status,
    #[tabled(rename = "Roles")]
    pub(crate) roles: String,
    #[serde(default)]
    #[tabled(rename = "Last Login", display_with = "Self::format_opt")]
    pub(crate) last_login_at: Option<String>,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) last_login_ip: Option<String>,
    #[serde(default)]
    #[tabled(rename = "Created", display_with = "Self::format_opt")]
    pub(crate) created_at: Option<String>,
}

impl User {
    fn format_opt(value: &Option<String>) -> String {
        value.clone().unwrap_or_default()
    }

    /// Whether the roles descriptor names `role` exactly. Comparing whole
    /// comma-separated entries keeps a role like `ROLE_ADMIN_AUDIT` from
    /// matching `ROLE_ADMIN`.
    pub(crate) fn has_role(&self, role: &str) -> bool {
        self.roles
            .split(',')
            .any(|candidate| candidate.trim() == role)
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_tokens, Token};

    use super::*;

    fn user(roles: &str) -> User {
        User {
            id: 7,
            username: "bryan".to_owned(),
            phone: None,
            email: None,
            status: Status::Normal,
            roles: roles.to_owned(),
            last_login_at: None,
            last_login_ip: None,
            created_at: None,
        }
    }

    #[test]
    fn admin_role_requires_exact_entry() {
        assert!(user("ROLE_USER,ROLE_ADMIN").has_role(ROLE_ADMIN));
        assert!(user("ROLE_ADMIN").has_role(ROLE_ADMIN));
        assert!(user("ROLE_USER, ROLE_ADMIN").has_role(ROLE_ADMIN));
        assert!(!user("ROLE_USER").has_role(ROLE_ADMIN));
        assert!(!user("ROLE_ADMIN_AUDIT").has_role(ROLE_ADMIN));
        assert!(!user("").has_role(ROLE_ADMIN));
    }

    #[test]
    fn status_uses_uppercase_wire_names() {
        assert_tokens(
            &Status::Normal,
            &[Token::UnitVariant {
                name: "Status",
                variant: "NORMAL",
            }],
        );
        assert_tokens(
            &Status::Banned,
            &[Token::UnitVariant {
                name: "Status",
                variant: "BANNED",
            }],
        );
    }

    #[test]
    fn user_deserializes_from_wire_shape() {
        let parsed: User = serde_json::from_str(
            r#"{
                "id": 3,
                "username": "bryan",
                "email": "bryan@example.com",
                "status": "LOCKED",
                "roles": "ROLE_USER",
                "lastLoginAt": "2024-05-01T10:00:00",
                "lastLoginIp": "10.0.0.1",
                "createdAt": "2024-01-01T00:00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.id, 3);
        assert_eq!(parsed.status, Status::Locked);
        assert_eq!(parsed.phone, None);
        assert_eq!(parsed.last_login_ip.as_deref(), Some("10.0.0.1"));
    }
}
