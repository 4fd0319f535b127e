// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use serde::{de, Deserialize};

use crate::error::{self, Result};

/// Business status code the server uses for "it worked". Everything else is
/// carried into [`error::Api::Envelope`].
pub(crate) const SUCCESS: i32 = 200;

/// The uniform `{code, message, data}` wrapper every JSON endpoint responds
/// with, on both 2xx and error statuses.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Envelope<T> {
    pub(crate) code: i32,
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, turning a non-success business code into an API
    /// error carrying the server's message.
    pub(crate) fn into_data(self) -> Result<Option<T>> {
        if self.code == SUCCESS {
            Ok(self.data)
        } else {
            Err(error::Api::Envelope {
                code: self.code,
                message: self.message,
            }
            .into())
        }
    }
}

/// One page of a listing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub(crate) rows: Vec<T>,
    pub(crate) total: u64,
    pub(crate) page_num: u64,
    pub(crate) page_size: u64,
}

impl<T> Page<T> {
    pub(crate) fn pages(&self) -> u64 {
        if self.total == 0 || self.page_size == 0 {
            0
        } else {
            (self.total + self.page_size - 1) / self.page_size
        }
    }
}

/// Acknowledgement for endpoints whose payload carries no information (the
/// server variously answers with `null`, a boolean, or an echo object).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Ack;

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        de::IgnoredAny::deserialize(deserializer).map(|_| Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_data() {
        let envelope: Envelope<String> =
            serde_json::from_str(r#"{"code": 200, "message": "ok", "data": "tok"}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn failure_envelope_carries_the_server_message() {
        let envelope: Envelope<String> =
            serde_json::from_str(r#"{"code": 401, "message": "bad credentials"}"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(err.to_string().contains("bad credentials"));
    }

    #[test]
    fn ack_accepts_any_payload() {
        assert!(serde_json::from_str::<Ack>("null").is_ok());
        assert!(serde_json::from_str::<Ack>("true").is_ok());
        assert!(serde_json::from_str::<Ack>(r#"{"id": 1}"#).is_ok());
    }

    #[test]
    fn page_math() {
        let page: Page<i64> = serde_json::from_str(
            r#"{"rows": [1, 2, 3], "total": 23, "pageNum": 1, "pageSize": 10}"#,
        )
        .unwrap();
        assert_eq!(page.pages(), 3);
        assert_eq!(page.rows.len(), 3);

        let empty: Page<i64> =
            serde_json::from_str(r#"{"rows": [], "total": 0, "pageNum": 1, "pageSize": 10}"#)
                .unwrap();
        assert_eq!(empty.pages(), 0);
    }
}
