// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::{
    client::Client,
    store::{Outcome, Store},
};

/// Access class of a command: guest-only entry points, signed-in surfaces,
/// and administrative surfaces.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RouteClass {
    guest: bool,
    requires_auth: bool,
    requires_admin: bool,
}

impl RouteClass {
    pub(crate) const fn public() -> Self {
        Self {
            guest: false,
            requires_auth: false,
            requires_admin: false,
        }
    }

    pub(crate) const fn guest() -> Self {
        Self {
            guest: true,
            ..Self::public()
        }
    }

    pub(crate) const fn authenticated() -> Self {
        Self {
            requires_auth: true,
            ..Self::public()
        }
    }

    pub(crate) const fn admin() -> Self {
        Self {
            requires_auth: true,
            requires_admin: true,
            ..Self::public()
        }
    }
}

/// Where a denied navigation is sent instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Entry {
    Home,
    Login,
}

/// The blocking message accompanying a denial. The guest redirect carries no
/// notice; being bounced off the login page while signed in needs no alarm.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum Notice {
    #[error("you are not signed in yet; run the login command first")]
    NotLoggedIn,
    #[error("your session is no longer valid; sign in again")]
    SessionInvalid,
    #[error("this operation requires administrator privileges")]
    InsufficientPrivilege,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Verdict {
    Allow,
    Redirect {
        entry: Entry,
        notice: Option<Notice>,
    },
}

/// Evaluates the access decision table against the store, first match wins:
///
/// 1. guest-only target while signed in: go Home (checked before anything
///    that could trigger a refresh, so hitting the login entry while signed
///    in never touches the network);
/// 2. protected target with a credential but no cached identity: one
///    identity refresh, and if that fails the session is treated as invalid
///    and torn down;
/// 3. protected target without a credential: go sign in;
/// 4. admin target without the admin role: go Home;
/// 5. anything else passes.
pub(crate) async fn evaluate<C: Client>(store: &mut Store<C>, route: RouteClass) -> Verdict {
    if route.guest && store.is_authenticated() {
        return Verdict::Redirect {
            entry: Entry::Home,
            notice: None,
        };
    }

    if route.requires_auth || route.requires_admin {
        if store.identity().is_none() && store.is_authenticated() {
            let refreshed = matches!(store.refresh_identity().await, Outcome::Success(_));
            if !refreshed || store.identity().is_none() {
                store.logout().await;
                return Verdict::Redirect {
                    entry: Entry::Login,
                    notice: Some(Notice::SessionInvalid),
                };
            }
        } else if !store.is_authenticated() {
            return Verdict::Redirect {
                entry: Entry::Login,
                notice: Some(Notice::NotLoggedIn),
            };
        }
    }

    if route.requires_admin && !store.is_admin() {
        return Verdict::Redirect {
            entry: Entry::Home,
            notice: Some(Notice::InsufficientPrivilege),
        };
    }

    Verdict::Allow
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::storage::Storage as _;
    use crate::store::testing::{fixture, Behavior, StubClient};

    #[tokio::test]
    async fn unauthenticated_admin_target_goes_to_login_without_a_refresh() {
        let stub = StubClient::default();
        let identity_calls = std::sync::Arc::clone(&stub.identity_calls);
        let mut fx = fixture(stub);

        let verdict = evaluate(&mut fx.store, RouteClass::admin()).await;
        assert_eq!(
            verdict,
            Verdict::Redirect {
                entry: Entry::Login,
                notice: Some(Notice::NotLoggedIn),
            }
        );
        assert_eq!(identity_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn signed_in_non_admin_goes_home_not_to_login() {
        let stub = StubClient::default();
        let mut fx = fixture(stub);
        fx.store.set_credential("tok").await;
        assert!(fx.store.refresh_identity().await.is_success());

        let verdict = evaluate(&mut fx.store, RouteClass::admin()).await;
        assert_eq!(
            verdict,
            Verdict::Redirect {
                entry: Entry::Home,
                notice: Some(Notice::InsufficientPrivilege),
            }
        );
        // The session itself survives an authorization denial.
        assert!(fx.store.is_authenticated());
    }

    #[tokio::test]
    async fn admin_with_the_role_is_allowed() {
        let stub = StubClient {
            roles: "ROLE_USER,ROLE_ADMIN".to_owned(),
            ..StubClient::default()
        };
        let mut fx = fixture(stub);
        fx.store.set_credential("tok").await;

        let verdict = evaluate(&mut fx.store, RouteClass::admin()).await;
        assert_eq!(verdict, Verdict::Allow);
    }

    #[tokio::test]
    async fn credential_without_cached_identity_refreshes_exactly_once() {
        let stub = StubClient::default();
        let identity_calls = std::sync::Arc::clone(&stub.identity_calls);
        let mut fx = fixture(stub);
        fx.store.set_credential("tok").await;

        let verdict = evaluate(&mut fx.store, RouteClass::authenticated()).await;
        assert_eq!(verdict, Verdict::Allow);
        assert_eq!(identity_calls.load(Ordering::SeqCst), 1);

        // A second pass finds the cached identity and stays off the network.
        let verdict = evaluate(&mut fx.store, RouteClass::authenticated()).await;
        assert_eq!(verdict, Verdict::Allow);
        assert_eq!(identity_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_tears_the_session_down() {
        let stub = StubClient {
            identity: Behavior::Fail,
            ..StubClient::default()
        };
        let mut fx = fixture(stub);
        fx.store.set_credential("stale").await;

        let verdict = evaluate(&mut fx.store, RouteClass::authenticated()).await;
        assert_eq!(
            verdict,
            Verdict::Redirect {
                entry: Entry::Login,
                notice: Some(Notice::SessionInvalid),
            }
        );
        assert!(!fx.store.is_authenticated());
        assert_eq!(fx.token_storage.lock().await.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn guest_target_bounces_a_signed_in_user_home_without_a_refresh() {
        let stub = StubClient::default();
        let identity_calls = std::sync::Arc::clone(&stub.identity_calls);
        let mut fx = fixture(stub);
        fx.store.set_credential("tok").await;

        let verdict = evaluate(&mut fx.store, RouteClass::guest()).await;
        assert_eq!(
            verdict,
            Verdict::Redirect {
                entry: Entry::Home,
                notice: None,
            }
        );
        assert_eq!(identity_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn guest_target_admits_an_anonymous_user() {
        let mut fx = fixture(StubClient::default());
        let verdict = evaluate(&mut fx.store, RouteClass::guest()).await;
        assert_eq!(verdict, Verdict::Allow);
    }

    #[tokio::test]
    async fn public_target_admits_anyone() {
        let mut fx = fixture(StubClient::default());
        let verdict = evaluate(&mut fx.store, RouteClass::public()).await;
        assert_eq!(verdict, Verdict::Allow);
    }
}
