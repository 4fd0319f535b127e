// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use log::warn;
use secrecy::SecretString;
use tokio::sync::Mutex;

use crate::{
    client::{Client, Registration, UserUpdate},
    error,
    model::{self, Profile, User},
    session,
    storage::Storage,
};

/// What a store operation tells its caller. Transport and server failures
/// never unwind out of the store; they land here as a displayable message.
#[derive(Debug)]
#[must_use]
pub(crate) enum Outcome<T = ()> {
    Success(T),
    Failure { message: String },
}

impl<T> Outcome<T> {
    pub(crate) fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    fn from_error(err: error::Error) -> Self {
        Self::Failure {
            message: err.to_string(),
        }
    }
}

/// How much of a [`Store::refresh_identity`] round actually landed. Identity
/// and profile have independent failure domains: a missing profile is a
/// reportable detail, not a failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Refresh {
    Full,
    IdentityOnly,
}

/// The single holder of session state: the bearer credential, the cached
/// identity, and the cached profile. Every mutation funnels through here
/// (`&mut self` keeps that single-writer rule in the type system) and ends
/// with a write-through to durable storage.
pub(crate) struct Store<C> {
    client: C,
    data: session::Data,
    token_storage: Arc<Mutex<Box<dyn Storage<String>>>>,
    snapshot_storage: Box<dyn Storage<session::Data>>,
}

impl<C: Client> Store<C> {
    pub(crate) fn new(
        client: C,
        token_storage: Arc<Mutex<Box<dyn Storage<String>>>>,
        snapshot_storage: Box<dyn Storage<session::Data>>,
    ) -> Self {
        Self {
            client,
            data: session::Data::default(),
            token_storage,
            snapshot_storage,
        }
    }

    /// Restores the session from durable storage. The raw token key is
    /// authoritative for the credential: the process-wide 401 handler clears
    /// that key without touching the snapshot, and a snapshot must not
    /// resurrect a revoked token.
    pub(crate) async fn hydrate(&mut self) {
        let snapshot = match self.snapshot_storage.get().await {
            Ok(snapshot) => snapshot.unwrap_or_default(),
            Err(err) => {
                warn!("ignoring unreadable session snapshot: {}", err);
                session::Data::default()
            }
        };
        self.data = snapshot;

        match self.token_storage.lock().await.get().await {
            Ok(token) => self.data.set_token(token),
            Err(err) => {
                warn!("could not read the stored credential: {}", err);
                self.data.set_token(None);
            }
        }
    }

    pub(crate) fn credential(&self) -> Option<&str> {
        self.data.token()
    }

    pub(crate) fn identity(&self) -> Option<&User> {
        self.data.identity()
    }

    pub(crate) fn profile(&self) -> Option<&Profile> {
        self.data.profile()
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.data.is_authenticated()
    }

    /// Derived on every read so it can never go stale relative to the cached
    /// identity.
    pub(crate) fn is_admin(&self) -> bool {
        self.data
            .identity()
            .map_or(false, |user| user.has_role(model::ROLE_ADMIN))
    }

    pub(crate) async fn set_credential(&mut self, token: &str) {
        self.data.set_token(Some(token.to_owned()));
        self.persist().await;
    }

    pub(crate) async fn clear_credential(&mut self) {
        self.data.set_token(None);
        self.persist().await;
    }

    /// Exchanges credentials for a bearer token, then refreshes the identity
    /// best-effort: a failed refresh leaves the login successful, since the
    /// credential is already established and persisted.
    pub(crate) async fn login(&mut self, username: &str, password: &SecretString) -> Outcome {
        let token = match self.client.login(username, password).await {
            Ok(token) => token,
            Err(err) => return Outcome::from_error(err),
        };
        self.set_credential(&token).await;

        if let Outcome::Failure { message } = self.refresh_identity().await {
            warn!("could not refresh identity after login: {}", message);
        }

        Outcome::Success(())
    }

    /// Registration hands back the created account, which is cached as the
    /// identity snapshot, but it does NOT establish a credential; the caller
    /// still signs in separately.
    pub(crate) async fn register(&mut self, registration: &Registration) -> Outcome {
        match self.client.register(registration).await {
            Ok(user) => {
                self.data.set_identity(user);
                self.persist().await;
                Outcome::Success(())
            }
            Err(err) => Outcome::from_error(err),
        }
    }

    /// Fetches the identity, then independently attempts the profile. The
    /// profile fetch is allowed to fail without consequence: the account may
    /// simply not have a profile row yet.
    pub(crate) async fn refresh_identity(&mut self) -> Outcome<Refresh> {
        let identity = match self.client.current_user().await {
            Ok(identity) => identity,
            Err(err) => return Outcome::from_error(err),
        };
        self.data.set_identity(identity);

        let refresh = match self.client.current_profile().await {
            Ok(profile) => {
                self.data.set_profile(profile);
                Refresh::Full
            }
            Err(err) => {
                warn!("profile fetch failed, session stays valid: {}", err);
                Refresh::IdentityOnly
            }
        };

        self.persist().await;
        Outcome::Success(refresh)
    }

    /// Tells the server goodbye best-effort, then unconditionally clears the
    /// credential, identity, and profile.
    pub(crate) async fn logout(&mut self) {
        if let Err(err) = self.client.logout().await {
            log::error!("remote logout failed: {}", err);
        }

        self.data.clear();
        self.persist().await;
    }

    /// The server does not rotate the session on a password change, so local
    /// state is left alone on success.
    pub(crate) async fn change_password(
        &mut self,
        old: &SecretString,
        new: &SecretString,
    ) -> Outcome {
        match self.client.change_password(old, new).await {
            Ok(()) => Outcome::Success(()),
            Err(err) => Outcome::from_error(err),
        }
    }

    /// The server's echo is authoritative; the stored profile is replaced
    /// wholesale rather than merged.
    pub(crate) async fn update_profile(&mut self, update: &UserUpdate) -> Outcome {
        match self.client.update_profile(update).await {
            Ok(profile) => {
                self.data.set_profile(profile);
                self.persist().await;
                Outcome::Success(())
            }
            Err(err) => Outcome::from_error(err),
        }
    }

    pub(crate) async fn delete_account(&mut self) -> Outcome {
        match self.client.delete_account().await {
            Ok(()) => {
                self.logout().await;
                Outcome::Success(())
            }
            Err(err) => Outcome::from_error(err),
        }
    }

    /// Write-through after a mutation. A storage failure is logged and
    /// swallowed; it must not roll back the in-memory state.
    async fn persist(&mut self) {
        {
            let mut token_storage = self.token_storage.lock().await;
            let result = match self.data.token() {
                Some(token) => token_storage.update(&token.to_owned()).await,
                None => token_storage.clear().await,
            };
            if let Err(err) = result {
                warn!("credential write-through failed: {}", err);
            }
        }

        if let Err(err) = self.snapshot_storage.update(&self.data).await {
            warn!("session snapshot write-through failed: {}", err);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;

    use super::*;
    use crate::model::Status;

    #[derive(Clone, Copy, Debug)]
    pub(crate) enum Behavior {
        Succeed,
        Fail,
    }

    impl Behavior {
        fn check(self) -> error::Result<()> {
            match self {
                Self::Succeed => Ok(()),
                Self::Fail => Err(error::Api::Envelope {
                    code: 500,
                    message: "scripted failure".to_owned(),
                }
                .into()),
            }
        }
    }

    /// Scripted implementation of the session API seam. Call counters are
    /// shared so tests keep a handle after moving the stub into a store.
    #[derive(Clone)]
    pub(crate) struct StubClient {
        pub(crate) login: Behavior,
        pub(crate) register: Behavior,
        pub(crate) identity: Behavior,
        pub(crate) profile: Behavior,
        pub(crate) logout: Behavior,
        pub(crate) change_password: Behavior,
        pub(crate) update_profile: Behavior,
        pub(crate) delete_account: Behavior,
        pub(crate) roles: String,
        pub(crate) identity_calls: Arc<AtomicUsize>,
        pub(crate) profile_calls: Arc<AtomicUsize>,
        pub(crate) logout_calls: Arc<AtomicUsize>,
    }

    impl Default for StubClient {
        fn default() -> Self {
            Self {
                login: Behavior::Succeed,
                register: Behavior::Succeed,
                identity: Behavior::Succeed,
                profile: Behavior::Succeed,
                logout: Behavior::Succeed,
                change_password: Behavior::Succeed,
                update_profile: Behavior::Succeed,
                delete_account: Behavior::Succeed,
                roles: "ROLE_USER".to_owned(),
                identity_calls: Arc::new(AtomicUsize::new(0)),
                profile_calls: Arc::new(AtomicUsize::new(0)),
                logout_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    pub(crate) fn sample_user(roles: &str) -> User {
        User {
            id: 1,
            username: "bryan".to_owned(),
            phone: None,
            email: Some("bryan@example.com".to_owned()),
            status: Status::Normal,
            roles: roles.to_owned(),
            last_login_at: None,
            last_login_ip: None,
            created_at: None,
        }
    }

    #[async_trait]
    impl Client for StubClient {
        async fn register(&self, registration: &Registration) -> error::Result<User> {
            self.register.check()?;
            let mut user = sample_user(&self.roles);
            user.username = registration.username.clone();
            Ok(user)
        }

        async fn login(&self, _: &str, _: &SecretString) -> error::Result<String> {
            self.login.check()?;
            Ok("issued-token".to_owned())
        }

        async fn current_user(&self) -> error::Result<User> {
            let _ = self.identity_calls.fetch_add(1, Ordering::SeqCst);
            self.identity.check()?;
            Ok(sample_user(&self.roles))
        }

        async fn current_profile(&self) -> error::Result<Profile> {
            let _ = self.profile_calls.fetch_add(1, Ordering::SeqCst);
            self.profile.check()?;
            Ok(Profile {
                user_id: Some(1),
                real_name: Some("Bryan".to_owned()),
                ..Profile::default()
            })
        }

        async fn logout(&self) -> error::Result<()> {
            let _ = self.logout_calls.fetch_add(1, Ordering::SeqCst);
            self.logout.check()
        }

        async fn change_password(
            &self,
            _: &SecretString,
            _: &SecretString,
        ) -> error::Result<()> {
            self.change_password.check()
        }

        async fn update_profile(&self, update: &UserUpdate) -> error::Result<Profile> {
            self.update_profile.check()?;
            Ok(Profile {
                user_id: Some(1),
                real_name: update.real_name.clone(),
                gender: update.gender,
                ..Profile::default()
            })
        }

        async fn delete_account(&self) -> error::Result<()> {
            self.delete_account.check()
        }
    }

    pub(crate) struct Fixture {
        pub(crate) store: Store<StubClient>,
        pub(crate) token_storage: Arc<Mutex<Box<dyn Storage<String>>>>,
    }

    pub(crate) fn fixture(stub: StubClient) -> Fixture {
        let token_storage: Arc<Mutex<Box<dyn Storage<String>>>> = Arc::new(Mutex::new(Box::new(
            crate::storage::Memory::new(),
        )));
        let store = Store::new(
            stub,
            Arc::clone(&token_storage),
            Box::new(crate::storage::Memory::new()),
        );
        Fixture {
            store,
            token_storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{fixture, Behavior, StubClient};
    use super::*;

    fn password() -> SecretString {
        SecretString::new("hunter22".to_owned())
    }

    #[tokio::test]
    async fn set_then_clear_credential_leaves_storage_empty() {
        let mut fx = fixture(StubClient::default());

        fx.store.set_credential("tok").await;
        assert!(fx.store.is_authenticated());
        assert_eq!(
            fx.token_storage.lock().await.get().await.unwrap().as_deref(),
            Some("tok")
        );

        fx.store.clear_credential().await;
        assert!(!fx.store.is_authenticated());
        assert_eq!(fx.token_storage.lock().await.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn login_survives_a_failed_identity_fetch() {
        let stub = StubClient {
            identity: Behavior::Fail,
            ..StubClient::default()
        };
        let mut fx = fixture(stub);

        let outcome = fx.store.login("bryan", &password()).await;
        assert!(outcome.is_success());
        assert!(fx.store.is_authenticated());
        assert!(fx.store.identity().is_none());
        assert_eq!(
            fx.token_storage.lock().await.get().await.unwrap().as_deref(),
            Some("issued-token")
        );
    }

    #[tokio::test]
    async fn refresh_tolerates_a_missing_profile() {
        let stub = StubClient {
            profile: Behavior::Fail,
            ..StubClient::default()
        };
        let mut fx = fixture(stub);

        match fx.store.refresh_identity().await {
            Outcome::Success(refresh) => assert_eq!(refresh, Refresh::IdentityOnly),
            Outcome::Failure { message } => panic!("refresh failed: {message}"),
        }
        assert!(fx.store.identity().is_some());
        assert!(fx.store.profile().is_none());
    }

    #[tokio::test]
    async fn refresh_failure_does_not_clear_a_cached_identity() {
        let mut fx = fixture(StubClient::default());
        assert!(fx.store.refresh_identity().await.is_success());
        assert!(fx.store.identity().is_some());

        fx.store.client.identity = Behavior::Fail;
        assert!(!fx.store.refresh_identity().await.is_success());
        assert!(fx.store.identity().is_some());
    }

    #[tokio::test]
    async fn logout_clears_everything_even_when_the_remote_call_fails() {
        let stub = StubClient {
            logout: Behavior::Fail,
            ..StubClient::default()
        };
        let logout_calls = Arc::clone(&stub.logout_calls);
        let mut fx = fixture(stub);

        assert!(fx.store.login("bryan", &password()).await.is_success());
        assert!(fx.store.is_authenticated());

        fx.store.logout().await;
        assert!(!fx.store.is_authenticated());
        assert!(fx.store.identity().is_none());
        assert!(fx.store.profile().is_none());
        assert_eq!(fx.token_storage.lock().await.get().await.unwrap(), None);
        assert_eq!(logout_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn is_admin_follows_the_current_identity() {
        let mut fx = fixture(StubClient {
            roles: "ROLE_USER,ROLE_ADMIN".to_owned(),
            ..StubClient::default()
        });
        assert!(!fx.store.is_admin());

        assert!(fx.store.refresh_identity().await.is_success());
        assert!(fx.store.is_admin());

        let mut fx = fixture(StubClient::default());
        assert!(fx.store.refresh_identity().await.is_success());
        assert!(!fx.store.is_admin());
    }

    #[tokio::test]
    async fn register_caches_the_identity_without_signing_in() {
        let mut fx = fixture(StubClient::default());

        let registration = Registration {
            username: "newcomer".to_owned(),
            password: password(),
            phone: None,
            email: None,
        };
        assert!(fx.store.register(&registration).await.is_success());
        assert!(!fx.store.is_authenticated());
        assert_eq!(
            fx.store.identity().map(|user| user.username.as_str()),
            Some("newcomer")
        );
    }

    #[tokio::test]
    async fn delete_account_failure_leaves_state_untouched() {
        let stub = StubClient {
            delete_account: Behavior::Fail,
            ..StubClient::default()
        };
        let mut fx = fixture(stub);

        assert!(fx.store.login("bryan", &password()).await.is_success());
        assert!(!fx.store.delete_account().await.is_success());
        assert!(fx.store.is_authenticated());
        assert!(fx.store.identity().is_some());
    }

    #[tokio::test]
    async fn delete_account_success_logs_out() {
        let mut fx = fixture(StubClient::default());

        assert!(fx.store.login("bryan", &password()).await.is_success());
        assert!(fx.store.delete_account().await.is_success());
        assert!(!fx.store.is_authenticated());
        assert!(fx.store.identity().is_none());
    }

    #[tokio::test]
    async fn hydrate_prefers_the_raw_token_key() {
        let mut fx = fixture(StubClient::default());
        assert!(fx.store.login("bryan", &password()).await.is_success());

        // Simulate the 401 handler clearing the raw key behind our back.
        fx.token_storage.lock().await.clear().await.unwrap();
        fx.store.hydrate().await;
        assert!(!fx.store.is_authenticated());
    }
}
