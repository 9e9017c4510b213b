//! Guest/authenticated session state.
//!
//! ```text
//! guest ──sign_in / sign_up──▶ authenticated
//!   ▲                               │
//!   └────────── sign_out ───────────┘   (push, provider sign-out, local reset)
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::{AuthError, AuthUser, IdentityProvider};
use crate::models::DEFAULT_LIST_ID;
use crate::store::PackingStore;
use crate::sync::SyncAdapter;

/// What `handle_auth_state` did with the reported user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRestore {
    /// No session; running as a guest
    Guest,
    /// Signed in, but no sync adapter is configured
    SignedIn,
    /// Remote data replaced local lists
    Restored,
    /// No remote document existed, so local lists were uploaded
    Uploaded,
}

/// Tracks the signed-in user and runs the sign-in/sign-out side effects.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    sync: Option<SyncAdapter>,
    user: Option<String>,
}

impl AuthSession {
    /// Starts as a guest.
    pub fn new(provider: Arc<dyn IdentityProvider>, sync: Option<SyncAdapter>) -> Self {
        Self {
            provider,
            sync,
            user: None,
        }
    }

    /// UID of the signed-in user; `None` for a guest.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_guest(&self) -> bool {
        self.user.is_none()
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }

    pub fn sync(&self) -> Option<&SyncAdapter> {
        self.sync.as_ref()
    }

    /// Swaps the sync adapter, e.g. once a fresh token is available.
    pub fn set_sync(&mut self, sync: Option<SyncAdapter>) {
        self.sync = sync;
    }

    /// Adopts a persisted session without fetching or uploading anything.
    pub fn resume(&mut self, user: Option<&AuthUser>) {
        self.user = user.map(|u| u.uid.clone());
    }

    pub async fn sign_in(
        &mut self,
        store: &mut PackingStore,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let (email, password) = check_credentials(email, password)?;
        let user = self.provider.sign_in(email, password).await?;
        info!(uid = %user.uid, "Signed in");

        self.user = Some(user.uid.clone());
        store.set_active_list(DEFAULT_LIST_ID);
        Ok(user)
    }

    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let (email, password) = check_credentials(email, password)?;
        let user = self.provider.sign_up(email, password).await?;
        info!(uid = %user.uid, "Signed up");

        self.user = Some(user.uid.clone());
        Ok(user)
    }

    /// Asks the provider to email a password reset link.
    ///
    /// Session state is unchanged.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }
        self.provider.send_password_reset(email).await?;
        info!("Password reset email sent");
        Ok(())
    }

    /// Signs out and resets local lists.
    ///
    /// An authenticated user's lists are pushed first. If that push fails the
    /// failure is only logged: local lists are cleared either way, so
    /// unsynced changes are lost.
    pub async fn sign_out(&mut self, store: &mut PackingStore) -> Result<(), AuthError> {
        let Some(uid) = self.user.clone() else {
            store.clear_all_lists();
            return Ok(());
        };

        if let Some(sync) = &self.sync {
            if let Err(e) = sync.save_user_packing_data(store, &uid).await {
                warn!("Failed to save packing data before sign-out: {}", e);
            }
        }

        self.provider.sign_out().await?;
        store.clear_all_lists();
        self.user = None;
        info!(uid = %uid, "Signed out");
        Ok(())
    }

    /// Applies an auth-state report from the identity provider.
    ///
    /// With a user: fetch their remote lists, or upload local lists if they
    /// have none yet. Without: become a guest.
    pub async fn handle_auth_state(
        &mut self,
        store: &mut PackingStore,
        user: Option<AuthUser>,
    ) -> Result<SessionRestore, AuthError> {
        let Some(user) = user else {
            self.user = None;
            return Ok(SessionRestore::Guest);
        };
        self.user = Some(user.uid.clone());

        let Some(sync) = &self.sync else {
            return Ok(SessionRestore::SignedIn);
        };

        if sync.pull_user_packing_data(store, &user.uid).await? {
            info!(uid = %user.uid, "Restored packing data from cloud");
            Ok(SessionRestore::Restored)
        } else {
            sync.save_user_packing_data(store, &user.uid).await?;
            info!(uid = %user.uid, "Uploaded local packing data to cloud");
            Ok(SessionRestore::Uploaded)
        }
    }

    /// Follows auth-state changes until the provider goes away.
    ///
    /// Failures while handling a change are logged and the listener keeps going.
    pub async fn listen(
        &mut self,
        store: &mut PackingStore,
        mut changes: watch::Receiver<Option<AuthUser>>,
    ) {
        loop {
            let user = changes.borrow_and_update().clone();
            if let Err(e) = self.handle_auth_state(store, user).await {
                warn!("Failed to apply auth state change: {}", e);
            }
            if changes.changed().await.is_err() {
                return;
            }
        }
    }
}

fn check_credentials<'a>(
    email: &'a str,
    password: &'a str,
) -> Result<(&'a str, &'a str), AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok((email, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::{FailingDocumentStore, MemoryIdentityProvider};
    use crate::models::{ListType, PackingItem};
    use crate::sync::MemoryDocumentStore;

    struct Fixture {
        session: AuthSession,
        provider: Arc<MemoryIdentityProvider>,
        remote: Arc<MemoryDocumentStore>,
        store: PackingStore,
    }

    fn fixture() -> Fixture {
        let provider = Arc::new(MemoryIdentityProvider::new());
        provider.add_account("me@example.com", "secret", "uid-1");
        let remote = Arc::new(MemoryDocumentStore::new());
        let session = AuthSession::new(
            provider.clone(),
            Some(SyncAdapter::new(remote.clone())),
        );
        Fixture {
            session,
            provider,
            remote,
            store: PackingStore::in_memory(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_sets_user_and_selects_default() {
        let mut f = fixture();
        let trip = f.store.create_list("Trip");
        f.store.set_active_list(&trip);

        let user = f
            .session
            .sign_in(&mut f.store, " me@example.com ", "secret")
            .await
            .unwrap();

        assert_eq!(user.uid, "uid-1");
        assert_eq!(f.session.user(), Some("uid-1"));
        assert_eq!(f.store.active_list_id(), Some(DEFAULT_LIST_ID));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let mut f = fixture();
        let result = f.session.sign_in(&mut f.store, "me@example.com", "nope").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(f.session.is_guest());
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let mut f = fixture();
        let result = f.session.sign_in(&mut f.store, "  ", "secret").await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
        let result = f.session.sign_up("new@example.com", "").await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_sign_up_sets_user() {
        let mut f = fixture();
        let user = f.session.sign_up("new@example.com", "secret").await.unwrap();
        assert_eq!(f.session.user(), Some(user.uid.as_str()));

        let again = f.session.sign_up("new@example.com", "secret").await;
        assert!(matches!(again, Err(AuthError::EmailExists)));
    }

    #[tokio::test]
    async fn test_reset_password() {
        let f = fixture();
        f.session.reset_password(" me@example.com ").await.unwrap();

        assert_eq!(f.provider.reset_requests(), vec!["me@example.com"]);
        assert!(f.session.is_guest());
    }

    #[tokio::test]
    async fn test_reset_password_rejects_empty_email() {
        let f = fixture();
        let result = f.session.reset_password("   ").await;
        assert!(matches!(result, Err(AuthError::MissingEmail)));
        assert!(f.provider.reset_requests().is_empty());
    }

    #[tokio::test]
    async fn test_reset_password_unknown_account() {
        let f = fixture();
        let result = f.session.reset_password("nobody@example.com").await;
        assert!(matches!(result, Err(AuthError::AccountNotFound)));
    }

    #[tokio::test]
    async fn test_guest_sign_out_only_clears_lists() {
        let mut f = fixture();
        f.store.create_list("Trip");

        f.session.sign_out(&mut f.store).await.unwrap();

        assert_eq!(f.store.lists().len(), 1);
        assert!(f.remote.document("users/uid-1").is_none());
        assert_eq!(f.provider.sign_out_calls(), 0);
    }

    #[tokio::test]
    async fn test_sign_out_pushes_then_clears() {
        let mut f = fixture();
        f.session
            .sign_in(&mut f.store, "me@example.com", "secret")
            .await
            .unwrap();
        f.store
            .add_item(ListType::ToPack, PackingItem::with_id("1", "Passport"));

        f.session.sign_out(&mut f.store).await.unwrap();

        let doc = f.remote.document("users/uid-1").unwrap();
        assert_eq!(doc["lists"]["default"]["toPack"][0]["name"], "Passport");
        assert!(f.session.is_guest());
        assert_eq!(f.store.active_list().unwrap().item_count(), 0);
        assert_eq!(f.provider.sign_out_calls(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_push_fails() {
        let provider = Arc::new(MemoryIdentityProvider::new());
        provider.add_account("me@example.com", "secret", "uid-1");
        let mut session = AuthSession::new(
            provider.clone(),
            Some(SyncAdapter::new(Arc::new(FailingDocumentStore))),
        );
        let mut store = PackingStore::in_memory();
        session
            .sign_in(&mut store, "me@example.com", "secret")
            .await
            .unwrap();
        store.add_item(ListType::ToBuy, PackingItem::with_id("1", "Socks"));

        session.sign_out(&mut store).await.unwrap();

        assert!(session.is_guest());
        assert_eq!(store.active_list().unwrap().item_count(), 0);
        assert_eq!(provider.sign_out_calls(), 1);
    }

    #[tokio::test]
    async fn test_handle_auth_state_uploads_when_no_remote() {
        let mut f = fixture();
        f.store
            .add_item(ListType::ToBuy, PackingItem::with_id("1", "Socks"));

        let outcome = f
            .session
            .handle_auth_state(&mut f.store, Some(AuthUser::new("uid-1")))
            .await
            .unwrap();

        assert_eq!(outcome, SessionRestore::Uploaded);
        assert!(f.remote.document("users/uid-1").is_some());
        assert!(f.store.last_synced_at().is_some());
    }

    #[tokio::test]
    async fn test_handle_auth_state_restores_remote() {
        let mut f = fixture();
        let mut other = PackingStore::in_memory();
        other.create_list("From phone");
        SyncAdapter::new(f.remote.clone())
            .save_user_packing_data(&mut other, "uid-1")
            .await
            .unwrap();

        let outcome = f
            .session
            .handle_auth_state(&mut f.store, Some(AuthUser::new("uid-1")))
            .await
            .unwrap();

        assert_eq!(outcome, SessionRestore::Restored);
        assert_eq!(f.store.lists(), other.lists());
    }

    #[tokio::test]
    async fn test_handle_auth_state_guest() {
        let mut f = fixture();
        let outcome = f
            .session
            .handle_auth_state(&mut f.store, None)
            .await
            .unwrap();
        assert_eq!(outcome, SessionRestore::Guest);
        assert!(f.session.is_guest());
    }

    #[tokio::test]
    async fn test_handle_auth_state_without_sync() {
        let provider = Arc::new(MemoryIdentityProvider::new());
        let mut session = AuthSession::new(provider, None);
        let mut store = PackingStore::in_memory();

        let outcome = session
            .handle_auth_state(&mut store, Some(AuthUser::new("uid-1")))
            .await
            .unwrap();
        assert_eq!(outcome, SessionRestore::SignedIn);
        assert_eq!(session.user(), Some("uid-1"));
    }

    #[tokio::test]
    async fn test_resume_leaves_lists_alone() {
        let mut f = fixture();
        let trip = f.store.create_list("Trip");
        f.store.set_active_list(&trip);

        f.session.resume(Some(&AuthUser::new("uid-1")));

        assert_eq!(f.session.user(), Some("uid-1"));
        assert_eq!(f.store.active_list_id(), Some(trip.as_str()));
        assert!(f.remote.document("users/uid-1").is_none());

        f.session.resume(None);
        assert!(f.session.is_guest());
    }

    #[tokio::test]
    async fn test_listen_follows_changes_until_closed() {
        let mut f = fixture();
        let (tx, rx) = watch::channel(None);
        tx.send_replace(Some(AuthUser::new("uid-1")));
        drop(tx);

        f.session.listen(&mut f.store, rx).await;

        assert_eq!(f.session.user(), Some("uid-1"));
        assert!(f.remote.document("users/uid-1").is_some());
    }
}
