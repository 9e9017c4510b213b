//! In-memory fakes for auth and sync tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

use super::{AuthError, AuthUser, IdentityProvider};
use crate::sync::{RemoteDocumentStore, SyncError};

/// Identity provider with a fixed set of accounts.
pub(crate) struct MemoryIdentityProvider {
    accounts: Mutex<HashMap<String, (String, String)>>,
    state: watch::Sender<Option<AuthUser>>,
    sign_outs: AtomicUsize,
    resets: Mutex<Vec<String>>,
}

impl MemoryIdentityProvider {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            state,
            sign_outs: AtomicUsize::new(0),
            resets: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn add_account(&self, email: &str, password: &str, uid: &str) {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), uid.to_string()));
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    /// Emails that were sent a reset link.
    pub(crate) fn reset_requests(&self) -> Vec<String> {
        self.resets.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((stored, uid)) if stored == password => {
                let user = AuthUser::new(uid.clone());
                self.state.send_replace(Some(user.clone()));
                Ok(user)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::EmailExists);
        }
        let uid = format!("uid-{}", accounts.len() + 100);
        accounts.insert(email.to_string(), (password.to_string(), uid.clone()));
        let user = AuthUser::new(uid);
        self.state.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        if !self.accounts.lock().unwrap().contains_key(email) {
            return Err(AuthError::AccountNotFound);
        }
        self.resets.lock().unwrap().push(email.to_string());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(None);
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.state.subscribe()
    }
}

/// Remote store whose every request fails.
pub(crate) struct FailingDocumentStore;

#[async_trait]
impl RemoteDocumentStore for FailingDocumentStore {
    async fn get(&self, _path: &str) -> Result<Option<Value>, SyncError> {
        Err(SyncError::Connection("network unreachable".to_string()))
    }

    async fn put(&self, _path: &str, _document: Value) -> Result<(), SyncError> {
        Err(SyncError::Connection("network unreachable".to_string()))
    }
}
