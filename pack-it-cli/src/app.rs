//! Application state shared by every command.
//!
//! Owns the list store and the auth session and wires them to the configured
//! identity provider and document server.

use std::sync::Arc;

use pack_it_core::auth::{clear_session, load_session, save_session};
use pack_it_core::storage::FileStorage;
use pack_it_core::sync::{check_server, HttpDocumentStore, SyncAdapter};
use pack_it_core::{AuthSession, AuthUser, FirebaseIdentityProvider, PackingStore, SyncError};
use tracing::{debug, warn};

use crate::config::Config;

pub struct App {
    pub config: Config,
    pub store: PackingStore,
    pub session: AuthSession,
    storage: Arc<FileStorage>,
}

impl App {
    /// Loads the snapshot and resumes a persisted session, without network access.
    pub fn open(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let storage = Arc::new(FileStorage::new(config.data_dir.value.clone()));
        let store = PackingStore::load(storage.clone())?;
        let saved = load_session(storage.as_ref())?;

        let provider = FirebaseIdentityProvider::new(
            config.auth.api_key.clone().unwrap_or_default(),
        )
        .with_session(saved.clone());

        let sync = sync_adapter(config, saved.as_ref());
        let mut session = AuthSession::new(Arc::new(provider), sync);
        session.resume(saved.as_ref());

        Ok(Self {
            config: config.clone(),
            store,
            session,
            storage,
        })
    }

    /// The signed-in user as last reported by the provider.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.session.provider().current_user()
    }

    /// Persists a fresh sign-in and points sync at the new token.
    pub fn remember(&mut self, user: &AuthUser) -> Result<(), Box<dyn std::error::Error>> {
        save_session(self.storage.as_ref(), user)?;
        self.session.set_sync(sync_adapter(&self.config, Some(user)));
        Ok(())
    }

    pub fn forget(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        clear_session(self.storage.as_ref())?;
        self.session.set_sync(sync_adapter(&self.config, None));
        Ok(())
    }

    /// Signed-in user ID and sync adapter, or why sync can't run.
    pub fn sync_target(&self) -> Result<(String, SyncAdapter), SyncError> {
        let sync = self.session.sync().cloned().ok_or(SyncError::NotConfigured)?;
        let uid = self.session.user().ok_or(SyncError::NotSignedIn)?;
        Ok((uid.to_string(), sync))
    }

    /// Auto-sync is switched on for a signed-in user with a server configured.
    fn auto_sync_enabled(&self) -> bool {
        self.config.sync.auto_sync
            && self.config.sync.is_configured()
            && !self.session.is_guest()
    }

    /// True when auto-sync is enabled and the server answers.
    async fn auto_sync_ready(&self) -> bool {
        if !self.auto_sync_enabled() {
            return false;
        }
        let Some(url) = self.config.sync.server_url.as_deref() else {
            return false;
        };
        if !check_server(url).await {
            eprintln!("Auto-sync: server unreachable, skipping");
            return false;
        }
        true
    }

    /// Pulls the signed-in user's lists before a command runs.
    ///
    /// Errors are reported and swallowed; the CLI keeps working offline.
    pub fn try_restore(&mut self) {
        let Ok(rt) = tokio::runtime::Runtime::new() else {
            return;
        };
        rt.block_on(async {
            if !self.auto_sync_ready().await {
                return;
            }
            let user = self.current_user();
            match self.session.handle_auth_state(&mut self.store, user).await {
                Ok(outcome) => debug!(?outcome, "Startup restore"),
                Err(e) => eprintln!("Auto-sync: {}", e),
            }
        });
    }

    /// Pushes the signed-in user's lists after a write command.
    pub fn try_auto_sync(&mut self) {
        let Ok(rt) = tokio::runtime::Runtime::new() else {
            return;
        };
        rt.block_on(async {
            if !self.auto_sync_ready().await {
                return;
            }
            let Ok((uid, sync)) = self.sync_target() else {
                return;
            };
            if let Err(e) = sync.save_user_packing_data(&mut self.store, &uid).await {
                warn!("Auto-sync push failed: {}", e);
                eprintln!("Auto-sync: {}", e);
            }
        });
    }
}

fn sync_adapter(config: &Config, user: Option<&AuthUser>) -> Option<SyncAdapter> {
    let url = config.sync.server_url.as_ref()?;
    let mut remote = HttpDocumentStore::new(url.clone());
    if let Some(token) = user.and_then(|u| u.id_token.as_ref()) {
        remote = remote.with_token(token.clone());
    }
    Some(SyncAdapter::new(Arc::new(remote)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, ConfigValue};
    use pack_it_core::ListType;
    use pack_it_core::PackingItem;
    use tempfile::tempdir;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::load(Some(dir.join("missing.yaml"))).unwrap();
        config.data_dir = ConfigValue::new(dir.to_path_buf(), ConfigSource::File);
        config.sync.server_url = None;
        config
    }

    #[test]
    fn test_open_fresh_is_guest() {
        let temp_dir = tempdir().unwrap();
        let app = App::open(&test_config(temp_dir.path())).unwrap();

        assert!(app.session.is_guest());
        assert_eq!(app.store.lists().len(), 1);
        assert!(matches!(app.sync_target(), Err(SyncError::NotConfigured)));
    }

    #[test]
    fn test_lists_survive_reopen() {
        let temp_dir = tempdir().unwrap();
        let config = test_config(temp_dir.path());

        let mut app = App::open(&config).unwrap();
        app.store
            .add_item(ListType::ToPack, PackingItem::with_id("1", "Passport"));
        drop(app);

        let app = App::open(&config).unwrap();
        assert_eq!(app.store.active_list().unwrap().to_pack[0].name, "Passport");
    }

    #[test]
    fn test_session_is_resumed_and_forgotten() {
        let temp_dir = tempdir().unwrap();
        let mut config = test_config(temp_dir.path());
        config.sync.server_url = Some("http://localhost:1".to_string());

        let mut app = App::open(&config).unwrap();
        app.remember(&AuthUser::new("uid-1")).unwrap();

        let mut app = App::open(&config).unwrap();
        assert_eq!(app.session.user(), Some("uid-1"));
        assert_eq!(app.current_user().unwrap().uid, "uid-1");
        assert_eq!(app.sync_target().unwrap().0, "uid-1");

        app.forget().unwrap();
        let app = App::open(&config).unwrap();
        assert!(app.session.is_guest());
        assert!(matches!(app.sync_target(), Err(SyncError::NotSignedIn)));
    }

    fn signed_in_app(config: &Config) -> App {
        App::open(config).unwrap().remember(&AuthUser::new("uid-1")).unwrap();
        App::open(config).unwrap()
    }

    fn add_passport(app: &mut App) {
        app.store
            .add_item(ListType::ToPack, PackingItem::with_id("1", "Passport"));
    }

    #[test]
    fn test_auto_sync_enabled() {
        let temp_dir = tempdir().unwrap();
        let mut config = test_config(temp_dir.path());
        config.sync.auto_sync = true;
        config.sync.server_url = Some("http://localhost:1".to_string());

        assert!(!App::open(&config).unwrap().auto_sync_enabled());
        assert!(signed_in_app(&config).auto_sync_enabled());

        config.sync.auto_sync = false;
        assert!(!App::open(&config).unwrap().auto_sync_enabled());

        config.sync.auto_sync = true;
        config.sync.server_url = None;
        assert!(!App::open(&config).unwrap().auto_sync_enabled());
    }

    #[test]
    fn test_guest_skips_auto_sync_and_restore() {
        let temp_dir = tempdir().unwrap();
        let mut config = test_config(temp_dir.path());
        config.sync.auto_sync = true;
        config.sync.server_url = Some("http://localhost:1".to_string());

        let mut app = App::open(&config).unwrap();
        add_passport(&mut app);

        app.try_restore();
        app.try_auto_sync();

        assert!(app.session.is_guest());
        assert!(app.store.last_synced_at().is_none());
        assert_eq!(app.store.active_list().unwrap().to_pack[0].name, "Passport");
    }

    #[test]
    fn test_auto_sync_off_skips_signed_in_user() {
        let temp_dir = tempdir().unwrap();
        let mut config = test_config(temp_dir.path());
        config.sync.auto_sync = false;
        config.sync.server_url = Some("http://localhost:1".to_string());

        let mut app = signed_in_app(&config);
        add_passport(&mut app);

        app.try_restore();
        app.try_auto_sync();

        assert_eq!(app.session.user(), Some("uid-1"));
        assert!(app.store.last_synced_at().is_none());
        assert_eq!(app.store.lists().len(), 1);
        assert_eq!(app.store.active_list().unwrap().to_pack[0].name, "Passport");
    }

    #[test]
    fn test_no_server_skips_signed_in_user() {
        let temp_dir = tempdir().unwrap();
        let mut config = test_config(temp_dir.path());
        config.sync.auto_sync = true;

        let mut app = signed_in_app(&config);
        add_passport(&mut app);

        app.try_restore();
        app.try_auto_sync();

        assert_eq!(app.session.user(), Some("uid-1"));
        assert!(app.store.last_synced_at().is_none());
        assert_eq!(app.store.active_list().unwrap().to_pack[0].name, "Passport");
    }
}
