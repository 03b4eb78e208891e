//! Actor identity resolution
//!
//! Usage events are attributed to the signed-in user when the session in
//! storage carries an id, and to a persisted anonymous visitor id otherwise.
//! The anonymous id is generated once and reused on every later call.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tenantweb_shared::{ActorId, WebError, WebResult};

use crate::config::ClientConfig;

/// Browser-style string key/value storage
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> WebResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> WebResult<()> {
        (**self).set_item(key, value)
    }
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.write() {
            items.remove(key);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut items) = self.items.write() {
            items.clear();
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> WebResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| WebError::Storage("store lock poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolves who a usage event belongs to
pub trait IdentityProvider: Send + Sync {
    /// The authenticated user id if present, otherwise a stable anonymous id
    fn resolve_actor_id(&self) -> ActorId;
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for Arc<P> {
    fn resolve_actor_id(&self) -> ActorId {
        (**self).resolve_actor_id()
    }
}

/// Identity provider backed by a [`KeyValueStore`]
pub struct StorageIdentityProvider<S> {
    store: S,
    user_key: String,
    anonymous_key: String,
}

impl<S: KeyValueStore> StorageIdentityProvider<S> {
    /// Create a provider using the default `user` / `tempUserId` keys
    pub fn new(store: S) -> Self {
        Self::from_config(store, &ClientConfig::default())
    }

    pub fn from_config(store: S, config: &ClientConfig) -> Self {
        Self {
            store,
            user_key: config.user_storage_key.clone(),
            anonymous_key: config.anonymous_id_storage_key.clone(),
        }
    }

    /// Id of the signed-in user, if the stored session has a usable one
    pub fn session_user_id(&self) -> Option<ActorId> {
        let raw = self.store.get_item(&self.user_key)?;

        let session: Value = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(key = %self.user_key, error = %e, "Stored session is not valid JSON, ignoring");
                return None;
            }
        };

        match session.get("id")? {
            Value::String(id) if !id.is_empty() => Some(ActorId(id.clone())),
            Value::Number(id) if id.as_f64() != Some(0.0) => Some(ActorId(id.to_string())),
            _ => None,
        }
    }

    /// Stored anonymous id, generating and persisting one on first use
    pub fn anonymous_id(&self) -> ActorId {
        if let Some(existing) = self.store.get_item(&self.anonymous_key) {
            if !existing.is_empty() {
                return ActorId(existing);
            }
        }

        let generated = ActorId::new_anonymous();
        match self.store.set_item(&self.anonymous_key, generated.as_str()) {
            Ok(()) => {
                tracing::debug!(actor = %generated, "Generated anonymous visitor id");
            }
            Err(e) => {
                // The id is still usable for this event, it just won't be stable
                tracing::warn!(error = %e, "Failed to persist anonymous visitor id");
            }
        }
        generated
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> IdentityProvider for StorageIdentityProvider<S> {
    fn resolve_actor_id(&self) -> ActorId {
        self.session_user_id()
            .unwrap_or_else(|| self.anonymous_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&self, _key: &str, _value: &str) -> WebResult<()> {
            Err(WebError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_session_user_wins() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("user", r#"{"id":"user-42","name":"Ada"}"#).unwrap();
        let provider = StorageIdentityProvider::new(store.clone());

        assert_eq!(provider.resolve_actor_id(), ActorId::from("user-42"));
        // No anonymous id is minted while a user is signed in
        assert!(store.get_item("tempUserId").is_none());
    }

    #[test]
    fn test_numeric_user_id() {
        let store = MemoryStore::new();
        store.set_item("user", r#"{"id":17}"#).unwrap();
        let provider = StorageIdentityProvider::new(store);

        assert_eq!(provider.resolve_actor_id().as_str(), "17");
    }

    #[test]
    fn test_anonymous_id_is_created_once() {
        let store = Arc::new(MemoryStore::new());
        let provider = StorageIdentityProvider::new(store.clone());

        let first = provider.resolve_actor_id();
        let second = provider.resolve_actor_id();

        assert_eq!(first, second);
        assert_eq!(store.get_item("tempUserId").as_deref(), Some(first.as_str()));
        assert!(uuid::Uuid::parse_str(first.as_str()).is_ok());
    }

    #[test]
    fn test_existing_anonymous_id_is_reused() {
        let store = MemoryStore::new();
        store.set_item("tempUserId", "visitor-1").unwrap();
        let provider = StorageIdentityProvider::new(store);

        assert_eq!(provider.resolve_actor_id().as_str(), "visitor-1");
    }

    #[test]
    fn test_unusable_sessions_fall_back_to_anonymous() {
        for session in ["not json", "null", r#"{"name":"Ada"}"#, r#"{"id":""}"#, r#"{"id":0}"#] {
            let store = MemoryStore::new();
            store.set_item("user", session).unwrap();
            store.set_item("tempUserId", "visitor-1").unwrap();
            let provider = StorageIdentityProvider::new(store);

            assert_eq!(provider.resolve_actor_id().as_str(), "visitor-1", "session: {}", session);
        }
    }

    #[test]
    fn test_signing_out_returns_to_same_anonymous_id() {
        let store = Arc::new(MemoryStore::new());
        let provider = StorageIdentityProvider::new(store.clone());

        let anonymous = provider.resolve_actor_id();
        store.set_item("user", r#"{"id":"user-42"}"#).unwrap();
        assert_eq!(provider.resolve_actor_id().as_str(), "user-42");

        store.remove_item("user");
        assert_eq!(provider.resolve_actor_id(), anonymous);
    }

    #[test]
    fn test_custom_keys() {
        let config = ClientConfig {
            user_storage_key: "session".to_string(),
            anonymous_id_storage_key: "visitorId".to_string(),
            ..ClientConfig::default()
        };
        let store = Arc::new(MemoryStore::new());
        let provider = StorageIdentityProvider::from_config(store.clone(), &config);

        let id = provider.resolve_actor_id();
        assert_eq!(store.get_item("visitorId").as_deref(), Some(id.as_str()));
        assert!(store.get_item("tempUserId").is_none());
    }

    #[test]
    fn test_store_failure_still_yields_an_id() {
        let provider = StorageIdentityProvider::new(ReadOnlyStore);

        let first = provider.resolve_actor_id();
        let second = provider.resolve_actor_id();

        assert!(!first.as_str().is_empty());
        // Nothing was persisted, so each call mints a new id
        assert_ne!(first, second);
    }
}
