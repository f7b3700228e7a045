use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::users::{User, UserRole};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_DATA_KEY: &str = "user_data";

/// The slice of a user the browser keeps between page loads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: u64,
    pub username: String,
    pub role: UserRole,
    pub full_name: Option<String>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            full_name: user.full_name.clone(),
        }
    }
}

impl SessionUser {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: SessionUser,
}

/// String key/value storage with localStorage semantics.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process storage; stands in for localStorage during SSR and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[derive(Debug, Error)]
#[error("could not encode session user: {0}")]
pub struct PersistError(#[from] serde_json::Error);

pub fn persist_session(storage: &impl KeyValueStorage, session: &AuthSession) -> Result<(), PersistError> {
    let userData = serde_json::to_string(&session.user)?;
    storage.set(ACCESS_TOKEN_KEY, &session.token);
    storage.set(USER_DATA_KEY, &userData);
    Ok(())
}

/// Restores a session only when both keys are present and the user record parses.
pub fn load_session(storage: &impl KeyValueStorage) -> Option<AuthSession> {
    let token = storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
    let userData = storage.get(USER_DATA_KEY)?;
    let user = serde_json::from_str::<SessionUser>(&userData).ok()?;
    Some(AuthSession { token, user })
}

pub fn clear_session(storage: &impl KeyValueStorage) {
    storage.remove(ACCESS_TOKEN_KEY);
    storage.remove(USER_DATA_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AuthSession {
        AuthSession {
            token: "6c1f7a52-0d7e-4f0b-9d5e-8a4b3c2d1e0f".into(),
            user: SessionUser {
                id: 1,
                username: "admin".into(),
                role: UserRole::Admin,
                full_name: Some("Depot Admin".into()),
            },
        }
    }

    #[test]
    fn persist_then_clear_is_symmetric() {
        let storage = MemoryStorage::new();
        persist_session(&storage, &session()).unwrap();

        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some(session().token.as_str()));
        assert_eq!(load_session(&storage), Some(session()));

        clear_session(&storage);
        assert!(storage.is_empty());
        assert_eq!(load_session(&storage), None);
    }

    #[test]
    fn partial_or_corrupt_storage_is_ignored() {
        let storage = MemoryStorage::new();
        storage.set(ACCESS_TOKEN_KEY, "abc");
        assert_eq!(load_session(&storage), None);

        storage.set(USER_DATA_KEY, "{not json");
        assert_eq!(load_session(&storage), None);

        storage.remove(ACCESS_TOKEN_KEY);
        storage.set(USER_DATA_KEY, &serde_json::to_string(&session().user).unwrap());
        assert_eq!(load_session(&storage), None);
    }
}
