//! Access to the session token.
//!
//! The token lives in the host's secure store. The client only reads it,
//! once per request, and never inspects or refreshes it.

use std::sync::{Arc, RwLock};

pub trait TokenStore {
    fn token(&self) -> Option<String>;
}

impl<S: TokenStore + ?Sized> TokenStore for &S {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// No session; every request goes out unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenStore for Anonymous {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Process-local token holder for hosts without a platform secure store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }

    pub fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_and_clear() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.token(), None);
        store.set("abc");
        assert_eq!(store.token().as_deref(), Some("abc"));
        store.clear();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn shared_store_sees_updates() {
        let store = Arc::new(MemoryTokenStore::with_token("one"));
        let view = Arc::clone(&store);
        store.set("two");
        assert_eq!(view.token().as_deref(), Some("two"));
        assert_eq!(Anonymous.token(), None);
    }
}
