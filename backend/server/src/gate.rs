//! # Access Gate
//!
//! One shared password guards the whole page.
//!
//! ## Sessions
//! - A correct password mints a fresh UUID v4, stored and sent as the `atlas_session` cookie
//! - Only unlocked sessions are stored, a failed attempt stores nothing
//! - A rejection travels back on the redirect (`/?rejected=1`), not in the store
//! - Unlocked sessions stay unlocked until the process exits
//!
//! The state is looked up per request and handed to the renderer, nothing is global.
//! The secret and the submitted candidates are never logged.
use std::{
    collections::HashSet,
    fmt,
    sync::{PoisonError, RwLock},
};

use axum::http::{HeaderMap, HeaderValue, header::COOKIE, header::InvalidHeaderValue};
use tracing::{info, warn};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "atlas_session";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Prompt,
    Rejected,
    Unlocked,
}

impl GateState {
    pub fn is_unlocked(self) -> bool {
        self == GateState::Unlocked
    }
}

pub struct AccessGate {
    secret: String,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn submit(&self, candidate: &str) -> bool {
        candidate == self.secret
    }
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Default)]
pub struct SessionStore {
    unlocked: RwLock<HashSet<Uuid>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, headers: &HeaderMap) -> bool {
        session_id(headers).is_some_and(|id| {
            self.unlocked
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(&id)
        })
    }

    /// Gate state for the page: unlocked sessions win over a `rejected` marker.
    pub fn state(&self, headers: &HeaderMap, rejected: bool) -> GateState {
        if self.is_unlocked(headers) {
            GateState::Unlocked
        } else if rejected {
            GateState::Rejected
        } else {
            GateState::Prompt
        }
    }

    /// Runs one password attempt, returning the new session id on success.
    pub fn attempt(&self, gate: &AccessGate, candidate: &str) -> Option<Uuid> {
        if !gate.submit(candidate) {
            warn!("Rejected password attempt");
            return None;
        }

        let id = Uuid::new_v4();
        self.unlocked
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        info!("Session {id} unlocked");

        Some(id)
    }

    pub fn len(&self) -> usize {
        self.unlocked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub fn session_cookie(id: Uuid) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_submit_exact_match_only() {
        let gate = AccessGate::new("la solita");

        assert!(gate.submit("la solita"));
        assert!(!gate.submit("La solita"));
        assert!(!gate.submit("la solita "));
        assert!(!gate.submit(""));
    }

    #[test]
    fn test_debug_hides_secret() {
        let gate = AccessGate::new("la solita");
        assert!(!format!("{gate:?}").contains("solita"));
    }

    fn cookie_for(id: Uuid) -> HeaderMap {
        headers_with(&format!("{SESSION_COOKIE}={id}"))
    }

    #[test]
    fn test_new_visitor_gets_prompt() {
        let store = SessionStore::new();

        assert_eq!(store.state(&HeaderMap::new(), false), GateState::Prompt);
        assert_eq!(store.state(&HeaderMap::new(), true), GateState::Rejected);
    }

    #[test]
    fn test_unlock_once_then_stays_unlocked() {
        let gate = AccessGate::new("secret");
        let store = SessionStore::new();

        let id = store.attempt(&gate, "secret").unwrap();
        let headers = cookie_for(id);

        assert!(store.is_unlocked(&headers));
        assert_eq!(store.state(&headers, false), GateState::Unlocked);
        assert_eq!(store.state(&headers, true), GateState::Unlocked);

        assert_eq!(store.attempt(&gate, "wrong"), None);
        assert!(store.is_unlocked(&headers));
    }

    #[test]
    fn test_wrong_password_rejects_and_can_retry() {
        let gate = AccessGate::new("secret");
        let store = SessionStore::new();

        for candidate in ["", "Secret", "secret!", "wrong"] {
            assert_eq!(store.attempt(&gate, candidate), None);
        }

        assert!(store.attempt(&gate, "secret").is_some());
    }

    #[test]
    fn test_failed_attempts_store_nothing() {
        let gate = AccessGate::new("secret");
        let store = SessionStore::new();

        for _ in 0..10_000 {
            assert_eq!(store.attempt(&gate, "wrong"), None);
        }
        assert!(store.is_empty());

        store.attempt(&gate, "secret");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_each_unlock_gets_its_own_id() {
        let gate = AccessGate::new("secret");
        let store = SessionStore::new();

        let first = store.attempt(&gate, "secret").unwrap();
        let second = store.attempt(&gate, "secret").unwrap();

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unknown_cookie_is_locked() {
        let store = SessionStore::new();
        let headers = cookie_for(Uuid::new_v4());

        assert!(!store.is_unlocked(&headers));
        assert_eq!(store.state(&headers, false), GateState::Prompt);
    }

    #[test]
    fn test_cookie_parsing() {
        let id = Uuid::new_v4();

        let headers = headers_with(&format!("theme=dark; {SESSION_COOKIE}={id}; other=1"));
        assert_eq!(session_id(&headers), Some(id));

        assert_eq!(session_id(&headers_with("theme=dark")), None);
        assert_eq!(session_id(&headers_with(&format!("{SESSION_COOKIE}=nope"))), None);
        assert_eq!(session_id(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let id = Uuid::new_v4();
        let cookie = session_cookie(id).unwrap();
        let cookie = cookie.to_str().unwrap();

        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={id};")));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }
}
