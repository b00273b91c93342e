//! Authentication provider seam.
//!
//! The app never talks to the identity backend directly. It subscribes to
//! session changes and reacts to whatever the provider reports.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(uid: &str) -> Self {
        Session {
            uid: uid.to_string(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }
}

/// Callback invoked with the current session, `None` when signed out.
pub type AuthListener = Box<dyn Fn(Option<Session>) + Send + Sync>;

/// Source of session changes.
pub trait AuthProvider {
    /// Register `listener`. Implementations call it once right away with the
    /// current session, then once per session transition.
    fn subscribe(&self, listener: AuthListener) -> Subscription;
}

/// Handle returned by [`AuthProvider::subscribe`]. Unsubscribes on drop.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Subscription {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

type SharedListener = Arc<dyn Fn(Option<Session>) + Send + Sync>;

#[derive(Default)]
struct MemoryAuthInner {
    session: Option<Session>,
    listeners: BTreeMap<u64, SharedListener>,
    next_id: u64,
}

/// In-process auth provider. Holds the current session and fans changes
/// out to every live subscriber.
///
/// Deliveries are serialized: a subscriber never sees an older session after
/// a newer one. Listeners must not call `sign_in`/`sign_out` themselves.
#[derive(Clone, Default)]
pub struct MemoryAuth {
    inner: Arc<Mutex<MemoryAuthInner>>,
    /// Held across every state change and its fan-out.
    notify: Arc<Mutex<()>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        MemoryAuth::default()
    }

    pub fn signed_in(session: Session) -> Self {
        let auth = MemoryAuth::default();
        auth.lock().session = Some(session);
        auth
    }

    fn lock(&self) -> MutexGuard<'_, MemoryAuthInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notifying(&self) -> MutexGuard<'_, ()> {
        self.notify.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn sign_in(&self, session: Session) {
        self.set(Some(session));
    }

    pub fn sign_out(&self) {
        self.set(None);
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn set(&self, session: Option<Session>) {
        let _notify = self.notifying();

        // Listeners run outside the state lock so they may read it
        let listeners: Vec<SharedListener> = {
            let mut inner = self.lock();
            inner.session = session.clone();
            inner.listeners.values().cloned().collect()
        };

        for listener in listeners {
            listener(session.clone());
        }
    }
}

impl AuthProvider for MemoryAuth {
    fn subscribe(&self, listener: AuthListener) -> Subscription {
        let listener: SharedListener = Arc::from(listener);
        let _notify = self.notifying();

        let (id, current) = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, listener.clone());
            (id, inner.session.clone())
        };

        listener(current);

        let inner = self.inner.clone();
        Subscription::new(move || {
            inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .listeners
                .remove(&id);
        })
    }
}
