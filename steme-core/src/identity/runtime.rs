//! Event loop that drives `IdentitySync`.
//!
//! One task owns the state machine. Auth changes, focus events and fetch
//! completions all arrive over the same channel and are applied in delivery
//! order, so the state needs no lock. Fetches run as separate tasks and are
//! never cancelled; superseded results are dropped by the state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

use super::{FetchTicket, IdentityState, IdentitySync};
use crate::auth::{AuthProvider, Session};
use crate::avatar::AvatarService;
use crate::error::{StemeError, StemeResult};

enum Event {
    AuthChanged(Option<Session>),
    FocusRegained,
    FetchDone {
        ticket: FetchTicket,
        outcome: StemeResult<Option<String>>,
    },
    Shutdown,
}

pub struct IdentityRuntime {
    events: mpsc::UnboundedSender<Event>,
    state: watch::Receiver<IdentityState>,
    task: Option<JoinHandle<()>>,
}

impl IdentityRuntime {
    /// Subscribe to `auth` and start the loop. Must be called inside a tokio runtime.
    pub fn start<A, S>(auth: &A, avatars: Arc<S>, fetch_timeout: Duration) -> Self
    where
        A: AuthProvider,
        S: AvatarService,
    {
        let (events, rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(IdentityState::default());

        let auth_events = events.clone();
        let subscription = auth.subscribe(Box::new(move |session: Option<Session>| {
            // Closed channel means the loop already shut down
            let _ = auth_events.send(Event::AuthChanged(session));
        }));

        let loop_events = events.clone();
        let task = tokio::spawn(async move {
            let mut sync = IdentitySync::new();
            let mut rx = rx;

            while let Some(event) = rx.recv().await {
                let ticket = match event {
                    Event::AuthChanged(session) => sync.on_auth_change(session),
                    Event::FocusRegained => sync.refresh(),
                    Event::FetchDone { ticket, outcome } => {
                        sync.complete(&ticket, outcome);
                        None
                    }
                    Event::Shutdown => break,
                };

                if let Some(ticket) = ticket {
                    spawn_fetch(ticket, avatars.clone(), fetch_timeout, loop_events.clone());
                }

                state_tx.send_if_modified(|current| {
                    if current == sync.state() {
                        return false;
                    }
                    *current = sync.state().clone();
                    true
                });
            }

            subscription.unsubscribe();
            debug!("identity loop stopped");
        });

        IdentityRuntime {
            events,
            state,
            task: Some(task),
        }
    }

    /// The screen became visible again.
    pub fn focus_regained(&self) {
        let _ = self.events.send(Event::FocusRegained);
    }

    pub fn snapshot(&self) -> IdentityState {
        self.state.borrow().clone()
    }

    /// Receiver for rendering; changes whenever the state does.
    pub fn watch(&self) -> watch::Receiver<IdentityState> {
        self.state.clone()
    }

    /// Unsubscribe from the auth provider and stop the loop, waiting for it to finish.
    pub async fn shutdown(mut self) {
        let _ = self.events.send(Event::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for IdentityRuntime {
    /// Unmounting without `shutdown` still tears the loop down; it stops
    /// and unsubscribes on its next turn.
    fn drop(&mut self) {
        let _ = self.events.send(Event::Shutdown);
    }
}

fn spawn_fetch<S: AvatarService>(
    ticket: FetchTicket,
    avatars: Arc<S>,
    limit: Duration,
    events: mpsc::UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let outcome = match timeout(limit, avatars.fetch_avatar(&ticket.session)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(StemeError::AvatarTimeout(limit.as_secs())),
        };
        let _ = events.send(Event::FetchDone { ticket, outcome });
    });
}
