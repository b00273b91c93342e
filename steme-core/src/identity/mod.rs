//! Signed-in user shown in the calendar header.
//!
//! `IdentitySync` is the state machine: it never awaits anything. Every
//! fetch it wants is handed out as a [`FetchTicket`] and the result comes back
//! through [`IdentitySync::complete`]. Only the most recently issued ticket is
//! honoured, so a slow fetch started earlier can never overwrite a newer one.
//! [`IdentityRuntime`] drives it on tokio.

mod runtime;

pub use runtime::IdentityRuntime;

use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::error::StemeResult;

/// Shown when there is no name to show.
pub const NO_NAME: &str = "No name given";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    /// Session present, avatar fetch in flight.
    Loading,
    /// Session present, avatar resolved or known to be absent.
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityState {
    pub display_name: Option<String>,
    pub avatar_uri: Option<String>,
    pub is_loading: bool,
}

/// What the header draws in the avatar slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarView {
    /// Fetch in flight, draw nothing.
    Hidden,
    Image(String),
    /// Default picture.
    Placeholder,
}

impl IdentityState {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(NO_NAME)
    }

    pub fn avatar(&self) -> AvatarView {
        match (&self.avatar_uri, self.is_loading) {
            (_, true) => AvatarView::Hidden,
            (Some(uri), false) => AvatarView::Image(uri.clone()),
            (None, false) => AvatarView::Placeholder,
        }
    }
}

/// An avatar fetch the caller should run and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub session: Session,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct IdentitySync {
    session: Option<Session>,
    state: IdentityState,
    phase: Phase,
    /// Generation of the last ticket issued. Bumped on sign-out too.
    latest: u64,
}

impl Default for IdentitySync {
    fn default() -> Self {
        IdentitySync::new()
    }
}

impl IdentitySync {
    pub fn new() -> Self {
        IdentitySync {
            session: None,
            state: IdentityState::default(),
            phase: Phase::Unauthenticated,
            latest: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &IdentityState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The auth provider reported a new session state.
    pub fn on_auth_change(&mut self, session: Option<Session>) -> Option<FetchTicket> {
        match session {
            None => {
                // Anything still in flight belongs to the old session
                self.latest += 1;
                self.session = None;
                self.phase = Phase::Unauthenticated;
                self.state = IdentityState::default();
                None
            }
            Some(session) => {
                // Another user's picture must not sit next to this name
                if self.session.as_ref().map(|s| &s.uid) != Some(&session.uid) {
                    self.state.avatar_uri = None;
                }
                self.state.display_name = Some(name_of(&session));
                self.session = Some(session.clone());
                Some(self.issue(session))
            }
        }
    }

    /// Screen regained focus. Refetches the avatar when signed in; the name
    /// stays visible while the image is withheld. Safe to call repeatedly.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        let session = self.session.clone()?;
        Some(self.issue(session))
    }

    fn issue(&mut self, session: Session) -> FetchTicket {
        self.latest += 1;
        self.phase = Phase::Loading;
        self.state.is_loading = true;

        FetchTicket {
            generation: self.latest,
            session,
        }
    }

    /// Apply a finished fetch. Returns false when the ticket was superseded
    /// and the result discarded.
    pub fn complete(&mut self, ticket: &FetchTicket, outcome: StemeResult<Option<String>>) -> bool {
        if ticket.generation != self.latest || self.session.is_none() {
            debug!(
                generation = ticket.generation,
                latest = self.latest,
                "discarding stale avatar fetch"
            );
            return false;
        }

        let avatar_uri = match outcome {
            Ok(uri) => uri,
            Err(e) => {
                warn!(uid = %ticket.session.uid, "avatar unavailable: {e}");
                None
            }
        };

        self.phase = Phase::Ready;
        self.state = IdentityState {
            display_name: Some(name_of(&ticket.session)),
            avatar_uri,
            is_loading: false,
        };
        true
    }
}

fn name_of(session: &Session) -> String {
    session
        .display_name
        .clone()
        .unwrap_or_else(|| NO_NAME.to_string())
}
