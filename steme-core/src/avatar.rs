//! Profile picture lookups.

use std::collections::HashMap;
use std::future::Future;

use reqwest::StatusCode;

use crate::auth::Session;
use crate::error::{StemeError, StemeResult};

/// Resolves the avatar URI for a session.
///
/// `Ok(None)` means the user has no avatar. Errors are treated the same way
/// by callers.
pub trait AvatarService: Send + Sync + 'static {
    fn fetch_avatar(
        &self,
        session: &Session,
    ) -> impl Future<Output = StemeResult<Option<String>>> + Send;
}

/// Looks avatars up at `{base_url}/{uid}` with a HEAD request.
pub struct HttpAvatarService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAvatarService {
    pub fn new(base_url: &str) -> Self {
        HttpAvatarService {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn avatar_url(&self, session: &Session) -> String {
        format!("{}/{}", self.base_url, session.uid)
    }
}

impl AvatarService for HttpAvatarService {
    async fn fetch_avatar(&self, session: &Session) -> StemeResult<Option<String>> {
        let url = self.avatar_url(session);

        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| StemeError::AvatarFetch(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(Some(url)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(StemeError::AvatarFetch(format!(
                "{url} returned status {status}"
            ))),
        }
    }
}

/// Fixed uid -> avatar URI table.
#[derive(Default)]
pub struct StaticAvatarService {
    avatars: HashMap<String, String>,
}

impl StaticAvatarService {
    pub fn new() -> Self {
        StaticAvatarService::default()
    }

    pub fn with_avatar(mut self, uid: &str, uri: &str) -> Self {
        self.avatars.insert(uid.to_string(), uri.to_string());
        self
    }
}

impl AvatarService for StaticAvatarService {
    async fn fetch_avatar(&self, session: &Session) -> StemeResult<Option<String>> {
        Ok(self.avatars.get(&session.uid).cloned())
    }
}
