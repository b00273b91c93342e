use std::sync::Arc;

use anyhow::Result;
use steme_core::auth::{MemoryAuth, Session};
use steme_core::avatar::{AvatarService, HttpAvatarService, StaticAvatarService};
use steme_core::config::StemeConfig;
use steme_core::identity::IdentityRuntime;
use tracing::debug;

use crate::render::{Render, Screen};
use crate::utils::tui::create_spinner;

pub struct ProfileArgs {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

pub async fn run(config: &StemeConfig, args: ProfileArgs) -> Result<()> {
    let auth = match &args.uid {
        Some(uid) => {
            let mut session = Session::new(uid);
            session.display_name = args.name.clone();
            MemoryAuth::signed_in(session)
        }
        None => MemoryAuth::new(),
    };

    match (&args.avatar, &config.identity().avatar_base_url) {
        (Some(uri), _) => {
            let uid = args.uid.as_deref().unwrap_or_default();
            let avatars = StaticAvatarService::new().with_avatar(uid, uri);
            show(config, &auth, Arc::new(avatars)).await
        }
        (None, Some(base_url)) => {
            show(config, &auth, Arc::new(HttpAvatarService::new(base_url))).await
        }
        (None, None) => show(config, &auth, Arc::new(StaticAvatarService::new())).await,
    }
}

async fn show<S: AvatarService>(
    config: &StemeConfig,
    auth: &MemoryAuth,
    avatars: Arc<S>,
) -> Result<()> {
    debug!(signed_in = auth.current().is_some(), "starting identity sync");
    let runtime = IdentityRuntime::start(auth, avatars, config.identity().fetch_timeout());

    // Screen comes into focus right after mounting
    runtime.focus_regained();

    if auth.current().is_some() {
        let spinner = create_spinner("Loading profile".to_string());
        let mut state = runtime.watch();
        state
            .wait_for(|s| !s.is_loading && s.display_name.is_some())
            .await?;
        spinner.finish_and_clear();
    }

    let state = runtime.snapshot();
    runtime.shutdown().await;

    let screen = Screen {
        locale: config.locale(),
        options: config.calendar(),
    };
    println!("{}", state.render(&screen));

    Ok(())
}
