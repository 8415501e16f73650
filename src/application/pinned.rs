//! Pinned posts first, newest first within each group.

use std::cmp::Reverse;

use time::OffsetDateTime;
use tracing::debug;

use crate::{
    application::hooks::{HookError, PluginRegistry, RenderPayload},
    config::PluginSettings,
    domain::{posts::Post, site::Site},
};

pub const HOOK_NAME: &str = "pinned_posts";

/// Derived ordering key: (rank, date). Rank is 1 only for a literal `pinned: true`.
pub fn ordering_key(post: &Post) -> (u8, OffsetDateTime) {
    (post.pinned().rank(), post.date())
}

/// Order a borrowed view of `posts` by descending [`ordering_key`].
///
/// `sort_by_key` is stable, so posts sharing rank and date keep their input
/// order, and sorting an already ordered view leaves it unchanged.
pub fn sort_pinned(posts: &[Post]) -> Vec<&Post> {
    let mut view: Vec<&Post> = posts.iter().collect();
    view.sort_by_key(|post| Reverse(ordering_key(post)));
    view
}

/// Attach the ordered view to `payload` under `key`.
pub fn attach_pinned(
    posts: &[Post],
    payload: &mut RenderPayload,
    key: &str,
) -> Result<(), HookError> {
    let ordered = sort_pinned(posts);
    let pinned = ordered
        .iter()
        .take_while(|post| post.pinned().is_pinned())
        .count();

    debug!(
        target = "application::pinned",
        key,
        total = ordered.len(),
        pinned,
        "ordered posts for payload"
    );

    payload.attach(key, &ordered)
}

/// Build the pre-render hook that publishes the ordering under `key`.
pub fn pre_render_hook(
    key: impl Into<String>,
) -> impl Fn(&Site, &mut RenderPayload) -> Result<(), HookError> + Send + Sync + 'static {
    let key = key.into();
    move |site, payload| attach_pinned(site.posts(), payload, &key)
}

/// Register the pinned-post hook on `registry` when enabled in `settings`.
pub fn register(registry: &mut PluginRegistry, settings: &PluginSettings) {
    if settings.pinned {
        registry.register_pre_render(HOOK_NAME, pre_render_hook(settings.pinned_key.clone()));
    }
}
