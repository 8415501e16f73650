use std::path::Path;

use postpress::{
    application::{
        hooks::{PluginRegistry, RenderPayload},
        pinned,
    },
    config::PluginSettings,
    infra::posts::load_site,
};
use serde_json::Value;

fn fixture_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/posts.json"))
}

fn slugs(entries: &Value) -> Vec<&str> {
    entries
        .as_array()
        .expect("payload entry is an array")
        .iter()
        .filter_map(|post| post["slug"].as_str())
        .collect()
}

#[test]
fn registered_hook_orders_fixture_posts() {
    let site = load_site(fixture_path()).expect("fixture loads");

    let mut registry = PluginRegistry::new();
    pinned::register(
        &mut registry,
        &PluginSettings {
            pinned: true,
            pinned_key: "pinned".to_string(),
        },
    );

    let mut payload = RenderPayload::new();
    registry
        .run_pre_render(&site, &mut payload)
        .expect("hooks succeed");

    let ordered = payload.get("pinned").expect("pinned entry attached");
    assert_eq!(
        slugs(ordered),
        vec![
            "roadmap",
            "faq",
            "maybe-pinned",
            "release-notes",
            "first-light"
        ]
    );
}

#[test]
fn payload_keeps_front_matter_verbatim() {
    let site = load_site(fixture_path()).expect("fixture loads");

    let mut payload = RenderPayload::new();
    pinned::attach_pinned(site.posts(), &mut payload, "featured").expect("attach succeeds");

    let ordered = payload.into_value();
    let maybe = ordered["featured"]
        .as_array()
        .expect("array")
        .iter()
        .find(|post| post["slug"] == "maybe-pinned")
        .expect("post present");

    assert_eq!(maybe["pinned"], "yes");
    assert_eq!(maybe["title"], "Maybe pinned");
    assert_eq!(maybe["date"], "2019-04-01T08:00:00Z");
}

#[test]
fn source_collection_order_is_untouched() {
    let site = load_site(fixture_path()).expect("fixture loads");
    let before: Vec<_> = site.posts().iter().map(|post| post.slug()).collect();

    let view = pinned::sort_pinned(site.posts());
    assert_eq!(view.len(), site.posts().len());

    let after: Vec<_> = site.posts().iter().map(|post| post.slug()).collect();
    assert_eq!(before, after);
}
