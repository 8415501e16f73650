//! Explicit plugin registration for the host's pre-render phase.
//!
//! The host builds one [`PluginRegistry`] during initialisation, registers each
//! hook by name, and calls [`PluginRegistry::run_pre_render`] once per build.
//! Hooks read the site and may attach derived data to the [`RenderPayload`].

use std::fmt;

use metrics::counter;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::site::Site;

pub const METRIC_HOOK_RUNS: &str = "postpress_hook_runs_total";

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to encode payload entry `{key}`: {source}")]
    Payload {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("hook `{hook}` failed: {message}")]
    Failed { hook: &'static str, message: String },
}

impl HookError {
    pub fn failed(hook: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            hook,
            message: message.into(),
        }
    }
}

/// Mutable output mapping handed to templates after the pre-render phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderPayload {
    entries: Map<String, Value>,
}

impl RenderPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `value` and store it under `key`, replacing any previous entry.
    pub fn attach<T>(&mut self, key: &str, value: &T) -> Result<(), HookError>
    where
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_value(value).map_err(|source| HookError::Payload {
            key: key.to_string(),
            source,
        })?;

        if self.entries.insert(key.to_string(), encoded).is_some() {
            debug!(
                target = "application::hooks",
                key, "payload entry replaced"
            );
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

pub type PreRenderHook =
    Box<dyn Fn(&Site, &mut RenderPayload) -> Result<(), HookError> + Send + Sync>;

struct RegisteredHook {
    name: &'static str,
    hook: PreRenderHook,
}

#[derive(Default)]
pub struct PluginRegistry {
    pre_render: Vec<RegisteredHook>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_pre_render<F>(&mut self, name: &'static str, hook: F) -> &mut Self
    where
        F: Fn(&Site, &mut RenderPayload) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.pre_render.push(RegisteredHook {
            name,
            hook: Box::new(hook),
        });
        self
    }

    pub fn hook_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pre_render.iter().map(|entry| entry.name)
    }

    /// Run hooks in registration order. The first failure aborts the run and
    /// leaves whatever earlier hooks attached in place.
    pub fn run_pre_render(&self, site: &Site, payload: &mut RenderPayload) -> Result<(), HookError> {
        for entry in &self.pre_render {
            debug!(
                target = "application::hooks",
                hook = entry.name,
                posts = site.posts.len(),
                "running pre-render hook"
            );
            counter!(METRIC_HOOK_RUNS, "hook" => entry.name).increment(1);

            if let Err(err) = (entry.hook)(site, payload) {
                warn!(
                    target = "application::hooks",
                    hook = entry.name,
                    error = %err,
                    "pre-render hook failed"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("pre_render", &self.hook_names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn hooks_run_in_registration_order() {
        let mut registry = PluginRegistry::new();
        registry
            .register_pre_render("first", |_, payload| payload.attach("order", "first"))
            .register_pre_render("second", |_, payload| {
                let previous = payload.get("order").cloned().unwrap_or(Value::Null);
                payload.attach("order", &json!([previous, "second"]))
            });

        let mut payload = RenderPayload::new();
        registry
            .run_pre_render(&Site::default(), &mut payload)
            .expect("hooks succeed");

        assert_eq!(payload.get("order"), Some(&json!(["first", "second"])));
        assert_eq!(
            registry.hook_names().collect::<Vec<_>>(),
            vec!["first", "second"]
        );
    }

    #[test]
    fn failing_hook_stops_the_run() {
        let mut registry = PluginRegistry::new();
        registry
            .register_pre_render("broken", |_, _| Err(HookError::failed("broken", "boom")))
            .register_pre_render("never", |_, payload| payload.attach("never", &true));

        let mut payload = RenderPayload::new();
        let err = registry
            .run_pre_render(&Site::default(), &mut payload)
            .expect_err("first hook fails");

        assert!(matches!(err, HookError::Failed { hook: "broken", .. }));
        assert!(payload.is_empty());
    }

    #[test]
    fn payload_serializes_as_plain_object() {
        let mut payload = RenderPayload::new();
        payload.attach("count", &3).expect("encodable");

        assert_eq!(
            serde_json::to_value(&payload).expect("serializable"),
            json!({ "count": 3 })
        );
        assert_eq!(payload.into_value(), json!({ "count": 3 }));
    }
}
