//! Pre-render plugins for static blogs.
//!
//! Two independent pieces are exposed to the host build:
//! [`application::pinned`] orders posts pinned-first, and
//! [`application::render`] highlights code blocks and wraps them in the table
//! scaffold the site's stylesheets expect. Hooks are registered explicitly
//! through [`application::hooks::PluginRegistry`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
