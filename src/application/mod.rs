//! Plugins the host pipeline invokes before rendering.

pub mod error;
pub mod hooks;
pub mod pinned;
pub mod render;
