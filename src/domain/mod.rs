//! Domain types shared by every plugin.

pub mod posts;
pub mod site;
