//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod posts;
pub mod telemetry;
