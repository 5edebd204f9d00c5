/// errno helpers.
pub mod common;

/// Tracing layer.
pub mod trace;

/// Process-wide entry points.
pub mod facade;
