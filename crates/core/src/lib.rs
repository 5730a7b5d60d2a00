//! Shared building blocks for jotter.
//!
//! Everything here is free of I/O so the data layer, the web server and
//! their tests can depend on it without pulling in a runtime.

pub mod error;
pub mod folder;
pub mod markup;
pub mod route;
pub mod text;
pub mod types;
