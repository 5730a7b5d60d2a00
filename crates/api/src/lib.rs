//! jotter web server library.
//!
//! Exposes the building blocks (config, state, components, views, routes)
//! so integration tests and the binary entrypoint can both access them.

pub mod actions;
pub mod cache;
pub mod config;
pub mod editor;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod sidebar;
pub mod state;
pub mod views;
