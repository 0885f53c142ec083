//! Shared types, collaborator traits, and core utilities for the scheduler settings engine.
//!
//! This crate contains the foundational types shared between the settings engine,
//! the namespaces built on it, and the persistence adapters. Keeping them here lets
//! adapter crates compile without pulling in the engine.

pub mod auth;
pub mod error;
pub mod host;
pub mod prelude;
pub mod settings_adapter;
pub mod types;
pub mod utils;

// vim: ts=4
