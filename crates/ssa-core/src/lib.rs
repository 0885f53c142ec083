//! Settings engine for the appointment scheduler.
//!
//! Namespaces declare a versioned schema of fields (defaults, validators,
//! capability requirements, before-save transforms) and a schema of read-only
//! computed fields. The engine merges stored values over defaults, resolves
//! computed fields, gates fields by capability and persists through a
//! [`ssa_types::settings_adapter::SettingsAdapter`].

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod events;
pub mod extensions;
pub mod format;
pub mod prelude;
pub mod settings;
pub mod timezone;

// Re-export commonly used types
pub use app::{App, AppBuilder, AppState};
pub use config::HostConfig;
pub use events::{EntityEvent, EventBus, EventRegistry};
pub use timezone::{ChronoTzDatabase, ZoneDatabase};

// vim: ts=4
