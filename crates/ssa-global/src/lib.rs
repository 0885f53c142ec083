//! Global settings namespace of the appointment scheduler.
//!
//! Declares the "global" field and computed schemas, normalizes timezone
//! identifiers on save, stamps the setup wizard as completed once the first
//! appointment type exists, and offers timezone/date-format accessors.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod accessors;
pub mod prelude;
pub mod schema;
pub mod timezone;
pub mod wizard;

use std::sync::Arc;

use ssa_core::app::AppBuilder;
use ssa_core::events::APPOINTMENT_TYPE_AFTER_INSERT;
use ssa_core::timezone::ZoneDatabase;

use crate::prelude::*;

pub use accessors::DateFormatArgs;
pub use schema::{GLOBAL_SLUG, GlobalSettings};
pub use timezone::{TIMEZONE_ALIASES, maybe_map_timezone};

/// Register the global namespace, its hooks, and publish it as an app extension
pub fn register(
	builder: &mut AppBuilder,
	zones: Arc<dyn ZoneDatabase>,
) -> ClResult<Arc<GlobalSettings>> {
	let global = Arc::new(GlobalSettings::new(builder.host().clone(), zones));
	builder.register_settings(global.clone())?;
	builder.subscribe(
		APPOINTMENT_TYPE_AFTER_INSERT,
		"global.maybe_mark_wizard_step_as_completed",
		wizard::WIZARD_HOOK_PRIORITY,
		wizard::wizard_completed_hook(),
	);
	builder.extension(global.clone());
	Ok(global)
}

// vim: ts=4
