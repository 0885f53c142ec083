//! Setup wizard completion
//!
//! The wizard counts as completed once the first appointment type exists.
//! The marker is written once; later appointment types leave it untouched.
//! The read-modify-write is not atomic, concurrent inserts may both write.

use std::sync::Arc;

use ssa_core::events::{BoxFuture, EntityEvent, EventHandler};
use ssa_core::settings::{NamespaceValues, SettingValue};

use crate::prelude::*;
use crate::schema::GLOBAL_SLUG;

/// Runs after the default-priority subscribers
pub const WIZARD_HOOK_PRIORITY: i32 = 1000;

pub const WIZARD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stamp `wizard_completed` with the current local time if it is empty.
/// Returns true if the marker was written.
pub async fn maybe_mark_wizard_step_as_completed(app: &App, event: &EntityEvent) -> ClResult<bool> {
	let auth = Auth::system();
	let global = app.settings.get_namespace(GLOBAL_SLUG, &auth).await?;
	if global.get("wizard_completed").is_some_and(|v| !v.is_empty()) {
		return Ok(false);
	}

	let completed_at = chrono::Local::now().format(WIZARD_TIMESTAMP_FORMAT).to_string();
	let mut patch = NamespaceValues::new();
	patch.insert("wizard_completed".into(), SettingValue::String(completed_at.clone()));
	app.settings.update(GLOBAL_SLUG, patch, &auth).await?;

	info!("Setup wizard completed at {} (appointment type {})", completed_at, event.id);
	Ok(true)
}

/// Event handler wrapping [`maybe_mark_wizard_step_as_completed`]
pub fn wizard_completed_hook() -> EventHandler {
	Arc::new(|app: App, event: EntityEvent| -> BoxFuture<'static, ClResult<()>> {
		Box::pin(async move {
			maybe_mark_wizard_step_as_completed(&app, &event).await?;
			Ok(())
		})
	})
}

// vim: ts=4
