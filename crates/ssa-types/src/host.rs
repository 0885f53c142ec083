//! Host environment collaborator
//!
//! Site-wide configuration owned by the host application. Namespaces read it
//! once, while building their schema, to seed default values.

/// Read-only view of the host application's site configuration
pub trait HostEnvironment: Send + Sync {
	/// Site option by name (e.g. `timezone_string`, `date_format`, `admin_email`).
	/// Returns None when the option is not set.
	fn option(&self, name: &str) -> Option<serde_json::Value>;

	/// Display name of the user on whose behalf the request runs
	fn current_user_display_name(&self) -> Option<String>;

	/// Title of the site
	fn site_title(&self) -> String;

	/// Locale identifier (e.g. "en_US")
	fn locale(&self) -> String;

	/// Site-unique secret used to derive stable per-site tokens
	fn site_secret(&self) -> String;

	/// Site option as a string, treating non-string scalars as their textual form
	fn option_str(&self, name: &str) -> Option<String> {
		match self.option(name)? {
			serde_json::Value::String(s) => Some(s),
			serde_json::Value::Number(n) => Some(n.to_string()),
			serde_json::Value::Bool(b) => Some(b.to_string()),
			_ => None,
		}
	}
}

// vim: ts=4
