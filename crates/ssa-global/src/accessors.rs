//! Timezone and date-format accessors of the global namespace

use chrono_tz::Tz;

use ssa_core::format::{moment_to_php_format, php_to_moment_format};
use ssa_core::settings::SettingsService;

use crate::prelude::*;
use crate::schema::{GLOBAL_SLUG, GlobalSettings};

/// Arguments of the date-format helpers. Missing keys fall back to their
/// defaults and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFormatArgs {
	pub time_format: String,
}

/// Scalar argument as text: numbers keep their digits, `true` is "1", `false` and null are empty
fn scalar_arg(value: &serde_json::Value) -> Option<String> {
	match value {
		serde_json::Value::String(s) => Some(s.clone()),
		serde_json::Value::Number(n) => Some(n.to_string()),
		serde_json::Value::Bool(true) => Some("1".into()),
		serde_json::Value::Bool(false) | serde_json::Value::Null => Some(String::new()),
		serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
	}
}

impl DateFormatArgs {
	pub fn from_value(args: &serde_json::Value) -> Self {
		let mut parsed = Self::default();
		if let Some(value) = args.get("time_format") {
			match scalar_arg(value) {
				Some(time_format) => parsed.time_format = time_format,
				None => debug!("Ignoring non-scalar time_format argument: {}", value),
			}
		}
		parsed
	}
}

impl GlobalSettings {
	/// Persisted timezone identifier, as stored
	pub async fn get_timezone_string(&self, settings: &SettingsService) -> ClResult<String> {
		let value = settings.get_field(GLOBAL_SLUG, "timezone_string", &Auth::system()).await?;
		match value.as_str() {
			Some(tz) => Ok(tz.to_string()),
			None => Err(Error::ValidationError(format!(
				"timezone_string is not a string, got {}",
				value.type_name()
			))),
		}
	}

	/// Persisted timezone as a zone. An identifier the zone database rejects is
	/// an error here; aliases are only applied when saving.
	pub async fn get_datetimezone(&self, settings: &SettingsService) -> ClResult<Tz> {
		let timezone_string = self.get_timezone_string(settings).await?;
		self.zones().resolve(&timezone_string).ok_or_else(|| {
			Error::ValidationError(format!("Unknown timezone: {}", timezone_string))
		})
	}

	/// moment.js rendering of the PHP format in `args.time_format`
	pub fn get_date_format_moment(args: &serde_json::Value) -> String {
		php_to_moment_format(&DateFormatArgs::from_value(args).time_format)
	}

	/// PHP rendering of the moment.js format in `args.time_format`
	pub fn set_date_format_moment(args: &serde_json::Value) -> String {
		moment_to_php_format(&DateFormatArgs::from_value(args).time_format)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_args_defaults_and_unknown_keys() {
		assert_eq!(DateFormatArgs::from_value(&json!({})), DateFormatArgs::default());
		assert_eq!(
			DateFormatArgs::from_value(&json!({"time_format": "g:i a", "other": 1})).time_format,
			"g:i a"
		);
		assert_eq!(DateFormatArgs::from_value(&json!("garbage")), DateFormatArgs::default());
	}

	#[test]
	fn test_scalar_time_format_is_kept() {
		let args = json!({"time_format": 5, "extra": [1, 2]});
		assert_eq!(DateFormatArgs::from_value(&args).time_format, "5");
		assert_eq!(GlobalSettings::get_date_format_moment(&args), "5");
		assert_eq!(DateFormatArgs::from_value(&json!({"time_format": true})).time_format, "1");
		assert_eq!(DateFormatArgs::from_value(&json!({"time_format": null})).time_format, "");
		assert_eq!(DateFormatArgs::from_value(&json!({"time_format": ["H"]})).time_format, "");
	}

	#[test]
	fn test_date_format_helpers() {
		assert_eq!(GlobalSettings::get_date_format_moment(&json!({"time_format": "g:i a"})), "h:mm a");
		assert_eq!(GlobalSettings::set_date_format_moment(&json!({"time_format": "h:mm a"})), "g:i a");
		assert_eq!(GlobalSettings::get_date_format_moment(&json!({})), "");
	}
}

// vim: ts=4
