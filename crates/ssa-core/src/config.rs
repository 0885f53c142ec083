//! Host configuration loaded from environment variables
//!
//! Stands in for the host application's site options when the engine runs
//! outside of it. Every variable is optional.

use std::env;
use std::path::PathBuf;

use ssa_types::host::HostEnvironment;

use crate::prelude::*;

pub const DEFAULT_DATE_FORMAT: &str = "F j, Y";
pub const DEFAULT_TIME_FORMAT: &str = "g:i a";
pub const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Clone)]
pub struct HostConfig {
	pub timezone_string: Option<String>,
	pub start_of_week: Option<i64>,
	pub date_format: String,
	pub time_format: String,
	pub admin_email: Option<String>,
	pub admin_phone: Option<String>,
	pub site_title: String,
	pub locale: String,
	pub user_display_name: Option<String>,
	pub site_secret: String,
	pub db_dir: PathBuf,
}

impl Default for HostConfig {
	fn default() -> Self {
		Self {
			timezone_string: None,
			start_of_week: None,
			date_format: DEFAULT_DATE_FORMAT.into(),
			time_format: DEFAULT_TIME_FORMAT.into(),
			admin_email: None,
			admin_phone: None,
			site_title: String::new(),
			locale: DEFAULT_LOCALE.into(),
			user_display_name: None,
			site_secret: String::new(),
			db_dir: PathBuf::from("./data"),
		}
	}
}

impl HostConfig {
	/// Load configuration from `SSA_*` environment variables
	pub fn from_env() -> Self {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Load configuration through an arbitrary variable lookup
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let defaults = Self::default();
		let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

		let start_of_week = var("SSA_START_OF_WEEK").and_then(|v| match v.trim().parse::<i64>() {
			Ok(day) => Some(day),
			Err(_) => {
				warn!("Ignoring invalid SSA_START_OF_WEEK: {}", v);
				None
			}
		});

		let site_secret = var("SSA_SITE_SECRET").unwrap_or_else(|| {
			warn!("SSA_SITE_SECRET is not set, site tokens are predictable");
			String::new()
		});

		Self {
			timezone_string: var("SSA_TIMEZONE"),
			start_of_week,
			date_format: var("SSA_DATE_FORMAT").unwrap_or(defaults.date_format),
			time_format: var("SSA_TIME_FORMAT").unwrap_or(defaults.time_format),
			admin_email: var("SSA_ADMIN_EMAIL"),
			admin_phone: var("SSA_ADMIN_PHONE"),
			site_title: var("SSA_SITE_TITLE").unwrap_or(defaults.site_title),
			locale: var("SSA_LOCALE").unwrap_or(defaults.locale),
			user_display_name: var("SSA_USER_DISPLAY_NAME"),
			site_secret,
			db_dir: var("SSA_DB_DIR").map_or(defaults.db_dir, PathBuf::from),
		}
	}
}

impl HostEnvironment for HostConfig {
	fn option(&self, name: &str) -> Option<serde_json::Value> {
		let string = |s: &Option<String>| s.clone().map(serde_json::Value::String);
		match name {
			"timezone_string" => string(&self.timezone_string),
			"start_of_week" => self.start_of_week.map(serde_json::Value::from),
			"date_format" => Some(self.date_format.clone().into()),
			"time_format" => Some(self.time_format.clone().into()),
			"admin_email" => string(&self.admin_email),
			"admin_phone" => string(&self.admin_phone),
			"blogname" => Some(self.site_title.clone().into()),
			_ => None,
		}
	}

	fn current_user_display_name(&self) -> Option<String> {
		self.user_display_name.clone()
	}

	fn site_title(&self) -> String {
		self.site_title.clone()
	}

	fn locale(&self) -> String {
		self.locale.clone()
	}

	fn site_secret(&self) -> String {
		self.site_secret.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> HostConfig {
		let vars: HashMap<String, String> =
			vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
		HostConfig::from_lookup(|name| vars.get(name).cloned())
	}

	#[test]
	fn test_defaults_when_unset() {
		let config = lookup(&[]);
		assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
		assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
		assert_eq!(config.locale, DEFAULT_LOCALE);
		assert!(config.timezone_string.is_none());
		assert!(config.option("timezone_string").is_none());
		assert_eq!(config.db_dir, PathBuf::from("./data"));
	}

	#[test]
	fn test_reads_variables() {
		let config = lookup(&[
			("SSA_TIMEZONE", "Europe/Budapest"),
			("SSA_START_OF_WEEK", "0"),
			("SSA_DATE_FORMAT", "Y-m-d"),
			("SSA_SITE_TITLE", "Dental Clinic"),
			("SSA_ADMIN_EMAIL", "admin@example.com"),
		]);
		assert_eq!(config.option_str("timezone_string").as_deref(), Some("Europe/Budapest"));
		assert_eq!(config.option("start_of_week"), Some(serde_json::json!(0)));
		assert_eq!(config.option_str("date_format").as_deref(), Some("Y-m-d"));
		assert_eq!(config.site_title(), "Dental Clinic");
		assert_eq!(config.option_str("admin_email").as_deref(), Some("admin@example.com"));
		assert!(config.option("admin_phone").is_none());
	}

	#[test]
	fn test_empty_and_invalid_values_are_ignored() {
		let config = lookup(&[("SSA_TIMEZONE", ""), ("SSA_START_OF_WEEK", "monday")]);
		assert!(config.timezone_string.is_none());
		assert!(config.start_of_week.is_none());
	}
}

// vim: ts=4
