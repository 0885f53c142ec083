//! Global settings schema
//!
//! Host-dependent defaults (site timezone, week start, date/time formats, admin
//! contact, current user, site title) are read once, when the schema is first
//! built, and kept for the lifetime of the namespace.

use std::sync::Arc;

use ssa_core::format::php_to_moment_format;
use ssa_core::settings::validation::{validate_string, validate_weekday};
use ssa_core::settings::{
	ComputedFieldDefinition, ComputedSchema, FieldDefinition, Memoized, Schema, SettingValue,
	SettingsSchema,
};
use ssa_core::timezone::ZoneDatabase;
use ssa_types::host::HostEnvironment;
use ssa_types::utils::site_unique_hash;

use crate::prelude::*;
use crate::timezone::maybe_map_timezone;

pub const GLOBAL_SLUG: &str = "global";

/// Field schema version. Bump whenever the field table changes.
pub const SCHEMA_VERSION: &str = "2024-02-09";

/// Computed schema version. Bump whenever the computed table changes.
pub const COMPUTED_SCHEMA_VERSION: &str = "2023-02-20";

pub const CAP_MANAGE_SITE_SETTINGS: &str = "ssa_manage_site_settings";
pub const CAP_MANAGE_OTHERS_APPOINTMENTS: &str = "ssa_manage_others_appointments";

pub const FALLBACK_TIMEZONE: &str = "UTC";
pub const FALLBACK_START_OF_WEEK: i64 = 1;

pub struct GlobalSettings {
	host: Arc<dyn HostEnvironment>,
	zones: Arc<dyn ZoneDatabase>,
	schema: Memoized<Schema>,
	computed_schema: Memoized<ComputedSchema>,
}

impl GlobalSettings {
	pub fn new(host: Arc<dyn HostEnvironment>, zones: Arc<dyn ZoneDatabase>) -> Self {
		Self { host, zones, schema: Memoized::new(), computed_schema: Memoized::new() }
	}

	pub fn zones(&self) -> &Arc<dyn ZoneDatabase> {
		&self.zones
	}

	fn host_option(&self, name: &str) -> SettingValue {
		self.host.option(name).map_or(SettingValue::Null, SettingValue::from)
	}

	fn default_timezone(&self) -> String {
		self.host
			.option_str("timezone_string")
			.filter(|tz| !tz.is_empty())
			.unwrap_or_else(|| FALLBACK_TIMEZONE.to_string())
	}

	fn build_schema(&self) -> ClResult<Schema> {
		debug!("Building {} settings schema {}", GLOBAL_SLUG, SCHEMA_VERSION);
		let zones = self.zones.clone();
		let start_of_week = match self.host_option("start_of_week") {
			SettingValue::Null => SettingValue::Int(FALLBACK_START_OF_WEEK),
			value => value,
		};

		Schema::builder(SCHEMA_VERSION)
			.field(FieldDefinition::builder("enabled").default(true).build()?)
			.field(
				FieldDefinition::builder("wizard_completed")
					.default("")
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("timezone_string")
					.default(self.default_timezone())
					.validator(validate_string)
					.before_save(move |value| match value {
						SettingValue::String(tz) => {
							SettingValue::String(maybe_map_timezone(&tz, zones.as_ref()))
						}
						value => value,
					})
					.build()?,
			)
			.field(
				FieldDefinition::builder("country_code")
					.default("")
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("start_of_week")
					.default(start_of_week)
					.validator(validate_weekday)
					.build()?,
			)
			.field(
				FieldDefinition::builder("date_format")
					.default(self.host_option("date_format"))
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("time_format")
					.default(self.host_option("time_format"))
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("admin_email")
					.default(self.host_option("admin_email"))
					.validator(validate_string)
					.required_capability(CAP_MANAGE_SITE_SETTINGS)
					.build()?,
			)
			.field(
				FieldDefinition::builder("admin_phone")
					.default(self.host_option("admin_phone"))
					.validator(validate_string)
					.required_capability(CAP_MANAGE_SITE_SETTINGS)
					.build()?,
			)
			.field(
				FieldDefinition::builder("staff_name")
					.default(self.host.current_user_display_name().unwrap_or_default())
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("company_name")
					.default(self.host.site_title())
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("last_updated")
					.default(SettingValue::Null)
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("booking_post_id")
					.default("")
					.validator(validate_string)
					.build()?,
			)
			.field(
				FieldDefinition::builder("edit_appointment_page_id")
					.default(0)
					.validator(validate_string)
					.build()?,
			)
			.field(FieldDefinition::builder("should_display_new_booking_app_banner").default("").build()?)
			.build()
	}

	fn build_computed_schema(&self) -> ClResult<ComputedSchema> {
		debug!("Building {} computed schema {}", GLOBAL_SLUG, COMPUTED_SCHEMA_VERSION);
		let site_secret = self.host.site_secret();
		let host = self.host.clone();

		// No set path: the moment variants are derived from the PHP formats only
		ComputedSchema::builder(COMPUTED_SCHEMA_VERSION)
			.field(
				ComputedFieldDefinition::builder("date_format_moment", moment_format)
					.input_path("date_format")
					.build()?,
			)
			.field(
				ComputedFieldDefinition::builder("time_format_moment", moment_format)
					.input_path("time_format")
					.build()?,
			)
			.field(
				ComputedFieldDefinition::builder("public_read_access_token", move |input| {
					Ok(site_unique_hash(&site_secret, input.as_str().unwrap_or_default()).into())
				})
				.input("public_read_access_token")
				.required_capability(CAP_MANAGE_OTHERS_APPOINTMENTS)
				.build()?,
			)
			.field(
				ComputedFieldDefinition::builder("locale", move |_| Ok(host.locale().into()))
					.input(true)
					.build()?,
			)
			.build()
	}
}

fn moment_format(input: &SettingValue) -> ClResult<SettingValue> {
	Ok(php_to_moment_format(input.as_str().unwrap_or_default()).into())
}

impl SettingsSchema for GlobalSettings {
	fn slug(&self) -> &str {
		GLOBAL_SLUG
	}

	fn schema(&self) -> ClResult<&Schema> {
		self.schema.get_or_try_init(|| self.build_schema())
	}

	fn computed_schema(&self) -> ClResult<&ComputedSchema> {
		self.computed_schema.get_or_try_init(|| self.build_computed_schema())
	}
}

// vim: ts=4
