//! Test host, zone database and app builders shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono_tz::Tz;
use ssa_core::app::{App, AppBuilder};
use ssa_core::settings::MemorySettingsAdapter;
use ssa_core::timezone::{ChronoTzDatabase, ZoneDatabase};
use ssa_global::GlobalSettings;
use ssa_types::host::HostEnvironment;
use ssa_types::settings_adapter::StoredNamespace;

/// Common test setup helper
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// Host whose site options are fixed by the test
#[derive(Debug, Clone)]
pub struct TestHost {
	pub timezone_string: Option<String>,
	pub start_of_week: Option<serde_json::Value>,
	pub date_format: String,
	pub time_format: String,
	pub admin_email: String,
	pub user: Option<String>,
	pub site_title: String,
	pub locale: String,
}

impl Default for TestHost {
	fn default() -> Self {
		Self {
			timezone_string: Some("Europe/Budapest".into()),
			start_of_week: Some(serde_json::json!(0)),
			date_format: "Y-m-d".into(),
			time_format: "H:i".into(),
			admin_email: "admin@example.com".into(),
			user: Some("Jane Doe".into()),
			site_title: "Sunrise Dental".into(),
			locale: "hu_HU".into(),
		}
	}
}

impl HostEnvironment for TestHost {
	fn option(&self, name: &str) -> Option<serde_json::Value> {
		match name {
			"timezone_string" => self.timezone_string.clone().map(Into::into),
			"start_of_week" => self.start_of_week.clone(),
			"date_format" => Some(self.date_format.clone().into()),
			"time_format" => Some(self.time_format.clone().into()),
			"admin_email" => Some(self.admin_email.clone().into()),
			_ => None,
		}
	}

	fn current_user_display_name(&self) -> Option<String> {
		self.user.clone()
	}

	fn site_title(&self) -> String {
		self.site_title.clone()
	}

	fn locale(&self) -> String {
		self.locale.clone()
	}

	fn site_secret(&self) -> String {
		"test-secret".into()
	}
}

/// Zone database that predates the Europe/Kiev -> Europe/Kyiv rename
pub struct LegacyZoneDatabase;

impl ZoneDatabase for LegacyZoneDatabase {
	fn resolve(&self, name: &str) -> Option<Tz> {
		if name == "Europe/Kyiv" {
			return None;
		}
		ChronoTzDatabase.resolve(name)
	}
}

pub struct TestApp {
	pub app: App,
	pub global: Arc<GlobalSettings>,
	pub adapter: Arc<MemorySettingsAdapter>,
}

pub fn create_test_app_with(
	host: TestHost,
	zones: Arc<dyn ZoneDatabase>,
	adapter: MemorySettingsAdapter,
) -> TestApp {
	setup_test_logging();
	let adapter = Arc::new(adapter);
	let mut builder = AppBuilder::new(Arc::new(host), adapter.clone());
	let global = ssa_global::register(&mut builder, zones).expect("Failed to register global");
	let app = builder.build().expect("Failed to build app");
	TestApp { app, global, adapter }
}

pub fn create_test_app() -> TestApp {
	create_test_app_with(TestHost::default(), Arc::new(ChronoTzDatabase), MemorySettingsAdapter::new())
}

/// Stored global namespace holding the given values
pub fn stored_global(values: serde_json::Value) -> StoredNamespace {
	StoredNamespace {
		version: Some("2024-02-09".into()),
		values: values.as_object().cloned().unwrap_or_default(),
		updated_at: ssa_types::types::now(),
	}
}

// vim: ts=4
