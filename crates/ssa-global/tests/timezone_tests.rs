//! Timezone normalization on save and timezone accessors

mod common;

use std::sync::Arc;

use chrono_tz::Tz;
use ssa_core::settings::{MemorySettingsAdapter, NamespaceValues, SettingValue};
use ssa_core::timezone::ChronoTzDatabase;
use ssa_global::maybe_map_timezone;
use ssa_types::auth::Auth;
use ssa_types::error::Error;

use common::{LegacyZoneDatabase, TestHost, create_test_app, create_test_app_with, stored_global};

fn timezone_patch(tz: &str) -> NamespaceValues {
	let mut patch = NamespaceValues::new();
	patch.insert("timezone_string".into(), SettingValue::from(tz));
	patch
}

#[test]
fn test_maybe_map_timezone_on_legacy_database() {
	assert_eq!(maybe_map_timezone("Europe/Kyiv", &LegacyZoneDatabase), "Europe/Kiev");
	assert_eq!(maybe_map_timezone("UTC", &LegacyZoneDatabase), "UTC");
	assert_eq!(maybe_map_timezone("Not/AZone", &LegacyZoneDatabase), "Not/AZone");
}

#[test]
fn test_maybe_map_timezone_on_current_database() {
	// the bundled database knows the new name, so there is nothing to map
	assert_eq!(maybe_map_timezone("Europe/Kyiv", &ChronoTzDatabase), "Europe/Kyiv");
	assert_eq!(maybe_map_timezone("UTC", &ChronoTzDatabase), "UTC");
	assert_eq!(maybe_map_timezone("Not/AZone", &ChronoTzDatabase), "Not/AZone");
}

#[tokio::test]
async fn test_default_timezone_accessors() {
	let t = create_test_app();
	let tz = t.global.get_timezone_string(&t.app.settings).await.unwrap();
	assert_eq!(tz, "Europe/Budapest");
	let zone = t.global.get_datetimezone(&t.app.settings).await.unwrap();
	assert_eq!(zone, Tz::Europe__Budapest);
}

#[tokio::test]
async fn test_alias_is_applied_on_save() {
	let t = create_test_app_with(
		TestHost::default(),
		Arc::new(LegacyZoneDatabase),
		MemorySettingsAdapter::new(),
	);
	let global =
		t.app.settings.update("global", timezone_patch("Europe/Kyiv"), &Auth::system()).await.unwrap();
	assert_eq!(global["timezone_string"], SettingValue::from("Europe/Kiev"));

	let tz = t.global.get_timezone_string(&t.app.settings).await.unwrap();
	assert_eq!(tz, "Europe/Kiev");
	let zone = t.global.get_datetimezone(&t.app.settings).await.unwrap();
	assert_eq!(Some(zone), "Europe/Kiev".parse::<Tz>().ok());
}

#[tokio::test]
async fn test_unknown_timezone_is_saved_as_is() {
	let t = create_test_app();
	let global =
		t.app.settings.update("global", timezone_patch("Not/AZone"), &Auth::system()).await.unwrap();
	assert_eq!(global["timezone_string"], SettingValue::from("Not/AZone"));

	// read side is strict: no mapping, the bad identifier is an error
	let res = t.global.get_datetimezone(&t.app.settings).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_stored_alias_is_not_remapped_on_read() {
	let adapter = MemorySettingsAdapter::with_namespace(
		"global",
		stored_global(serde_json::json!({ "timezone_string": "Europe/Kyiv" })),
	);
	let t = create_test_app_with(TestHost::default(), Arc::new(LegacyZoneDatabase), adapter);
	let tz = t.global.get_timezone_string(&t.app.settings).await.unwrap();
	assert_eq!(tz, "Europe/Kyiv");
	assert!(t.global.get_datetimezone(&t.app.settings).await.is_err());
}

#[tokio::test]
async fn test_non_string_timezone_is_rejected() {
	let t = create_test_app();
	let mut patch = NamespaceValues::new();
	patch.insert("timezone_string".into(), SettingValue::Bool(true));
	let res = t.app.settings.update("global", patch, &Auth::system()).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

// vim: ts=4
