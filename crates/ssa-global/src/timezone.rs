//! Timezone identifier normalization

use ssa_core::timezone::ZoneDatabase;

use crate::prelude::*;

/// Legacy or ambiguous identifiers and the canonical identifier to store instead
pub const TIMEZONE_ALIASES: &[(&str, &str)] = &[("Europe/Kyiv", "Europe/Kiev")];

pub fn timezone_alias(timezone_string: &str) -> Option<&'static str> {
	TIMEZONE_ALIASES
		.iter()
		.find(|(alias, _)| *alias == timezone_string)
		.map(|(_, canonical)| *canonical)
}

/// Map an identifier the zone database rejects to its canonical alias.
///
/// Identifiers the database accepts and unknown identifiers without an alias
/// are returned unchanged.
pub fn maybe_map_timezone(timezone_string: &str, zones: &dyn ZoneDatabase) -> String {
	if zones.resolve(timezone_string).is_some() {
		return timezone_string.to_string();
	}

	match timezone_alias(timezone_string) {
		Some(canonical) => {
			debug!("Mapping timezone {} to {}", timezone_string, canonical);
			canonical.to_string()
		}
		None => timezone_string.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono_tz::Tz;
	use ssa_core::timezone::ChronoTzDatabase;

	struct NoZones;

	impl ZoneDatabase for NoZones {
		fn resolve(&self, _name: &str) -> Option<Tz> {
			None
		}
	}

	#[test]
	fn test_alias_lookup() {
		assert_eq!(timezone_alias("Europe/Kyiv"), Some("Europe/Kiev"));
		assert_eq!(timezone_alias("Europe/Kiev"), None);
	}

	#[test]
	fn test_valid_zone_is_unchanged() {
		assert_eq!(maybe_map_timezone("UTC", &ChronoTzDatabase), "UTC");
		assert_eq!(maybe_map_timezone("America/New_York", &ChronoTzDatabase), "America/New_York");
	}

	#[test]
	fn test_unknown_zone_without_alias_passes_through() {
		assert_eq!(maybe_map_timezone("Not/AZone", &ChronoTzDatabase), "Not/AZone");
		assert_eq!(maybe_map_timezone("", &ChronoTzDatabase), "");
	}

	#[test]
	fn test_rejected_zone_with_alias_is_mapped() {
		assert_eq!(maybe_map_timezone("Europe/Kyiv", &NoZones), "Europe/Kiev");
		assert_eq!(maybe_map_timezone("Not/AZone", &NoZones), "Not/AZone");
	}
}

// vim: ts=4
