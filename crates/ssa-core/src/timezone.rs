//! Timezone database collaborator

use chrono_tz::Tz;

/// Resolves timezone identifiers to zones
pub trait ZoneDatabase: Send + Sync {
	/// Construct the zone named `name`, or None if the database does not know it
	fn resolve(&self, name: &str) -> Option<Tz>;
}

/// IANA database bundled with `chrono-tz`
#[derive(Debug, Default, Clone, Copy)]
pub struct ChronoTzDatabase;

impl ZoneDatabase for ChronoTzDatabase {
	fn resolve(&self, name: &str) -> Option<Tz> {
		name.parse::<Tz>().ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolves_known_zones() {
		let db = ChronoTzDatabase;
		assert_eq!(db.resolve("UTC"), Some(Tz::UTC));
		assert_eq!(db.resolve("Europe/Budapest"), Some(Tz::Europe__Budapest));
		assert!(db.resolve("Europe/Kiev").is_some());
	}

	#[test]
	fn test_rejects_unknown_zones() {
		let db = ChronoTzDatabase;
		assert!(db.resolve("Not/AZone").is_none());
		assert!(db.resolve("").is_none());
	}
}

// vim: ts=4
