//! Reusable field validators

use super::types::SettingValue;
use crate::prelude::*;

/// Accepts strings, integers and null
pub fn validate_string(value: &SettingValue) -> ClResult<()> {
	match value {
		SettingValue::String(_) | SettingValue::Int(_) | SettingValue::Null => Ok(()),
		v => Err(Error::ValidationError(format!("expected a string, got {}", v.type_name()))),
	}
}

/// Accepts a day of week, 0 (Sunday) to 6, as integer or numeric string
pub fn validate_weekday(value: &SettingValue) -> ClResult<()> {
	let day = match value {
		SettingValue::Int(i) => Some(*i),
		SettingValue::String(s) => s.trim().parse::<i64>().ok(),
		_ => None,
	};
	match day {
		Some(0..=6) => Ok(()),
		_ => Err(Error::ValidationError("expected a weekday between 0 and 6".into())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validate_string() {
		assert!(validate_string(&"Y-m-d".into()).is_ok());
		assert!(validate_string(&SettingValue::Int(0)).is_ok());
		assert!(validate_string(&SettingValue::Null).is_ok());
		assert!(validate_string(&SettingValue::Bool(true)).is_err());
		assert!(validate_string(&SettingValue::Json(serde_json::json!({"a": 1}))).is_err());
	}

	#[test]
	fn test_validate_weekday() {
		assert!(validate_weekday(&SettingValue::Int(0)).is_ok());
		assert!(validate_weekday(&SettingValue::Int(6)).is_ok());
		assert!(validate_weekday(&"1".into()).is_ok());
		assert!(validate_weekday(&SettingValue::Int(7)).is_err());
		assert!(validate_weekday(&SettingValue::Int(-1)).is_err());
		assert!(validate_weekday(&"monday".into()).is_err());
	}
}

// vim: ts=4
