//! Error type shared by every crate of the settings engine.

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	DbError,
	Parse,
	ValidationError(String),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::debug!("JSON error: {}", err);
		Self::Parse
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_includes_message() {
		let err = Error::ValidationError("start_of_week must be a weekday".into());
		assert_eq!(err.to_string(), "validation error: start_of_week must be a weekday");
		assert_eq!(Error::PermissionDenied.to_string(), "permission denied");
	}

	#[test]
	fn test_io_error_has_source() {
		let err: Error = std::io::Error::other("disk gone").into();
		assert!(std::error::Error::source(&err).is_some());
		assert!(std::error::Error::source(&Error::NotFound).is_none());
	}
}

// vim: ts=4
