//! Caller identity and capabilities.
//!
//! The host application authenticates the caller and hands over the capability
//! names it holds. The settings engine only asks whether a given capability is
//! present.

use serde::{Deserialize, Serialize};

/// Authenticated caller as seen by the settings engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
	pub id: Box<str>,
	pub capabilities: Box<[Box<str>]>,
	/// Internal callers (hooks, maintenance) hold every capability
	#[serde(default)]
	pub system: bool,
}

impl Auth {
	pub fn new<S: AsRef<str>>(id: impl Into<Box<str>>, capabilities: &[S]) -> Self {
		Self {
			id: id.into(),
			capabilities: capabilities.iter().map(|c| c.as_ref().into()).collect(),
			system: false,
		}
	}

	/// Caller without any capability
	pub fn anonymous() -> Self {
		Self { id: "anonymous".into(), capabilities: Box::default(), system: false }
	}

	/// Internal caller holding every capability
	pub fn system() -> Self {
		Self { id: "system".into(), capabilities: Box::default(), system: true }
	}

	pub fn has_capability(&self, capability: &str) -> bool {
		self.system || self.capabilities.iter().any(|c| c.as_ref() == capability)
	}
}


// vim: ts=4
