//! In-memory settings adapter
//!
//! Keeps namespaces for the lifetime of the process. Used by tests and by
//! hosts that embed the engine without durable storage.

use async_trait::async_trait;
use std::collections::HashMap;

use ssa_types::settings_adapter::{SettingsAdapter, StoredNamespace};

use crate::prelude::*;

#[derive(Debug, Default)]
pub struct MemorySettingsAdapter {
	namespaces: parking_lot::RwLock<HashMap<Box<str>, StoredNamespace>>,
}

impl MemorySettingsAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an adapter pre-populated with one stored namespace
	pub fn with_namespace(namespace: &str, data: StoredNamespace) -> Self {
		let adapter = Self::new();
		adapter.namespaces.write().insert(namespace.into(), data);
		adapter
	}
}

#[async_trait]
impl SettingsAdapter for MemorySettingsAdapter {
	async fn read_namespace(&self, namespace: &str) -> ClResult<Option<StoredNamespace>> {
		Ok(self.namespaces.read().get(namespace).cloned())
	}

	async fn update_namespace(&self, namespace: &str, data: &StoredNamespace) -> ClResult<()> {
		self.namespaces.write().insert(namespace.into(), data.clone());
		Ok(())
	}

	async fn list_namespaces(&self) -> ClResult<Vec<Box<str>>> {
		let mut names: Vec<Box<str>> = self.namespaces.read().keys().cloned().collect();
		names.sort();
		Ok(names)
	}
}

// vim: ts=4
