//! Adapter that persists settings namespaces.
//!
//! Each namespace ("global", ...) is stored as one flat JSON object together
//! with the schema version it was written under.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// Persisted snapshot of one namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredNamespace {
	/// Schema version the values were written under
	pub version: Option<Box<str>>,
	pub values: serde_json::Map<String, serde_json::Value>,
	pub updated_at: Timestamp,
}

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Read a namespace. Returns None if it was never written.
	async fn read_namespace(&self, namespace: &str) -> ClResult<Option<StoredNamespace>>;

	/// Replace the stored snapshot of a namespace
	async fn update_namespace(&self, namespace: &str, data: &StoredNamespace) -> ClResult<()>;

	/// List the namespaces that have a stored snapshot
	async fn list_namespaces(&self) -> ClResult<Vec<Box<str>>>;
}

// vim: ts=4
