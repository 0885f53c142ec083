//! Settings service with caching, validation, and capability checks

use lru::LruCache;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use ssa_types::settings_adapter::{SettingsAdapter, StoredNamespace};

use super::types::{
	ComputedInput, ComputedSchema, FrozenSettingsRegistry, NamespaceValues, Schema, SettingValue,
	SettingsSchema,
};
use crate::prelude::*;

/// LRU cache of merged (stored + default) namespace values
pub struct SettingsCache {
	cache: Arc<parking_lot::RwLock<LruCache<Box<str>, NamespaceValues>>>,
}

impl SettingsCache {
	pub fn new(capacity: usize) -> Self {
		let non_zero = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		Self { cache: Arc::new(parking_lot::RwLock::new(LruCache::new(non_zero))) }
	}

	pub fn get(&self, namespace: &str) -> Option<NamespaceValues> {
		let mut cache = self.cache.write();
		cache.get(namespace).cloned()
	}

	pub fn put(&self, namespace: &str, values: NamespaceValues) {
		let mut cache = self.cache.write();
		cache.put(namespace.into(), values);
	}

	pub fn invalidate(&self, namespace: &str) {
		let mut cache = self.cache.write();
		cache.pop(namespace);
	}
}

/// Merge a stored snapshot over the schema defaults.
/// Stored values of fields the schema no longer declares are dropped.
fn merge_stored(slug: &str, schema: &Schema, stored: Option<&StoredNamespace>) -> NamespaceValues {
	let mut values = schema.defaults();
	let Some(stored) = stored else {
		return values;
	};

	if stored.version.as_deref().is_none_or(|version| version < &*schema.version) {
		debug!(
			"Settings namespace '{}' stored under schema {:?}, upgrading to {}",
			slug, stored.version, schema.version
		);
	}

	for (name, value) in &stored.values {
		if schema.field(name).is_some() {
			values.insert(name.as_str().into(), SettingValue::from(value.clone()));
		} else {
			debug!("Dropping stored value of undeclared field '{}.{}'", slug, name);
		}
	}
	values
}

/// Add computed fields to already resolved values.
/// A failing compute function yields null rather than failing the read.
fn resolve_computed(slug: &str, computed: &ComputedSchema, values: &mut NamespaceValues) {
	for def in computed.fields() {
		let input = match &def.input {
			ComputedInput::Path(path) => values.get(path).cloned().unwrap_or(SettingValue::Null),
			ComputedInput::Value(value) => value.clone(),
		};
		let value = (def.compute)(&input).unwrap_or_else(|err| {
			warn!("Computed field '{}.{}' failed: {}", slug, def.name, err);
			SettingValue::Null
		});
		values.insert(def.name.clone(), value);
	}
}

/// Withhold fields the caller lacks the capability for
fn redact(schema: &Schema, computed: &ComputedSchema, values: &mut NamespaceValues, auth: &Auth) {
	let withheld = schema
		.fields()
		.filter_map(|def| def.required_capability.as_deref().map(|cap| (&def.name, cap)))
		.chain(
			computed
				.fields()
				.filter_map(|def| def.required_capability.as_deref().map(|cap| (&def.name, cap))),
		)
		.filter(|(_, cap)| !auth.has_capability(cap));

	for (name, _) in withheld {
		values.remove(name);
	}
}

/// Settings service - main interface for reading and saving settings
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	cache: SettingsCache,
	adapter: Arc<dyn SettingsAdapter>,
}

impl SettingsService {
	pub fn new(
		registry: Arc<FrozenSettingsRegistry>,
		adapter: Arc<dyn SettingsAdapter>,
		cache_size: usize,
	) -> Self {
		Self { registry, cache: SettingsCache::new(cache_size), adapter }
	}

	fn namespace(&self, slug: &str) -> ClResult<&Arc<dyn SettingsSchema>> {
		self.registry.get(slug).ok_or_else(|| {
			debug!("Unknown settings namespace: {}", slug);
			Error::NotFound
		})
	}

	/// Stored values merged over defaults, without computed fields or redaction
	async fn load(&self, namespace: &dyn SettingsSchema) -> ClResult<NamespaceValues> {
		let slug = namespace.slug();
		if let Some(values) = self.cache.get(slug) {
			debug!("Settings cache hit: {}", slug);
			return Ok(values);
		}

		let schema = namespace.schema()?;
		let stored = self.adapter.read_namespace(slug).await?;
		let values = merge_stored(slug, schema, stored.as_ref());
		self.cache.put(slug, values.clone());
		Ok(values)
	}

	fn present(
		namespace: &dyn SettingsSchema,
		mut values: NamespaceValues,
		auth: &Auth,
	) -> ClResult<NamespaceValues> {
		let schema = namespace.schema()?;
		let computed = namespace.computed_schema()?;
		resolve_computed(namespace.slug(), computed, &mut values);
		redact(schema, computed, &mut values, auth);
		Ok(values)
	}

	/// Get every namespace as seen by the caller
	pub async fn get(&self, auth: &Auth) -> ClResult<BTreeMap<Box<str>, NamespaceValues>> {
		let mut result = BTreeMap::new();
		for namespace in self.registry.list() {
			let values = self.load(namespace.as_ref()).await?;
			let values = Self::present(namespace.as_ref(), values, auth)?;
			result.insert(namespace.slug().into(), values);
		}
		Ok(result)
	}

	/// Get one namespace as seen by the caller
	pub async fn get_namespace(&self, slug: &str, auth: &Auth) -> ClResult<NamespaceValues> {
		let namespace = self.namespace(slug)?;
		let values = self.load(namespace.as_ref()).await?;
		Self::present(namespace.as_ref(), values, auth)
	}

	/// Get a single field (stored or computed). Withheld fields are reported as not found.
	pub async fn get_field(&self, slug: &str, field: &str, auth: &Auth) -> ClResult<SettingValue> {
		let mut values = self.get_namespace(slug, auth).await?;
		values.remove(field).ok_or(Error::NotFound)
	}

	/// Save a partial update of a namespace
	///
	/// Every entry is checked before anything is written: a capability or
	/// validation failure leaves the stored namespace untouched.
	pub async fn update(
		&self,
		slug: &str,
		patch: NamespaceValues,
		auth: &Auth,
	) -> ClResult<NamespaceValues> {
		let namespace = self.namespace(slug)?;
		let schema = namespace.schema()?;
		let computed = namespace.computed_schema()?;
		let mut values = self.load(namespace.as_ref()).await?;

		for (name, value) in patch {
			if computed.field(&name).is_some() {
				debug!("Skipping read-only computed field '{}.{}'", slug, name);
				continue;
			}
			let Some(def) = schema.field(&name) else {
				warn!("Ignoring unknown setting '{}.{}'", slug, name);
				continue;
			};

			if let Some(capability) = def.required_capability.as_deref() {
				if !auth.has_capability(capability) {
					warn!(
						"Permission denied for setting '{}.{}': requires {}",
						slug, name, capability
					);
					return Err(Error::PermissionDenied);
				}
			}

			if let Some(validator) = &def.validator {
				validator(&value).map_err(|err| match err {
					Error::ValidationError(msg) => {
						Error::ValidationError(format!("{}.{}: {}", slug, name, msg))
					}
					err => err,
				})?;
			}

			let value = match &def.before_save {
				Some(before_save) => before_save(value),
				None => value,
			};
			values.insert(name, value);
		}

		let data = StoredNamespace {
			version: Some(schema.version.clone()),
			values: values
				.iter()
				.map(|(name, value)| (name.to_string(), serde_json::Value::from(value.clone())))
				.collect(),
			updated_at: now(),
		};
		self.adapter.update_namespace(slug, &data).await?;
		self.cache.put(slug, values.clone());

		info!("Settings namespace '{}' updated by {}", slug, auth.id);

		Self::present(namespace.as_ref(), values, auth)
	}

	/// Drop cached values, forcing the next read to hit the adapter
	pub fn invalidate(&self, slug: &str) {
		self.cache.invalidate(slug);
	}
}


// vim: ts=4
