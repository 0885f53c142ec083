//! Settings types and definitions
//!
//! Field and computed-field descriptors, versioned schemas, and the registry that
//! maps namespace slugs to their schemas.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

use crate::prelude::*;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> ClResult<()> + Send + Sync>;

/// Transform applied to a candidate value right before it is persisted
pub type BeforeSaveFn = Box<dyn Fn(SettingValue) -> SettingValue + Send + Sync>;

/// Function deriving a computed field from its input
pub type ComputeFn = Box<dyn Fn(&SettingValue) -> ClResult<SettingValue> + Send + Sync>;

/// Resolved values of one namespace, keyed by field name
pub type NamespaceValues = BTreeMap<Box<str>, SettingValue>;

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type inferred from the stored JSON
pub enum SettingValue {
	Null,
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	/// Empty in the host's sense: null, false, 0, "", "0" or an empty array/object
	pub fn is_empty(&self) -> bool {
		match self {
			SettingValue::Null => true,
			SettingValue::Bool(b) => !b,
			SettingValue::Int(i) => *i == 0,
			SettingValue::String(s) => s.is_empty() || s == "0",
			SettingValue::Json(serde_json::Value::Array(a)) => a.is_empty(),
			SettingValue::Json(serde_json::Value::Object(o)) => o.is_empty(),
			SettingValue::Json(serde_json::Value::Null) => true,
			SettingValue::Json(serde_json::Value::Number(n)) => n.as_f64() == Some(0.0),
			SettingValue::Json(_) => false,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Null => "null",
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::Bool(_) => "bool",
			SettingValue::Json(_) => "json",
		}
	}
}

impl From<serde_json::Value> for SettingValue {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => SettingValue::Null,
			serde_json::Value::Bool(b) => SettingValue::Bool(b),
			serde_json::Value::String(s) => SettingValue::String(s),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => SettingValue::Int(i),
				None => SettingValue::Json(serde_json::Value::Number(n)),
			},
			other => SettingValue::Json(other),
		}
	}
}

impl From<SettingValue> for serde_json::Value {
	fn from(value: SettingValue) -> Self {
		match value {
			SettingValue::Null => serde_json::Value::Null,
			SettingValue::Bool(b) => serde_json::Value::Bool(b),
			SettingValue::Int(i) => serde_json::Value::from(i),
			SettingValue::String(s) => serde_json::Value::String(s),
			SettingValue::Json(j) => j,
		}
	}
}

impl From<&str> for SettingValue {
	fn from(value: &str) -> Self {
		SettingValue::String(value.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(value: String) -> Self {
		SettingValue::String(value)
	}
}

impl From<bool> for SettingValue {
	fn from(value: bool) -> Self {
		SettingValue::Bool(value)
	}
}

impl From<i64> for SettingValue {
	fn from(value: i64) -> Self {
		SettingValue::Int(value)
	}
}

impl From<i32> for SettingValue {
	fn from(value: i32) -> Self {
		SettingValue::Int(i64::from(value))
	}
}

/// Check that a schema version is a `YYYY-MM-DD` date string
fn check_version(version: &str) -> ClResult<()> {
	let valid = version.len() == 10
		&& chrono::NaiveDate::parse_from_str(version, "%Y-%m-%d").is_ok();
	if valid {
		Ok(())
	} else {
		Err(Error::ConfigError(format!("Schema version '{}' is not a YYYY-MM-DD date", version)))
	}
}

// Field definitions //
//*******************//

/// Field definition - defines metadata for each persisted setting
pub struct FieldDefinition {
	/// Field name, unique within its schema
	pub name: Box<str>,

	/// Value used while nothing is stored for the field
	pub default: SettingValue,

	/// Optional validation function
	pub validator: Option<SettingValidator>,

	/// Optional transform run right before persistence
	pub before_save: Option<BeforeSaveFn>,

	/// Capability a caller needs to read or write the field
	pub required_capability: Option<Box<str>>,
}

impl Debug for FieldDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldDefinition")
			.field("name", &self.name)
			.field("default", &self.default)
			.field("validator", &self.validator.is_some())
			.field("before_save", &self.before_save.is_some())
			.field("required_capability", &self.required_capability)
			.finish()
	}
}

impl FieldDefinition {
	/// Create a builder for constructing a FieldDefinition
	pub fn builder(name: impl Into<Box<str>>) -> FieldDefinitionBuilder {
		FieldDefinitionBuilder::new(name)
	}
}

/// Builder for FieldDefinition with fluent API
pub struct FieldDefinitionBuilder {
	name: Box<str>,
	default: SettingValue,
	validator: Option<SettingValidator>,
	before_save: Option<BeforeSaveFn>,
	required_capability: Option<Box<str>>,
}

impl FieldDefinitionBuilder {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			default: SettingValue::Null,
			validator: None,
			before_save: None,
			required_capability: None,
		}
	}

	/// Set the default value (defaults to null)
	pub fn default(mut self, value: impl Into<SettingValue>) -> Self {
		self.default = value.into();
		self
	}

	/// Set a validation function
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> ClResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	/// Set the transform applied right before the value is stored
	pub fn before_save<F>(mut self, f: F) -> Self
	where
		F: Fn(SettingValue) -> SettingValue + Send + Sync + 'static,
	{
		self.before_save = Some(Box::new(f));
		self
	}

	/// Require a capability for reading and writing the field
	pub fn required_capability(mut self, capability: impl Into<Box<str>>) -> Self {
		self.required_capability = Some(capability.into());
		self
	}

	/// Build the FieldDefinition
	pub fn build(self) -> ClResult<FieldDefinition> {
		if self.name.is_empty() {
			return Err(Error::ConfigError("Field name is required".into()));
		}

		Ok(FieldDefinition {
			name: self.name,
			default: self.default,
			validator: self.validator,
			before_save: self.before_save,
			required_capability: self.required_capability,
		})
	}
}

/// Versioned table of field definitions
#[derive(Debug)]
pub struct Schema {
	pub version: Box<str>,
	fields: Vec<FieldDefinition>,
}

impl Schema {
	pub fn builder(version: impl Into<Box<str>>) -> SchemaBuilder {
		SchemaBuilder { version: version.into(), fields: Vec::new() }
	}

	/// Get a field definition by name
	pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
		self.fields.iter().find(|def| &*def.name == name)
	}

	/// List fields in declaration order
	pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
		self.fields.iter()
	}

	/// Default value of every field
	pub fn defaults(&self) -> NamespaceValues {
		self.fields.iter().map(|def| (def.name.clone(), def.default.clone())).collect()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

pub struct SchemaBuilder {
	version: Box<str>,
	fields: Vec<FieldDefinition>,
}

impl SchemaBuilder {
	pub fn field(mut self, def: FieldDefinition) -> Self {
		self.fields.push(def);
		self
	}

	pub fn build(self) -> ClResult<Schema> {
		check_version(&self.version)?;
		for (i, def) in self.fields.iter().enumerate() {
			if self.fields[..i].iter().any(|prev| prev.name == def.name) {
				return Err(Error::ConfigError(format!(
					"Field '{}' is declared twice in schema {}",
					def.name, self.version
				)));
			}
		}
		Ok(Schema { version: self.version, fields: self.fields })
	}
}

// Computed field definitions //
//****************************//

/// Where a computed field takes its input from
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedInput {
	/// Current value of another field of the same namespace
	Path(Box<str>),
	/// Fixed input
	Value(SettingValue),
}

/// Read-only value derived from another field or from a fixed input
pub struct ComputedFieldDefinition {
	pub name: Box<str>,
	pub compute: ComputeFn,
	pub input: ComputedInput,
	pub required_capability: Option<Box<str>>,
}

impl Debug for ComputedFieldDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ComputedFieldDefinition")
			.field("name", &self.name)
			.field("input", &self.input)
			.field("required_capability", &self.required_capability)
			.finish_non_exhaustive()
	}
}

impl ComputedFieldDefinition {
	pub fn builder<F>(name: impl Into<Box<str>>, compute: F) -> ComputedFieldDefinitionBuilder
	where
		F: Fn(&SettingValue) -> ClResult<SettingValue> + Send + Sync + 'static,
	{
		ComputedFieldDefinitionBuilder {
			name: name.into(),
			compute: Box::new(compute),
			input: None,
			required_capability: None,
		}
	}
}

pub struct ComputedFieldDefinitionBuilder {
	name: Box<str>,
	compute: ComputeFn,
	input: Option<ComputedInput>,
	required_capability: Option<Box<str>>,
}

impl ComputedFieldDefinitionBuilder {
	/// Read the input from another field's current value
	pub fn input_path(mut self, field: impl Into<Box<str>>) -> Self {
		self.input = Some(ComputedInput::Path(field.into()));
		self
	}

	/// Use a fixed input
	pub fn input(mut self, value: impl Into<SettingValue>) -> Self {
		self.input = Some(ComputedInput::Value(value.into()));
		self
	}

	pub fn required_capability(mut self, capability: impl Into<Box<str>>) -> Self {
		self.required_capability = Some(capability.into());
		self
	}

	pub fn build(self) -> ClResult<ComputedFieldDefinition> {
		if self.name.is_empty() {
			return Err(Error::ConfigError("Computed field name is required".into()));
		}

		Ok(ComputedFieldDefinition {
			name: self.name,
			compute: self.compute,
			input: self.input.unwrap_or(ComputedInput::Value(SettingValue::Null)),
			required_capability: self.required_capability,
		})
	}
}

/// Versioned table of computed field definitions
#[derive(Debug)]
pub struct ComputedSchema {
	pub version: Box<str>,
	fields: Vec<ComputedFieldDefinition>,
}

impl ComputedSchema {
	pub fn builder(version: impl Into<Box<str>>) -> ComputedSchemaBuilder {
		ComputedSchemaBuilder { version: version.into(), fields: Vec::new() }
	}

	pub fn field(&self, name: &str) -> Option<&ComputedFieldDefinition> {
		self.fields.iter().find(|def| &*def.name == name)
	}

	pub fn fields(&self) -> impl Iterator<Item = &ComputedFieldDefinition> {
		self.fields.iter()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

pub struct ComputedSchemaBuilder {
	version: Box<str>,
	fields: Vec<ComputedFieldDefinition>,
}

impl ComputedSchemaBuilder {
	pub fn field(mut self, def: ComputedFieldDefinition) -> Self {
		self.fields.push(def);
		self
	}

	pub fn build(self) -> ClResult<ComputedSchema> {
		check_version(&self.version)?;
		for (i, def) in self.fields.iter().enumerate() {
			if self.fields[..i].iter().any(|prev| prev.name == def.name) {
				return Err(Error::ConfigError(format!(
					"Computed field '{}' is declared twice in schema {}",
					def.name, self.version
				)));
			}
		}
		Ok(ComputedSchema { version: self.version, fields: self.fields })
	}
}

// Memoization //
//*************//

/// Value built on first access and returned as-is afterwards
pub struct Memoized<T> {
	cell: OnceLock<T>,
}

impl<T> Memoized<T> {
	pub const fn new() -> Self {
		Self { cell: OnceLock::new() }
	}

	/// Return the cached value, building it first if needed.
	/// A failed build leaves the cell empty so the next call retries.
	pub fn get_or_try_init<F>(&self, build: F) -> ClResult<&T>
	where
		F: FnOnce() -> ClResult<T>,
	{
		if let Some(value) = self.cell.get() {
			return Ok(value);
		}
		let value = build()?;
		Ok(self.cell.get_or_init(|| value))
	}
}

impl<T> Default for Memoized<T> {
	fn default() -> Self {
		Self::new()
	}
}

// Namespaces //
//************//

/// A settings namespace: a slug plus its field and computed schemas
pub trait SettingsSchema: Send + Sync {
	/// Key the namespace is persisted under
	fn slug(&self) -> &str;

	/// Field schema, built once and cached
	fn schema(&self) -> ClResult<&Schema>;

	/// Computed schema, built once and cached
	fn computed_schema(&self) -> ClResult<&ComputedSchema>;
}

/// Mutable registry used during app initialization
pub struct SettingsRegistry {
	namespaces: HashMap<Box<str>, Arc<dyn SettingsSchema>>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { namespaces: HashMap::new() }
	}

	/// Register a new namespace
	pub fn register(&mut self, namespace: Arc<dyn SettingsSchema>) -> ClResult<()> {
		let slug: Box<str> = namespace.slug().into();
		if self.namespaces.contains_key(&slug) {
			return Err(Error::ConfigError(format!(
				"Settings namespace '{}' is already registered",
				slug
			)));
		}

		debug!("Registering settings namespace: {}", slug);
		self.namespaces.insert(slug, namespace);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	///
	/// Builds every schema and checks that computed fields only read fields
	/// of their own namespace.
	pub fn freeze(self) -> ClResult<FrozenSettingsRegistry> {
		for (slug, namespace) in &self.namespaces {
			let schema = namespace.schema()?;
			let computed = namespace.computed_schema()?;
			for def in computed.fields() {
				if schema.field(&def.name).is_some() {
					return Err(Error::ConfigError(format!(
						"Computed field '{}.{}' shadows a stored field",
						slug, def.name
					)));
				}
				if let ComputedInput::Path(path) = &def.input {
					if schema.field(path).is_none() {
						return Err(Error::ConfigError(format!(
							"Computed field '{}.{}' reads unknown field '{}'",
							slug, def.name, path
						)));
					}
				}
			}
		}

		info!("Freezing settings registry with {} namespaces", self.namespaces.len());
		Ok(FrozenSettingsRegistry { namespaces: self.namespaces })
	}

	pub fn len(&self) -> usize {
		self.namespaces.len()
	}

	pub fn is_empty(&self) -> bool {
		self.namespaces.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
pub struct FrozenSettingsRegistry {
	namespaces: HashMap<Box<str>, Arc<dyn SettingsSchema>>,
}

impl FrozenSettingsRegistry {
	pub fn get(&self, slug: &str) -> Option<&Arc<dyn SettingsSchema>> {
		self.namespaces.get(slug)
	}

	/// List all registered namespaces
	pub fn list(&self) -> impl Iterator<Item = &Arc<dyn SettingsSchema>> {
		self.namespaces.values()
	}

	pub fn len(&self) -> usize {
		self.namespaces.len()
	}

	pub fn is_empty(&self) -> bool {
		self.namespaces.is_empty()
	}
}


// vim: ts=4
