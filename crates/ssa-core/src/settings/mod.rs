//! Settings subsystem with versioned schemas, computed fields, and capability gating
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): field/computed descriptors, schemas and the namespace registry
//! - **Service** (`service.rs`): SettingsService with caching, validation and redaction
//! - **Validation** (`validation.rs`): reusable field validators
//! - **Memory** (`memory.rs`): non-durable adapter
//!
//! # Read and save paths
//!
//! Reads merge stored values over schema defaults, resolve computed fields from
//! the merged values, then withhold fields the caller lacks the capability for.
//! Saves check capability, validate, run the field's before-save transform and
//! persist the whole namespace under the current schema version.

pub mod memory;
pub mod service;
pub mod types;
pub mod validation;

pub use memory::MemorySettingsAdapter;
pub use service::SettingsService;
pub use types::{
	BeforeSaveFn, ComputeFn, ComputedFieldDefinition, ComputedFieldDefinitionBuilder,
	ComputedInput, ComputedSchema, FieldDefinition, FieldDefinitionBuilder,
	FrozenSettingsRegistry, Memoized, NamespaceValues, Schema, SettingValidator, SettingValue,
	SettingsRegistry, SettingsSchema,
};

// vim: ts=4
