//! App state type

use std::sync::Arc;

use ssa_types::host::HostEnvironment;
use ssa_types::settings_adapter::SettingsAdapter;

use crate::events::{EntityEvent, EventBus, EventHandler, EventRegistry};
use crate::extensions::Extensions;
use crate::prelude::*;
use crate::settings::service::SettingsService;
use crate::settings::types::{FrozenSettingsRegistry, SettingsRegistry, SettingsSchema};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of namespaces kept in the settings cache
pub const DEFAULT_SETTINGS_CACHE_SIZE: usize = 16;

pub struct AppState {
	pub host: Arc<dyn HostEnvironment>,

	// Settings subsystem
	pub settings: Arc<SettingsService>,
	pub settings_registry: Arc<FrozenSettingsRegistry>,

	pub events: EventBus,

	// Type-erased extension map for namespace-specific state
	pub extensions: Extensions,
}

impl AppState {
	/// Get a registered extension by type. Returns error if not found.
	pub fn ext<T: Send + Sync + 'static>(&self) -> ClResult<&T> {
		self.extensions.get::<T>().ok_or_else(|| {
			Error::Internal(format!("Extension {} not registered", std::any::type_name::<T>()))
		})
	}
}

pub type App = Arc<AppState>;

/// Fire an event on the app's bus
pub async fn emit(app: &App, event: &str, payload: EntityEvent) -> usize {
	app.events.emit(app, event, payload).await
}

/// Collects namespaces, event subscribers and extensions, then freezes them into an [`App`]
pub struct AppBuilder {
	host: Arc<dyn HostEnvironment>,
	adapter: Arc<dyn SettingsAdapter>,
	registry: SettingsRegistry,
	events: EventRegistry,
	extensions: Extensions,
	cache_size: usize,
}

impl AppBuilder {
	pub fn new(host: Arc<dyn HostEnvironment>, adapter: Arc<dyn SettingsAdapter>) -> Self {
		Self {
			host,
			adapter,
			registry: SettingsRegistry::new(),
			events: EventRegistry::new(),
			extensions: Extensions::new(),
			cache_size: DEFAULT_SETTINGS_CACHE_SIZE,
		}
	}

	pub fn cache_size(&mut self, cache_size: usize) -> &mut Self {
		self.cache_size = cache_size;
		self
	}

	/// Host environment namespaces read their defaults from
	pub fn host(&self) -> &Arc<dyn HostEnvironment> {
		&self.host
	}

	pub fn register_settings(&mut self, namespace: Arc<dyn SettingsSchema>) -> ClResult<()> {
		self.registry.register(namespace)
	}

	pub fn subscribe(
		&mut self,
		event: impl Into<Box<str>>,
		name: impl Into<Box<str>>,
		priority: i32,
		handler: EventHandler,
	) -> &mut Self {
		self.events.subscribe(event, name, priority, handler);
		self
	}

	pub fn extension<T: Send + Sync + 'static>(&mut self, val: T) -> &mut Self {
		self.extensions.insert(val);
		self
	}

	pub fn build(self) -> ClResult<App> {
		let settings_registry = Arc::new(self.registry.freeze()?);
		let settings =
			Arc::new(SettingsService::new(settings_registry.clone(), self.adapter, self.cache_size));

		info!("App v{} ready with {} settings namespaces", VERSION, settings_registry.len());

		Ok(Arc::new(AppState {
			host: self.host,
			settings,
			settings_registry,
			events: self.events.freeze(),
			extensions: self.extensions,
		}))
	}
}


// vim: ts=4
