//! Event hooks with priority ordering
//!
//! Subscribers are collected in an [`EventRegistry`] during app initialization
//! and frozen into an [`EventBus`]. Handlers run in ascending priority, in
//! registration order for equal priorities.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::prelude::*;

/// Fired after an appointment type has been created
pub const APPOINTMENT_TYPE_AFTER_INSERT: &str = "appointment_type.after_insert";

/// Priority handlers get when the caller has no preference
pub const DEFAULT_PRIORITY: i32 = 10;

/// Boxed future returned by event handlers
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Event handler function type
/// Takes the App and the event payload, returns a Future resolving when done
pub type EventHandler = Arc<dyn Fn(App, EntityEvent) -> BoxFuture<'static, ClResult<()>> + Send + Sync>;

/// Payload of entity lifecycle events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityEvent {
	pub id: u64,
	pub data_after: serde_json::Value,
	pub data_before: Option<serde_json::Value>,
}

struct Subscriber {
	name: Box<str>,
	priority: i32,
	handler: EventHandler,
}

impl std::fmt::Debug for Subscriber {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscriber")
			.field("name", &self.name)
			.field("priority", &self.priority)
			.field("handler", &"<function>")
			.finish()
	}
}

/// Mutable subscriber table used during app initialization
#[derive(Debug, Default)]
pub struct EventRegistry {
	subscribers: HashMap<Box<str>, Vec<Subscriber>>,
}

impl EventRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Subscribe `handler` to `event`. Lower priorities run first.
	pub fn subscribe(
		&mut self,
		event: impl Into<Box<str>>,
		name: impl Into<Box<str>>,
		priority: i32,
		handler: EventHandler,
	) {
		let event = event.into();
		let name = name.into();
		debug!("Subscribing {} to {} (priority {})", name, event, priority);
		self.subscribers.entry(event).or_default().push(Subscriber { name, priority, handler });
	}

	/// Freeze into an immutable bus with handlers in execution order
	pub fn freeze(self) -> EventBus {
		let mut subscribers = self.subscribers;
		for list in subscribers.values_mut() {
			// stable sort keeps registration order within a priority
			list.sort_by_key(|s| s.priority);
		}
		EventBus { subscribers }
	}
}

/// Immutable event bus stored in AppState
#[derive(Debug, Default)]
pub struct EventBus {
	subscribers: HashMap<Box<str>, Vec<Subscriber>>,
}

impl EventBus {
	/// Run every handler of `event`. Returns the number of handlers that succeeded.
	/// A failing handler is logged and does not stop the others.
	pub async fn emit(&self, app: &App, event: &str, payload: EntityEvent) -> usize {
		let Some(list) = self.subscribers.get(event) else {
			debug!("No subscribers for {}", event);
			return 0;
		};

		let mut succeeded = 0;
		for subscriber in list {
			match (subscriber.handler)(app.clone(), payload.clone()).await {
				Ok(()) => succeeded += 1,
				Err(err) => warn!("Handler {} for {} failed: {}", subscriber.name, event, err),
			}
		}
		succeeded
	}

	/// Names of the handlers subscribed to `event`, in execution order
	pub fn subscribers(&self, event: &str) -> Vec<&str> {
		self.subscribers
			.get(event)
			.map(|list| list.iter().map(|s| &*s.name).collect())
			.unwrap_or_default()
	}
}


// vim: ts=4
