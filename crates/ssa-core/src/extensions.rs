//! Type-erased extension map for AppState
//!
//! Lets namespaces publish their own state (e.g. the global settings accessors)
//! without coupling AppState to namespace-specific types.

use std::any::{Any, TypeId};
use std::collections::HashMap;

pub struct Extensions {
	map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Extensions {
	pub fn new() -> Self {
		Self { map: HashMap::new() }
	}

	pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) {
		self.map.insert(TypeId::of::<T>(), Box::new(val));
	}

	pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
		self.map.get(&TypeId::of::<T>())?.downcast_ref::<T>()
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

impl Default for Extensions {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Marker(u32);

	#[test]
	fn test_insert_and_get_by_type() {
		let mut ext = Extensions::new();
		assert!(ext.get::<Marker>().is_none());
		ext.insert(Marker(7));
		ext.insert(String::from("other"));
		assert_eq!(ext.get::<Marker>().map(|m| m.0), Some(7));
		assert_eq!(ext.len(), 2);
	}
}

// vim: ts=4
