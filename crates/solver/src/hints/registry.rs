// Copyright 2025 Irreducible Inc.
//! Registry for hint handlers.

use std::{
	collections::HashMap,
	sync::{Arc, RwLock},
};

use super::{DivHint, Hint, HintId, InvZeroHint, IsZeroHint, IthBitHint};
use crate::scratch::ScratchPool;

/// Hint functions available to every solve that uses this registry.
///
/// Gadgets register the functions they rely on while circuits are being built, before any solve
/// starts; solves only read. Lookups take a shared lock and never block each other.
///
/// The registry also owns the [`ScratchPool`] that hint calls draw their integer buffers from.
pub struct HintRegistry {
	handlers: RwLock<HashMap<HintId, Arc<dyn Hint>>>,
	scratch: ScratchPool,
}

impl HintRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			handlers: RwLock::new(HashMap::new()),
			scratch: ScratchPool::default(),
		}
	}

	/// Creates a registry holding the builtin hints: [`IsZeroHint`], [`IthBitHint`],
	/// [`InvZeroHint`] and [`DivHint`].
	pub fn with_builtins() -> Self {
		let registry = Self::new();
		registry.register(Arc::new(IsZeroHint::new()));
		registry.register(Arc::new(IthBitHint::new()));
		registry.register(Arc::new(InvZeroHint::new()));
		registry.register(Arc::new(DivHint::new()));
		registry
	}

	/// Adds a handler.
	///
	/// # Panics
	///
	/// Panics if a handler with the same id is already registered. Two gadgets colliding on an id
	/// is a configuration error that must not go unnoticed.
	pub fn register(&self, handler: Arc<dyn Hint>) -> HintId {
		let id = handler.id();
		let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
		if let Some(existing) = handlers.get(&id) {
			panic!(
				"hint function {} registered twice (id {id} is already taken by {})",
				handler.name(),
				existing.name()
			);
		}
		tracing::debug!(name = handler.name(), %id, "registered hint");
		handlers.insert(id, handler);
		id
	}

	/// Returns the handler with the given id.
	pub fn get(&self, id: HintId) -> Option<Arc<dyn Hint>> {
		self.handlers
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.get(&id)
			.cloned()
	}

	/// Returns a copy of every registered handler.
	pub fn snapshot(&self) -> Vec<Arc<dyn Hint>> {
		self.handlers
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.values()
			.cloned()
			.collect()
	}

	/// Number of registered handlers.
	pub fn len(&self) -> usize {
		self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
	}

	/// Returns `true` if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The buffer pool shared by every solve using this registry.
	pub fn scratch(&self) -> &ScratchPool {
		&self.scratch
	}
}

impl Default for HintRegistry {
	fn default() -> Self {
		Self::new()
	}
}
