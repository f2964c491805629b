// Copyright 2025 Irreducible Inc.
//! The shared coefficient table.

use std::{collections::HashMap, ops::Index};

use cranelift_entity::PrimaryMap;

use crate::{field::SolverField, term::CoeffId};

/// Field constants referenced by [`CoeffId`].
///
/// The table is built once by the compiler and then shared read-only by every solve of the
/// circuit. The first [`CoeffId::N_RESERVED`] entries are always `0`, `1`, `2` and `-1` in that
/// order; values are deduplicated so each constant has exactly one id.
#[derive(Clone, Debug)]
pub struct CoefficientTable<F: SolverField> {
	values: PrimaryMap<CoeffId, F>,
	dedup: HashMap<F, CoeffId>,
}

impl<F: SolverField> CoefficientTable<F> {
	/// Creates a table holding only the reserved constants.
	pub fn new() -> Self {
		let mut table = Self {
			values: PrimaryMap::new(),
			dedup: HashMap::new(),
		};
		let reserved = [
			(CoeffId::ZERO, F::zero()),
			(CoeffId::ONE, F::one()),
			(CoeffId::TWO, F::one().double()),
			(CoeffId::MINUS_ONE, -F::one()),
		];
		for (expected, value) in reserved {
			let id = table.insert(value);
			assert_eq!(id, expected);
		}
		table
	}

	/// Returns the id of `value`, adding it to the table if needed.
	pub fn insert(&mut self, value: F) -> CoeffId {
		if let Some(&id) = self.dedup.get(&value) {
			return id;
		}
		let id = self.values.push(value);
		self.dedup.insert(value, id);
		id
	}

	/// Returns the constant with the given id, if any.
	pub fn get(&self, id: CoeffId) -> Option<&F> {
		self.values.get(id)
	}

	/// Returns the id of an already-present constant.
	pub fn lookup(&self, value: &F) -> Option<CoeffId> {
		self.dedup.get(value).copied()
	}

	/// Number of constants, reserved ones included.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Always `false`: the reserved constants are present from construction on.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns `true` if `id` is a valid index into this table.
	pub fn is_valid(&self, id: CoeffId) -> bool {
		self.values.is_valid(id)
	}
}

impl<F: SolverField> Default for CoefficientTable<F> {
	fn default() -> Self {
		Self::new()
	}
}

impl<F: SolverField> Index<CoeffId> for CoefficientTable<F> {
	type Output = F;

	fn index(&self, id: CoeffId) -> &F {
		&self.values[id]
	}
}
