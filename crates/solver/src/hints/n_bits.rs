// Copyright 2025 Irreducible Inc.
//! Binary decomposition.
//!
//! Outputs the `n` least significant bits of the input, least significant first. The circuit
//! constrains each output to be boolean and their weighted sum to equal the input.
//!
//! The number of bits is part of the identity, so every width is a separate hint that has to be
//! registered (or supplied) on its own.

use num_bigint::BigUint;
use witsolve_core::{CurveId, HintId};

use super::{Arity, Hint, check_shape, hint_id};
use crate::error::HintError;

/// Decomposes an integer into a fixed number of bits.
pub struct NBitsHint {
	n_bits: usize,
	name: String,
}

impl NBitsHint {
	/// A decomposition into `n_bits` bits.
	///
	/// # Panics
	///
	/// Panics if `n_bits` is zero.
	pub fn new(n_bits: usize) -> Self {
		assert!(n_bits > 0, "bit decomposition needs at least one output");
		Self {
			n_bits,
			name: format!("n_bits_{n_bits}"),
		}
	}
}

impl Hint for NBitsHint {
	fn id(&self) -> HintId {
		hint_id(&self.name, Arity::Fixed(1), self.n_bits)
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn n_inputs(&self) -> Arity {
		Arity::Fixed(1)
	}

	fn n_outputs(&self, _n_inputs: usize) -> usize {
		self.n_bits
	}

	fn call(
		&self,
		_curve: CurveId,
		inputs: &[BigUint],
		outputs: &mut [BigUint],
	) -> Result<(), HintError> {
		check_shape(1, self.n_bits, inputs, outputs)?;
		for (i, out) in outputs.iter_mut().enumerate() {
			*out = BigUint::from(inputs[0].bit(i as u64) as u8);
		}
		Ok(())
	}
}
