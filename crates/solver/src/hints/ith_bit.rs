// Copyright 2025 Irreducible Inc.
//! Single bit extraction.
//!
//! Takes `(value, index)` and outputs bit `index` of `value`, counting from the least significant
//! bit. Indices past the width of `value` yield `0`.

use num_bigint::BigUint;
use witsolve_core::{CurveId, HintId};

use super::{Arity, Hint, check_shape, hint_id};
use crate::error::HintError;

/// Extracts one bit of an integer.
pub struct IthBitHint;

impl IthBitHint {
	/// Name the hint is registered under.
	pub const NAME: &'static str = "ith_bit";

	/// Creates the hint.
	pub fn new() -> Self {
		Self
	}
}

impl Default for IthBitHint {
	fn default() -> Self {
		Self::new()
	}
}

impl Hint for IthBitHint {
	fn id(&self) -> HintId {
		hint_id(Self::NAME, Arity::Fixed(2), 1)
	}

	fn name(&self) -> &str {
		Self::NAME
	}

	fn n_inputs(&self) -> Arity {
		Arity::Fixed(2)
	}

	fn n_outputs(&self, _n_inputs: usize) -> usize {
		1
	}

	fn call(
		&self,
		_curve: CurveId,
		inputs: &[BigUint],
		outputs: &mut [BigUint],
	) -> Result<(), HintError> {
		check_shape(2, 1, inputs, outputs)?;
		let bit = match u64::try_from(&inputs[1]) {
			Ok(index) => inputs[0].bit(index),
			// An index that does not fit 64 bits is past any field element.
			Err(_) => false,
		};
		outputs[0] = BigUint::from(bit as u8);
		Ok(())
	}
}
