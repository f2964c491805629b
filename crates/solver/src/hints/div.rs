// Copyright 2025 Irreducible Inc.
//! Field division.
//!
//! Takes `(a, b)` and outputs `a / b` in the field of the solve. The quotient is undefined for
//! `b = 0` and the hint fails in that case.

use num_bigint::BigUint;
use num_traits::Zero;
use witsolve_core::{CurveId, HintId};

use super::{Arity, Hint, check_shape, hint_id, inv_zero::mod_inverse};
use crate::error::HintError;

/// Divides two field elements.
pub struct DivHint;

impl DivHint {
	/// Name the hint is registered under.
	pub const NAME: &'static str = "div";

	/// Creates the hint.
	pub fn new() -> Self {
		Self
	}
}

impl Default for DivHint {
	fn default() -> Self {
		Self::new()
	}
}

impl Hint for DivHint {
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
		curve: CurveId,
		inputs: &[BigUint],
		outputs: &mut [BigUint],
	) -> Result<(), HintError> {
		check_shape(2, 1, inputs, outputs)?;
		let q = curve.modulus();
		let b = &inputs[1] % &q;
		if b.is_zero() {
			return Err(HintError::Undefined("division by zero".to_string()));
		}
		outputs[0] = (&inputs[0] * mod_inverse(&b, &q)) % &q;
		Ok(())
	}
}
