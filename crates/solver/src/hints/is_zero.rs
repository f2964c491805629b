// Copyright 2025 Irreducible Inc.
//! Zero test.
//!
//! Outputs `1` if the input is zero and `0` otherwise. The circuit has to constrain the result,
//! typically with `x · out = 0` and `x · inv + out = 1`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use witsolve_core::{CurveId, HintId};

use super::{Arity, Hint, check_shape, hint_id};
use crate::error::HintError;

/// Tests a value for zero.
pub struct IsZeroHint;

impl IsZeroHint {
	/// Name the hint is registered under.
	pub const NAME: &'static str = "is_zero";

	/// Creates the hint.
	pub fn new() -> Self {
		Self
	}
}

impl Default for IsZeroHint {
	fn default() -> Self {
		Self::new()
	}
}

impl Hint for IsZeroHint {
	fn id(&self) -> HintId {
		hint_id(Self::NAME, Arity::Fixed(1), 1)
	}

	fn name(&self) -> &str {
		Self::NAME
	}

	fn n_inputs(&self) -> Arity {
		Arity::Fixed(1)
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
		check_shape(1, 1, inputs, outputs)?;
		outputs[0] = if inputs[0].is_zero() {
			BigUint::one()
		} else {
			BigUint::zero()
		};
		Ok(())
	}
}
