// Copyright 2025 Irreducible Inc.
//! Field inversion that maps zero to zero.

use num_bigint::BigUint;
use num_traits::Zero;
use witsolve_core::{CurveId, HintId};

use super::{Arity, Hint, check_shape, hint_id};
use crate::error::HintError;

/// Outputs `1 / x`, or `0` for `x = 0`.
pub struct InvZeroHint;

impl InvZeroHint {
	/// Name the hint is registered under.
	pub const NAME: &'static str = "inv_zero";

	/// Creates the hint.
	pub fn new() -> Self {
		Self
	}
}

impl Default for InvZeroHint {
	fn default() -> Self {
		Self::new()
	}
}

/// `a^{-1} mod q` by Fermat's little theorem. `a` must be non-zero modulo the prime `q`.
pub(super) fn mod_inverse(a: &BigUint, q: &BigUint) -> BigUint {
	a.modpow(&(q - 2u32), q)
}

impl Hint for InvZeroHint {
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
		curve: CurveId,
		inputs: &[BigUint],
		outputs: &mut [BigUint],
	) -> Result<(), HintError> {
		check_shape(1, 1, inputs, outputs)?;
		let q = curve.modulus();
		let a = &inputs[0] % &q;
		outputs[0] = if a.is_zero() {
			BigUint::ZERO
		} else {
			mod_inverse(&a, &q)
		};
		Ok(())
	}
}
