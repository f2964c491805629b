// Copyright 2025 Irreducible Inc.
//! Hints with a fixed number of inputs and outputs built around a plain function.

use std::fmt;

use num_bigint::BigUint;
use witsolve_core::{CurveId, HintId};

use super::{Arity, Hint, check_shape, hint_id};
use crate::error::HintError;

/// The raw computation behind a [`FixedHint`].
pub type HintFn =
	dyn Fn(CurveId, &[BigUint], &mut [BigUint]) -> Result<(), HintError> + Send + Sync;

/// A hint taking exactly `n_inputs` inputs and producing exactly `n_outputs` outputs.
///
/// The identifier combines the name with both counts, so wrapping one computation with different
/// arities yields distinct, independently resolvable hints.
pub struct FixedHint {
	name: String,
	n_inputs: usize,
	n_outputs: usize,
	id: HintId,
	func: Box<HintFn>,
}

impl FixedHint {
	/// Wraps `func` under `name`.
	///
	/// # Panics
	///
	/// Panics if `n_outputs` is zero.
	pub fn new(
		name: impl Into<String>,
		n_inputs: usize,
		n_outputs: usize,
		func: impl Fn(CurveId, &[BigUint], &mut [BigUint]) -> Result<(), HintError>
		+ Send
		+ Sync
		+ 'static,
	) -> Self {
		let name = name.into();
		assert!(n_outputs > 0, "hint {name} must produce at least one output");
		let id = hint_id(&name, Arity::Fixed(n_inputs), n_outputs);
		Self {
			name,
			n_inputs,
			n_outputs,
			id,
			func: Box::new(func),
		}
	}
}

impl Hint for FixedHint {
	fn id(&self) -> HintId {
		self.id
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn n_inputs(&self) -> Arity {
		Arity::Fixed(self.n_inputs)
	}

	fn n_outputs(&self, _n_inputs: usize) -> usize {
		self.n_outputs
	}

	fn call(
		&self,
		curve: CurveId,
		inputs: &[BigUint],
		outputs: &mut [BigUint],
	) -> Result<(), HintError> {
		check_shape(self.n_inputs, self.n_outputs, inputs, outputs)?;
		(self.func)(curve, inputs, outputs)
	}
}

impl fmt::Debug for FixedHint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}([{}]BigUint, [{}]BigUint) {}",
			self.name, self.n_inputs, self.n_outputs, self.id
		)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn test_same_computation_two_arities() {
		let one = FixedHint::new("sum", 1, 1, |_, i, o| {
			o[0] = i.iter().sum();
			Ok(())
		});
		let two = FixedHint::new("sum", 2, 1, |_, i, o| {
			o[0] = i.iter().sum();
			Ok(())
		});
		assert_ne!(one.id(), two.id());
		assert_eq!(one.id(), FixedHint::new("sum", 1, 1, |_, _, _| Ok(())).id());
	}

	#[test]
	fn test_arity_checked_before_call() {
		static CALLS: AtomicUsize = AtomicUsize::new(0);
		let hint = FixedHint::new("counted", 2, 1, |_, _, _| {
			CALLS.fetch_add(1, Ordering::SeqCst);
			Ok(())
		});

		let mut out = vec![BigUint::ZERO];
		let err = hint
			.call(CurveId::Bn254, &[BigUint::from(1u32)], &mut out)
			.unwrap_err();
		assert_eq!(err, HintError::InputArity { expected: 2, actual: 1 });

		let mut too_many = vec![BigUint::ZERO; 2];
		let err = hint
			.call(CurveId::Bn254, &[BigUint::ZERO, BigUint::ZERO], &mut too_many)
			.unwrap_err();
		assert_eq!(err, HintError::OutputArity { expected: 1, actual: 2 });
		assert_eq!(CALLS.load(Ordering::SeqCst), 0);

		hint.call(CurveId::Bn254, &[BigUint::ZERO, BigUint::ZERO], &mut out)
			.unwrap();
		assert_eq!(CALLS.load(Ordering::SeqCst), 1);
	}

	#[test]
	#[should_panic(expected = "at least one output")]
	fn test_no_outputs() {
		FixedHint::new("sink", 1, 0, |_, _, _| Ok(()));
	}
}
