// Copyright 2025 Irreducible Inc.
//! Hint system.
//!
//! Hints are computations that happen outside of the circuit, on integers rather than field
//! elements. Their results are assigned to wires without being derived from constraints, so a
//! circuit that uses a hint must add its own assertions to pin the result down.
//!
//! Functions are found by [`HintId`]. A solve sees the functions of the [`HintRegistry`] plus the
//! ones the caller passes through [`SolverOptions`](crate::SolverOptions).

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
pub use witsolve_core::HintId;
use witsolve_core::CurveId;

use crate::error::HintError;

mod div;
mod fixed;
mod inv_zero;
mod is_zero;
mod ith_bit;
mod n_bits;
mod registry;

pub use div::DivHint;
pub use fixed::{FixedHint, HintFn};
pub use inv_zero::InvZeroHint;
pub use is_zero::IsZeroHint;
pub use ith_bit::IthBitHint;
pub use n_bits::NBitsHint;
pub use registry::HintRegistry;

/// Number of inputs a hint accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
	/// Exactly this many.
	Fixed(usize),
	/// Any number.
	Any,
}

impl Arity {
	/// Returns `true` if `n` inputs are acceptable.
	pub fn accepts(self, n: usize) -> bool {
		match self {
			Arity::Fixed(expected) => expected == n,
			Arity::Any => true,
		}
	}
}

/// Hint handler trait.
pub trait Hint: Send + Sync {
	/// Identifier used for lookup.
	fn id(&self) -> HintId;

	/// Human-readable name used in errors and traces.
	fn name(&self) -> &str;

	/// How many inputs the hint takes.
	fn n_inputs(&self) -> Arity;

	/// How many outputs the hint produces for `n_inputs` inputs. Must be at least one.
	fn n_outputs(&self, n_inputs: usize) -> usize;

	/// Computes `outputs` from `inputs`.
	///
	/// `inputs` are reduced modulo the field modulus. `outputs` has exactly
	/// [`n_outputs`](Self::n_outputs) entries, all zero on entry.
	fn call(
		&self,
		curve: CurveId,
		inputs: &[BigUint],
		outputs: &mut [BigUint],
	) -> Result<(), HintError>;
}

/// Derives a hint identifier from an author-chosen name and the arity.
///
/// The result is deterministic across builds and platforms, and differs when either the name or
/// the arity differs, so the same computation can be registered under several arities.
pub fn hint_id(name: &str, n_inputs: Arity, n_outputs: usize) -> HintId {
	let n_in = match n_inputs {
		Arity::Fixed(n) => n as u64,
		Arity::Any => u64::MAX,
	};
	let mut hasher = Sha256::new();
	hasher.update((name.len() as u64).to_be_bytes());
	hasher.update(name.as_bytes());
	hasher.update(n_in.to_be_bytes());
	hasher.update((n_outputs as u64).to_be_bytes());
	let digest = hasher.finalize();
	HintId(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

/// Checks the buffer sizes a fixed-shape hint receives.
pub(crate) fn check_shape(
	n_inputs: usize,
	n_outputs: usize,
	inputs: &[BigUint],
	outputs: &[BigUint],
) -> Result<(), HintError> {
	if inputs.len() != n_inputs {
		return Err(HintError::InputArity {
			expected: n_inputs,
			actual: inputs.len(),
		});
	}
	if outputs.len() != n_outputs {
		return Err(HintError::OutputArity {
			expected: n_outputs,
			actual: outputs.len(),
		});
	}
	Ok(())
}
