// Copyright 2025 Irreducible Inc.
//! Mutable state of one solve.

use std::{collections::HashMap, sync::Arc};

use cranelift_entity::EntityRef;
use witsolve_core::{
	CoeffId, CoefficientTable, HintDescriptor, HintId, LinearCombination, SolverField, Term,
	WireId,
};

use crate::{
	error::SolverError,
	hints::{Arity, Hint},
	scratch::ScratchPool,
};

/// Wire values of an in-progress solve.
///
/// Every wire goes from unsolved to solved exactly once. The solution owns its values exclusively;
/// only the coefficient table is borrowed from the compiled system.
pub struct Solution<'a, F: SolverField> {
	values: Vec<F>,
	solved: Vec<bool>,
	n_solved: usize,
	coefficients: &'a CoefficientTable<F>,
	hints: HashMap<HintId, Arc<dyn Hint>>,
}

impl<'a, F: SolverField> Solution<'a, F> {
	/// Creates a solution with every wire unsolved.
	///
	/// `hints` is every function the solve may call; two functions with the same id are an error.
	pub fn new(
		n_wires: usize,
		coefficients: &'a CoefficientTable<F>,
		hints: impl IntoIterator<Item = Arc<dyn Hint>>,
	) -> Result<Self, SolverError> {
		let mut table = HashMap::new();
		for hint in hints {
			let id = hint.id();
			if table.contains_key(&id) {
				return Err(SolverError::DuplicateHint {
					id,
					name: hint.name().to_string(),
				});
			}
			table.insert(id, hint);
		}
		Ok(Self {
			values: vec![F::zero(); n_wires],
			solved: vec![false; n_wires],
			n_solved: 0,
			coefficients,
			hints: table,
		})
	}

	/// Assigns `value` to `wire`.
	///
	/// # Panics
	///
	/// Panics if the wire is already solved.
	pub fn set(&mut self, wire: WireId, value: F) {
		let index = wire.index();
		if self.solved[index] {
			panic!("solving the same wire twice should never happen (wire {index})");
		}
		self.values[index] = value;
		self.solved[index] = true;
		self.n_solved += 1;
	}

	/// Returns `true` if `wire` has a value.
	#[inline]
	pub fn is_solved(&self, wire: WireId) -> bool {
		self.solved[wire.index()]
	}

	/// The value of `wire`, if solved.
	#[inline]
	pub fn value(&self, wire: WireId) -> Option<F> {
		let index = wire.index();
		self.solved[index].then(|| self.values[index])
	}

	/// Number of solved wires.
	pub fn n_solved(&self) -> usize {
		self.n_solved
	}

	/// Number of wires.
	pub fn n_wires(&self) -> usize {
		self.values.len()
	}

	/// Returns `true` once every wire is solved.
	pub fn is_valid(&self) -> bool {
		self.n_solved == self.values.len()
	}

	/// The coefficient table of the system being solved.
	pub fn coefficients(&self) -> &'a CoefficientTable<F> {
		self.coefficients
	}

	/// The contribution `coefficient × value` of `term`.
	///
	/// Virtual terms contribute their coefficient. The reserved coefficients skip the
	/// multiplication.
	///
	/// # Panics
	///
	/// Panics if the term references an unsolved wire with a non-zero coefficient.
	#[inline]
	pub fn compute_term(&self, term: Term) -> F {
		let (coeff, wire, _) = term.unpack();
		if term.is_virtual() {
			return self.coefficients[coeff];
		}
		if coeff == CoeffId::ZERO {
			return F::zero();
		}
		let Some(value) = self.value(wire) else {
			panic!("computing a term with an unsolved wire (wire {})", wire.index());
		};
		match coeff {
			CoeffId::ONE => value,
			CoeffId::TWO => value.double(),
			CoeffId::MINUS_ONE => -value,
			_ => self.coefficients[coeff] * value,
		}
	}

	/// Returns `true` if [`compute_term`](Self::compute_term) can evaluate `term`.
	#[inline]
	pub fn is_known(&self, term: Term) -> bool {
		term.is_virtual() || term.coeff == CoeffId::ZERO || self.is_solved(term.wire)
	}

	/// Sums `lc`, or returns `None` if it references an unsolved wire.
	pub fn evaluate(&self, lc: &LinearCombination) -> Option<F> {
		let mut sum = F::zero();
		for &term in lc.iter() {
			if !self.is_known(term) {
				return None;
			}
			sum += self.compute_term(term);
		}
		Some(sum)
	}

	/// Solves `wire` by calling the hint that produces it.
	///
	/// All outputs of the call are assigned at once, so asking for another output of the same
	/// call afterwards is a no-op. A failing call assigns nothing.
	pub fn solve_with_hint(
		&mut self,
		wire: WireId,
		descriptor: &HintDescriptor,
		scratch: &ScratchPool,
	) -> Result<(), SolverError> {
		if self.is_solved(wire) {
			return Ok(());
		}

		let Some(handler) = self.hints.get(&descriptor.id).cloned() else {
			return Err(SolverError::MissingHint {
				id: descriptor.id,
				wire: wire.as_u32(),
			});
		};

		let n_inputs = descriptor.inputs.len();
		if !handler.n_inputs().accepts(n_inputs) {
			let expected = match handler.n_inputs() {
				Arity::Fixed(n) => n,
				Arity::Any => n_inputs,
			};
			return Err(SolverError::HintArity {
				name: handler.name().to_string(),
				what: "inputs",
				expected,
				actual: n_inputs,
			});
		}
		let n_outputs = handler.n_outputs(n_inputs);
		if n_outputs != descriptor.wires.len() {
			return Err(SolverError::HintArity {
				name: handler.name().to_string(),
				what: "outputs",
				expected: n_outputs,
				actual: descriptor.wires.len(),
			});
		}

		let mut buffer = scratch.take(n_inputs + n_outputs);
		let (inputs, outputs) = buffer.split_at_mut(n_inputs);
		for (input, lc) in inputs.iter_mut().zip(&descriptor.inputs) {
			lc.assert_is_set();
			let mut sum = F::zero();
			for &term in lc.iter() {
				if !term.is_virtual() && !self.is_solved(term.wire) {
					return Err(SolverError::UnresolvedDependency {
						wire: term.wire.as_u32(),
						id: descriptor.id,
					});
				}
				sum += self.compute_term(term);
			}
			// Summing in the field keeps the input reduced modulo q.
			*input = sum.to_biguint();
		}

		tracing::trace!(hint = handler.name(), wire = wire.index(), n_inputs, n_outputs, "call");
		handler
			.call(F::CURVE_ID, inputs, outputs)
			.map_err(|source| SolverError::HintFailed {
				name: handler.name().to_string(),
				source,
			})?;

		for (&out_wire, value) in descriptor.wires.iter().zip(outputs.iter()) {
			self.set(out_wire, F::from_biguint(value));
		}
		Ok(())
	}

	/// Consumes the solution, returning one value per wire.
	pub fn into_values(self) -> Vec<F> {
		self.values
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicBool, Ordering};

	use ark_bn254::Fr;
	use ark_ff::{One, Zero};
	use num_bigint::BigUint;
	use proptest::prelude::*;
	use rand::{Rng, SeedableRng, rngs::StdRng};
	use witsolve_core::Visibility;

	use super::*;
	use crate::{
		error::HintError,
		hints::{FixedHint, HintRegistry, IsZeroHint},
	};

	fn wire(i: usize) -> WireId {
		WireId::new(i)
	}

	fn internal(coeff: CoeffId, i: usize) -> Term {
		Term::new(coeff, wire(i), Visibility::Internal)
	}

	fn no_hints() -> Vec<Arc<dyn Hint>> {
		Vec::new()
	}

	#[test]
	fn test_reserved_coefficients_match_multiplication() {
		let mut rng = StdRng::seed_from_u64(0);
		let mut table = CoefficientTable::<Fr>::new();
		let other = table.insert(Fr::from(12345u64));

		for _ in 0..32 {
			let value = Fr::from(rng.random::<u64>());
			let mut solution = Solution::new(2, &table, no_hints()).unwrap();
			solution.set(wire(1), value);
			for coeff in [CoeffId::ZERO, CoeffId::ONE, CoeffId::TWO, CoeffId::MINUS_ONE, other] {
				let term = internal(coeff, 1);
				assert_eq!(solution.compute_term(term), table[coeff] * value);
			}
		}
	}

	#[test]
	fn test_zero_coefficient_skips_the_wire() {
		let table = CoefficientTable::<Fr>::new();
		let solution = Solution::new(2, &table, no_hints()).unwrap();
		assert_eq!(solution.compute_term(internal(CoeffId::ZERO, 1)), Fr::zero());
		assert_eq!(solution.compute_term(Term::constant(CoeffId::TWO)), Fr::from(2u64));
	}

	#[test]
	#[should_panic(expected = "unsolved wire")]
	fn test_unsolved_term_panics() {
		let table = CoefficientTable::<Fr>::new();
		let solution = Solution::new(2, &table, no_hints()).unwrap();
		solution.compute_term(internal(CoeffId::ONE, 1));
	}

	#[test]
	#[should_panic(expected = "solving the same wire twice")]
	fn test_double_set_panics() {
		let table = CoefficientTable::<Fr>::new();
		let mut solution = Solution::new(2, &table, no_hints()).unwrap();
		solution.set(wire(1), Fr::one());
		solution.set(wire(1), Fr::one());
	}

	#[test]
	fn test_progress() {
		let table = CoefficientTable::<Fr>::new();
		let mut solution = Solution::new(3, &table, no_hints()).unwrap();
		assert_eq!(solution.n_solved(), 0);
		solution.set(wire(0), Fr::one());
		solution.set(wire(2), Fr::from(9u64));
		assert!(!solution.is_valid());
		assert_eq!(solution.value(wire(1)), None);
		let lc = LinearCombination::from(vec![internal(CoeffId::TWO, 2)]);
		assert_eq!(solution.evaluate(&lc), Some(Fr::from(18u64)));
		let lc = LinearCombination::from(vec![internal(CoeffId::TWO, 1)]);
		assert_eq!(solution.evaluate(&lc), None);
		solution.set(wire(1), Fr::zero());
		assert!(solution.is_valid());
		assert_eq!(solution.into_values()[2], Fr::from(9u64));
	}

	#[test]
	fn test_duplicate_hint_functions() {
		let table = CoefficientTable::<Fr>::new();
		let hints: Vec<Arc<dyn Hint>> =
			vec![Arc::new(IsZeroHint::new()), Arc::new(IsZeroHint::new())];
		let err = Solution::new(1, &table, hints).err().unwrap();
		assert!(matches!(err, SolverError::DuplicateHint { .. }));
	}

	fn pair_doubling() -> Arc<dyn Hint> {
		Arc::new(FixedHint::new("double_pair", 2, 2, |_, inputs, outputs| {
			for (out, input) in outputs.iter_mut().zip(inputs) {
				*out = input * 2u32;
			}
			Ok(())
		}))
	}

	#[test]
	fn test_multi_output_hint_is_idempotent() {
		let table = CoefficientTable::<Fr>::new();
		let hint = pair_doubling();
		let descriptor = HintDescriptor {
			id: hint.id(),
			inputs: vec![
				LinearCombination::from(vec![internal(CoeffId::ONE, 1)]),
				LinearCombination::from(vec![internal(CoeffId::ONE, 2)]),
			],
			wires: vec![wire(3), wire(4)],
		};
		let registry = HintRegistry::new();
		let mut solution = Solution::new(5, &table, vec![hint]).unwrap();
		solution.set(wire(1), Fr::from(5u64));
		solution.set(wire(2), Fr::from(7u64));

		solution.solve_with_hint(wire(3), &descriptor, registry.scratch()).unwrap();
		assert_eq!(solution.n_solved(), 4);
		solution.solve_with_hint(wire(4), &descriptor, registry.scratch()).unwrap();
		solution.solve_with_hint(wire(3), &descriptor, registry.scratch()).unwrap();
		assert_eq!(solution.n_solved(), 4);
		assert_eq!(solution.value(wire(3)), Some(Fr::from(10u64)));
		assert_eq!(solution.value(wire(4)), Some(Fr::from(14u64)));
		assert_eq!(registry.scratch().available(), 4);
	}

	#[test]
	fn test_inputs_are_reduced() {
		let table = CoefficientTable::<Fr>::new();
		let seen = Arc::new(std::sync::Mutex::new(BigUint::ZERO));
		let seen_in_hint = Arc::clone(&seen);
		let hint: Arc<dyn Hint> = Arc::new(FixedHint::new("echo", 1, 1, move |_, inputs, outputs| {
			*seen_in_hint.lock().unwrap() = inputs[0].clone();
			outputs[0] = inputs[0].clone();
			Ok(())
		}));
		// -1 + 3 is 2 in the field, not q + 2.
		let descriptor = HintDescriptor {
			id: hint.id(),
			inputs: vec![LinearCombination::from(vec![
				internal(CoeffId::MINUS_ONE, 1),
				Term::constant(CoeffId::TWO),
				Term::constant(CoeffId::ONE),
			])],
			wires: vec![wire(2)],
		};
		let mut solution = Solution::new(3, &table, vec![hint]).unwrap();
		solution.set(wire(1), Fr::one());
		solution.solve_with_hint(wire(2), &descriptor, &ScratchPool::default()).unwrap();
		assert_eq!(*seen.lock().unwrap(), BigUint::from(2u32));
	}

	#[test]
	fn test_hint_errors() {
		let table = CoefficientTable::<Fr>::new();
		let failing: Arc<dyn Hint> = Arc::new(FixedHint::new("fail", 1, 1, |_, _, _| {
			Err(HintError::Undefined("nope".to_string()))
		}));
		let scratch = ScratchPool::default();
		let descriptor = |id, n_inputs: usize| HintDescriptor {
			id,
			inputs: vec![LinearCombination::from(vec![internal(CoeffId::ONE, 1)]); n_inputs],
			wires: vec![wire(2)],
		};
		let mut solution = Solution::new(3, &table, vec![Arc::clone(&failing)]).unwrap();

		let err = solution
			.solve_with_hint(wire(2), &descriptor(HintId(7), 1), &scratch)
			.unwrap_err();
		assert!(matches!(err, SolverError::MissingHint { wire: 2, .. }));

		let err = solution
			.solve_with_hint(wire(2), &descriptor(failing.id(), 1), &scratch)
			.unwrap_err();
		assert!(matches!(err, SolverError::UnresolvedDependency { wire: 1, .. }));

		solution.set(wire(1), Fr::one());
		let err = solution
			.solve_with_hint(wire(2), &descriptor(failing.id(), 2), &scratch)
			.unwrap_err();
		assert!(matches!(
			err,
			SolverError::HintArity {
				what: "inputs",
				expected: 1,
				actual: 2,
				..
			}
		));

		let err = solution
			.solve_with_hint(wire(2), &descriptor(failing.id(), 1), &scratch)
			.unwrap_err();
		assert!(matches!(err, SolverError::HintFailed { .. }));
		assert!(!solution.is_solved(wire(2)));
		assert_eq!(scratch.available(), 2);
	}

	#[test]
	#[should_panic(expected = "no value")]
	fn test_unset_hint_input_panics() {
		let table = CoefficientTable::<Fr>::new();
		let hint: Arc<dyn Hint> = Arc::new(IsZeroHint::new());
		let descriptor = HintDescriptor {
			id: hint.id(),
			inputs: vec![LinearCombination::new()],
			wires: vec![wire(1)],
		};
		let mut solution = Solution::new(2, &table, vec![hint]).unwrap();
		let _ = solution.solve_with_hint(wire(1), &descriptor, &ScratchPool::default());
	}

	#[test]
	fn test_output_count_checked_before_call() {
		let table = CoefficientTable::<Fr>::new();
		let called = Arc::new(AtomicBool::new(false));
		let called_in_hint = Arc::clone(&called);
		let hint: Arc<dyn Hint> = Arc::new(FixedHint::new("copy", 1, 1, move |_, inputs, outputs| {
			called_in_hint.store(true, Ordering::SeqCst);
			outputs[0] = inputs[0].clone();
			Ok(())
		}));
		let descriptor = HintDescriptor {
			id: hint.id(),
			inputs: vec![LinearCombination::from(vec![internal(CoeffId::ONE, 1)])],
			wires: vec![wire(2), wire(3)],
		};
		let scratch = ScratchPool::default();
		let mut solution = Solution::new(4, &table, vec![hint]).unwrap();
		solution.set(wire(1), Fr::from(3u64));

		let err = solution
			.solve_with_hint(wire(2), &descriptor, &scratch)
			.unwrap_err();
		assert!(matches!(
			err,
			SolverError::HintArity {
				what: "outputs",
				expected: 1,
				actual: 2,
				..
			}
		));
		assert!(!called.load(Ordering::SeqCst));
		assert!(!solution.is_solved(wire(2)));
		assert!(!solution.is_solved(wire(3)));
	}

	proptest! {
		#[test]
		fn prop_evaluate_matches_direct_sum(
			values in prop::collection::vec(any::<u64>(), 1..8),
			constant in any::<u64>(),
		) {
			let mut table = CoefficientTable::<Fr>::new();
			let c = table.insert(Fr::from(constant));
			let mut solution = Solution::new(values.len(), &table, no_hints()).unwrap();
			let mut expected = Fr::from(constant);
			let mut lc = LinearCombination::from(vec![Term::constant(c)]);
			for (i, &v) in values.iter().enumerate() {
				solution.set(wire(i), Fr::from(v));
				let coeff = [CoeffId::ONE, CoeffId::TWO, CoeffId::MINUS_ONE][i % 3];
				expected += table[coeff] * Fr::from(v);
				lc.push(internal(coeff, i));
			}
			prop_assert_eq!(solution.evaluate(&lc), Some(expected));
		}
	}
}
