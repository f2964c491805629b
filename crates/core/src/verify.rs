// Copyright 2025 Irreducible Inc.
//! Routines for checking whether a [constraint system][`ConstraintSystem`] is satisfied by a
//! complete assignment of wire values.

use cranelift_entity::EntityRef;

use crate::{
	coefficients::CoefficientTable,
	constraint_system::{Constraint, ConstraintSystem},
	field::SolverField,
	linear_combination::LinearCombination,
	term::Term,
};

/// Evaluates `coeff × value` for a term against a full assignment.
#[inline]
pub fn eval_term<F: SolverField>(coefficients: &CoefficientTable<F>, values: &[F], term: Term) -> F {
	if term.is_virtual() {
		coefficients[term.coeff]
	} else {
		coefficients[term.coeff] * values[term.wire.index()]
	}
}

/// Evaluates a linear combination against a full assignment.
pub fn eval_linear_combination<F: SolverField>(
	coefficients: &CoefficientTable<F>,
	values: &[F],
	lc: &LinearCombination,
) -> F {
	lc.iter()
		.fold(F::zero(), |acc, t| acc + eval_term(coefficients, values, *t))
}

/// Verifies every constraint of `cs` against `values`.
///
/// Returns the index and residual of the first violated constraint.
pub fn verify_constraints<F: SolverField, C: Constraint>(
	cs: &ConstraintSystem<F, C>,
	values: &[F],
) -> Result<(), String> {
	if values.len() != cs.n_wires() {
		return Err(format!(
			"assignment has {} values, the constraint system has {} wires",
			values.len(),
			cs.n_wires()
		));
	}
	for (index, constraint) in cs.constraints.iter().enumerate() {
		let residual = constraint.residual(&cs.coefficients, &mut |t| {
			eval_term(&cs.coefficients, values, t)
		});
		if !residual.is_zero() {
			return Err(format!(
				"{} #{index} failed: residual {} (expected 0)",
				C::KIND,
				residual.to_decimal()
			));
		}
	}
	Ok(())
}
