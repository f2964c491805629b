// Copyright 2025 Irreducible Inc.
//! Constraint-driven witness solving.
//!
//! Constraints are visited in the order the compiler emitted them. Each one may reference at most
//! one wire that is still unknown once the hints producing its wires have run; that wire is
//! solved from the constraint. A constraint without unknowns is checked instead.

mod r1cs;
mod sparse;

use std::{collections::HashMap, sync::Arc};

use cranelift_entity::EntityRef;
use witsolve_core::{Constraint, ConstraintSystem, HintDescriptor, SolverField, Term, WireId};

use crate::{
	error::SolverError, hints::HintRegistry, options::SolverOptions, scratch::ScratchPool,
	solution::Solution,
};

/// Number of unsatisfied constraints remembered by a forced solve.
pub const MAX_RECORDED_FAILURES: usize = 100;

/// What visiting a constraint established.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
	/// The constraint holds, possibly after solving its unknown wire.
	Satisfied,
	/// Every wire is known and the constraint does not hold.
	Unsatisfied,
	/// The constraint references more than one unknown wire, or its unknown cannot be isolated.
	Unsolvable,
}

/// Hint calls and buffers shared by the constraints of a solve.
pub struct SolveContext<'a> {
	/// Maps hint output wires to the call producing them.
	pub hints: &'a HashMap<WireId, Arc<HintDescriptor>>,
	/// Buffers for hint calls.
	pub scratch: &'a ScratchPool,
}

impl SolveContext<'_> {
	/// Runs the hint producing `term`'s wire, if there is one and the wire is still unsolved.
	pub fn resolve<F: SolverField>(
		&self,
		solution: &mut Solution<'_, F>,
		term: Term,
	) -> Result<(), SolverError> {
		if term.is_virtual() || solution.is_solved(term.wire) {
			return Ok(());
		}
		match self.hints.get(&term.wire) {
			Some(descriptor) => solution.solve_with_hint(term.wire, descriptor, self.scratch),
			None => Ok(()),
		}
	}
}

/// A constraint kind the solver knows how to solve for one unknown.
pub trait SolvableConstraint: Constraint {
	/// Resolves the hints behind the constraint's wires, then either solves its single unknown
	/// wire or checks it.
	fn solve<F: SolverField>(
		&self,
		solution: &mut Solution<'_, F>,
		ctx: &SolveContext<'_>,
	) -> Result<Outcome, SolverError>;

	/// Renders the constraint with the values known so far.
	fn describe<F: SolverField>(&self, solution: &Solution<'_, F>) -> String;
}

/// A complete assignment of wire values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<F> {
	/// One value per wire.
	pub values: Vec<F>,
	/// Indices of the constraints that do not hold, at most [`MAX_RECORDED_FAILURES`] of them.
	/// Only a forced solve returns a witness with failures.
	pub unsatisfied: Vec<usize>,
	/// Total number of constraints that do not hold.
	pub n_unsatisfied: usize,
}

impl<F> Witness<F> {
	/// Returns `true` if every constraint holds.
	pub fn is_satisfied(&self) -> bool {
		self.n_unsatisfied == 0
	}
}

/// Solving entry point for compiled systems.
pub trait Solve<F: SolverField> {
	/// Computes every wire from the caller's inputs.
	///
	/// `assignment` holds the public inputs (without the one wire) followed by the secret inputs.
	fn solve(
		&self,
		assignment: &[F],
		registry: &HintRegistry,
		options: SolverOptions,
	) -> Result<Witness<F>, SolverError>;
}

impl<F: SolverField, C: SolvableConstraint> Solve<F> for ConstraintSystem<F, C> {
	fn solve(
		&self,
		assignment: &[F],
		registry: &HintRegistry,
		options: SolverOptions,
	) -> Result<Witness<F>, SolverError> {
		solve(self, assignment, registry, options)
	}
}

/// Computes every wire of `cs` from the caller's inputs.
///
/// The hint functions available are those of `registry` plus
/// [`SolverOptions::hint_functions`]. The circuit's log lines are written to
/// [`SolverOptions::logger`] whether or not the solve succeeds.
///
/// # Panics
///
/// Panics if a wire is still unsolved after every constraint and hint was processed.
pub fn solve<F: SolverField, C: SolvableConstraint>(
	cs: &ConstraintSystem<F, C>,
	assignment: &[F],
	registry: &HintRegistry,
	options: SolverOptions,
) -> Result<Witness<F>, SolverError> {
	let _scope = tracing::debug_span!(
		"solve",
		kind = C::KIND,
		n_wires = cs.n_wires(),
		n_constraints = cs.n_constraints()
	)
	.entered();

	let SolverOptions {
		force,
		hint_functions,
		mut logger,
	} = options;

	let expected = cs.layout.n_inputs();
	if assignment.len() != expected {
		return Err(SolverError::WitnessSize {
			expected,
			actual: assignment.len(),
		});
	}

	let hints = registry.snapshot().into_iter().chain(hint_functions);
	let mut solution = Solution::new(cs.n_wires(), &cs.coefficients, hints)?;
	solution.set(WireId::ONE, F::one());
	for (i, &value) in assignment.iter().enumerate() {
		solution.set(WireId::new(i + 1), value);
	}

	let ctx = SolveContext {
		hints: &cs.hints,
		scratch: registry.scratch(),
	};
	let result = run(cs, &mut solution, &ctx, force);

	if let Some(logger) = logger.as_mut() {
		if let Err(err) = solution.print_logs(logger, &cs.logs) {
			tracing::warn!(%err, "failed to write circuit logs");
		}
	}

	let (unsatisfied, n_unsatisfied) = result?;
	assert!(solution.is_valid(), "solver didn't instantiate all wires");
	tracing::debug!(n_unsatisfied, "solved");

	Ok(Witness {
		values: solution.into_values(),
		unsatisfied,
		n_unsatisfied,
	})
}

fn run<F: SolverField, C: SolvableConstraint>(
	cs: &ConstraintSystem<F, C>,
	solution: &mut Solution<'_, F>,
	ctx: &SolveContext<'_>,
	force: bool,
) -> Result<(Vec<usize>, usize), SolverError> {
	let mut unsatisfied = Vec::new();
	let mut n_unsatisfied = 0;

	for (index, constraint) in cs.constraints.iter().enumerate() {
		match constraint.solve(solution, ctx)? {
			Outcome::Satisfied => {}
			Outcome::Unsolvable => {
				return Err(SolverError::UnsolvableConstraint { constraint: index });
			}
			Outcome::Unsatisfied => {
				let debug = match cs.debug_info.get(&index) {
					Some(entry) => solution.log_value(entry),
					None => constraint.describe(solution),
				};
				if !force {
					return Err(SolverError::UnsatisfiedConstraint {
						constraint: index,
						debug,
					});
				}
				note_unsatisfied(&mut unsatisfied, &mut n_unsatisfied, index, &debug);
			}
		}
	}

	// Hint outputs that no constraint references are still owed to the witness.
	let mut pending: Vec<_> = cs
		.hints
		.iter()
		.filter(|(wire, _)| !solution.is_solved(**wire))
		.collect();
	pending.sort_by_key(|(wire, _)| wire.index());
	for (&wire, descriptor) in pending {
		solution.solve_with_hint(wire, descriptor, ctx.scratch)?;
	}

	Ok((unsatisfied, n_unsatisfied))
}

#[cold]
fn note_unsatisfied(
	unsatisfied: &mut Vec<usize>,
	n_unsatisfied: &mut usize,
	index: usize,
	detail: &str,
) {
	tracing::warn!(constraint = index, detail = %detail, "constraint is not satisfied");
	if unsatisfied.len() < MAX_RECORDED_FAILURES {
		unsatisfied.push(index);
	}
	*n_unsatisfied += 1;
}
