// Copyright 2025 Irreducible Inc.
//! Solving sparse gates, whose residual is affine in the unknown wire.

use witsolve_core::{Constraint, SparseR1c, SolverField, Term, WireId};

use super::{Outcome, SolvableConstraint, SolveContext};
use crate::{error::SolverError, log::render, solution::Solution};

impl SolvableConstraint for SparseR1c {
	fn solve<F: SolverField>(
		&self,
		solution: &mut Solution<'_, F>,
		ctx: &SolveContext<'_>,
	) -> Result<Outcome, SolverError> {
		let terms = [self.l, self.r, self.o, self.m[0], self.m[1]];
		let mut unknown: Option<WireId> = None;
		for term in terms {
			ctx.resolve(solution, term)?;
			if solution.is_known(term) {
				continue;
			}
			match unknown {
				Some(wire) if wire != term.wire => return Ok(Outcome::Unsolvable),
				_ => unknown = Some(term.wire),
			}
		}

		let coefficients = solution.coefficients();
		let Some(x) = unknown else {
			let residual = self.residual(coefficients, &mut |t| solution.compute_term(t));
			return Ok(if residual.is_zero() {
				Outcome::Satisfied
			} else {
				Outcome::Unsatisfied
			});
		};

		// `x·x` cannot be isolated.
		if [self.m[0], self.m[1]].iter().all(|m| !solution.is_known(*m) && m.wire == x) {
			return Ok(Outcome::Unsolvable);
		}

		// The residual is affine in x: alpha·x + beta.
		let at = |value: F| {
			self.residual(coefficients, &mut |t: Term| {
				if solution.is_known(t) {
					solution.compute_term(t)
				} else {
					coefficients[t.coeff] * value
				}
			})
		};
		let beta = at(F::zero());
		let alpha = at(F::one()) - beta;

		let (value, outcome) = match alpha.inverse() {
			Some(inv_alpha) => (-beta * inv_alpha, Outcome::Satisfied),
			// x drops out: any value fits if the rest cancels.
			None if beta.is_zero() => (F::zero(), Outcome::Satisfied),
			None => (F::zero(), Outcome::Unsatisfied),
		};
		solution.set(x, value);
		Ok(outcome)
	}

	fn describe<F: SolverField>(&self, solution: &Solution<'_, F>) -> String {
		let coefficients = solution.coefficients();
		let term = |t: Term| render(solution.is_known(t).then(|| solution.compute_term(t)));
		let k = coefficients[self.k].to_decimal();
		format!(
			"{} + {} + {} + {} ⋅ {} + {k} != 0 in {} + {} + {} + {} ⋅ {} + {k} = 0",
			term(self.l),
			term(self.r),
			term(self.o),
			term(self.m[0]),
			term(self.m[1]),
			self.l.symbolic(coefficients),
			self.r.symbolic(coefficients),
			self.o.symbolic(coefficients),
			self.m[0].symbolic(coefficients),
			self.m[1].symbolic(coefficients),
		)
	}
}
