// Copyright 2025 Irreducible Inc.
//! Solving `l · r = o` for the single unknown term of one operand.

use witsolve_core::{LinearCombination, R1c, SolverField, Term};

use super::{Outcome, SolvableConstraint, SolveContext};
use crate::{error::SolverError, log::render, solution::Solution};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Operand {
	L,
	R,
	O,
}

/// Sum of `lc` leaving out the term at `skip`.
fn sum_except<F: SolverField>(
	solution: &Solution<'_, F>,
	lc: &LinearCombination,
	skip: usize,
) -> F {
	lc.iter()
		.enumerate()
		.filter(|(i, _)| *i != skip)
		.fold(F::zero(), |acc, (_, t)| acc + solution.compute_term(*t))
}

fn sum<F: SolverField>(solution: &Solution<'_, F>, lc: &LinearCombination) -> F {
	lc.iter()
		.fold(F::zero(), |acc, t| acc + solution.compute_term(*t))
}

impl SolvableConstraint for R1c {
	fn solve<F: SolverField>(
		&self,
		solution: &mut Solution<'_, F>,
		ctx: &SolveContext<'_>,
	) -> Result<Outcome, SolverError> {
		let operands = [(Operand::L, &self.l), (Operand::R, &self.r), (Operand::O, &self.o)];
		for (_, lc) in operands {
			lc.assert_is_set();
		}

		let mut unknown: Option<(Operand, usize, Term)> = None;
		for (operand, lc) in operands {
			for (position, &term) in lc.iter().enumerate() {
				ctx.resolve(solution, term)?;
				if solution.is_known(term) {
					continue;
				}
				if unknown.is_some() {
					return Ok(Outcome::Unsolvable);
				}
				unknown = Some((operand, position, term));
			}
		}

		let Some((operand, position, term)) = unknown else {
			let l = sum(solution, &self.l);
			let r = sum(solution, &self.r);
			let o = sum(solution, &self.o);
			return Ok(if l * r == o {
				Outcome::Satisfied
			} else {
				Outcome::Unsatisfied
			});
		};

		let Some(inv_coeff) = solution.coefficients()[term.coeff].inverse() else {
			return Ok(Outcome::Unsolvable);
		};

		// With the unknown term `c·x` isolated, each case is linear in `x`.
		let (value, satisfied) = match operand {
			Operand::L | Operand::R => {
				let (unknown_lc, other_lc) = match operand {
					Operand::L => (&self.l, &self.r),
					_ => (&self.r, &self.l),
				};
				let rest = sum_except(solution, unknown_lc, position);
				let other = sum(solution, other_lc);
				let o = sum(solution, &self.o);
				match other.inverse() {
					// (c·x + rest)·other = o
					Some(inv_other) => ((o * inv_other - rest) * inv_coeff, true),
					// 0 = o: any x fits, pick zero.
					None => (F::zero(), o.is_zero()),
				}
			}
			Operand::O => {
				let l = sum(solution, &self.l);
				let r = sum(solution, &self.r);
				let rest = sum_except(solution, &self.o, position);
				((l * r - rest) * inv_coeff, true)
			}
		};

		solution.set(term.wire, value);
		Ok(if satisfied {
			Outcome::Satisfied
		} else {
			Outcome::Unsatisfied
		})
	}

	fn describe<F: SolverField>(&self, solution: &Solution<'_, F>) -> String {
		let coefficients = solution.coefficients();
		format!(
			"{} ⋅ {} != {} in ({}) ⋅ ({}) = {}",
			render(solution.evaluate(&self.l)),
			render(solution.evaluate(&self.r)),
			render(solution.evaluate(&self.o)),
			self.l.symbolic(coefficients),
			self.r.symbolic(coefficients),
			self.o.symbolic(coefficients)
		)
	}
}

#[cfg(test)]
mod tests {
	use std::{collections::HashMap, sync::Arc};

	use ark_bls12_381::Fr;
	use ark_ff::{One, Zero};
	use cranelift_entity::EntityRef;
	use witsolve_core::{CoeffId, CoefficientTable, Visibility, WireId};

	use super::*;
	use crate::{hints::Hint, scratch::ScratchPool};

	fn internal(coeff: CoeffId, i: usize) -> Term {
		Term::new(coeff, WireId::new(i), Visibility::Internal)
	}

	fn lc(terms: &[Term]) -> LinearCombination {
		LinearCombination::from(terms.to_vec())
	}

	fn check(
		r1c: &R1c,
		table: &CoefficientTable<Fr>,
		known: &[(usize, u64)],
	) -> (Outcome, Vec<Option<Fr>>) {
		let hints = HashMap::new();
		let scratch = ScratchPool::default();
		let ctx = SolveContext {
			hints: &hints,
			scratch: &scratch,
		};
		let mut solution = Solution::new(4, table, Vec::<Arc<dyn Hint>>::new()).unwrap();
		solution.set(WireId::ONE, Fr::one());
		for &(wire, value) in known {
			solution.set(WireId::new(wire), Fr::from(value));
		}
		let outcome = r1c.solve(&mut solution, &ctx).unwrap();
		let values = (0..4).map(|i| solution.value(WireId::new(i))).collect();
		(outcome, values)
	}

	#[test]
	fn test_solves_each_operand() {
		let mut table = CoefficientTable::<Fr>::new();
		let three = table.insert(Fr::from(3u64));
		// (3·w1 + 1) · w2 = w3
		let r1c = R1c::new(
			lc(&[internal(three, 1), Term::constant(CoeffId::ONE)]),
			lc(&[internal(CoeffId::ONE, 2)]),
			lc(&[internal(CoeffId::ONE, 3)]),
		);

		let (outcome, values) = check(&r1c, &table, &[(1, 4), (2, 5)]);
		assert_eq!(outcome, Outcome::Satisfied);
		assert_eq!(values[3], Some(Fr::from(65u64)));

		let (outcome, values) = check(&r1c, &table, &[(2, 5), (3, 65)]);
		assert_eq!(outcome, Outcome::Satisfied);
		assert_eq!(values[1], Some(Fr::from(4u64)));

		let (outcome, values) = check(&r1c, &table, &[(1, 4), (3, 65)]);
		assert_eq!(outcome, Outcome::Satisfied);
		assert_eq!(values[2], Some(Fr::from(5u64)));
	}

	#[test]
	fn test_zero_factor() {
		let table = CoefficientTable::<Fr>::new();
		let r1c = R1c::new(
			lc(&[internal(CoeffId::ONE, 1)]),
			lc(&[internal(CoeffId::ONE, 2)]),
			lc(&[internal(CoeffId::ONE, 3)]),
		);
		let (outcome, values) = check(&r1c, &table, &[(2, 0), (3, 0)]);
		assert_eq!(outcome, Outcome::Satisfied);
		assert_eq!(values[1], Some(Fr::zero()));

		let (outcome, _) = check(&r1c, &table, &[(2, 0), (3, 1)]);
		assert_eq!(outcome, Outcome::Unsatisfied);
	}

	#[test]
	fn test_check_and_unsolvable() {
		let table = CoefficientTable::<Fr>::new();
		let r1c = R1c::new(
			lc(&[internal(CoeffId::ONE, 1)]),
			lc(&[internal(CoeffId::ONE, 2)]),
			lc(&[internal(CoeffId::ONE, 3)]),
		);
		assert_eq!(check(&r1c, &table, &[(1, 2), (2, 3), (3, 6)]).0, Outcome::Satisfied);
		assert_eq!(check(&r1c, &table, &[(1, 2), (2, 3), (3, 7)]).0, Outcome::Unsatisfied);
		assert_eq!(check(&r1c, &table, &[(1, 2)]).0, Outcome::Unsolvable);
	}

	#[test]
	#[should_panic(expected = "no value")]
	fn test_unset_operand_panics() {
		let table = CoefficientTable::<Fr>::new();
		let r1c = R1c::new(
			LinearCombination::new(),
			lc(&[Term::constant(CoeffId::ONE)]),
			LinearCombination::new(),
		);
		check(&r1c, &table, &[]);
	}

	#[test]
	fn test_describe() {
		let mut table = CoefficientTable::<Fr>::new();
		let three = table.insert(Fr::from(3u64));
		let r1c = R1c::new(
			lc(&[internal(three, 1), Term::constant(CoeffId::ONE)]),
			lc(&[internal(CoeffId::ONE, 2)]),
			lc(&[internal(CoeffId::ONE, 3)]),
		);
		let mut solution = Solution::new(4, &table, Vec::<Arc<dyn Hint>>::new()).unwrap();
		solution.set(WireId::new(1), Fr::from(2u64));
		solution.set(WireId::new(2), Fr::from(5u64));
		assert_eq!(r1c.describe(&solution), "7 ⋅ 5 != <unsolved> in (3⋅w1 + 1) ⋅ (w2) = w3");
	}
}
