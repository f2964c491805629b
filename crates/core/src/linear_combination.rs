// Copyright 2025 Irreducible Inc.
//! Sparse linear combinations of wires.

use std::{
	fmt,
	ops::{Deref, DerefMut},
};

use crate::{
	coefficients::CoefficientTable,
	field::SolverField,
	term::{Symbolic, Term, Visibility, WireId},
};

/// An ordered sum of [`Term`]s.
///
/// Compilers store combinations in canonical order (see [`Term::canonical_cmp`]). Equality is
/// positional and assumes both sides are already canonical; nothing here sorts implicitly, so two
/// combinations with the same terms in different orders compare unequal.
///
/// A combination with no terms is *unset*: it stands for a variable that was declared but never
/// assigned, and using it as a value is a programming error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LinearCombination(Vec<Term>);

impl LinearCombination {
	/// Creates an unset combination.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Element-wise comparison.
	///
	/// # Preconditions
	///
	/// Both `self` and `other` are canonically sorted.
	pub fn equal(&self, other: &LinearCombination) -> bool {
		debug_assert!(self.is_sorted_canonical() && other.is_sorted_canonical());
		self.0 == other.0
	}

	/// Returns `true` if the combination is `c * ONE` for a single coefficient `c`.
	pub fn is_constant(&self) -> bool {
		match self.0.as_slice() {
			[term] => term.wire == WireId::ONE && term.visibility == Visibility::Public,
			_ => false,
		}
	}

	/// Asserts that the combination carries a value.
	///
	/// # Panics
	///
	/// Panics if the combination has no terms.
	#[track_caller]
	pub fn assert_is_set(&self) {
		if self.0.is_empty() {
			panic!("no value: linear combination was declared but never assigned");
		}
	}

	/// Sorts the terms into canonical order.
	pub fn sort_canonical(&mut self) {
		self.0.sort_by(Term::canonical_cmp);
	}

	/// Returns `true` if the terms are in canonical order.
	pub fn is_sorted_canonical(&self) -> bool {
		self.0.windows(2).all(|w| !w[1].less(&w[0]))
	}

	/// Consumes the combination and returns its terms.
	pub fn into_terms(self) -> Vec<Term> {
		self.0
	}

	/// Displays the combination as a sum of [symbolic](Term::symbolic) terms.
	pub fn symbolic<'a, F: SolverField>(
		&'a self,
		coefficients: &'a CoefficientTable<F>,
	) -> Symbolic<'a, LinearCombination, F> {
		Symbolic::new(self, coefficients)
	}
}

impl<F: SolverField> fmt::Display for Symbolic<'_, LinearCombination, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.value.is_empty() {
			return write!(f, "<unset>");
		}
		for (i, term) in self.value.iter().enumerate() {
			if i > 0 {
				write!(f, " + ")?;
			}
			write!(f, "{}", term.symbolic(self.coefficients))?;
		}
		Ok(())
	}
}

impl Deref for LinearCombination {
	type Target = Vec<Term>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for LinearCombination {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl From<Vec<Term>> for LinearCombination {
	fn from(terms: Vec<Term>) -> Self {
		Self(terms)
	}
}

impl FromIterator<Term> for LinearCombination {
	fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> IntoIterator for &'a LinearCombination {
	type Item = &'a Term;
	type IntoIter = std::slice::Iter<'a, Term>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
