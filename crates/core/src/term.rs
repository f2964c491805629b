// Copyright 2025 Irreducible Inc.
//! Wires, coefficient references and terms.

use std::{cmp::Ordering, fmt};

use cranelift_entity::{EntityRef, entity_impl};

use crate::{coefficients::CoefficientTable, field::SolverField};

/// A wire of the compiled circuit.
///
/// Wires are dense indices into the solution vector. Wire `0` is the distinguished "one" wire: it
/// is public and always carries the value `1`, so `c * ONE` spells the constant `c`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct WireId(u32);
entity_impl!(WireId);

impl WireId {
	/// The wire that always holds `1`.
	pub const ONE: WireId = WireId(0);
	/// A wire id that never refers to a real wire.
	pub const INVALID: WireId = WireId(u32::MAX);
}

/// An index into the shared [`CoefficientTable`](crate::CoefficientTable).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct CoeffId(u32);
entity_impl!(CoeffId);

impl CoeffId {
	/// Reserved id of the constant `0`.
	pub const ZERO: CoeffId = CoeffId(0);
	/// Reserved id of the constant `1`.
	pub const ONE: CoeffId = CoeffId(1);
	/// Reserved id of the constant `2`.
	pub const TWO: CoeffId = CoeffId(2);
	/// Reserved id of the constant `-1`.
	pub const MINUS_ONE: CoeffId = CoeffId(3);

	/// Number of reserved ids. Every table starts with exactly these entries.
	pub const N_RESERVED: usize = 4;

	/// Returns `true` for `1` and `-1`, the coefficients that are elided when rendering a term.
	pub fn is_unit(self) -> bool {
		self == CoeffId::ONE || self == CoeffId::MINUS_ONE
	}
}

/// Classification of the wire a term refers to.
///
/// The declaration order is the canonical rank, so the derived `Ord` sorts `Virtual` lowest and
/// `Public` highest.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Visibility {
	/// The term does not reference a wire; only its coefficient contributes.
	Virtual,
	/// Compiler-introduced wire.
	Internal,
	/// Private input.
	Secret,
	/// Public input, including the one wire.
	Public,
}

/// `coefficient × wire`.
///
/// Terms are plain values; they are copied around freely and never mutated in place.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Term {
	/// The coefficient, looked up in the shared table.
	pub coeff: CoeffId,
	/// The wire. Meaningless for [`Visibility::Virtual`] terms.
	pub wire: WireId,
	/// The wire's visibility.
	pub visibility: Visibility,
}

impl Term {
	/// Marker separating evaluation spans inside a log entry.
	pub const DELIMITER: Term = Term {
		coeff: CoeffId::ZERO,
		wire: WireId::INVALID,
		visibility: Visibility::Virtual,
	};

	/// Creates a term referencing a real wire.
	pub fn new(coeff: CoeffId, wire: WireId, visibility: Visibility) -> Self {
		Self {
			coeff,
			wire,
			visibility,
		}
	}

	/// Creates a constant term that references no wire.
	pub fn constant(coeff: CoeffId) -> Self {
		Self {
			coeff,
			wire: WireId::ONE,
			visibility: Visibility::Virtual,
		}
	}

	/// Splits the term into its parts.
	#[inline]
	pub fn unpack(self) -> (CoeffId, WireId, Visibility) {
		(self.coeff, self.wire, self.visibility)
	}

	/// Returns `true` if the term only carries a constant.
	#[inline]
	pub fn is_virtual(self) -> bool {
		self.visibility == Visibility::Virtual
	}

	/// Returns `true` if this is the log span marker.
	#[inline]
	pub fn is_delimiter(self) -> bool {
		self == Term::DELIMITER
	}

	/// Canonical ordering: visibility descending, then wire ascending.
	///
	/// The coefficient does not take part in the ordering.
	pub fn canonical_cmp(&self, other: &Term) -> Ordering {
		other
			.visibility
			.cmp(&self.visibility)
			.then(self.wire.cmp(&other.wire))
	}

	/// Returns `true` if `self` sorts strictly before `other` canonically.
	pub fn less(&self, other: &Term) -> bool {
		self.canonical_cmp(other) == Ordering::Less
	}

	/// Displays the term with its coefficient looked up in `coefficients`.
	pub fn symbolic<'a, F: SolverField>(
		&'a self,
		coefficients: &'a CoefficientTable<F>,
	) -> Symbolic<'a, Term, F> {
		Symbolic::new(self, coefficients)
	}
}

/// Symbolic rendering of a [`Term`] or [`LinearCombination`](crate::LinearCombination).
///
/// Wires print as `w{index}`. A coefficient of `1` is left out and `-1` becomes a leading `-`;
/// any other coefficient prints as `c⋅w{index}`. Constants print as their value.
pub struct Symbolic<'a, T: ?Sized, F: SolverField> {
	pub(crate) value: &'a T,
	pub(crate) coefficients: &'a CoefficientTable<F>,
}

impl<'a, T: ?Sized, F: SolverField> Symbolic<'a, T, F> {
	pub(crate) fn new(value: &'a T, coefficients: &'a CoefficientTable<F>) -> Self {
		Self {
			value,
			coefficients,
		}
	}
}

impl<F: SolverField> fmt::Display for Symbolic<'_, Term, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (coeff, wire, _) = self.value.unpack();
		if self.value.is_virtual() {
			return match coeff {
				CoeffId::MINUS_ONE => write!(f, "-1"),
				_ => write!(f, "{}", self.coefficients[coeff].to_decimal()),
			};
		}
		match coeff {
			CoeffId::ONE => write!(f, "w{}", wire.index()),
			CoeffId::MINUS_ONE => write!(f, "-w{}", wire.index()),
			_ => write!(f, "{}⋅w{}", self.coefficients[coeff].to_decimal(), wire.index()),
		}
	}
}
