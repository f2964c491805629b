// Copyright 2025 Irreducible Inc.
//! Compiled constraint systems and related definitions.
//!
//! These are the artifacts an external compiler hands to the solver: a wire layout, the shared
//! coefficient table, the ordered constraint list, hint descriptors and log entries.

use std::{
	collections::{HashMap, HashSet},
	fmt,
	sync::Arc,
};

use cranelift_entity::EntityRef;

use crate::{
	coefficients::CoefficientTable,
	error::ConstraintSystemError,
	field::SolverField,
	linear_combination::LinearCombination,
	term::{CoeffId, Term, Visibility, WireId},
};

/// A stable identifier of a hint function.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct HintId(pub u32);

impl fmt::Display for HintId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:#010x}", self.0)
	}
}

/// A call to a hint function, as laid out by the compiler.
///
/// Each input is a linear combination evaluated at solve time; output `i` of the function is
/// assigned to `wires[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintDescriptor {
	/// Which function to call.
	pub id: HintId,
	/// The inputs of the call.
	pub inputs: Vec<LinearCombination>,
	/// The wires receiving the outputs, by position.
	pub wires: Vec<WireId>,
}

/// A diagnostic line to render from (partially) solved wires.
///
/// `format` contains `{}` placeholders, filled in order with the pieces resolved from
/// `to_resolve`. A [`Term::DELIMITER`] opens a span whose terms are summed into a single piece; the
/// next delimiter closes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
	/// The text with `{}` placeholders.
	pub format: String,
	/// Terms and span delimiters.
	pub to_resolve: Vec<Term>,
}

impl LogEntry {
	/// Creates a log entry.
	pub fn new(format: impl Into<String>, to_resolve: Vec<Term>) -> Self {
		Self {
			format: format.into(),
			to_resolve,
		}
	}
}

/// How wires are laid out.
///
/// Public wires come first, starting with the one wire, followed by secret and then internal
/// wires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
	/// Number of public wires, the one wire included.
	pub n_public: usize,
	/// Number of secret wires.
	pub n_secret: usize,
	/// Number of internal wires.
	pub n_internal: usize,
}

impl Layout {
	/// Total number of wires.
	pub fn n_wires(&self) -> usize {
		self.n_public + self.n_secret + self.n_internal
	}

	/// Number of values the caller must assign: every public wire except the one wire, then every
	/// secret wire.
	pub fn n_inputs(&self) -> usize {
		self.n_public.saturating_sub(1) + self.n_secret
	}

	/// The visibility of a real wire, or `None` if it is out of range.
	pub fn visibility(&self, wire: WireId) -> Option<Visibility> {
		let index = wire.index();
		if index < self.n_public {
			Some(Visibility::Public)
		} else if index < self.n_public + self.n_secret {
			Some(Visibility::Secret)
		} else if index < self.n_wires() {
			Some(Visibility::Internal)
		} else {
			None
		}
	}

	/// The `i`-th public wire (the one wire is public wire 0).
	pub fn public(&self, i: usize) -> WireId {
		assert!(i < self.n_public, "public wire {i} out of range");
		WireId::new(i)
	}

	/// The `i`-th secret wire.
	pub fn secret(&self, i: usize) -> WireId {
		assert!(i < self.n_secret, "secret wire {i} out of range");
		WireId::new(self.n_public + i)
	}

	/// The `i`-th internal wire.
	pub fn internal(&self, i: usize) -> WireId {
		assert!(i < self.n_internal, "internal wire {i} out of range");
		WireId::new(self.n_public + self.n_secret + i)
	}
}

/// A constraint kind the solver can consume.
pub trait Constraint: Clone + fmt::Debug + Send + Sync {
	/// Short name used in diagnostics.
	const KIND: &'static str;

	/// Calls `f` on every term the constraint references.
	fn visit_terms(&self, f: &mut dyn FnMut(Term));

	/// Coefficients referenced outside of terms.
	fn extra_coefficients(&self) -> Vec<CoeffId> {
		Vec::new()
	}

	/// Evaluates the constraint with `eval_term` supplying each term's contribution. A satisfied
	/// constraint has residual zero.
	fn residual<F: SolverField>(
		&self,
		coefficients: &CoefficientTable<F>,
		eval_term: &mut dyn FnMut(Term) -> F,
	) -> F;
}

/// Rank-1 constraint `l · r = o`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct R1c {
	/// Left operand.
	pub l: LinearCombination,
	/// Right operand.
	pub r: LinearCombination,
	/// Output.
	pub o: LinearCombination,
}

impl R1c {
	/// Creates a rank-1 constraint.
	pub fn new(l: LinearCombination, r: LinearCombination, o: LinearCombination) -> Self {
		Self { l, r, o }
	}
}

impl Constraint for R1c {
	const KIND: &'static str = "r1c";

	fn visit_terms(&self, f: &mut dyn FnMut(Term)) {
		for term in self.l.iter().chain(self.r.iter()).chain(self.o.iter()) {
			f(*term);
		}
	}

	fn residual<F: SolverField>(
		&self,
		_coefficients: &CoefficientTable<F>,
		eval_term: &mut dyn FnMut(Term) -> F,
	) -> F {
		let mut sum =
			|lc: &LinearCombination| lc.iter().fold(F::zero(), |acc, t| acc + eval_term(*t));
		let l = sum(&self.l);
		let r = sum(&self.r);
		let o = sum(&self.o);
		l * r - o
	}
}

/// Sparse (PLONK-style) constraint `qL·xl + qR·xr + qO·xo + qM·xl·xr + qK = 0`.
///
/// `m[0]` references the same wire as `l` and `m[1]` the same wire as `r`; `qM` is the product of
/// their coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseR1c {
	/// Left term `qL·xl`.
	pub l: Term,
	/// Right term `qR·xr`.
	pub r: Term,
	/// Output term `qO·xo`.
	pub o: Term,
	/// Multiplicative terms.
	pub m: [Term; 2],
	/// Constant `qK`.
	pub k: CoeffId,
}

impl Constraint for SparseR1c {
	const KIND: &'static str = "sparse r1c";

	fn visit_terms(&self, f: &mut dyn FnMut(Term)) {
		for term in [self.l, self.r, self.o, self.m[0], self.m[1]] {
			f(term);
		}
	}

	fn extra_coefficients(&self) -> Vec<CoeffId> {
		vec![self.k]
	}

	fn residual<F: SolverField>(
		&self,
		coefficients: &CoefficientTable<F>,
		eval_term: &mut dyn FnMut(Term) -> F,
	) -> F {
		let l = eval_term(self.l);
		let r = eval_term(self.r);
		let o = eval_term(self.o);
		let m = eval_term(self.m[0]) * eval_term(self.m[1]);
		l + r + o + m + coefficients[self.k]
	}
}

/// A compiled constraint system, generic over the constraint kind.
///
/// Everything in here is immutable once compilation finishes and is shared by reference between
/// concurrent solves.
#[derive(Clone, Debug)]
pub struct ConstraintSystem<F: SolverField, C: Constraint> {
	/// Wire layout.
	pub layout: Layout,
	/// Shared constants.
	pub coefficients: CoefficientTable<F>,
	/// Constraints in solving order.
	pub constraints: Vec<C>,
	/// Maps each hint output wire to the call that produces it.
	pub hints: HashMap<WireId, Arc<HintDescriptor>>,
	/// Lines printed after every solve.
	pub logs: Vec<LogEntry>,
	/// Diagnostics rendered when the constraint at the given index is not satisfied.
	pub debug_info: HashMap<usize, LogEntry>,
}

/// A rank-1 constraint system.
pub type R1cs<F> = ConstraintSystem<F, R1c>;

/// A sparse rank-1 constraint system.
pub type SparseR1cs<F> = ConstraintSystem<F, SparseR1c>;

impl<F: SolverField, C: Constraint> ConstraintSystem<F, C> {
	/// Creates an empty system for the given layout.
	pub fn new(layout: Layout) -> Self {
		Self {
			layout,
			coefficients: CoefficientTable::new(),
			constraints: Vec::new(),
			hints: HashMap::new(),
			logs: Vec::new(),
			debug_info: HashMap::new(),
		}
	}

	/// Total number of wires.
	pub fn n_wires(&self) -> usize {
		self.layout.n_wires()
	}

	/// Number of constraints.
	pub fn n_constraints(&self) -> usize {
		self.constraints.len()
	}

	/// Builds a term for `coeff × wire` with the visibility the layout assigns to `wire`.
	///
	/// # Panics
	///
	/// Panics if `wire` is outside of the layout.
	pub fn term(&self, coeff: F, wire: WireId) -> Term {
		self.term_with_id(self.coefficients.lookup(&coeff), coeff, wire)
	}

	/// Like [`Self::term`], but interns the coefficient if it is not in the table yet.
	pub fn add_term(&mut self, coeff: F, wire: WireId) -> Term {
		let id = self.coefficients.insert(coeff);
		self.term_with_id(Some(id), coeff, wire)
	}

	fn term_with_id(&self, id: Option<CoeffId>, coeff: F, wire: WireId) -> Term {
		let Some(id) = id else {
			panic!("coefficient {coeff} is not in the table");
		};
		let Some(visibility) = self.layout.visibility(wire) else {
			panic!("wire {wire:?} is outside of the layout");
		};
		Term::new(id, wire, visibility)
	}

	/// Appends a constraint and returns its index.
	pub fn add_constraint(&mut self, constraint: C) -> usize {
		self.constraints.push(constraint);
		self.constraints.len() - 1
	}

	/// Registers a hint call. Every output wire must be produced by exactly one hint.
	pub fn add_hint(&mut self, descriptor: HintDescriptor) -> Result<(), ConstraintSystemError> {
		let mut seen = HashSet::new();
		for &wire in &descriptor.wires {
			if self.hints.contains_key(&wire) || !seen.insert(wire) {
				return Err(ConstraintSystemError::HintWireMappedTwice {
					wire: wire.as_u32(),
				});
			}
		}
		let descriptor = Arc::new(descriptor);
		for &wire in &descriptor.wires {
			self.hints.insert(wire, Arc::clone(&descriptor));
		}
		Ok(())
	}

	/// Appends a line that is printed after every solve.
	pub fn add_log(&mut self, entry: LogEntry) {
		self.logs.push(entry);
	}

	/// Attaches a diagnostic to the constraint at `index`.
	pub fn attach_debug_info(&mut self, index: usize, entry: LogEntry) {
		self.debug_info.insert(index, entry);
	}

	/// Ensures the system is well-formed.
	///
	/// Specifically checks that:
	///
	/// - the layout has the one wire,
	/// - every referenced wire is in range and tagged with the visibility the layout gives it,
	/// - every referenced coefficient exists,
	/// - hint outputs are not input wires,
	/// - debug info refers to existing constraints.
	pub fn validate(&self) -> Result<(), ConstraintSystemError> {
		if self.layout.n_public == 0 {
			return Err(ConstraintSystemError::MissingOneWire);
		}

		for (index, constraint) in self.constraints.iter().enumerate() {
			let mut result = Ok(());
			constraint.visit_terms(&mut |term| {
				if result.is_ok() {
					result = self.validate_term(C::KIND, index, term);
				}
			});
			result?;
			for coeff in constraint.extra_coefficients() {
				self.validate_coeff(C::KIND, index, coeff)?;
			}
		}

		for (index, descriptor) in self.hint_descriptors().enumerate() {
			for term in descriptor.inputs.iter().flat_map(|lc| lc.iter()) {
				self.validate_term("hint input", index, *term)?;
			}
			for &wire in &descriptor.wires {
				match self.layout.visibility(wire) {
					None => {
						return Err(ConstraintSystemError::OutOfRangeWire {
							location: "hint output",
							index,
							wire: wire.as_u32(),
							n_wires: self.n_wires(),
						});
					}
					Some(Visibility::Internal) => {}
					Some(_) => {
						return Err(ConstraintSystemError::HintOutputIsInput {
							wire: wire.as_u32(),
						});
					}
				}
			}
		}

		for (index, entry) in self.logs.iter().enumerate() {
			for term in entry.to_resolve.iter().filter(|t| !t.is_delimiter()) {
				self.validate_term("log", index, *term)?;
			}
		}
		for (&index, entry) in &self.debug_info {
			if index >= self.constraints.len() {
				return Err(ConstraintSystemError::DebugInfoOutOfRange {
					index,
					n_constraints: self.constraints.len(),
				});
			}
			for term in entry.to_resolve.iter().filter(|t| !t.is_delimiter()) {
				self.validate_term("debug info", index, *term)?;
			}
		}

		Ok(())
	}

	/// Iterates over the distinct hint calls.
	pub fn hint_descriptors(&self) -> impl Iterator<Item = &HintDescriptor> {
		// A call with several outputs is mapped once per output; keep the first occurrence only.
		self.hints
			.iter()
			.filter(|(wire, descriptor)| descriptor.wires.first() == Some(*wire))
			.map(|(_, descriptor)| descriptor.as_ref())
	}

	fn validate_term(
		&self,
		location: &'static str,
		index: usize,
		term: Term,
	) -> Result<(), ConstraintSystemError> {
		self.validate_coeff(location, index, term.coeff)?;
		if term.is_virtual() {
			return Ok(());
		}
		let Some(expected) = self.layout.visibility(term.wire) else {
			return Err(ConstraintSystemError::OutOfRangeWire {
				location,
				index,
				wire: term.wire.as_u32(),
				n_wires: self.n_wires(),
			});
		};
		if expected != term.visibility {
			return Err(ConstraintSystemError::VisibilityMismatch {
				location,
				index,
				wire: term.wire.as_u32(),
				expected,
				actual: term.visibility,
			});
		}
		Ok(())
	}

	fn validate_coeff(
		&self,
		location: &'static str,
		index: usize,
		coeff: CoeffId,
	) -> Result<(), ConstraintSystemError> {
		if !self.coefficients.is_valid(coeff) {
			return Err(ConstraintSystemError::UnknownCoefficient {
				location,
				index,
				coeff: coeff.as_u32(),
				n_coefficients: self.coefficients.len(),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use ark_bn254::Fr;

	use super::*;

	fn layout() -> Layout {
		Layout {
			n_public: 2,
			n_secret: 1,
			n_internal: 2,
		}
	}

	#[test]
	fn test_layout() {
		let layout = layout();
		assert_eq!(layout.n_wires(), 5);
		assert_eq!(layout.n_inputs(), 2);
		assert_eq!(layout.visibility(WireId::ONE), Some(Visibility::Public));
		assert_eq!(layout.visibility(layout.secret(0)), Some(Visibility::Secret));
		assert_eq!(layout.visibility(layout.internal(1)), Some(Visibility::Internal));
		assert_eq!(layout.visibility(WireId::new(5)), None);
	}

	#[test]
	fn test_validate_ok() {
		let mut cs = R1cs::<Fr>::new(layout());
		let x = cs.term(Fr::from(1u64), cs.layout.secret(0));
		let y = cs.term(Fr::from(1u64), cs.layout.public(1));
		let t = cs.add_term(Fr::from(7u64), cs.layout.internal(0));
		cs.add_constraint(R1c::new(vec![x].into(), vec![x].into(), vec![t].into()));
		let one = Term::constant(CoeffId::ONE);
		cs.add_constraint(R1c::new(vec![t].into(), vec![one].into(), vec![y].into()));
		cs.attach_debug_info(1, LogEntry::new("{} == {}", vec![t, y]));
		assert!(cs.validate().is_ok());
	}

	#[test]
	fn test_validate_rejects_bad_wire() {
		let mut cs = R1cs::<Fr>::new(layout());
		let bad = Term::new(CoeffId::ONE, WireId::new(42), Visibility::Internal);
		cs.add_constraint(R1c::new(vec![bad].into(), vec![bad].into(), vec![bad].into()));
		assert!(matches!(
			cs.validate(),
			Err(ConstraintSystemError::OutOfRangeWire { wire: 42, .. })
		));
	}

	#[test]
	fn test_validate_rejects_visibility_mismatch() {
		let mut cs = R1cs::<Fr>::new(layout());
		let mislabeled = Term::new(CoeffId::ONE, WireId::new(1), Visibility::Secret);
		let empty = LinearCombination::new();
		cs.add_constraint(R1c::new(vec![mislabeled].into(), empty.clone(), empty));
		assert!(matches!(
			cs.validate(),
			Err(ConstraintSystemError::VisibilityMismatch { .. })
		));
	}

	#[test]
	fn test_validate_rejects_unknown_coefficient() {
		let mut cs = SparseR1cs::<Fr>::new(layout());
		let zero = Term::constant(CoeffId::ZERO);
		cs.add_constraint(SparseR1c {
			l: zero,
			r: zero,
			o: zero,
			m: [zero, zero],
			k: CoeffId::from_u32(99),
		});
		assert!(matches!(
			cs.validate(),
			Err(ConstraintSystemError::UnknownCoefficient { coeff: 99, .. })
		));
	}

	#[test]
	fn test_hint_wires() {
		let mut cs = R1cs::<Fr>::new(layout());
		let out = cs.layout.internal(0);
		let x = cs.term(Fr::from(1u64), cs.layout.secret(0));
		let descriptor = HintDescriptor {
			id: HintId(1),
			inputs: vec![vec![x].into()],
			wires: vec![out, cs.layout.internal(1)],
		};
		cs.add_hint(descriptor.clone()).unwrap();
		assert_eq!(cs.hint_descriptors().count(), 1);
		assert!(matches!(
			cs.add_hint(descriptor),
			Err(ConstraintSystemError::HintWireMappedTwice { .. })
		));
		assert!(cs.validate().is_ok());

		let mut cs = R1cs::<Fr>::new(layout());
		cs.add_hint(HintDescriptor {
			id: HintId(1),
			inputs: vec![],
			wires: vec![cs.layout.secret(0)],
		})
		.unwrap();
		assert!(matches!(
			cs.validate(),
			Err(ConstraintSystemError::HintOutputIsInput { .. })
		));
	}
}
