// Copyright 2025 Irreducible Inc.
//! Errors surfaced by hint functions and the solver.
//!
//! Only recoverable conditions live here. Internal invariant violations (assigning a wire twice,
//! reading an unsolved wire) abort with a panic instead.

use witsolve_core::HintId;

/// Failure of a hint function.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HintError {
	#[error("input has {actual} elements, expected {expected}")]
	InputArity { expected: usize, actual: usize },
	#[error("result has {actual} elements, expected {expected}")]
	OutputArity { expected: usize, actual: usize },
	#[error("{0}")]
	Undefined(String),
}

/// Failure of a solve.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
	#[error("invalid witness size, got {actual}, expected {expected}")]
	WitnessSize { expected: usize, actual: usize },
	#[error("duplicate hint function {name} ({id})")]
	DuplicateHint { id: HintId, name: String },
	#[error("missing hint function {id} for wire {wire}")]
	MissingHint { id: HintId, wire: u32 },
	#[error("hint {name} expects {expected} {what}, the call has {actual}")]
	HintArity {
		name: String,
		what: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("expected wire {wire} to be instantiated while evaluating hint {id}")]
	UnresolvedDependency { wire: u32, id: HintId },
	#[error("hint {name} failed: {source}")]
	HintFailed {
		name: String,
		#[source]
		source: HintError,
	},
	#[error("constraint #{constraint} has more than one unsolved wire")]
	UnsolvableConstraint { constraint: usize },
	#[error("constraint #{constraint} is not satisfied: {debug}")]
	UnsatisfiedConstraint { constraint: usize, debug: String },
}
