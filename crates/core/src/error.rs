// Copyright 2025 Irreducible Inc.
//! Hosts error definitions for the core crate.

use crate::term::Visibility;

/// Structural defects of a compiled constraint system.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error)]
pub enum ConstraintSystemError {
	#[error("the layout must declare at least the public one wire")]
	MissingOneWire,
	#[error(
		"{location} #{index} refers to out-of-range wire {wire} (total wires {n_wires})"
	)]
	OutOfRangeWire {
		location: &'static str,
		index: usize,
		wire: u32,
		n_wires: usize,
	},
	#[error(
		"{location} #{index} refers to unknown coefficient {coeff} (table size {n_coefficients})"
	)]
	UnknownCoefficient {
		location: &'static str,
		index: usize,
		coeff: u32,
		n_coefficients: usize,
	},
	#[error(
		"{location} #{index} tags wire {wire} as {actual:?} but the layout says {expected:?}"
	)]
	VisibilityMismatch {
		location: &'static str,
		index: usize,
		wire: u32,
		expected: Visibility,
		actual: Visibility,
	},
	#[error("wire {wire} is the output of more than one hint")]
	HintWireMappedTwice { wire: u32 },
	#[error("hint output wire {wire} is an input wire")]
	HintOutputIsInput { wire: u32 },
	#[error("debug info attached to constraint #{index} but there are only {n_constraints}")]
	DebugInfoOutOfRange { index: usize, n_constraints: usize },
}
