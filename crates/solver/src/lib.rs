// Copyright 2025 Irreducible Inc.
//! Witness solver for compiled constraint systems.
//!
//! Given a [`ConstraintSystem`](witsolve_core::ConstraintSystem) and the caller's input values,
//! [`solve`] computes every remaining wire. Wires come either from the constraint that
//! references them as its only unknown, or from a [hint](hints) that computes them outside of the
//! circuit.
//!
//! ```ignore
//! let registry = HintRegistry::with_builtins();
//! let witness = cs.solve(&inputs, &registry, SolverOptions::default())?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod hints;
pub mod log;
pub mod options;
pub mod scratch;
pub mod solution;
pub mod solve;

pub use error::{HintError, SolverError};
pub use hints::{Arity, FixedHint, Hint, HintId, HintRegistry, hint_id};
pub use options::SolverOptions;
pub use scratch::ScratchPool;
pub use solution::Solution;
pub use solve::{
	MAX_RECORDED_FAILURES, Outcome, SolvableConstraint, Solve, SolveContext, Witness, solve,
};
