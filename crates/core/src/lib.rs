// Copyright 2025 Irreducible Inc.
//! Core datatypes shared by the compiler and the witness solver.
//!
//! Most importantly it hosts the definition of a compiled [`ConstraintSystem`]: wires and
//! [`Term`]s, [`LinearCombination`]s, the shared [`CoefficientTable`], hint call descriptors and
//! diagnostic log entries.

#![warn(missing_docs)]

pub mod coefficients;
pub mod constraint_system;
pub mod error;
pub mod field;
pub mod linear_combination;
pub mod term;
pub mod verify;

pub use coefficients::CoefficientTable;
pub use constraint_system::*;
pub use error::ConstraintSystemError;
pub use field::{CurveId, SolverField};
pub use linear_combination::LinearCombination;
pub use term::{CoeffId, Symbolic, Term, Visibility, WireId};
