// Copyright 2025 Irreducible Inc.
//! The prime field the witness is computed over.
//!
//! Field arithmetic itself comes from arkworks. This module only attaches the curve identity and
//! the big integer conversions that hint functions and diagnostics need.

use std::fmt;

use ark_ff::PrimeField;
use num_bigint::BigUint;

/// Identifies the elliptic curve (and therefore the scalar field) a solve operates over.
///
/// Hint functions receive this tag so that a single function can serve several curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CurveId {
	/// BN254, also known as alt_bn128.
	Bn254,
	/// BLS12-381.
	Bls12_381,
}

impl fmt::Display for CurveId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CurveId::Bn254 => write!(f, "bn254"),
			CurveId::Bls12_381 => write!(f, "bls12_381"),
		}
	}
}

impl CurveId {
	/// Modulus of the curve's scalar field.
	pub fn modulus(self) -> BigUint {
		match self {
			CurveId::Bn254 => <ark_bn254::Fr as SolverField>::modulus(),
			CurveId::Bls12_381 => <ark_bls12_381::Fr as SolverField>::modulus(),
		}
	}
}

/// A prime field that wire values and coefficients live in.
pub trait SolverField: PrimeField {
	/// The curve whose scalar field this is.
	const CURVE_ID: CurveId;

	/// The field modulus `q`.
	fn modulus() -> BigUint {
		Self::MODULUS.into()
	}

	/// Canonical integer representative in `[0, q)`.
	fn to_biguint(&self) -> BigUint {
		(*self).into()
	}

	/// Maps an arbitrary integer into the field, reducing it modulo `q`.
	fn from_biguint(value: &BigUint) -> Self {
		Self::from_le_bytes_mod_order(&value.to_bytes_le())
	}

	/// Decimal rendering of the canonical representative.
	///
	/// Unlike the arkworks `Display` impl, zero renders as `0`.
	fn to_decimal(&self) -> String {
		self.to_biguint().to_string()
	}
}

impl SolverField for ark_bn254::Fr {
	const CURVE_ID: CurveId = CurveId::Bn254;
}

impl SolverField for ark_bls12_381::Fr {
	const CURVE_ID: CurveId = CurveId::Bls12_381;
}
