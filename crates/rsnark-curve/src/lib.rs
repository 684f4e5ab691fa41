// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # rsnark-curve
//!
//! Field and curve layer for the rsnark Groth16 engine over BN254
//! (`bn128` in snarkjs naming).
//!
//! Arithmetic itself comes from arkworks; this crate pins down the
//! conventions the rest of the engine relies on:
//!
//! | Module | Purpose |
//! |---|---|
//! | [`field`] | Decimal codec, explicit inverse-of-zero error, CSPRNG scalars |
//! | [`encoding`] | zkey/wtns byte layouts (Montgomery, double Montgomery, canonical) |
//! | [`curve`] | Point validation, Jacobian conversion, fixed-schedule scalar mul, pairing check |

pub mod curve;
pub mod encoding;
pub mod field;

pub use ark_bn254::{Bn254, Fq, Fq12, Fq2, Fr, G1Affine, G1Projective, G2Affine, G2Projective};

/// Errors raised while decoding or validating field elements and points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("inverse of zero is undefined")]
    ZeroInverse,

    #[error("invalid decimal number: {0:?}")]
    InvalidDecimal(String),

    #[error("value is not a canonical field element")]
    NonCanonical,
}

/// Errors raised while building curve points from coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("point is not on the curve")]
    NotOnCurve,

    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,

    #[error(transparent)]
    Field(#[from] FieldError),
}
