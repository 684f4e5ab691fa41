// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Scalar and base field helpers.
//!
//! Text form of a field element is its canonical value in unsigned decimal,
//! the convention snarkjs uses in `proof.json`, `public.json` and
//! `verification_key.json`. Inputs at or above the modulus are rejected
//! rather than reduced.

use ark_ff::{Field, PrimeField, UniformRand, Zero};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::{FieldError, Fr};

/// Multiplicative inverse. Zero has no inverse and is reported as
/// [`FieldError::ZeroInverse`].
pub fn inverse<F: Field>(x: &F) -> Result<F, FieldError> {
    x.inverse().ok_or(FieldError::ZeroInverse)
}

/// Uniformly random non-zero scalar.
///
/// The bound on `CryptoRng` keeps blinding factors off predictable
/// generators; pass `rand::rngs::OsRng` in production.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Fr {
    loop {
        let s = Fr::rand(rng);
        if !s.is_zero() {
            return s;
        }
    }
}

/// Canonical value as unsigned decimal, `"0"` for zero.
pub fn to_decimal<F: PrimeField>(x: &F) -> String {
    let value: BigUint = (*x).into();
    value.to_string()
}

/// Parse unsigned decimal into a field element.
pub fn from_decimal<F: PrimeField>(s: &str) -> Result<F, FieldError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::InvalidDecimal(s.to_string()));
    }
    let value = BigUint::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| FieldError::InvalidDecimal(s.to_string()))?;
    let modulus: BigUint = F::MODULUS.into();
    if value >= modulus {
        return Err(FieldError::NonCanonical);
    }
    Ok(F::from(value))
}

pub fn fr_from_decimal(s: &str) -> Result<Fr, FieldError> {
    from_decimal(s)
}

pub fn fq_from_decimal(s: &str) -> Result<crate::Fq, FieldError> {
    from_decimal(s)
}

/// Number of decimal digits of the largest canonical element (`p - 1`).
pub fn max_decimal_digits<F: PrimeField>() -> usize {
    to_decimal(&-F::one()).len()
}
