// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Byte layouts of field elements inside `.zkey` and `.wtns` files.
//!
//! All encodings are 32 bytes, little-endian limbs:
//! - point coordinates (`Fq`) are stored in Montgomery form (`x·R mod q`)
//! - zkey coefficients (`Fr`) are stored in double Montgomery form (`x·R² mod r`)
//! - witness values (`Fr`) are stored canonically
//!
//! Every decoder rejects raw values at or above the modulus.

use ark_ff::{BigInt, PrimeField};

use crate::{FieldError, Fq, Fr};

/// Width of one serialized field element.
pub const FIELD_BYTES: usize = 32;

fn bigint_from_le(bytes: &[u8; FIELD_BYTES]) -> BigInt<4> {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    BigInt::new(limbs)
}

fn bigint_to_le(value: &BigInt<4>) -> [u8; FIELD_BYTES] {
    let mut out = [0u8; FIELD_BYTES];
    for (chunk, limb) in out.chunks_exact_mut(8).zip(value.0.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    out
}

fn check_below<F: PrimeField<BigInt = BigInt<4>>>(raw: &BigInt<4>) -> Result<(), FieldError> {
    if *raw < F::MODULUS {
        Ok(())
    } else {
        Err(FieldError::NonCanonical)
    }
}

pub fn read_fq_montgomery(bytes: &[u8; FIELD_BYTES]) -> Result<Fq, FieldError> {
    let raw = bigint_from_le(bytes);
    check_below::<Fq>(&raw)?;
    Ok(Fq::new_unchecked(raw))
}

pub fn write_fq_montgomery(x: &Fq) -> [u8; FIELD_BYTES] {
    bigint_to_le(&x.0)
}

/// Decode a zkey coefficient stored as `x·R²`.
///
/// Reading the raw value as a Montgomery representation yields `x·R`;
/// one more Montgomery reduction brings it down to `x`.
pub fn read_fr_double_montgomery(bytes: &[u8; FIELD_BYTES]) -> Result<Fr, FieldError> {
    let raw = bigint_from_le(bytes);
    check_below::<Fr>(&raw)?;
    let once = Fr::new_unchecked(raw).into_bigint();
    Ok(Fr::new_unchecked(once))
}

pub fn write_fr_double_montgomery(x: &Fr) -> [u8; FIELD_BYTES] {
    // Element whose value is R, so the product's Montgomery form is x·R².
    let r = Fr::new_unchecked(Fr::R2);
    bigint_to_le(&(*x * r).0)
}

pub fn read_fr_canonical(bytes: &[u8; FIELD_BYTES]) -> Result<Fr, FieldError> {
    Fr::from_bigint(bigint_from_le(bytes)).ok_or(FieldError::NonCanonical)
}

pub fn write_fr_canonical(x: &Fr) -> [u8; FIELD_BYTES] {
    bigint_to_le(&x.into_bigint())
}

/// Little-endian bytes of a field modulus, as stored in zkey and wtns headers.
pub fn modulus_le<F: PrimeField<BigInt = BigInt<4>>>() -> [u8; FIELD_BYTES] {
    bigint_to_le(&F::MODULUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, UniformRand, Zero};
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn fq_montgomery_matches_internal_form() {
        let bytes = write_fq_montgomery(&Fq::one());
        assert_eq!(bytes, bigint_to_le(&Fq::R));
        assert_eq!(read_fq_montgomery(&bytes).unwrap(), Fq::one());
    }

    #[test]
    fn fq_montgomery_random_values() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            let x = Fq::rand(&mut rng);
            assert_eq!(read_fq_montgomery(&write_fq_montgomery(&x)).unwrap(), x);
        }
    }

    #[test]
    fn double_montgomery_of_one_is_r_squared() {
        let bytes = write_fr_double_montgomery(&Fr::one());
        assert_eq!(bytes, bigint_to_le(&Fr::R2));
        assert_eq!(read_fr_double_montgomery(&bytes).unwrap(), Fr::one());
    }

    #[test]
    fn double_montgomery_random_values() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            let x = Fr::rand(&mut rng);
            assert_eq!(read_fr_double_montgomery(&write_fr_double_montgomery(&x)).unwrap(), x);
        }
        assert_eq!(write_fr_double_montgomery(&Fr::zero()), [0u8; FIELD_BYTES]);
    }

    #[test]
    fn canonical_small_value() {
        let mut bytes = [0u8; FIELD_BYTES];
        bytes[0] = 33;
        assert_eq!(read_fr_canonical(&bytes).unwrap(), Fr::from(33u64));
        assert_eq!(write_fr_canonical(&Fr::from(33u64)), bytes);
    }

    #[test]
    fn out_of_range_values_rejected() {
        let all_ones = [0xffu8; FIELD_BYTES];
        assert_eq!(read_fq_montgomery(&all_ones), Err(FieldError::NonCanonical));
        assert_eq!(read_fr_double_montgomery(&all_ones), Err(FieldError::NonCanonical));
        assert_eq!(read_fr_canonical(&all_ones), Err(FieldError::NonCanonical));
        assert_eq!(read_fr_canonical(&modulus_le::<Fr>()), Err(FieldError::NonCanonical));
    }
}
