// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Point construction, scalar multiplication and the pairing check.

use ark_ec::{
    pairing::Pairing,
    short_weierstrass::{Affine, Projective, SWCurveConfig},
    AffineRepr,
};
use ark_ff::{AdditiveGroup, BigInt, Field, One, PrimeField, Zero};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::{field, Bn254, CurveError, Fq, Fq2, Fr, G1Affine, G2Affine};

fn validate<C: SWCurveConfig>(point: Affine<C>) -> Result<Affine<C>, CurveError> {
    if !point.is_on_curve() {
        return Err(CurveError::NotOnCurve);
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CurveError::NotInSubgroup);
    }
    Ok(point)
}

/// G1 point from affine coordinates. `(0, 0)` is the identity.
pub fn g1_from_coords(x: Fq, y: Fq) -> Result<G1Affine, CurveError> {
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::identity());
    }
    let p = G1Affine::new_unchecked(x, y);
    validate(p)
}

/// G2 point from affine coordinates. `(0, 0)` is the identity.
pub fn g2_from_coords(x: Fq2, y: Fq2) -> Result<G2Affine, CurveError> {
    if x.is_zero() && y.is_zero() {
        return Ok(G2Affine::identity());
    }
    let p = G2Affine::new_unchecked(x, y);
    validate(p)
}

/// Affine coordinates of a Jacobian triple `(X, Y, Z)` as `(X/Z², Y/Z³)`.
fn jacobian_to_affine<F: Field>(x: F, y: F, z: F) -> Result<(F, F), CurveError> {
    let z_inv = field::inverse(&z)?;
    let z_inv2 = z_inv.square();
    Ok((x * z_inv2, y * z_inv2 * z_inv))
}

/// G1 point from a Jacobian triple, as found in snarkjs JSON. `Z = 0` is the identity.
pub fn g1_from_jacobian(x: Fq, y: Fq, z: Fq) -> Result<G1Affine, CurveError> {
    if z.is_zero() {
        return Ok(G1Affine::identity());
    }
    if z.is_one() {
        return g1_from_coords(x, y);
    }
    let (ax, ay) = jacobian_to_affine(x, y, z)?;
    let p = G1Affine::new_unchecked(ax, ay);
    validate(p)
}

/// G2 point from a Jacobian triple. `Z = 0` is the identity.
pub fn g2_from_jacobian(x: Fq2, y: Fq2, z: Fq2) -> Result<G2Affine, CurveError> {
    if z.is_zero() {
        return Ok(G2Affine::identity());
    }
    if z.is_one() {
        return g2_from_coords(x, y);
    }
    let (ax, ay) = jacobian_to_affine(x, y, z)?;
    let p = G2Affine::new_unchecked(ax, ay);
    validate(p)
}

const WINDOW_BITS: usize = 4;
const WINDOWS: usize = 256 / WINDOW_BITS;
const TABLE_LEN: usize = 1 << WINDOW_BITS;

/// `Σ 16^w` for every window, the bias added by always selecting `digit + 1`.
fn schedule_offset() -> Fr {
    let base = Fr::from(TABLE_LEN as u64);
    (0..WINDOWS).fold(Fr::zero(), |acc, _| acc * base + Fr::one())
}

/// Branch-free choice between two coordinates.
pub trait CtSelect: Sized {
    /// `b` when `choice` is set, `a` otherwise.
    fn ct_select(a: &Self, b: &Self, choice: Choice) -> Self;
}

impl CtSelect for Fq {
    fn ct_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let (a, b) = ((a.0).0, (b.0).0);
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a[i], &b[i], choice);
        }
        Self::new_unchecked(BigInt(limbs))
    }
}

impl CtSelect for Fq2 {
    fn ct_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(
            CtSelect::ct_select(&a.c0, &b.c0, choice),
            CtSelect::ct_select(&a.c1, &b.c1, choice),
        )
    }
}

fn ct_select_point<P>(a: &Projective<P>, b: &Projective<P>, choice: Choice) -> Projective<P>
where
    P: SWCurveConfig,
    P::BaseField: CtSelect,
{
    Projective::new_unchecked(
        CtSelect::ct_select(&a.x, &b.x, choice),
        CtSelect::ct_select(&a.y, &b.y, choice),
        CtSelect::ct_select(&a.z, &b.z, choice),
    )
}

/// Scalar multiplication with a fixed operation schedule.
///
/// Every 4-bit window performs four doublings, a masked scan over the
/// whole table and one addition of `(digit + 1)·P`, so no window adds
/// the identity and neither the group operations nor the memory accesses
/// depend on the scalar. The constant bias is removed at the end. Used
/// for the secret blinding factors.
pub fn mul_fixed_schedule<P>(point: &Projective<P>, scalar: &Fr) -> Projective<P>
where
    P: SWCurveConfig<ScalarField = Fr>,
    P::BaseField: CtSelect,
{
    let mut table = [*point; TABLE_LEN];
    for i in 1..TABLE_LEN {
        table[i] = table[i - 1] + point;
    }

    let limbs = scalar.into_bigint().0;
    let mut acc = Projective::<P>::zero();
    for w in (0..WINDOWS).rev() {
        for _ in 0..WINDOW_BITS {
            acc.double_in_place();
        }
        let bit = w * WINDOW_BITS;
        let digit = (limbs[bit / 64] >> (bit % 64)) & (TABLE_LEN as u64 - 1);

        let mut selected = table[0];
        for (i, entry) in table.iter().enumerate().skip(1) {
            selected = ct_select_point(&selected, entry, (i as u64).ct_eq(&digit));
        }
        acc += selected;
    }

    acc - *point * schedule_offset()
}

/// True when `Π e(g1_i, g2_i) = 1` in the target group.
pub fn pairing_check(pairs: &[(G1Affine, G2Affine)]) -> bool {
    let g1: Vec<G1Affine> = pairs.iter().map(|(a, _)| *a).collect();
    let g2: Vec<G2Affine> = pairs.iter().map(|(_, b)| *b).collect();
    Bn254::multi_pairing(g1, g2).0.is_one()
}
