// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Groth16 prover for snarkjs proving keys.
//!
//! The quotient is never divided out explicitly. `a`, `b` and `c` are moved
//! onto the odd coset `g·H` (g a primitive 2n-th root of unity), where the
//! vanishing polynomial is the constant `-2`; the zkey's H points already
//! absorb that constant, so `h = a·b - c` evaluated there is what the H
//! query expects.

use std::time::{Duration, Instant};

use ark_ec::CurveGroup;
use ark_ff::{One, Zero};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use rayon::prelude::*;
use rsnark_curve::{
    curve::mul_fixed_schedule, field::random_scalar, Fr, G1Affine, G1Projective, G2Affine,
    G2Projective,
};
use rsnark_msm::{msm_with, AbortHandle, MsmConfig};
use rsnark_poly::Radix2Domain;
use rsnark_zkey::{Matrix, ProvingKey};

use crate::ProverError;

/// Groth16 proof `(A, B, C)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

/// Wall-clock cost of one proof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    /// Key parsing; zero when the caller supplied an already loaded key.
    pub load: Duration,
    pub prove: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProveOutput {
    pub proof: Proof,
    pub public_signals: Vec<Fr>,
    pub timing: Timing,
}

#[derive(Debug, Clone, Default)]
pub struct ProveOptions {
    pub msm: MsmConfig,
    /// Checked between stages and between MSM chunks.
    pub abort: Option<AbortHandle>,
}

impl ProveOptions {
    fn check_abort(&self) -> Result<(), ProverError> {
        match &self.abort {
            Some(handle) if handle.is_aborted() => Err(ProverError::Aborted),
            _ => Ok(()),
        }
    }
}

/// Prove with default options and blinding drawn from the OS CSPRNG.
pub fn prove(key: &ProvingKey, witness: &[Fr]) -> Result<ProveOutput, ProverError> {
    prove_with(key, witness, &ProveOptions::default(), &mut OsRng)
}

pub fn prove_with<R: RngCore + CryptoRng>(
    key: &ProvingKey,
    witness: &[Fr],
    options: &ProveOptions,
    rng: &mut R,
) -> Result<ProveOutput, ProverError> {
    let start = Instant::now();

    if witness.len() != key.n_vars() {
        return Err(ProverError::InvalidWitnessLength {
            expected: key.n_vars(),
            actual: witness.len(),
        });
    }
    if !witness[0].is_one() {
        return Err(ProverError::Malformed("witness wire 0 must be 1".into()));
    }

    let h = quotient_evaluations(key, witness, options)?;
    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "quotient evaluated");
    options.check_abort()?;

    let n_public = key.n_public();
    let cfg = &options.msm;
    let abort = options.abort.as_ref();

    let ((pi_a, pi_b), (pi_b1, pi_c)) = rayon::join(
        || {
            rayon::join(
                || msm_with::<G1Projective>(key.a_query(), witness, cfg, abort),
                || msm_with::<G2Projective>(key.b2_query(), witness, cfg, abort),
            )
        },
        || {
            rayon::join(
                || msm_with::<G1Projective>(key.b1_query(), witness, cfg, abort),
                || -> Result<G1Projective, ProverError> {
                    let (priv_part, h_part) = rayon::join(
                        || msm_with::<G1Projective>(key.c_query(), &witness[n_public + 1..], cfg, abort),
                        || msm_with::<G1Projective>(key.h_query(), &h, cfg, abort),
                    );
                    Ok(priv_part? + h_part?)
                },
            )
        },
    );
    let (pi_a, pi_b, pi_b1, pi_c) = (pi_a?, pi_b?, pi_b1?, pi_c?);
    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "msm done");

    let r = random_scalar(rng);
    let s = random_scalar(rng);

    let delta1 = G1Projective::from(*key.delta1());
    let delta2 = G2Projective::from(*key.delta2());

    let a = pi_a + key.alpha1() + mul_fixed_schedule(&delta1, &r);
    let b = pi_b + key.beta2() + mul_fixed_schedule(&delta2, &s);
    let b1 = pi_b1 + key.beta1() + mul_fixed_schedule(&delta1, &s);
    let c = pi_c + mul_fixed_schedule(&a, &s) + mul_fixed_schedule(&b1, &r)
        - mul_fixed_schedule(&delta1, &(r * s));

    let proof = Proof {
        a: a.into_affine(),
        b: b.into_affine(),
        c: c.into_affine(),
    };
    let elapsed = start.elapsed();
    tracing::info!(
        n_vars = key.n_vars(),
        domain_size = key.domain_size(),
        elapsed_ms = elapsed.as_millis() as u64,
        "proof generated"
    );

    Ok(ProveOutput {
        proof,
        public_signals: witness[1..=n_public].to_vec(),
        timing: Timing {
            load: Duration::ZERO,
            prove: elapsed,
        },
    })
}

/// `h = a·b - c` on the odd coset, one value per domain point.
fn quotient_evaluations(
    key: &ProvingKey,
    witness: &[Fr],
    options: &ProveOptions,
) -> Result<Vec<Fr>, ProverError> {
    let domain = Radix2Domain::<Fr>::new(key.domain_size())?;
    let n = domain.size();

    let mut a = vec![Fr::zero(); n];
    let mut b = vec![Fr::zero(); n];
    for coef in key.coefficients() {
        let term = coef.value * witness[coef.signal];
        match coef.matrix {
            Matrix::A => a[coef.constraint] += term,
            Matrix::B => b[coef.constraint] += term,
        }
    }
    let mut c: Vec<Fr> = a.par_iter().zip(b.par_iter()).map(|(x, y)| *x * y).collect();
    options.check_abort()?;

    let g = domain.odd_coset_generator()?;
    let to_coset = |values: &mut Vec<Fr>| -> Result<(), ProverError> {
        domain.ifft_in_place(values)?;
        Radix2Domain::distribute_powers(values, g);
        domain.fft_in_place(values)?;
        Ok(())
    };
    let (ra, (rb, rc)) = rayon::join(
        || to_coset(&mut a),
        || rayon::join(|| to_coset(&mut b), || to_coset(&mut c)),
    );
    ra?;
    rb?;
    rc?;

    Ok(a.par_iter()
        .zip(b.par_iter())
        .zip(c.par_iter())
        .map(|((x, y), z)| *x * y - z)
        .collect())
}
