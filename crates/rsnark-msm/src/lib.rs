// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # rsnark-msm
//!
//! Multi-scalar multiplication `Σ sᵢ·Pᵢ` over any arkworks curve group.
//!
//! Inputs are cut into fixed-size chunks, each chunk is reduced with the
//! Pippenger bucket method on a rayon worker, and the partial sums are
//! added together. Point addition is associative and commutative, so the
//! result does not depend on how rayon schedules the chunks.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MsmError {
    #[error("length mismatch: {points} points, {scalars} scalars")]
    LengthMismatch { points: usize, scalars: usize },

    #[error("multi-scalar multiplication aborted")]
    Aborted,

    #[error("window width {0} outside 1..={max}", max = MAX_WINDOW_BITS)]
    InvalidWindow(usize),
}

/// Widest accepted bucket window; `2^16 - 1` buckets per window.
pub const MAX_WINDOW_BITS: usize = 16;

/// Tuning knobs for [`msm_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsmConfig {
    /// Points per rayon task.
    pub chunk_size: usize,
    /// Bucket window width in bits, `1..=MAX_WINDOW_BITS`; chosen from the
    /// chunk length when `None`.
    pub window_bits: Option<usize>,
}

impl Default for MsmConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1 << 14,
            window_bits: None,
        }
    }
}

/// Shared cancellation flag, checked before each chunk starts.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// MSM with the default configuration and no abort flag.
pub fn msm<C: CurveGroup>(points: &[C::Affine], scalars: &[C::ScalarField]) -> Result<C, MsmError> {
    msm_with(points, scalars, &MsmConfig::default(), None)
}

pub fn msm_with<C: CurveGroup>(
    points: &[C::Affine],
    scalars: &[C::ScalarField],
    config: &MsmConfig,
    abort: Option<&AbortHandle>,
) -> Result<C, MsmError> {
    if let Some(w) = config.window_bits.filter(|w| !(1..=MAX_WINDOW_BITS).contains(w)) {
        return Err(MsmError::InvalidWindow(w));
    }
    if points.len() != scalars.len() {
        return Err(MsmError::LengthMismatch {
            points: points.len(),
            scalars: scalars.len(),
        });
    }
    let chunk_size = config.chunk_size.max(1);
    tracing::trace!(len = points.len(), chunk_size, "msm");

    points
        .par_chunks(chunk_size)
        .zip(scalars.par_chunks(chunk_size))
        .map(|(p, s)| {
            if abort.is_some_and(AbortHandle::is_aborted) {
                return Err(MsmError::Aborted);
            }
            let window = config.window_bits.unwrap_or_else(|| default_window(p.len()));
            Ok(pippenger::<C>(p, s, window))
        })
        .try_reduce(C::zero, |a, b| Ok(a + b))
}

/// `ln(n) + 2` approximated as `log2(n)·0.69 + 2`, with a floor for tiny inputs.
fn default_window(n: usize) -> usize {
    if n < 32 {
        3
    } else {
        let log2 = (usize::BITS - n.leading_zeros()) as usize;
        (log2 * 69 / 100 + 2).min(MAX_WINDOW_BITS)
    }
}

/// Bits `[start, start + width)` of a little-endian limb array.
fn window_digit(limbs: &[u64], start: usize, width: usize) -> usize {
    let idx = start / 64;
    let offset = start % 64;
    if idx >= limbs.len() {
        return 0;
    }
    let mut bits = limbs[idx] >> offset;
    if offset + width > 64 && idx + 1 < limbs.len() {
        bits |= limbs[idx + 1] << (64 - offset);
    }
    (bits & ((1u64 << width) - 1)) as usize
}

fn pippenger<C: CurveGroup>(points: &[C::Affine], scalars: &[C::ScalarField], window: usize) -> C {
    let terms: Vec<(C::Affine, <C::ScalarField as PrimeField>::BigInt)> = points
        .iter()
        .zip(scalars)
        .filter(|(p, s)| !s.is_zero() && !AffineRepr::is_zero(*p))
        .map(|(p, s)| (*p, s.into_bigint()))
        .collect();
    if terms.is_empty() {
        return C::zero();
    }

    let num_bits = C::ScalarField::MODULUS_BIT_SIZE as usize;
    let starts: Vec<usize> = (0..num_bits).step_by(window).collect();

    let window_sums: Vec<C> = starts
        .par_iter()
        .map(|&start| {
            let mut buckets = vec![C::zero(); (1 << window) - 1];
            for (base, scalar) in &terms {
                let digit = window_digit(scalar.as_ref(), start, window);
                if digit != 0 {
                    buckets[digit - 1] += *base;
                }
            }
            // Σ (i+1)·bucket[i] via running sums.
            let mut running = C::zero();
            let mut sum = C::zero();
            for bucket in buckets.into_iter().rev() {
                running += bucket;
                sum += running;
            }
            sum
        })
        .collect();

    let mut iter = window_sums.into_iter().rev();
    let mut total = iter.next().unwrap_or_else(C::zero);
    for lower in iter {
        for _ in 0..window {
            total.double_in_place();
        }
        total += lower;
    }
    total
}
