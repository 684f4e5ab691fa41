// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_ff::FftField;
use rayon::prelude::*;

use crate::DomainError;

/// Butterfly blocks at least this wide are split internally instead of
/// being handed out one block per worker.
const INNER_PAR_THRESHOLD: usize = 1 << 10;

/// Elements per rayon task when scaling a vector by powers.
const POWERS_CHUNK: usize = 1 << 12;

/// Multiplicative subgroup of size `2^log_size` generated by a primitive
/// root of unity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radix2Domain<F: FftField> {
    size: usize,
    log_size: u32,
    group_gen: F,
    group_gen_inv: F,
    size_inv: F,
}

impl<F: FftField> Radix2Domain<F> {
    /// Smallest domain with at least `min_size` points.
    pub fn new(min_size: usize) -> Result<Self, DomainError> {
        let size = min_size.max(1).checked_next_power_of_two().ok_or(DomainError::TooLarge {
            log_size: usize::BITS,
            max_log: F::TWO_ADICITY,
        })?;
        let log_size = size.trailing_zeros();
        let too_large = DomainError::TooLarge {
            log_size,
            max_log: F::TWO_ADICITY,
        };
        if log_size > F::TWO_ADICITY {
            return Err(too_large);
        }
        let group_gen = F::get_root_of_unity(size as u64).ok_or(too_large.clone())?;
        let group_gen_inv = group_gen.inverse().ok_or(too_large.clone())?;
        let size_inv = F::from(size as u64).inverse().ok_or(too_large)?;
        Ok(Self {
            size,
            log_size,
            group_gen,
            group_gen_inv,
            size_inv,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn log_size(&self) -> u32 {
        self.log_size
    }

    pub fn group_gen(&self) -> F {
        self.group_gen
    }

    /// `ω^i`.
    pub fn element(&self, i: usize) -> F {
        self.group_gen.pow([i as u64])
    }

    /// Primitive `2n`-th root of unity `g`. Multiplying coefficient `i` by
    /// `g^i` moves evaluations onto the coset `g·H`, where `Z_H(x) = x^n - 1`
    /// equals `-2` everywhere.
    pub fn odd_coset_generator(&self) -> Result<F, DomainError> {
        let too_large = DomainError::TooLarge {
            log_size: self.log_size + 1,
            max_log: F::TWO_ADICITY,
        };
        if self.log_size + 1 > F::TWO_ADICITY {
            return Err(too_large);
        }
        F::get_root_of_unity(2 * self.size as u64).ok_or(too_large)
    }

    /// Coefficients to evaluations. Shorter inputs are zero-padded to the
    /// domain size.
    pub fn fft_in_place(&self, values: &mut Vec<F>) -> Result<(), DomainError> {
        self.pad(values)?;
        fft(values, self.group_gen, self.log_size);
        Ok(())
    }

    /// Evaluations to coefficients.
    pub fn ifft_in_place(&self, values: &mut Vec<F>) -> Result<(), DomainError> {
        self.pad(values)?;
        fft(values, self.group_gen_inv, self.log_size);
        let size_inv = self.size_inv;
        values
            .par_chunks_mut(POWERS_CHUNK)
            .for_each(|chunk| chunk.iter_mut().for_each(|v| *v *= size_inv));
        Ok(())
    }

    /// `values[i] *= g^i`.
    pub fn distribute_powers(values: &mut [F], g: F) {
        values
            .par_chunks_mut(POWERS_CHUNK)
            .enumerate()
            .for_each(|(chunk_idx, chunk)| {
                let mut pow = g.pow([(chunk_idx * POWERS_CHUNK) as u64]);
                for v in chunk.iter_mut() {
                    *v *= pow;
                    pow *= g;
                }
            });
    }

    fn pad(&self, values: &mut Vec<F>) -> Result<(), DomainError> {
        if values.len() > self.size {
            return Err(DomainError::InputTooLong {
                len: values.len(),
                size: self.size,
            });
        }
        values.resize(self.size, F::zero());
        Ok(())
    }
}

/// Horner evaluation of a polynomial in coefficient form.
pub fn evaluate_at<F: FftField>(coeffs: &[F], x: F) -> F {
    coeffs.iter().rev().fold(F::zero(), |acc, c| acc * x + c)
}

fn bit_reverse<T>(values: &mut [T], log_size: u32) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    let shift = usize::BITS - log_size;
    for i in 0..n {
        let r = i.reverse_bits() >> shift;
        if i < r {
            values.swap(i, r);
        }
    }
}

/// Iterative decimation-in-time FFT with root `omega` of order `2^log_size`.
fn fft<F: FftField>(values: &mut [F], omega: F, log_size: u32) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    bit_reverse(values, log_size);

    // twiddles[j] = omega^j for j < n/2; stage of half-width m uses stride n/(2m).
    let half = n / 2;
    let mut twiddles = Vec::with_capacity(half);
    let mut w = F::one();
    for _ in 0..half {
        twiddles.push(w);
        w *= omega;
    }

    let mut m = 1;
    while m < n {
        let stride = n / (2 * m);
        if m >= INNER_PAR_THRESHOLD {
            for block in values.chunks_mut(2 * m) {
                let (lo, hi) = block.split_at_mut(m);
                lo.par_iter_mut()
                    .zip(hi.par_iter_mut())
                    .enumerate()
                    .for_each(|(j, (a, b))| butterfly(a, b, twiddles[j * stride]));
            }
        } else {
            values.par_chunks_mut(2 * m).for_each(|block| {
                let (lo, hi) = block.split_at_mut(m);
                for (j, (a, b)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                    butterfly(a, b, twiddles[j * stride]);
                }
            });
        }
        m *= 2;
    }
}

#[inline]
fn butterfly<F: FftField>(a: &mut F, b: &mut F, w: F) {
    let t = *b * w;
    *b = *a - t;
    *a += t;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::{Field, One, UniformRand, Zero};
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn random_poly(len: usize, seed: u64) -> Vec<Fr> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| Fr::rand(&mut rng)).collect()
    }

    #[test]
    fn sizes_round_up_to_power_of_two() {
        assert_eq!(Radix2Domain::<Fr>::new(0).unwrap().size(), 1);
        assert_eq!(Radix2Domain::<Fr>::new(1).unwrap().size(), 1);
        assert_eq!(Radix2Domain::<Fr>::new(5).unwrap().size(), 8);
        assert_eq!(Radix2Domain::<Fr>::new(64).unwrap().size(), 64);
    }

    #[test]
    fn too_large_domain_rejected() {
        let err = Radix2Domain::<Fr>::new((1 << 28) + 1).unwrap_err();
        assert_eq!(
            err,
            DomainError::TooLarge {
                log_size: 29,
                max_log: 28
            }
        );
        let max = Radix2Domain::<Fr>::new(1 << 28).unwrap();
        assert!(max.odd_coset_generator().is_err());
    }

    #[test]
    fn fft_matches_naive_evaluation() {
        let domain = Radix2Domain::<Fr>::new(16).unwrap();
        let coeffs = random_poly(16, 42);
        let mut evals = coeffs.clone();
        domain.fft_in_place(&mut evals).unwrap();
        for (i, e) in evals.iter().enumerate() {
            assert_eq!(*e, evaluate_at(&coeffs, domain.element(i)));
        }
    }

    #[test]
    fn ifft_inverts_fft_on_wide_domain() {
        // Wide enough to take the inner-parallel butterfly path.
        let domain = Radix2Domain::<Fr>::new(1 << 12).unwrap();
        let coeffs = random_poly(1 << 12, 7);
        let mut values = coeffs.clone();
        domain.fft_in_place(&mut values).unwrap();
        assert_eq!(values[5], evaluate_at(&coeffs, domain.element(5)));
        domain.ifft_in_place(&mut values).unwrap();
        assert_eq!(values, coeffs);
    }

    #[test]
    fn short_input_is_zero_padded() {
        let domain = Radix2Domain::<Fr>::new(8).unwrap();
        let coeffs = vec![Fr::from(2u64), Fr::from(3u64), Fr::from(5u64)];
        let mut evals = coeffs.clone();
        domain.fft_in_place(&mut evals).unwrap();
        assert_eq!(evals.len(), 8);
        assert_eq!(evals[0], Fr::from(10u64));
        assert_eq!(evals[3], evaluate_at(&coeffs, domain.element(3)));
    }

    #[test]
    fn long_input_rejected() {
        let domain = Radix2Domain::<Fr>::new(4).unwrap();
        let mut values = vec![Fr::one(); 5];
        assert_eq!(
            domain.fft_in_place(&mut values),
            Err(DomainError::InputTooLong { len: 5, size: 4 })
        );
    }

    #[test]
    fn distribute_powers_spans_chunks() {
        let g = Fr::from(3u64);
        let mut values = vec![Fr::one(); POWERS_CHUNK + 17];
        Radix2Domain::distribute_powers(&mut values, g);
        assert_eq!(values[0], Fr::one());
        assert_eq!(values[POWERS_CHUNK + 5], g.pow([(POWERS_CHUNK + 5) as u64]));
    }

    #[test]
    fn vanishing_polynomial_constant_on_odd_coset() {
        let domain = Radix2Domain::<Fr>::new(32).unwrap();
        let g = domain.odd_coset_generator().unwrap();
        let n = domain.size() as u64;
        assert_eq!(g.pow([n]), -Fr::one());
        for i in [0usize, 1, 7, 31] {
            let x = g * domain.element(i);
            assert_eq!(x.pow([n]) - Fr::one(), -Fr::from(2u64));
        }
        assert!(!g.is_zero());
    }
}
