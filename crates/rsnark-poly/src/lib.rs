// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # rsnark-poly
//!
//! Radix-2 evaluation domain over an FFT-friendly prime field.
//!
//! The prover works on polynomials in evaluation form over a domain of
//! size `n = 2^k`. [`Radix2Domain`] converts between coefficient and
//! evaluation form (`ifft_in_place` / `fft_in_place`) and shifts a
//! polynomial onto a coset (`distribute_powers`). Butterflies of one
//! stage touch disjoint pairs, so each stage is split across rayon
//! workers.

mod domain;

pub use domain::{evaluate_at, Radix2Domain};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("domain of size 2^{log_size} exceeds the field's two-adicity {max_log}")]
    TooLarge { log_size: u32, max_log: u32 },

    #[error("input of length {len} does not fit a domain of size {size}")]
    InputTooLong { len: usize, size: usize },
}
