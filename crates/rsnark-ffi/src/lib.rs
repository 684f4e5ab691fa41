// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # rsnark-ffi
//!
//! Buffer-based ABI compatible with the rapidsnark calling contract.
//!
//! Callers own every output buffer. Sizes are in/out: capacity on entry,
//! bytes written on success, required capacity on `ShortBuffer`. Callers
//! size the public-signals buffer with a header-only pre-pass before the
//! real call.
//!
//! [`abi`] is the safe slice API; [`ffi`] wraps it in `extern "C"` entry
//! points with the same semantics.

use rsnark_groth16::{ProverError, VerifierError};
use rsnark_zkey::ZkeyError;

pub mod abi;
pub mod buffer;
pub mod ffi;
pub mod status;

pub use abi::{
    groth16_proof_size, groth16_prove, groth16_prove_zkey_file, groth16_public_size_for_zkey_buf,
    groth16_public_size_for_zkey_file, groth16_verify, prove_auto, ProveFailure, ProveResponse,
    DEFAULT_ERROR_BUFFER_SIZE, DEFAULT_PROOF_BUFFER_SIZE,
};
pub use status::{ProverStatus, VerifierStatus};

#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("output buffer too small: proof needs {proof} bytes, public signals need {public} bytes")]
    ShortBuffer { proof: usize, public: usize },

    #[error(transparent)]
    Zkey(#[from] ZkeyError),

    #[error(transparent)]
    Prover(#[from] ProverError),

    #[error(transparent)]
    Verifier(#[from] VerifierError),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("panic: {0}")]
    Panic(String),
}

impl AbiError {
    pub fn prover_status(&self) -> ProverStatus {
        match self {
            AbiError::ShortBuffer { .. } => ProverStatus::ShortBuffer,
            AbiError::Prover(ProverError::InvalidWitnessLength { .. }) => {
                ProverStatus::InvalidWitnessLength
            }
            _ => ProverStatus::Error,
        }
    }
}
