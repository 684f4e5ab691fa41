// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # rsnark-groth16
//!
//! Groth16 prover and verifier over BN254 working directly from a
//! snarkjs `.zkey` and a circom witness.
//!
//! | Module | Purpose |
//! |---|---|
//! | [`prover`] | Quotient on the odd coset, MSMs, (r, s) blinding |
//! | [`verifier`] | Single multi-pairing check |
//! | [`json`] | snarkjs `proof.json`, `public.json`, `verification_key.json` |
//! | [`pool`] | Fixed-size worker pool sharing one proving key |
//!
//! ```rust,no_run
//! use rsnark_groth16::{json, prove, verify};
//! use rsnark_zkey::{parse_wtns, ProvingKey};
//!
//! # fn run(zkey: &[u8], wtns: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let key = ProvingKey::from_bytes(zkey)?;
//! let witness = parse_wtns(wtns)?;
//! let out = prove(&key, &witness)?;
//! println!("{}", json::proof_to_json(&out.proof));
//! println!("{}", json::public_to_json(&out.public_signals));
//! assert!(verify(&key.verification_key(), &out.proof, &out.public_signals)?);
//! # Ok(())
//! # }
//! ```

use rsnark_curve::{CurveError, FieldError};
use rsnark_msm::MsmError;
use rsnark_poly::DomainError;
use rsnark_zkey::ZkeyError;

pub mod json;
pub mod pool;
pub mod prover;
pub mod verifier;

pub use pool::ProverPool;
pub use prover::{prove, prove_with, Proof, ProveOptions, ProveOutput, Timing};
pub use verifier::{verify, verify_json};

#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    #[error("invalid witness length: expected {expected}, got {actual}")]
    InvalidWitnessLength { expected: usize, actual: usize },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("proving aborted")]
    Aborted,

    #[error(transparent)]
    Zkey(#[from] ZkeyError),

    #[error("failed to start prover pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl From<MsmError> for ProverError {
    fn from(err: MsmError) -> Self {
        match err {
            MsmError::Aborted => ProverError::Aborted,
            other => ProverError::Malformed(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field element: {0}")]
    Field(#[from] FieldError),

    #[error("invalid curve point: {0}")]
    Curve(#[from] CurveError),

    #[error("verification key expects {expected} public signals, got {actual}")]
    PublicCount { expected: usize, actual: usize },

    #[error("malformed {what}: {reason}")]
    Format { what: &'static str, reason: String },
}
