// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Safe buffer API.
//!
//! Work order for a prove call: header pre-pass, capacity check against
//! the format upper bounds, witness length check, full key load, prove.
//! Nothing is written to the proof or public buffers unless the call
//! succeeds.

use std::{path::Path, time::Instant};

use rsnark_groth16::{json, prove, verify_json, ProverError, Timing};
use rsnark_zkey::{parse_wtns, read_header, ZkeySource};

use crate::{
    buffer::{clear, read_text, write_message, write_text},
    AbiError, ProverStatus, VerifierStatus,
};

pub const DEFAULT_PROOF_BUFFER_SIZE: usize = 1024;
pub const DEFAULT_ERROR_BUFFER_SIZE: usize = 256;

/// Decoded output of a successful prove call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProveResponse {
    pub proof: String,
    pub public_signals: String,
    pub timing: Timing,
}

/// Non-OK status from [`prove_auto`] with the error buffer contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("prover failed ({status:?}): {message}")]
pub struct ProveFailure {
    pub status: ProverStatus,
    pub message: String,
}

/// Prove with an in-memory zkey.
///
/// `proof_size` and `public_size` hold the buffer capacities on entry. On
/// `Ok` they hold the text lengths (NUL excluded); on `ShortBuffer` both
/// hold the required capacities.
pub fn groth16_prove(
    zkey: &[u8],
    wtns: &[u8],
    proof_buf: &mut [u8],
    proof_size: &mut usize,
    public_buf: &mut [u8],
    public_size: &mut usize,
    error_buf: &mut [u8],
) -> ProverStatus {
    let source = ZkeySource::Bytes(zkey);
    prove_into(source, wtns, proof_buf, proof_size, public_buf, public_size, error_buf).0
}

/// [`groth16_prove`] with the key streamed from `path`.
pub fn groth16_prove_zkey_file(
    path: &Path,
    wtns: &[u8],
    proof_buf: &mut [u8],
    proof_size: &mut usize,
    public_buf: &mut [u8],
    public_size: &mut usize,
    error_buf: &mut [u8],
) -> ProverStatus {
    let source = ZkeySource::File(path);
    prove_into(source, wtns, proof_buf, proof_size, public_buf, public_size, error_buf).0
}

pub fn groth16_verify(proof: &str, public: &str, vk: &str, error_buf: &mut [u8]) -> VerifierStatus {
    match verify_json(proof, public, vk) {
        Ok(true) => {
            clear(error_buf);
            VerifierStatus::Valid
        }
        Ok(false) => {
            write_message(error_buf, "invalid proof");
            VerifierStatus::Invalid
        }
        Err(err) => {
            tracing::warn!(%err, "verifier rejected input");
            write_message(error_buf, &err.to_string());
            VerifierStatus::Error
        }
    }
}

/// Capacity needed for the public-signals buffer, NUL included. Returns 0
/// and writes the reason to `error_buf` when the header cannot be read.
pub fn groth16_public_size_for_zkey_buf(zkey: &[u8], error_buf: &mut [u8]) -> usize {
    public_size_for(ZkeySource::Bytes(zkey), error_buf)
}

pub fn groth16_public_size_for_zkey_file(path: &Path, error_buf: &mut [u8]) -> usize {
    public_size_for(ZkeySource::File(path), error_buf)
}

/// Capacity that always fits the proof text, NUL included.
pub fn groth16_proof_size() -> usize {
    json::proof_buffer_size()
}

/// Allocate buffers and call the prover the way host bindings do. When
/// `public_buffer_size` is `None` the public-size pre-pass picks it.
pub fn prove_auto(
    source: ZkeySource<'_>,
    wtns: &[u8],
    proof_buffer_size: usize,
    public_buffer_size: Option<usize>,
    error_buffer_size: usize,
) -> Result<ProveResponse, ProveFailure> {
    let mut error_buf = vec![0u8; error_buffer_size];
    let mut public_size = match public_buffer_size {
        Some(size) => size,
        None => match public_size_for(source, &mut error_buf) {
            0 => {
                return Err(ProveFailure {
                    status: ProverStatus::Error,
                    message: read_text(&error_buf),
                })
            }
            size => size,
        },
    };
    let mut proof_size = proof_buffer_size;
    let mut proof_buf = vec![0u8; proof_size];
    let mut public_buf = vec![0u8; public_size];

    let (status, timing) = prove_into(
        source,
        wtns,
        &mut proof_buf,
        &mut proof_size,
        &mut public_buf,
        &mut public_size,
        &mut error_buf,
    );
    match status {
        ProverStatus::Ok => Ok(ProveResponse {
            proof: read_text(&proof_buf),
            public_signals: read_text(&public_buf),
            timing,
        }),
        status => Err(ProveFailure {
            status,
            message: read_text(&error_buf),
        }),
    }
}

fn public_size_for(source: ZkeySource<'_>, error_buf: &mut [u8]) -> usize {
    match read_header(source) {
        Ok(header) => {
            clear(error_buf);
            header.public_output_size()
        }
        Err(err) => {
            tracing::warn!(%err, "public size pre-pass failed");
            write_message(error_buf, &err.to_string());
            0
        }
    }
}

fn prove_into(
    source: ZkeySource<'_>,
    wtns: &[u8],
    proof_buf: &mut [u8],
    proof_size: &mut usize,
    public_buf: &mut [u8],
    public_size: &mut usize,
    error_buf: &mut [u8],
) -> (ProverStatus, Timing) {
    let proof_cap = (*proof_size).min(proof_buf.len());
    let public_cap = (*public_size).min(public_buf.len());

    let response = match prove_text(source, wtns, proof_cap, public_cap) {
        Ok(response) => response,
        Err(err) => {
            if let AbiError::ShortBuffer { proof, public } = &err {
                *proof_size = *proof;
                *public_size = *public;
            }
            tracing::warn!(%err, "prove call failed");
            write_message(error_buf, &err.to_string());
            return (err.prover_status(), Timing::default());
        }
    };

    // Both texts were checked against the capacities in `prove_text`.
    let proof_len = write_text(&mut proof_buf[..proof_cap], &response.proof).unwrap_or(0);
    let public_len = write_text(&mut public_buf[..public_cap], &response.public_signals).unwrap_or(0);
    *proof_size = proof_len;
    *public_size = public_len;
    clear(error_buf);
    (ProverStatus::Ok, response.timing)
}

fn prove_text(
    source: ZkeySource<'_>,
    wtns: &[u8],
    proof_cap: usize,
    public_cap: usize,
) -> Result<ProveResponse, AbiError> {
    let header = read_header(source)?;
    let proof_required = groth16_proof_size();
    let public_required = header.public_output_size();
    if proof_cap < proof_required || public_cap < public_required {
        return Err(AbiError::ShortBuffer {
            proof: proof_required,
            public: public_required,
        });
    }

    let witness = parse_wtns(wtns)?;
    if witness.len() != header.n_vars {
        return Err(ProverError::InvalidWitnessLength {
            expected: header.n_vars,
            actual: witness.len(),
        }
        .into());
    }

    let start = Instant::now();
    let key = rsnark_zkey::load(source)?;
    let load = start.elapsed();

    let out = prove(&key, &witness)?;
    let proof = json::proof_to_json(&out.proof);
    let public_signals = json::public_to_json(&out.public_signals);
    if proof.len() >= proof_cap || public_signals.len() >= public_cap {
        return Err(AbiError::ShortBuffer {
            proof: proof_required.max(proof.len() + 1),
            public: public_required.max(public_signals.len() + 1),
        });
    }

    Ok(ProveResponse {
        proof,
        public_signals,
        timing: Timing {
            load,
            prove: out.timing.prove,
        },
    })
}
