// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # rsnark-zkey
//!
//! Loader for snarkjs Groth16 proving keys (`.zkey`) and iden3 witness
//! files (`.wtns`) over BN254.
//!
//! Both formats share the iden3 "binfile" container: a 4-byte magic, a
//! version, and a table of `{type, size, payload}` sections in any order.
//!
//! | Module | Purpose |
//! |---|---|
//! | [`binfile`] | Section table, bounds and duplicate checks |
//! | [`header`] | zkey header pre-pass (`n_vars`, `n_public`, `domain_size`) |
//! | [`key`] | Full [`ProvingKey`] load and [`VerificationKey`] extraction |
//! | [`wtns`] | Witness container |
//! | [`cache`] | Path-keyed cache of loaded keys |
//!
//! ```rust,no_run
//! use rsnark_zkey::{ProvingKey, ZkeySource};
//!
//! # fn run() -> Result<(), rsnark_zkey::ZkeyError> {
//! let header = rsnark_zkey::read_header(ZkeySource::File("circuit_final.zkey".as_ref()))?;
//! println!("public buffer: {} bytes", header.public_output_size());
//!
//! let key = ProvingKey::from_file("circuit_final.zkey")?;
//! assert_eq!(key.n_public(), header.n_public);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use rsnark_curve::{CurveError, FieldError};

pub mod binfile;
pub mod cache;
pub mod header;
pub mod key;
pub mod wtns;

pub use cache::ZkeyCache;
pub use header::{read_header, required_public_output_size, ZkeyHeader};
pub use key::{Coefficient, Matrix, ProvingKey, VerificationKey};
pub use wtns::{parse_wtns, read_wtns};

/// Where a proving key comes from.
#[derive(Debug, Clone, Copy)]
pub enum ZkeySource<'a> {
    /// Whole file already in memory.
    Bytes(&'a [u8]),
    /// Streamed from disk through a buffered reader.
    File(&'a Path),
}

/// Load a full proving key from either source.
pub fn load(source: ZkeySource<'_>) -> Result<ProvingKey, ZkeyError> {
    match source {
        ZkeySource::Bytes(bytes) => ProvingKey::from_bytes(bytes),
        ZkeySource::File(path) => ProvingKey::from_file(path),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ZkeyError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: String, found: [u8; 4] },

    #[error("unsupported {format} version {version}")]
    UnsupportedVersion { format: &'static str, version: u32 },

    #[error("section {section} at offset {offset} with size {size} runs past end of data ({len} bytes)")]
    Truncated {
        section: u32,
        offset: u64,
        size: u64,
        len: u64,
    },

    #[error("section {0} appears more than once")]
    DuplicateSection(u32),

    #[error("missing section {0}")]
    MissingSection(u32),

    #[error("expected {expected} sections, found {found}")]
    SectionCount { expected: u32, found: u32 },

    #[error("section {section} has size {actual}, expected {expected}")]
    SectionSize {
        section: u32,
        expected: u64,
        actual: u64,
    },

    #[error("unsupported protocol id {0}, only groth16 (1) is supported")]
    UnsupportedProtocol(u32),

    #[error("unsupported field element size {0}, expected 32")]
    FieldSize(u32),

    #[error("{0} prime does not match BN254")]
    WrongPrime(&'static str),

    #[error("domain size {0} is not a power of two")]
    DomainSize(u32),

    #[error("header declares {n_public} public signals but only {n_vars} variables")]
    PublicCount { n_public: usize, n_vars: usize },

    #[error("coefficient {index}: {reason}")]
    Coefficient { index: usize, reason: String },

    #[error("section {section}, point {index}: {source}")]
    Point {
        section: u32,
        index: usize,
        source: CurveError,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}
