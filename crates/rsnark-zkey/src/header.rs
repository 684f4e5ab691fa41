// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Header pre-pass.
//!
//! Reads sections 1 and 2 only, so callers can size their output buffers
//! without decoding any point data.

use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek},
};

use byteorder::{LittleEndian, ReadBytesExt};
use rsnark_curve::{encoding::modulus_le, Fq, Fr};

use crate::{
    binfile::{read_prime, read_sections, Sections},
    ZkeyError, ZkeySource,
};

pub const ZKEY_MAGIC: &[u8; 4] = b"zkey";
pub const ZKEY_VERSION: u32 = 1;
pub const GROTH16_PROTOCOL: u32 = 1;

pub const SECTION_PROTOCOL: u32 = 1;
pub const SECTION_HEADER: u32 = 2;
pub const SECTION_IC: u32 = 3;
pub const SECTION_COEFFS: u32 = 4;
pub const SECTION_A: u32 = 5;
pub const SECTION_B1: u32 = 6;
pub const SECTION_B2: u32 = 7;
pub const SECTION_C: u32 = 8;
pub const SECTION_H: u32 = 9;

pub const G1_BYTES: u64 = 64;
pub const G2_BYTES: u64 = 128;

/// `n8q ‖ q ‖ n8r ‖ r ‖ n_vars ‖ n_public ‖ domain_size`.
const HEADER_SCALARS_LEN: u64 = 4 + 32 + 4 + 32 + 4 + 4 + 4;
/// `alpha1, beta1, beta2, gamma2, delta1, delta2`.
const HEADER_POINTS_LEN: u64 = 3 * G1_BYTES + 3 * G2_BYTES;
pub const HEADER_SECTION_LEN: u64 = HEADER_SCALARS_LEN + HEADER_POINTS_LEN;

/// Largest decimal text of a BN254 scalar.
pub const MAX_DECIMAL_DIGITS: usize = 77;

/// Circuit dimensions from the zkey header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZkeyHeader {
    pub n_vars: usize,
    pub n_public: usize,
    pub domain_size: usize,
}

impl ZkeyHeader {
    /// Check the protocol section and parse the header section.
    pub fn read_from<R: Read + Seek>(reader: &mut R, sections: &Sections) -> Result<Self, ZkeyError> {
        sections.expect_size(SECTION_PROTOCOL, 4)?;
        let protocol = sections
            .open(reader, SECTION_PROTOCOL)?
            .read_u32::<LittleEndian>()?;
        if protocol != GROTH16_PROTOCOL {
            return Err(ZkeyError::UnsupportedProtocol(protocol));
        }

        sections.expect_size(SECTION_HEADER, HEADER_SECTION_LEN)?;
        let mut section = sections.open(reader, SECTION_HEADER)?;
        Self::parse_scalars(&mut section)
    }

    /// Parse the integer prefix of section 2, leaving `reader` at `alpha1`.
    pub(crate) fn parse_scalars<R: Read>(reader: &mut R) -> Result<Self, ZkeyError> {
        read_prime(reader, &modulus_le::<Fq>(), "base field")?;
        read_prime(reader, &modulus_le::<Fr>(), "scalar field")?;

        let n_vars = reader.read_u32::<LittleEndian>()? as usize;
        let n_public = reader.read_u32::<LittleEndian>()? as usize;
        let domain_size = reader.read_u32::<LittleEndian>()?;

        if domain_size == 0 || !domain_size.is_power_of_two() {
            return Err(ZkeyError::DomainSize(domain_size));
        }
        if n_public + 1 > n_vars {
            return Err(ZkeyError::PublicCount { n_public, n_vars });
        }
        Ok(Self {
            n_vars,
            n_public,
            domain_size: domain_size as usize,
        })
    }

    /// Bytes needed for the public-signals text of this circuit, NUL included.
    pub fn public_output_size(&self) -> usize {
        required_public_output_size(self.n_public)
    }

    /// Number of private wires, the length of the C query.
    pub fn n_private(&self) -> usize {
        self.n_vars - self.n_public - 1
    }
}

/// Upper bound on the byte length of `["v1","v2",...]` for `n_public`
/// signals, plus one byte for the terminating NUL.
pub fn required_public_output_size(n_public: usize) -> usize {
    let brackets = 2;
    let values = n_public * (MAX_DECIMAL_DIGITS + 2);
    let commas = n_public.saturating_sub(1);
    brackets + values + commas + 1
}

/// Header pre-pass for either source.
pub fn read_header(source: ZkeySource<'_>) -> Result<ZkeyHeader, ZkeyError> {
    match source {
        ZkeySource::Bytes(bytes) => header_from_reader(&mut Cursor::new(bytes)),
        ZkeySource::File(path) => header_from_reader(&mut BufReader::new(File::open(path)?)),
    }
}

fn header_from_reader<R: Read + Seek>(reader: &mut R) -> Result<ZkeyHeader, ZkeyError> {
    let (_, sections) = read_sections(reader, ZKEY_MAGIC, ZKEY_VERSION)?;
    ZkeyHeader::read_from(reader, &sections)
}
