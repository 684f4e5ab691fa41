// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! iden3 `.wtns` witness container.
//!
//! Section 1 holds `u32 n8 ‖ prime ‖ u32 n_witness`, section 2 holds the
//! witness values as canonical little-endian field elements.

use std::io::{Cursor, Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};
use rsnark_curve::{
    encoding::{modulus_le, read_fr_canonical, FIELD_BYTES},
    Fr,
};

use crate::{
    binfile::{read_prime, read_sections},
    ZkeyError,
};

pub const WTNS_MAGIC: &[u8; 4] = b"wtns";
pub const WTNS_MAX_VERSION: u32 = 2;

const SECTION_WTNS_HEADER: u32 = 1;
const SECTION_WTNS_DATA: u32 = 2;

pub fn parse_wtns(bytes: &[u8]) -> Result<Vec<Fr>, ZkeyError> {
    read_wtns(Cursor::new(bytes))
}

pub fn read_wtns<R: Read + Seek>(mut reader: R) -> Result<Vec<Fr>, ZkeyError> {
    let (_, sections) = read_sections(&mut reader, WTNS_MAGIC, WTNS_MAX_VERSION)?;
    if sections.len() != 2 {
        return Err(ZkeyError::SectionCount {
            expected: 2,
            found: sections.len() as u32,
        });
    }

    sections.expect_size(SECTION_WTNS_HEADER, (4 + FIELD_BYTES + 4) as u64)?;
    let mut header = sections.open(&mut reader, SECTION_WTNS_HEADER)?;
    read_prime(&mut header, &modulus_le::<Fr>(), "witness")?;
    let n_witness = header.read_u32::<LittleEndian>()?;

    sections.expect_items(SECTION_WTNS_DATA, 0, u64::from(n_witness), FIELD_BYTES as u64)?;
    let n_witness = n_witness as usize;
    let mut data = sections.open(&mut reader, SECTION_WTNS_DATA)?;
    let mut witness = Vec::with_capacity(n_witness);
    let mut value = [0u8; FIELD_BYTES];
    for _ in 0..n_witness {
        data.read_exact(&mut value)?;
        witness.push(read_fr_canonical(&value)?);
    }
    tracing::debug!(n_witness, "witness parsed");
    Ok(witness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsnark_curve::encoding::write_fr_canonical;

    fn wtns_bytes(version: u32, values: &[Fr], prime: [u8; 32]) -> Vec<u8> {
        let mut header = 32u32.to_le_bytes().to_vec();
        header.extend_from_slice(&prime);
        header.extend_from_slice(&(values.len() as u32).to_le_bytes());
        let data: Vec<u8> = values.iter().flat_map(write_fr_canonical).collect();

        let mut out = WTNS_MAGIC.to_vec();
        out.extend_from_slice(&version.to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes());
        for (id, payload) in [(1u32, &header), (2u32, &data)] {
            out.extend_from_slice(&id.to_le_bytes());
            out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
            out.extend_from_slice(payload);
        }
        out
    }

    #[test]
    fn parses_values_in_order() {
        let values = [1u64, 33, 3, 11].map(Fr::from);
        let bytes = wtns_bytes(2, &values, modulus_le::<Fr>());
        assert_eq!(parse_wtns(&bytes).unwrap(), values.to_vec());
    }

    #[test]
    fn rejects_wrong_prime() {
        let values = [Fr::from(1u64)];
        let bytes = wtns_bytes(2, &values, modulus_le::<rsnark_curve::Fq>());
        assert!(matches!(parse_wtns(&bytes), Err(ZkeyError::WrongPrime(_))));
    }

    #[test]
    fn rejects_future_version() {
        let values = [Fr::from(1u64)];
        let bytes = wtns_bytes(3, &values, modulus_le::<Fr>());
        assert!(matches!(
            parse_wtns(&bytes),
            Err(ZkeyError::UnsupportedVersion { version: 3, .. })
        ));
    }

    #[test]
    fn rejects_truncated_data() {
        let values = [1u64, 2, 3].map(Fr::from);
        let mut bytes = wtns_bytes(2, &values, modulus_le::<Fr>());
        bytes.truncate(bytes.len() - 8);
        assert!(matches!(parse_wtns(&bytes), Err(ZkeyError::Truncated { section: 2, .. })));
    }

    #[test]
    fn huge_declared_count_is_size_error() {
        let values = [1u64, 2].map(Fr::from);
        let mut bytes = wtns_bytes(2, &values, modulus_le::<Fr>());
        // 24-byte container preamble, then n8 and the prime.
        bytes[60..64].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            parse_wtns(&bytes),
            Err(ZkeyError::SectionSize { section: 2, actual: 64, .. })
        ));
    }
}
