// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! iden3 binfile container: `magic ‖ u32 version ‖ u32 n_sections`
//! followed by `n_sections` × `{u32 type, u64 size, payload}`.

use std::{
    collections::HashMap,
    io::{Read, Seek, SeekFrom, Take},
};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ZkeyError;

/// Offsets and sizes of every section, indexed by section type.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    entries: HashMap<u32, (u64, u64)>,
}

impl Sections {
    /// `(offset, size)` of a section.
    pub fn get(&self, id: u32) -> Result<(u64, u64), ZkeyError> {
        self.entries
            .get(&id)
            .copied()
            .ok_or(ZkeyError::MissingSection(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails unless the section's declared size is exactly `expected`.
    pub fn expect_size(&self, id: u32, expected: u64) -> Result<(), ZkeyError> {
        let (_, actual) = self.get(id)?;
        if actual != expected {
            return Err(ZkeyError::SectionSize {
                section: id,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Fails unless the section holds exactly `prefix + count * width` bytes.
    ///
    /// A product that does not fit in `u64` is reported as a size mismatch.
    pub fn expect_items(&self, id: u32, prefix: u64, count: u64, width: u64) -> Result<(), ZkeyError> {
        match count.checked_mul(width).and_then(|len| len.checked_add(prefix)) {
            Some(expected) => self.expect_size(id, expected),
            None => Err(ZkeyError::SectionSize {
                section: id,
                expected: u64::MAX,
                actual: self.get(id)?.1,
            }),
        }
    }

    /// Seek to the start of a section and return a reader bounded by its size.
    pub fn open<'r, R: Read + Seek>(
        &self,
        reader: &'r mut R,
        id: u32,
    ) -> Result<Take<&'r mut R>, ZkeyError> {
        let (offset, size) = self.get(id)?;
        reader.seek(SeekFrom::Start(offset))?;
        Ok(reader.take(size))
    }
}

/// Read the container preamble and section table.
///
/// Every section must lie inside the data and appear at most once.
/// Returns the file version.
pub fn read_sections<R: Read + Seek>(
    reader: &mut R,
    magic: &[u8; 4],
    max_version: u32,
) -> Result<(u32, Sections), ZkeyError> {
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    let mut found = [0u8; 4];
    reader.read_exact(&mut found)?;
    if &found != magic {
        return Err(ZkeyError::BadMagic {
            expected: String::from_utf8_lossy(magic).into_owned(),
            found,
        });
    }

    let format = if magic == b"zkey" { "zkey" } else { "wtns" };
    let version = reader.read_u32::<LittleEndian>()?;
    if version == 0 || version > max_version {
        return Err(ZkeyError::UnsupportedVersion { format, version });
    }

    let n_sections = reader.read_u32::<LittleEndian>()?;
    let mut entries = HashMap::new();
    for _ in 0..n_sections {
        let id = reader.read_u32::<LittleEndian>()?;
        let size = reader.read_u64::<LittleEndian>()?;
        let offset = reader.stream_position()?;
        let end = offset.checked_add(size);
        if end.map_or(true, |end| end > len) {
            return Err(ZkeyError::Truncated {
                section: id,
                offset,
                size,
                len,
            });
        }
        if entries.insert(id, (offset, size)).is_some() {
            return Err(ZkeyError::DuplicateSection(id));
        }
        reader.seek(SeekFrom::Start(offset + size))?;
    }

    Ok((version, Sections { entries }))
}

/// Read a length-prefixed field modulus and compare it with `expected`.
pub fn read_prime<R: Read>(
    reader: &mut R,
    expected: &[u8; 32],
    which: &'static str,
) -> Result<(), ZkeyError> {
    let n8 = reader.read_u32::<LittleEndian>()?;
    if n8 != 32 {
        return Err(ZkeyError::FieldSize(n8));
    }
    let mut prime = [0u8; 32];
    reader.read_exact(&mut prime)?;
    if &prime != expected {
        return Err(ZkeyError::WrongPrime(which));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn container(magic: &[u8; 4], version: u32, sections: &[(u32, &[u8])]) -> Vec<u8> {
        let mut out = magic.to_vec();
        out.extend_from_slice(&version.to_le_bytes());
        out.extend_from_slice(&(sections.len() as u32).to_le_bytes());
        for (id, payload) in sections {
            out.extend_from_slice(&id.to_le_bytes());
            out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
            out.extend_from_slice(payload);
        }
        out
    }

    #[test]
    fn sections_in_any_order() {
        let data = container(b"zkey", 1, &[(2, &[9, 9]), (1, &[1, 0, 0, 0])]);
        let mut cursor = Cursor::new(data);
        let (version, sections) = read_sections(&mut cursor, b"zkey", 1).unwrap();
        assert_eq!(version, 1);
        assert_eq!(sections.len(), 2);

        let mut section = sections.open(&mut cursor, 1).unwrap();
        assert_eq!(section.read_u32::<LittleEndian>().unwrap(), 1);
        let mut rest = Vec::new();
        section.read_to_end(&mut rest).unwrap();
        assert!(rest.is_empty());
        assert!(sections.expect_size(2, 2).is_ok());
        assert!(matches!(
            sections.expect_size(2, 3),
            Err(ZkeyError::SectionSize { section: 2, expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn item_count_overflow_is_size_error() {
        let data = container(b"wtns", 1, &[(2, &[0; 64])]);
        let (_, sections) = read_sections(&mut Cursor::new(data), b"wtns", 1).unwrap();
        assert!(sections.expect_items(2, 0, 2, 32).is_ok());
        assert!(matches!(
            sections.expect_items(2, 4, u64::MAX / 2, 32),
            Err(ZkeyError::SectionSize { section: 2, actual: 64, .. })
        ));
        assert!(matches!(
            sections.expect_items(2, u64::MAX, 2, 32),
            Err(ZkeyError::SectionSize { section: 2, .. })
        ));
    }

    #[test]
    fn wrong_magic_and_version() {
        let data = container(b"wtns", 1, &[]);
        assert!(matches!(
            read_sections(&mut Cursor::new(data), b"zkey", 1),
            Err(ZkeyError::BadMagic { .. })
        ));
        let data = container(b"zkey", 2, &[]);
        assert!(matches!(
            read_sections(&mut Cursor::new(data), b"zkey", 1),
            Err(ZkeyError::UnsupportedVersion { version: 2, .. })
        ));
    }

    #[test]
    fn duplicate_section_rejected() {
        let data = container(b"zkey", 1, &[(3, &[0]), (3, &[1])]);
        assert!(matches!(
            read_sections(&mut Cursor::new(data), b"zkey", 1),
            Err(ZkeyError::DuplicateSection(3))
        ));
    }

    #[test]
    fn oversized_section_rejected() {
        let mut data = container(b"zkey", 1, &[(1, &[1, 0, 0, 0])]);
        data.truncate(data.len() - 1);
        assert!(matches!(
            read_sections(&mut Cursor::new(data), b"zkey", 1),
            Err(ZkeyError::Truncated { section: 1, .. })
        ));
    }

    #[test]
    fn missing_section_reported() {
        let data = container(b"zkey", 1, &[(1, &[1, 0, 0, 0])]);
        let (_, sections) = read_sections(&mut Cursor::new(data), b"zkey", 1).unwrap();
        assert!(matches!(sections.get(9), Err(ZkeyError::MissingSection(9))));
    }
}
