// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek},
    path::Path,
    time::Instant,
};

use byteorder::{LittleEndian, ReadBytesExt};
use rayon::prelude::*;
use rsnark_curve::{
    curve::{g1_from_coords, g2_from_coords},
    encoding::{read_fq_montgomery, read_fr_double_montgomery, FIELD_BYTES},
    CurveError, Fq, Fq2, Fr, G1Affine, G2Affine,
};

use crate::{
    binfile::{read_sections, Sections},
    header::*,
    ZkeyError,
};

/// Points decoded per batch while streaming a section.
const POINT_BATCH: usize = 1 << 12;

/// `u32 matrix ‖ u32 constraint ‖ u32 signal ‖ Fr value`.
const COEFFICIENT_BYTES: usize = 4 + 4 + 4 + FIELD_BYTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matrix {
    A,
    B,
}

/// One non-zero entry of the A or B constraint matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coefficient {
    pub matrix: Matrix,
    pub constraint: usize,
    pub signal: usize,
    pub value: Fr,
}

/// Groth16 verification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    pub alpha1: G1Affine,
    pub beta2: G2Affine,
    pub gamma2: G2Affine,
    pub delta2: G2Affine,
    /// `n_public + 1` points; `ic[0]` is the constant term.
    pub ic: Vec<G1Affine>,
}

impl VerificationKey {
    pub fn n_public(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }
}

/// Proving key loaded from a `.zkey`.
///
/// Immutable once built. Share one instance between concurrent provers
/// through `Arc<ProvingKey>`.
#[derive(Debug, PartialEq, Eq)]
pub struct ProvingKey {
    header: ZkeyHeader,
    alpha1: G1Affine,
    beta1: G1Affine,
    beta2: G2Affine,
    gamma2: G2Affine,
    delta1: G1Affine,
    delta2: G2Affine,
    ic: Vec<G1Affine>,
    coefficients: Vec<Coefficient>,
    a_query: Vec<G1Affine>,
    b1_query: Vec<G1Affine>,
    b2_query: Vec<G2Affine>,
    c_query: Vec<G1Affine>,
    h_query: Vec<G1Affine>,
}

impl ProvingKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZkeyError> {
        Self::from_reader(Cursor::new(bytes))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ZkeyError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self, ZkeyError> {
        let start = Instant::now();
        let (_, sections) = read_sections(&mut reader, ZKEY_MAGIC, ZKEY_VERSION)?;
        let header = ZkeyHeader::read_from(&mut reader, &sections)?;
        tracing::debug!(?header, sections = sections.len(), "zkey header");

        let mut section = sections.open(&mut reader, SECTION_HEADER)?;
        ZkeyHeader::parse_scalars(&mut section)?;
        let alpha1 = read_point(&mut section, SECTION_HEADER, 0, &G1_POINT)?;
        let beta1 = read_point(&mut section, SECTION_HEADER, 1, &G1_POINT)?;
        let beta2 = read_point(&mut section, SECTION_HEADER, 2, &G2_POINT)?;
        let gamma2 = read_point(&mut section, SECTION_HEADER, 3, &G2_POINT)?;
        let delta1 = read_point(&mut section, SECTION_HEADER, 4, &G1_POINT)?;
        let delta2 = read_point(&mut section, SECTION_HEADER, 5, &G2_POINT)?;

        let n_vars = header.n_vars;
        let ic = read_points(&mut reader, &sections, SECTION_IC, header.n_public + 1, &G1_POINT)?;
        let coefficients = read_coefficients(&mut reader, &sections, &header)?;
        let a_query = read_points(&mut reader, &sections, SECTION_A, n_vars, &G1_POINT)?;
        let b1_query = read_points(&mut reader, &sections, SECTION_B1, n_vars, &G1_POINT)?;
        let b2_query = read_points(&mut reader, &sections, SECTION_B2, n_vars, &G2_POINT)?;
        let c_query = read_points(&mut reader, &sections, SECTION_C, header.n_private(), &G1_POINT)?;
        let h_query = read_points(&mut reader, &sections, SECTION_H, header.domain_size, &G1_POINT)?;

        tracing::info!(
            n_vars,
            n_public = header.n_public,
            domain_size = header.domain_size,
            coefficients = coefficients.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "zkey loaded"
        );

        Ok(Self {
            header,
            alpha1,
            beta1,
            beta2,
            gamma2,
            delta1,
            delta2,
            ic,
            coefficients,
            a_query,
            b1_query,
            b2_query,
            c_query,
            h_query,
        })
    }

    pub fn header(&self) -> &ZkeyHeader {
        &self.header
    }

    pub fn n_vars(&self) -> usize {
        self.header.n_vars
    }

    pub fn n_public(&self) -> usize {
        self.header.n_public
    }

    pub fn domain_size(&self) -> usize {
        self.header.domain_size
    }

    pub fn alpha1(&self) -> &G1Affine {
        &self.alpha1
    }

    pub fn beta1(&self) -> &G1Affine {
        &self.beta1
    }

    pub fn beta2(&self) -> &G2Affine {
        &self.beta2
    }

    pub fn gamma2(&self) -> &G2Affine {
        &self.gamma2
    }

    pub fn delta1(&self) -> &G1Affine {
        &self.delta1
    }

    pub fn delta2(&self) -> &G2Affine {
        &self.delta2
    }

    pub fn ic(&self) -> &[G1Affine] {
        &self.ic
    }

    pub fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    pub fn a_query(&self) -> &[G1Affine] {
        &self.a_query
    }

    pub fn b1_query(&self) -> &[G1Affine] {
        &self.b1_query
    }

    pub fn b2_query(&self) -> &[G2Affine] {
        &self.b2_query
    }

    pub fn c_query(&self) -> &[G1Affine] {
        &self.c_query
    }

    pub fn h_query(&self) -> &[G1Affine] {
        &self.h_query
    }

    pub fn public_output_size(&self) -> usize {
        self.header.public_output_size()
    }

    pub fn verification_key(&self) -> VerificationKey {
        VerificationKey {
            alpha1: self.alpha1,
            beta2: self.beta2,
            gamma2: self.gamma2,
            delta2: self.delta2,
            ic: self.ic.clone(),
        }
    }
}

fn fq_at(bytes: &[u8], slot: usize) -> Result<Fq, CurveError> {
    let mut buf = [0u8; FIELD_BYTES];
    buf.copy_from_slice(&bytes[slot * FIELD_BYTES..(slot + 1) * FIELD_BYTES]);
    Ok(read_fq_montgomery(&buf)?)
}

fn decode_g1(bytes: &[u8]) -> Result<G1Affine, CurveError> {
    g1_from_coords(fq_at(bytes, 0)?, fq_at(bytes, 1)?)
}

fn decode_g2(bytes: &[u8]) -> Result<G2Affine, CurveError> {
    let x = Fq2::new(fq_at(bytes, 0)?, fq_at(bytes, 1)?);
    let y = Fq2::new(fq_at(bytes, 2)?, fq_at(bytes, 3)?);
    g2_from_coords(x, y)
}

/// Serialized width of a point together with its decoder.
struct PointFormat<P> {
    width: usize,
    decode: fn(&[u8]) -> Result<P, CurveError>,
}

const G1_POINT: PointFormat<G1Affine> = PointFormat {
    width: G1_BYTES as usize,
    decode: decode_g1,
};

const G2_POINT: PointFormat<G2Affine> = PointFormat {
    width: G2_BYTES as usize,
    decode: decode_g2,
};

fn read_point<R: Read, P>(
    reader: &mut R,
    section: u32,
    index: usize,
    format: &PointFormat<P>,
) -> Result<P, ZkeyError> {
    let mut buf = vec![0u8; format.width];
    reader.read_exact(&mut buf)?;
    (format.decode)(&buf).map_err(|source| ZkeyError::Point {
        section,
        index,
        source,
    })
}

/// Stream `count` points out of a section, validating each batch in parallel.
fn read_points<R, P>(
    reader: &mut R,
    sections: &Sections,
    id: u32,
    count: usize,
    format: &PointFormat<P>,
) -> Result<Vec<P>, ZkeyError>
where
    R: Read + Seek,
    P: Send,
{
    sections.expect_items(id, 0, count as u64, format.width as u64)?;
    let mut section = sections.open(reader, id)?;

    let mut points = Vec::with_capacity(count);
    let mut buf = Vec::new();
    while points.len() < count {
        let base = points.len();
        let batch = POINT_BATCH.min(count - base);
        buf.resize(batch * format.width, 0);
        section.read_exact(&mut buf)?;
        let decoded = buf
            .par_chunks_exact(format.width)
            .enumerate()
            .map(|(i, bytes)| {
                (format.decode)(bytes).map_err(|source| ZkeyError::Point {
                    section: id,
                    index: base + i,
                    source,
                })
            })
            .collect::<Result<Vec<P>, ZkeyError>>()?;
        points.extend(decoded);
    }
    tracing::debug!(section = id, count, "points decoded");
    Ok(points)
}

fn read_coefficients<R: Read + Seek>(
    reader: &mut R,
    sections: &Sections,
    header: &ZkeyHeader,
) -> Result<Vec<Coefficient>, ZkeyError> {
    let mut section = sections.open(reader, SECTION_COEFFS)?;
    let n_coefs = section.read_u32::<LittleEndian>()? as usize;
    sections.expect_items(SECTION_COEFFS, 4, n_coefs as u64, COEFFICIENT_BYTES as u64)?;

    let mut coefficients = Vec::with_capacity(n_coefs);
    let mut value = [0u8; FIELD_BYTES];
    for index in 0..n_coefs {
        let matrix = match section.read_u32::<LittleEndian>()? {
            0 => Matrix::A,
            1 => Matrix::B,
            other => {
                return Err(ZkeyError::Coefficient {
                    index,
                    reason: format!("unknown matrix {other}"),
                })
            }
        };
        let constraint = section.read_u32::<LittleEndian>()? as usize;
        let signal = section.read_u32::<LittleEndian>()? as usize;
        section.read_exact(&mut value)?;

        if constraint >= header.domain_size {
            return Err(ZkeyError::Coefficient {
                index,
                reason: format!("constraint {constraint} outside domain of size {}", header.domain_size),
            });
        }
        if signal >= header.n_vars {
            return Err(ZkeyError::Coefficient {
                index,
                reason: format!("signal {signal} outside {} variables", header.n_vars),
            });
        }
        coefficients.push(Coefficient {
            matrix,
            constraint,
            signal,
            value: read_fr_double_montgomery(&value)?,
        });
    }
    Ok(coefficients)
}
