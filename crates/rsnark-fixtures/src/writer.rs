// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! `.zkey` / `.wtns` writers and snarkjs JSON for arkworks keys and proofs.

use ark_bn254::{Bn254, Fq12, Fr, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ff::Field;
use ark_groth16::{Proof, ProvingKey, VerifyingKey};
use rsnark_curve::{
    encoding::{modulus_le, write_fq_montgomery, write_fr_canonical, write_fr_double_montgomery},
    field::to_decimal,
    Fq,
};
use serde_json::{json, Value};

use crate::circuit::ToyCircuit;

/// `(section type, payload)`.
pub type Section = (u32, Vec<u8>);

/// Concatenate a binfile container.
pub fn assemble(magic: &[u8; 4], version: u32, sections: &[Section]) -> Vec<u8> {
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

pub fn g1_bytes(p: &G1Affine) -> Vec<u8> {
    if p.infinity {
        return vec![0u8; 64];
    }
    [write_fq_montgomery(&p.x), write_fq_montgomery(&p.y)].concat()
}

pub fn g2_bytes(p: &G2Affine) -> Vec<u8> {
    if p.infinity {
        return vec![0u8; 128];
    }
    [
        write_fq_montgomery(&p.x.c0),
        write_fq_montgomery(&p.x.c1),
        write_fq_montgomery(&p.y.c0),
        write_fq_montgomery(&p.y.c1),
    ]
    .concat()
}

fn g1_section(points: &[G1Affine]) -> Vec<u8> {
    points.iter().flat_map(g1_bytes).collect()
}

fn g2_section(points: &[G2Affine]) -> Vec<u8> {
    points.iter().flat_map(g2_bytes).collect()
}

fn prime_bytes<F: ark_ff::PrimeField<BigInt = ark_ff::BigInt<4>>>() -> Vec<u8> {
    let mut out = 32u32.to_le_bytes().to_vec();
    out.extend_from_slice(&modulus_le::<F>());
    out
}

/// Sections 1 through 9 of a zkey for `circuit` and its arkworks proving key,
/// followed by an unused section 10.
pub fn zkey_sections(circuit: &ToyCircuit, pk: &ProvingKey<Bn254>, domain_size: usize) -> Vec<Section> {
    let vk = &pk.vk;

    let mut header = prime_bytes::<Fq>();
    header.extend(prime_bytes::<Fr>());
    header.extend_from_slice(&(circuit.n_vars as u32).to_le_bytes());
    header.extend_from_slice(&(circuit.n_public as u32).to_le_bytes());
    header.extend_from_slice(&(domain_size as u32).to_le_bytes());
    header.extend(g1_bytes(&vk.alpha_g1));
    header.extend(g1_bytes(&pk.beta_g1));
    header.extend(g2_bytes(&vk.beta_g2));
    header.extend(g2_bytes(&vk.gamma_g2));
    header.extend(g1_bytes(&pk.delta_g1));
    header.extend(g2_bytes(&vk.delta_g2));

    let mut entries: Vec<(u32, usize, usize, Fr)> = Vec::new();
    for (i, row) in circuit.rows.iter().enumerate() {
        entries.extend(row.a.iter().map(|(wire, k)| (0, i, *wire, *k)));
        entries.extend(row.b.iter().map(|(wire, k)| (1, i, *wire, *k)));
    }
    // Public wires (and the constant) each get an extra A row.
    let n_constraints = circuit.rows.len();
    entries.extend((0..=circuit.n_public).map(|s| (0, n_constraints + s, s, Fr::ONE)));

    let mut coeffs = (entries.len() as u32).to_le_bytes().to_vec();
    for (matrix, constraint, signal, value) in &entries {
        coeffs.extend_from_slice(&matrix.to_le_bytes());
        coeffs.extend_from_slice(&(*constraint as u32).to_le_bytes());
        coeffs.extend_from_slice(&(*signal as u32).to_le_bytes());
        coeffs.extend_from_slice(&write_fr_double_montgomery(value));
    }

    vec![
        (1, 1u32.to_le_bytes().to_vec()),
        (2, header),
        (3, g1_section(&vk.gamma_abc_g1)),
        (4, coeffs),
        (5, g1_section(&pk.a_query)),
        (6, g1_section(&pk.b_g1_query)),
        (7, g2_section(&pk.b_g2_query)),
        (8, g1_section(&pk.l_query)),
        (9, g1_section(&pk.h_query)),
        (10, b"contributions".to_vec()),
    ]
}

pub fn wtns_bytes(witness: &[Fr]) -> Vec<u8> {
    let mut header = prime_bytes::<Fr>();
    header.extend_from_slice(&(witness.len() as u32).to_le_bytes());
    let data: Vec<u8> = witness.iter().flat_map(write_fr_canonical).collect();
    assemble(b"wtns", 2, &[(1, header), (2, data)])
}

pub fn g1_json(p: &G1Affine) -> Value {
    if p.infinity {
        return json!(["0", "1", "0"]);
    }
    json!([to_decimal(&p.x), to_decimal(&p.y), "1"])
}

pub fn g2_json(p: &G2Affine) -> Value {
    if p.infinity {
        return json!([["0", "0"], ["1", "0"], ["0", "0"]]);
    }
    json!([
        [to_decimal(&p.x.c0), to_decimal(&p.x.c1)],
        [to_decimal(&p.y.c0), to_decimal(&p.y.c1)],
        ["1", "0"]
    ])
}

fn fq12_json(x: &Fq12) -> Value {
    let fq6 = |v: &ark_bn254::Fq6| {
        json!([
            [to_decimal(&v.c0.c0), to_decimal(&v.c0.c1)],
            [to_decimal(&v.c1.c0), to_decimal(&v.c1.c1)],
            [to_decimal(&v.c2.c0), to_decimal(&v.c2.c1)]
        ])
    };
    json!([fq6(&x.c0), fq6(&x.c1)])
}

/// snarkjs `verification_key.json`, including the `vk_alphabeta_12` field
/// snarkjs emits.
pub fn vk_json(vk: &VerifyingKey<Bn254>) -> String {
    let alphabeta = Bn254::pairing(vk.alpha_g1, vk.beta_g2).0;
    json!({
        "protocol": "groth16",
        "curve": "bn128",
        "nPublic": vk.gamma_abc_g1.len() - 1,
        "vk_alpha_1": g1_json(&vk.alpha_g1),
        "vk_beta_2": g2_json(&vk.beta_g2),
        "vk_gamma_2": g2_json(&vk.gamma_g2),
        "vk_delta_2": g2_json(&vk.delta_g2),
        "vk_alphabeta_12": fq12_json(&alphabeta),
        "IC": vk.gamma_abc_g1.iter().map(g1_json).collect::<Vec<_>>(),
    })
    .to_string()
}

pub fn proof_json(proof: &Proof<Bn254>) -> String {
    json!({
        "pi_a": g1_json(&proof.a),
        "pi_b": g2_json(&proof.b),
        "pi_c": g1_json(&proof.c),
        "protocol": "groth16",
        "curve": "bn128",
    })
    .to_string()
}

pub fn public_json(values: &[Fr]) -> String {
    Value::from(values.iter().map(to_decimal).collect::<Vec<_>>()).to_string()
}
