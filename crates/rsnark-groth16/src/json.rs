// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! snarkjs text formats.
//!
//! Numbers are canonical unsigned decimal strings. Points are Jacobian
//! triples: G1 `[x, y, z]`, G2 `[[x0, x1], [y0, y1], [z0, z1]]`. Output
//! always uses `z = 1`, or the snarkjs identity encoding for the point at
//! infinity; input accepts any `z`, with `z = 0` meaning infinity.

use rsnark_curve::{
    curve::{g1_from_jacobian, g2_from_jacobian},
    field::{fq_from_decimal, fr_from_decimal, max_decimal_digits, to_decimal},
    Fq, Fq2, Fr, G1Affine, G2Affine,
};
use rsnark_zkey::VerificationKey;
use serde::{Deserialize, Serialize};

use crate::{prover::Proof, VerifierError};

pub const PROTOCOL: &str = "groth16";
pub const CURVE: &str = "bn128";

#[derive(Debug, Serialize, Deserialize)]
struct ProofJson {
    pi_a: Vec<String>,
    pi_b: Vec<Vec<String>>,
    pi_c: Vec<String>,
    protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    curve: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VkJson {
    protocol: String,
    curve: String,
    #[serde(rename = "nPublic")]
    n_public: usize,
    vk_alpha_1: Vec<String>,
    vk_beta_2: Vec<Vec<String>>,
    vk_gamma_2: Vec<Vec<String>>,
    vk_delta_2: Vec<Vec<String>>,
    #[serde(rename = "IC")]
    ic: Vec<Vec<String>>,
}

/// Strip whitespace, control characters and NUL padding from caller text.
pub fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

fn g1_strings(p: &G1Affine) -> Vec<String> {
    if p.infinity {
        return vec!["0".into(), "1".into(), "0".into()];
    }
    vec![to_decimal(&p.x), to_decimal(&p.y), "1".into()]
}

fn g2_strings(p: &G2Affine) -> Vec<Vec<String>> {
    if p.infinity {
        return vec![
            vec!["0".into(), "0".into()],
            vec!["1".into(), "0".into()],
            vec!["0".into(), "0".into()],
        ];
    }
    vec![
        vec![to_decimal(&p.x.c0), to_decimal(&p.x.c1)],
        vec![to_decimal(&p.y.c0), to_decimal(&p.y.c1)],
        vec!["1".into(), "0".into()],
    ]
}

fn format_err(what: &'static str, reason: impl Into<String>) -> VerifierError {
    VerifierError::Format {
        what,
        reason: reason.into(),
    }
}

fn parse_g1(what: &'static str, coords: &[String]) -> Result<G1Affine, VerifierError> {
    let [x, y, z] = coords else {
        return Err(format_err(what, format!("expected 3 coordinates, got {}", coords.len())));
    };
    Ok(g1_from_jacobian(
        fq_from_decimal(x)?,
        fq_from_decimal(y)?,
        fq_from_decimal(z)?,
    )?)
}

fn parse_fq2(what: &'static str, pair: &[String]) -> Result<Fq2, VerifierError> {
    let [c0, c1] = pair else {
        return Err(format_err(what, format!("expected 2 components, got {}", pair.len())));
    };
    Ok(Fq2::new(fq_from_decimal(c0)?, fq_from_decimal(c1)?))
}

fn parse_g2(what: &'static str, coords: &[Vec<String>]) -> Result<G2Affine, VerifierError> {
    let [x, y, z] = coords else {
        return Err(format_err(what, format!("expected 3 coordinates, got {}", coords.len())));
    };
    Ok(g2_from_jacobian(
        parse_fq2(what, x)?,
        parse_fq2(what, y)?,
        parse_fq2(what, z)?,
    )?)
}

fn check_protocol(what: &'static str, protocol: &str, curve: Option<&str>) -> Result<(), VerifierError> {
    if protocol != PROTOCOL {
        return Err(format_err(what, format!("unsupported protocol {protocol:?}")));
    }
    match curve {
        Some(c) if c != CURVE => Err(format_err(what, format!("unsupported curve {c:?}"))),
        _ => Ok(()),
    }
}

pub fn proof_to_json(proof: &Proof) -> String {
    let out = ProofJson {
        pi_a: g1_strings(&proof.a),
        pi_b: g2_strings(&proof.b),
        pi_c: g1_strings(&proof.c),
        protocol: PROTOCOL.into(),
        curve: Some(CURVE.into()),
    };
    // Vec<String> fields cannot fail to serialize.
    serde_json::to_string(&out).unwrap_or_default()
}

pub fn proof_from_json(text: &str) -> Result<Proof, VerifierError> {
    let parsed: ProofJson = serde_json::from_str(trim_input(text))?;
    check_protocol("proof", &parsed.protocol, parsed.curve.as_deref())?;
    Ok(Proof {
        a: parse_g1("proof pi_a", &parsed.pi_a)?,
        b: parse_g2("proof pi_b", &parsed.pi_b)?,
        c: parse_g1("proof pi_c", &parsed.pi_c)?,
    })
}

pub fn public_to_json(values: &[Fr]) -> String {
    let strings: Vec<String> = values.iter().map(to_decimal).collect();
    serde_json::to_string(&strings).unwrap_or_default()
}

pub fn public_from_json(text: &str) -> Result<Vec<Fr>, VerifierError> {
    let strings: Vec<String> = serde_json::from_str(trim_input(text))?;
    Ok(strings
        .iter()
        .map(|s| fr_from_decimal(s))
        .collect::<Result<Vec<_>, _>>()?)
}

pub fn vk_to_json(vk: &VerificationKey) -> String {
    let out = VkJson {
        protocol: PROTOCOL.into(),
        curve: CURVE.into(),
        n_public: vk.n_public(),
        vk_alpha_1: g1_strings(&vk.alpha1),
        vk_beta_2: g2_strings(&vk.beta2),
        vk_gamma_2: g2_strings(&vk.gamma2),
        vk_delta_2: g2_strings(&vk.delta2),
        ic: vk.ic.iter().map(g1_strings).collect(),
    };
    serde_json::to_string_pretty(&out).unwrap_or_default()
}

/// Parse `verification_key.json`. Fields other than the ones a verifier
/// needs (`vk_alphabeta_12` and the like) are ignored.
pub fn vk_from_json(text: &str) -> Result<VerificationKey, VerifierError> {
    let parsed: VkJson = serde_json::from_str(trim_input(text))?;
    check_protocol("verification key", &parsed.protocol, Some(&parsed.curve))?;
    if parsed.ic.len() != parsed.n_public + 1 {
        return Err(format_err(
            "verification key",
            format!("nPublic is {} but IC has {} points", parsed.n_public, parsed.ic.len()),
        ));
    }
    Ok(VerificationKey {
        alpha1: parse_g1("vk_alpha_1", &parsed.vk_alpha_1)?,
        beta2: parse_g2("vk_beta_2", &parsed.vk_beta_2)?,
        gamma2: parse_g2("vk_gamma_2", &parsed.vk_gamma_2)?,
        delta2: parse_g2("vk_delta_2", &parsed.vk_delta_2)?,
        ic: parsed
            .ic
            .iter()
            .map(|p| parse_g1("IC", p))
            .collect::<Result<Vec<_>, _>>()?,
    })
}

/// Upper bound on the byte length of [`proof_to_json`] output, NUL included.
pub fn proof_buffer_size() -> usize {
    let widest = "9".repeat(max_decimal_digits::<Fq>());
    let g1 = || vec![widest.clone(), widest.clone(), "1".to_string()];
    let pair = || vec![widest.clone(), widest.clone()];
    let template = ProofJson {
        pi_a: g1(),
        pi_b: vec![pair(), pair(), vec!["1".into(), "0".into()]],
        pi_c: g1(),
        protocol: PROTOCOL.into(),
        curve: Some(CURVE.into()),
    };
    serde_json::to_string(&template).map_or(0, |s| s.len()) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::UniformRand;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use rsnark_curve::{G1Projective, G2Projective};

    fn random_proof(seed: u64) -> Proof {
        let mut rng = StdRng::seed_from_u64(seed);
        Proof {
            a: G1Projective::rand(&mut rng).into_affine(),
            b: G2Projective::rand(&mut rng).into_affine(),
            c: G1Projective::rand(&mut rng).into_affine(),
        }
    }

    #[test]
    fn proof_text_field_order() {
        let text = proof_to_json(&random_proof(42));
        let a = text.find("\"pi_a\"").unwrap();
        let b = text.find("\"pi_b\"").unwrap();
        let c = text.find("\"pi_c\"").unwrap();
        let p = text.find("\"protocol\":\"groth16\"").unwrap();
        let curve = text.find("\"curve\":\"bn128\"").unwrap();
        assert!(a < b && b < c && c < p && p < curve);
        assert_eq!(proof_from_json(&text).unwrap(), random_proof(42));
    }

    #[test]
    fn proof_text_fits_buffer_bound() {
        for seed in 0..8 {
            let text = proof_to_json(&random_proof(seed));
            assert!(text.len() + 1 <= proof_buffer_size());
        }
    }

    #[test]
    fn identity_points_use_snarkjs_encoding() {
        let proof = Proof {
            a: G1Affine::identity(),
            b: G2Affine::identity(),
            c: G1Affine::generator(),
        };
        let text = proof_to_json(&proof);
        assert!(text.contains(r#""pi_a":["0","1","0"]"#));
        assert!(text.contains(r#""pi_b":[["0","0"],["1","0"],["0","0"]]"#));
        assert_eq!(proof_from_json(&text).unwrap(), proof);
    }

    #[test]
    fn public_text() {
        let values = vec![Fr::from(33u64), Fr::from(0u64)];
        let text = public_to_json(&values);
        assert_eq!(text, r#"["33","0"]"#);
        assert_eq!(public_from_json(&text).unwrap(), values);
        assert_eq!(public_to_json(&[]), "[]");
    }

    #[test]
    fn input_padding_is_trimmed() {
        let padded = " [\"33\"]\n\0\0\0";
        assert_eq!(public_from_json(padded).unwrap(), vec![Fr::from(33u64)]);
    }

    #[test]
    fn non_canonical_public_rejected() {
        let modulus =
            r#"["21888242871839275222246405745257275088548364400416034343698204186575808495617"]"#;
        assert!(matches!(public_from_json(modulus), Err(VerifierError::Field(_))));
        assert!(matches!(public_from_json(r#"["-1"]"#), Err(VerifierError::Field(_))));
        assert!(matches!(public_from_json(r#"[33]"#), Err(VerifierError::Json(_))));
    }

    #[test]
    fn wrong_protocol_rejected() {
        let text = proof_to_json(&random_proof(1)).replace("groth16", "plonk");
        assert!(matches!(
            proof_from_json(&text),
            Err(VerifierError::Format { what: "proof", .. })
        ));
    }

    #[test]
    fn off_curve_point_rejected() {
        let text = r#"{"pi_a":["1","1","1"],"pi_b":[["0","0"],["1","0"],["0","0"]],"pi_c":["0","1","0"],"protocol":"groth16"}"#;
        assert!(matches!(proof_from_json(text), Err(VerifierError::Curve(_))));
    }
}
