// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Cross-check against arkworks' own variable-base MSM on inputs large
//! enough to spread over several chunks and windows.

use ark_bn254::{Fr, G1Projective, G2Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::UniformRand;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use rsnark_msm::{msm, msm_with, MsmConfig};

#[test]
fn g1_agrees_with_arkworks() {
    let mut rng = StdRng::seed_from_u64(42);
    let n = 3000;
    let points: Vec<_> = (0..n).map(|_| G1Projective::rand(&mut rng)).collect();
    let points = G1Projective::normalize_batch(&points);
    let scalars: Vec<Fr> = (0..n).map(|_| Fr::rand(&mut rng)).collect();

    let expected = G1Projective::msm(&points, &scalars).unwrap();
    let config = MsmConfig {
        chunk_size: 512,
        window_bits: None,
    };
    assert_eq!(msm_with::<G1Projective>(&points, &scalars, &config, None).unwrap(), expected);
    assert_eq!(msm::<G1Projective>(&points, &scalars).unwrap(), expected);
}

#[test]
fn g2_agrees_with_arkworks() {
    let mut rng = StdRng::seed_from_u64(42);
    let n = 300;
    let points: Vec<_> = (0..n).map(|_| G2Projective::rand(&mut rng)).collect();
    let points = G2Projective::normalize_batch(&points);
    let scalars: Vec<Fr> = (0..n).map(|_| Fr::rand(&mut rng)).collect();

    let expected = G2Projective::msm(&points, &scalars).unwrap();
    let config = MsmConfig {
        chunk_size: 64,
        window_bits: Some(4),
    };
    assert_eq!(msm_with::<G2Projective>(&points, &scalars, &config, None).unwrap(), expected);
}
