// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_ec::{AffineRepr, CurveGroup};
use rsnark_curve::{curve::pairing_check, Fr, G1Projective};
use rsnark_zkey::VerificationKey;

use crate::{json, prover::Proof, VerifierError};

/// Check `e(A,B) = e(α,β)·e(vk_x,γ)·e(C,δ)` as one multi-pairing
/// `e(A,B)·e(-vk_x,γ)·e(-C,δ)·e(-α,β) = 1`.
///
/// Structural problems are errors; a well-formed proof that does not
/// satisfy the equation is `Ok(false)`.
pub fn verify(vk: &VerificationKey, proof: &Proof, public: &[Fr]) -> Result<bool, VerifierError> {
    if public.len() != vk.n_public() || vk.ic.is_empty() {
        return Err(VerifierError::PublicCount {
            expected: vk.n_public(),
            actual: public.len(),
        });
    }

    let vk_x: G1Projective = vk.ic[1..]
        .iter()
        .zip(public)
        .fold(vk.ic[0].into_group(), |acc, (point, value)| acc + *point * value);

    let valid = pairing_check(&[
        (proof.a, proof.b),
        ((-vk_x).into_affine(), vk.gamma2),
        (-proof.c, vk.delta2),
        (-vk.alpha1, vk.beta2),
    ]);
    if !valid {
        tracing::debug!(n_public = public.len(), "proof rejected by pairing check");
    }
    Ok(valid)
}

/// [`verify`] over snarkjs `proof.json`, `public.json` and
/// `verification_key.json` text.
pub fn verify_json(proof: &str, public: &str, vk: &str) -> Result<bool, VerifierError> {
    let vk = json::vk_from_json(vk)?;
    let proof = json::proof_from_json(proof)?;
    let public = json::public_from_json(public)?;
    verify(&vk, &proof, &public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::One;

    fn fixture_proof() -> (VerificationKey, Proof, Vec<Fr>) {
        let f = rsnark_fixtures::square_plus_five().unwrap();
        let key = rsnark_zkey::ProvingKey::from_bytes(&f.zkey).unwrap();
        let out = crate::prove(&key, &f.witness).unwrap();
        (key.verification_key(), out.proof, out.public_signals)
    }

    #[test]
    fn accepts_valid_proof() {
        let (vk, proof, public) = fixture_proof();
        assert!(verify(&vk, &proof, &public).unwrap());
    }

    #[test]
    fn tampered_public_signal_is_invalid() {
        let (vk, proof, mut public) = fixture_proof();
        public[0] += Fr::one();
        assert!(!verify(&vk, &proof, &public).unwrap());
    }

    #[test]
    fn swapped_proof_points_are_invalid() {
        let (vk, mut proof, public) = fixture_proof();
        std::mem::swap(&mut proof.a, &mut proof.c);
        assert!(!verify(&vk, &proof, &public).unwrap());
    }

    #[test]
    fn public_count_mismatch_is_error() {
        let (vk, proof, mut public) = fixture_proof();
        public.push(Fr::one());
        assert!(matches!(
            verify(&vk, &proof, &public),
            Err(VerifierError::PublicCount { expected: 1, actual: 2 })
        ));
    }
}
