// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # rsnark-fixtures
//!
//! Test support: toy circuits, a toy trusted setup through ark-groth16,
//! and the `.zkey` / `.wtns` / JSON artifacts a snarkjs toolchain would
//! have produced for them. Each fixture is built once per test binary.
//!
//! | Fixture | Statement | Witness |
//! |---|---|---|
//! | [`multiplier`] | `c = a · b`, public `c` | `[1, 33, 3, 11]` |
//! | [`square_plus_five`] | `y = x² + 5`, public `y` | `[1, 14, 3, 9]` |
//! | [`power_chain`] | 40 squarings of `x`, three public taps | domain 64 |

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_poly::{EvaluationDomain, GeneralEvaluationDomain};
use ark_relations::r1cs::SynthesisError;
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use once_cell::sync::OnceCell;

pub mod circuit;
pub mod qap;
pub mod writer;

pub use circuit::{Row, ToyCircuit};
pub use qap::CircomQap;
pub use writer::Section;

pub type CircomGroth16 = Groth16<Bn254, CircomQap>;

/// Setup seed shared by every fixture so artifacts are reproducible.
pub const SETUP_SEED: u64 = 42;

/// A circuit with its key material and serialized artifacts.
pub struct Fixture {
    pub circuit: ToyCircuit,
    pub domain_size: usize,
    pub pk: ProvingKey<Bn254>,
    pub vk: VerifyingKey<Bn254>,
    /// Sections of `zkey`, for tests that rebuild a damaged container.
    pub sections: Vec<Section>,
    pub zkey: Vec<u8>,
    pub wtns: Vec<u8>,
    pub witness: Vec<Fr>,
    pub public: Vec<Fr>,
    pub vk_json: String,
}

impl Fixture {
    pub fn build(circuit: ToyCircuit, seed: u64) -> Result<Self, SynthesisError> {
        let witness = circuit
            .witness
            .clone()
            .ok_or(SynthesisError::AssignmentMissing)?;
        let public = circuit.public_values();

        let domain_size = GeneralEvaluationDomain::<Fr>::new(circuit.rows.len() + circuit.n_public + 1)
            .ok_or(SynthesisError::PolynomialDegreeTooLarge)?
            .size();

        let mut rng = StdRng::seed_from_u64(seed);
        let (pk, vk) = CircomGroth16::circuit_specific_setup(circuit.without_witness(), &mut rng)?;

        let sections = writer::zkey_sections(&circuit, &pk, domain_size);
        let zkey = writer::assemble(b"zkey", 1, &sections);
        let wtns = writer::wtns_bytes(&witness);
        let vk_json = writer::vk_json(&vk);

        Ok(Self {
            circuit,
            domain_size,
            pk,
            vk,
            sections,
            zkey,
            wtns,
            witness,
            public,
            vk_json,
        })
    }

    pub fn name(&self) -> &'static str {
        self.circuit.name
    }

    pub fn n_vars(&self) -> usize {
        self.circuit.n_vars
    }

    pub fn n_public(&self) -> usize {
        self.circuit.n_public
    }

    /// `["33"]`-style text of the expected public signals.
    pub fn public_json(&self) -> String {
        writer::public_json(&self.public)
    }

    /// Proof of the fixture witness produced by arkworks itself.
    pub fn ark_prove(&self, seed: u64) -> Result<Proof<Bn254>, SynthesisError> {
        let mut rng = StdRng::seed_from_u64(seed);
        CircomGroth16::prove(&self.pk, self.circuit.clone(), &mut rng)
    }

    pub fn ark_proof_json(&self, seed: u64) -> Result<String, SynthesisError> {
        Ok(writer::proof_json(&self.ark_prove(seed)?))
    }

    /// Serialized witness with a different assignment, for negative tests.
    pub fn wtns_for(&self, witness: &[Fr]) -> Vec<u8> {
        writer::wtns_bytes(witness)
    }
}

static MULTIPLIER: OnceCell<Fixture> = OnceCell::new();
static SQUARE_PLUS_FIVE: OnceCell<Fixture> = OnceCell::new();
static POWER_CHAIN: OnceCell<Fixture> = OnceCell::new();

pub fn multiplier() -> Result<&'static Fixture, SynthesisError> {
    MULTIPLIER.get_or_try_init(|| Fixture::build(circuit::multiplier(3, 11), SETUP_SEED))
}

pub fn square_plus_five() -> Result<&'static Fixture, SynthesisError> {
    SQUARE_PLUS_FIVE.get_or_try_init(|| Fixture::build(circuit::square_plus_five(3), SETUP_SEED))
}

pub fn power_chain() -> Result<&'static Fixture, SynthesisError> {
    POWER_CHAIN.get_or_try_init(|| Fixture::build(circuit::power_chain(2), SETUP_SEED))
}

pub fn all() -> Result<Vec<&'static Fixture>, SynthesisError> {
    Ok(vec![multiplier()?, square_plus_five()?, power_chain()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_sizes() {
        assert_eq!(multiplier().unwrap().domain_size, 4);
        assert_eq!(square_plus_five().unwrap().domain_size, 4);
        assert_eq!(power_chain().unwrap().domain_size, 64);
    }

    #[test]
    fn key_shapes_match_zkey_layout() {
        for f in all().unwrap() {
            assert_eq!(f.pk.a_query.len(), f.n_vars(), "{}", f.name());
            assert_eq!(f.pk.b_g2_query.len(), f.n_vars(), "{}", f.name());
            assert_eq!(f.pk.l_query.len(), f.n_vars() - f.n_public() - 1, "{}", f.name());
            assert_eq!(f.pk.h_query.len(), f.domain_size, "{}", f.name());
            assert_eq!(f.vk.gamma_abc_g1.len(), f.n_public() + 1, "{}", f.name());
        }
    }

    #[test]
    fn arkworks_proofs_verify() {
        for f in all().unwrap() {
            let proof = f.ark_prove(7).unwrap();
            assert!(CircomGroth16::verify(&f.vk, &f.public, &proof).unwrap(), "{}", f.name());
        }
    }

    #[test]
    fn multiplier_public_text() {
        assert_eq!(multiplier().unwrap().public_json(), r#"["33"]"#);
    }
}
