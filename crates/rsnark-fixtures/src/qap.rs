// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! circom/snarkjs flavour of the R1CS-to-QAP reduction for ark-groth16.
//!
//! The quotient is evaluated on the odd coset of the domain instead of
//! being divided by the vanishing polynomial, and the H query holds the
//! matching Lagrange basis. Keys produced with it have the point layout a
//! `.zkey` expects.

use ark_ff::PrimeField;
use ark_groth16::r1cs_to_qap::{LibsnarkReduction, R1CSToQAP};
use ark_poly::EvaluationDomain;
use ark_relations::r1cs::{ConstraintMatrices, ConstraintSystemRef, SynthesisError};

pub struct CircomQap;

fn dot<F: PrimeField>(terms: &[(F, usize)], assignment: &[F]) -> F {
    terms.iter().map(|(k, i)| *k * assignment[*i]).sum()
}

fn coset_evals<F: PrimeField, D: EvaluationDomain<F>>(domain: &D, values: &mut Vec<F>, g: F) {
    domain.ifft_in_place(values);
    D::distribute_powers_and_mul_by_const(values, g, F::one());
    domain.fft_in_place(values);
}

impl R1CSToQAP for CircomQap {
    fn instance_map_with_evaluation<F: PrimeField, D: EvaluationDomain<F>>(
        cs: ConstraintSystemRef<F>,
        t: &F,
    ) -> Result<(Vec<F>, Vec<F>, Vec<F>, F, usize, usize), SynthesisError> {
        LibsnarkReduction::instance_map_with_evaluation::<F, D>(cs, t)
    }

    fn witness_map_from_matrices<F: PrimeField, D: EvaluationDomain<F>>(
        matrices: &ConstraintMatrices<F>,
        num_inputs: usize,
        num_constraints: usize,
        full_assignment: &[F],
    ) -> Result<Vec<F>, SynthesisError> {
        let domain =
            D::new(num_constraints + num_inputs).ok_or(SynthesisError::PolynomialDegreeTooLarge)?;
        let size = domain.size();
        let double = D::new(2 * size).ok_or(SynthesisError::PolynomialDegreeTooLarge)?;
        let g = double.element(1);

        let mut a = vec![F::zero(); size];
        let mut b = vec![F::zero(); size];
        for (i, (at, bt)) in matrices.a.iter().zip(&matrices.b).enumerate() {
            a[i] = dot(at, full_assignment);
            b[i] = dot(bt, full_assignment);
        }
        a[num_constraints..num_constraints + num_inputs]
            .copy_from_slice(&full_assignment[..num_inputs]);
        let mut c: Vec<F> = a.iter().zip(&b).map(|(x, y)| *x * y).collect();

        coset_evals(&domain, &mut a, g);
        coset_evals(&domain, &mut b, g);
        coset_evals(&domain, &mut c, g);

        Ok(a.iter().zip(&b).zip(&c).map(|((x, y), z)| *x * y - z).collect())
    }

    fn h_query_scalars<F: PrimeField, D: EvaluationDomain<F>>(
        max_power: usize,
        t: F,
        _zt: F,
        delta_inverse: F,
    ) -> Result<Vec<F>, SynthesisError> {
        let mut scalars: Vec<F> = (0..2 * max_power + 1)
            .map(|i| delta_inverse * t.pow([i as u64]))
            .collect();
        let domain = D::new(scalars.len()).ok_or(SynthesisError::PolynomialDegreeTooLarge)?;
        domain.ifft_in_place(&mut scalars);
        Ok(scalars.into_iter().skip(1).step_by(2).collect())
    }
}
