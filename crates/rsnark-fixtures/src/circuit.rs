// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Toy R1CS circuits addressed by wire index.
//!
//! Wire 0 is the constant one, wires `1..=n_public` are public signals and
//! the rest are private, the same order a circom witness uses.

use ark_bn254::Fr;
use ark_ff::Field;
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystemRef, LinearCombination, SynthesisError, Variable,
};

/// `(wire, coefficient)`.
pub type Term = (usize, Fr);

/// One constraint `<a, w> · <b, w> = <c, w>`.
#[derive(Debug, Clone)]
pub struct Row {
    pub a: Vec<Term>,
    pub b: Vec<Term>,
    pub c: Vec<Term>,
}

impl Row {
    fn holds(&self, w: &[Fr]) -> bool {
        let eval = |terms: &[Term]| terms.iter().map(|(i, k)| w[*i] * k).sum::<Fr>();
        eval(&self.a) * eval(&self.b) == eval(&self.c)
    }
}

#[derive(Debug, Clone)]
pub struct ToyCircuit {
    pub name: &'static str,
    pub n_vars: usize,
    pub n_public: usize,
    pub rows: Vec<Row>,
    /// Full wire assignment; `None` during setup.
    pub witness: Option<Vec<Fr>>,
}

impl ToyCircuit {
    pub fn without_witness(&self) -> Self {
        Self {
            witness: None,
            ..self.clone()
        }
    }

    /// True when `w` has the right length, starts with one and satisfies every row.
    pub fn is_satisfied_by(&self, w: &[Fr]) -> bool {
        w.len() == self.n_vars && w[0] == Fr::ONE && self.rows.iter().all(|row| row.holds(w))
    }

    pub fn public_values(&self) -> Vec<Fr> {
        self.witness
            .as_ref()
            .map(|w| w[1..=self.n_public].to_vec())
            .unwrap_or_default()
    }
}

impl ConstraintSynthesizer<Fr> for ToyCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let mut vars = Vec::with_capacity(self.n_vars);
        vars.push(Variable::One);
        for wire in 1..self.n_vars {
            let value = || {
                self.witness
                    .as_ref()
                    .map(|w| w[wire])
                    .ok_or(SynthesisError::AssignmentMissing)
            };
            let var = if wire <= self.n_public {
                cs.new_input_variable(value)?
            } else {
                cs.new_witness_variable(value)?
            };
            vars.push(var);
        }

        let lc = |terms: &[Term]| {
            LinearCombination(terms.iter().map(|(wire, k)| (*k, vars[*wire])).collect())
        };
        for row in &self.rows {
            cs.enforce_constraint(lc(&row.a), lc(&row.b), lc(&row.c))?;
        }
        Ok(())
    }
}

fn one(wire: usize) -> Vec<Term> {
    vec![(wire, Fr::ONE)]
}

/// `c = a · b` with public `c`. Wires `[1, c, a, b]`.
pub fn multiplier(a: u64, b: u64) -> ToyCircuit {
    let (a, b) = (Fr::from(a), Fr::from(b));
    ToyCircuit {
        name: "multiplier",
        n_vars: 4,
        n_public: 1,
        rows: vec![Row {
            a: one(2),
            b: one(3),
            c: one(1),
        }],
        witness: Some(vec![Fr::ONE, a * b, a, b]),
    }
}

/// `y = x² + 5` with public `y`. Wires `[1, y, x, x²]`.
pub fn square_plus_five(x: u64) -> ToyCircuit {
    let x = Fr::from(x);
    let x2 = x * x;
    let five = Fr::from(5u64);
    ToyCircuit {
        name: "square_plus_five",
        n_vars: 4,
        n_public: 1,
        rows: vec![
            Row {
                a: one(2),
                b: one(2),
                c: one(3),
            },
            Row {
                a: vec![(3, Fr::ONE), (0, five)],
                b: one(0),
                c: one(1),
            },
        ],
        witness: Some(vec![Fr::ONE, x2 + five, x, x2]),
    }
}

/// Forty repeated squarings of a private `x` with three public taps
/// (after 10, 20 and 40 squarings). 43 constraints plus 4 inputs need a
/// domain of 64.
pub fn power_chain(x: u64) -> ToyCircuit {
    const SQUARINGS: usize = 40;
    const TAPS: [usize; 3] = [10, 20, 40];
    let n_public = TAPS.len();
    let x_wire = n_public + 1;
    // Wire of the value after `k` squarings.
    let sq = |k: usize| x_wire + k;

    let mut rows = Vec::with_capacity(SQUARINGS + TAPS.len());
    for k in 0..SQUARINGS {
        rows.push(Row {
            a: one(sq(k)),
            b: one(sq(k)),
            c: one(sq(k + 1)),
        });
    }
    for (i, tap) in TAPS.iter().enumerate() {
        rows.push(Row {
            a: one(sq(*tap)),
            b: one(0),
            c: one(1 + i),
        });
    }

    let mut chain = vec![Fr::from(x)];
    for k in 0..SQUARINGS {
        chain.push(chain[k].square());
    }
    let mut witness = vec![Fr::ONE];
    witness.extend(TAPS.iter().map(|tap| chain[*tap]));
    witness.extend(chain);

    ToyCircuit {
        name: "power_chain",
        n_vars: witness.len(),
        n_public,
        rows,
        witness: Some(witness),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toy_witnesses_satisfy_their_circuits() {
        for circuit in [multiplier(3, 11), square_plus_five(3), power_chain(2)] {
            let w = circuit.witness.clone().unwrap();
            assert!(circuit.is_satisfied_by(&w), "{}", circuit.name);
        }
    }

    #[test]
    fn multiplier_wires() {
        let circuit = multiplier(3, 11);
        let expected: Vec<Fr> = [1u64, 33, 3, 11].into_iter().map(Fr::from).collect();
        assert_eq!(circuit.witness.unwrap(), expected);
    }

    #[test]
    fn square_plus_five_wires() {
        let circuit = square_plus_five(3);
        assert_eq!(circuit.public_values(), vec![Fr::from(14u64)]);
        let mut w = circuit.witness.clone().unwrap();
        w[1] += Fr::ONE;
        assert!(!circuit.is_satisfied_by(&w));
    }

    #[test]
    fn power_chain_shape() {
        let circuit = power_chain(2);
        assert_eq!(circuit.n_public, 3);
        assert_eq!(circuit.n_vars, 45);
        assert_eq!(circuit.rows.len(), 43);
    }
}
