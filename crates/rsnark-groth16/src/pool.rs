// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Fixed-size prover pool.
//!
//! One dedicated rayon pool and one shared key. Each task is a pure
//! function of `(key, witness)` with its own blinding, so tasks can run in
//! any order; results come back in submission order.

use std::sync::Arc;

use rand::rngs::OsRng;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use rsnark_curve::Fr;
use rsnark_zkey::ProvingKey;

use crate::{prover::prove_with, ProveOptions, ProveOutput, ProverError};

pub struct ProverPool {
    pool: ThreadPool,
    key: Arc<ProvingKey>,
    options: ProveOptions,
}

impl ProverPool {
    pub fn new(key: Arc<ProvingKey>, threads: usize) -> Result<Self, ProverError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("rsnark-prover-{i}"))
            .build()?;
        Ok(Self {
            pool,
            key,
            options: ProveOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ProveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn key(&self) -> &Arc<ProvingKey> {
        &self.key
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn prove_all(&self, witnesses: &[Vec<Fr>]) -> Vec<Result<ProveOutput, ProverError>> {
        tracing::debug!(tasks = witnesses.len(), threads = self.threads(), "prover pool batch");
        self.pool.install(|| {
            witnesses
                .par_iter()
                .map(|w| prove_with(&self.key, w, &self.options, &mut OsRng))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify;
    use rsnark_fixtures::circuit::power_chain;

    #[test]
    fn concurrent_proofs_bind_their_own_public_signals() {
        let f = rsnark_fixtures::power_chain().unwrap();
        let key = Arc::new(ProvingKey::from_bytes(&f.zkey).unwrap());
        let vk = key.verification_key();
        let pool = ProverPool::new(Arc::clone(&key), 3).unwrap();
        assert_eq!(pool.threads(), 3);

        let circuits: Vec<_> = (2..8u64).map(power_chain).collect();
        let witnesses: Vec<Vec<Fr>> = circuits.iter().filter_map(|c| c.witness.clone()).collect();
        let results = pool.prove_all(&witnesses);
        assert_eq!(results.len(), circuits.len());

        let outs: Vec<ProveOutput> = results.into_iter().map(Result::unwrap).collect();
        for (i, (out, circuit)) in outs.iter().zip(&circuits).enumerate() {
            assert_eq!(out.public_signals, circuit.public_values());
            assert!(verify(&vk, &out.proof, &out.public_signals).unwrap());

            let other = &outs[(i + 1) % outs.len()].public_signals;
            assert_ne!(&out.public_signals, other);
            assert!(!verify(&vk, &out.proof, other).unwrap());
        }
    }

    #[test]
    fn results_keep_submission_order() {
        let f = rsnark_fixtures::multiplier().unwrap();
        let key = Arc::new(ProvingKey::from_bytes(&f.zkey).unwrap());
        let pool = ProverPool::new(key, 2).unwrap();

        let good = f.witness.clone();
        let short = f.witness[..2].to_vec();
        let results = pool.prove_all(&[good.clone(), short, good]);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ProverError::InvalidWitnessLength { actual: 2, .. })
        ));
        assert!(results[2].is_ok());
    }
}
