// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use rsnark_groth16::{verify, ProveOptions, ProverPool};
use rsnark_zkey::{parse_wtns, ZkeyCache};

use crate::{commands::resolve_zkey, config::load_config, output};

pub fn run(zkey: Option<PathBuf>, witness: &Path, count: usize, threads: Option<usize>) -> Result<()> {
    anyhow::ensure!(count > 0, "--count must be at least 1");
    let config = load_config()?;
    let zkey = resolve_zkey(zkey, &config)?;
    let wtns = fs::read(witness).with_context(|| format!("cannot read witness at {}", witness.display()))?;
    let witness = parse_wtns(&wtns).context("invalid witness file")?;

    let cache = ZkeyCache::new();
    let load_start = Instant::now();
    let key = cache
        .get_or_load(&zkey)
        .with_context(|| format!("cannot load {}", zkey.display()))?;
    let load = load_start.elapsed();

    let threads = threads
        .or(config.threads)
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()));
    let pool = ProverPool::new(key.clone(), threads)?.with_options(ProveOptions {
        msm: config.msm(),
        abort: None,
    });
    let vk = key.verification_key();

    let pb = output::spinner(&format!("proving {count} witnesses on {threads} threads..."));
    let start = Instant::now();
    let witnesses = vec![witness; count];
    let results = pool.prove_all(&witnesses);
    let wall = start.elapsed();
    pb.finish_and_clear();

    let pb = output::progress(count as u64, "verifying");

    let mut prove_total = std::time::Duration::ZERO;
    let mut invalid = 0usize;
    for result in &results {
        let out = result.as_ref().map_err(|e| anyhow::anyhow!("proof failed: {e}"))?;
        prove_total += out.timing.prove;
        if !verify(&vk, &out.proof, &out.public_signals)? {
            invalid += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    let mean = prove_total / count as u32;
    tracing::info!(count, threads, wall_ms = wall.as_millis() as u64, "bench finished");

    if output::is_json() {
        output::json_output(serde_json::json!({
            "count": count,
            "threads": threads,
            "load_ms": load.as_millis() as u64,
            "wall_ms": wall.as_millis() as u64,
            "mean_prove_ms": mean.as_millis() as u64,
            "invalid": invalid,
        }));
    } else {
        output::label("proofs", &count.to_string());
        output::label("threads", &threads.to_string());
        output::label("load", &output::millis(load));
        output::label("wall", &output::millis(wall));
        output::label("mean prove", &output::millis(mean));
        if invalid == 0 {
            output::success("all proofs verified");
        } else {
            output::warn(&format!("{invalid} proofs failed verification"));
        }
    }
    anyhow::ensure!(invalid == 0, "{invalid} of {count} proofs did not verify");
    Ok(())
}
