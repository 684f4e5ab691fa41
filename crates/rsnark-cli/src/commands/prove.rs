// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use rsnark_ffi::{prove_auto, ProverStatus};
use rsnark_zkey::ZkeySource;

use crate::{commands::resolve_zkey, config::load_config, output};

pub fn run(
    zkey: Option<PathBuf>,
    witness: &Path,
    proof_out: Option<PathBuf>,
    public_out: Option<PathBuf>,
    public_buffer_size: Option<usize>,
) -> Result<()> {
    let config = load_config()?;
    let zkey = resolve_zkey(zkey, &config)?;
    let wtns = fs::read(witness).with_context(|| format!("cannot read witness at {}", witness.display()))?;

    let pb = output::spinner("generating proof...");
    let result = prove_auto(
        ZkeySource::File(&zkey),
        &wtns,
        config.proof_buffer_size,
        public_buffer_size,
        config.error_buffer_size,
    );
    pb.finish_and_clear();

    let response = result.map_err(|failure| match failure.status {
        ProverStatus::ShortBuffer => output::fail_with_hint(
            &failure.message,
            "raise proof_buffer_size with `rsnark config set` or drop --public-buffer-size",
        ),
        ProverStatus::InvalidWitnessLength => output::fail_with_hint(
            &failure.message,
            "the witness was generated for a different circuit",
        ),
        _ => anyhow::anyhow!(failure.message),
    })?;

    if let Some(path) = &proof_out {
        fs::write(path, &response.proof).with_context(|| format!("cannot write {}", path.display()))?;
    }
    if let Some(path) = &public_out {
        fs::write(path, &response.public_signals).with_context(|| format!("cannot write {}", path.display()))?;
    }

    if output::is_json() {
        output::json_output(serde_json::json!({
            "proof": serde_json::from_str::<serde_json::Value>(&response.proof)?,
            "public_signals": serde_json::from_str::<serde_json::Value>(&response.public_signals)?,
            "load_ms": response.timing.load.as_millis() as u64,
            "prove_ms": response.timing.prove.as_millis() as u64,
        }));
        return Ok(());
    }

    if proof_out.is_none() {
        println!("{}", response.proof);
    }
    if public_out.is_none() {
        println!("{}", response.public_signals);
    }
    output::success("proof generated");
    output::label("load", &output::millis(response.timing.load));
    output::label("prove", &output::millis(response.timing.prove));
    if let Some(path) = proof_out {
        output::label("proof", &path.display().to_string());
    }
    if let Some(path) = public_out {
        output::label("public", &path.display().to_string());
    }
    Ok(())
}
