// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::{fs, path::Path};

use anyhow::{Context, Result};
use rsnark_ffi::{buffer::read_text, groth16_verify, VerifierStatus};

use crate::{config::load_config, output};

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {what} at {}", path.display()))
}

pub fn run(vk: &Path, proof: &Path, public: &Path) -> Result<()> {
    let config = load_config()?;
    let vk = read(vk, "verification key")?;
    let proof = read(proof, "proof")?;
    let public = read(public, "public signals")?;

    let mut error = vec![0u8; config.error_buffer_size];
    let status = groth16_verify(&proof, &public, &vk, &mut error);

    if output::is_json() {
        output::json_output(serde_json::json!({
            "valid": status == VerifierStatus::Valid,
            "status": status.code(),
            "error": (status == VerifierStatus::Error).then(|| read_text(&error)),
        }));
    }

    match status {
        VerifierStatus::Valid => {
            output::success("proof is valid");
            Ok(())
        }
        VerifierStatus::Invalid => Err(output::fail_with_hint(
            "proof is invalid",
            "check that public.json and the verification key belong to this proof",
        )),
        VerifierStatus::Error => Err(anyhow::anyhow!(read_text(&error))),
    }
}
