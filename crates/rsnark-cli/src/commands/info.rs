// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::path::PathBuf;

use anyhow::{Context, Result};
use rsnark_ffi::groth16_proof_size;
use rsnark_zkey::{read_header, ProvingKey, ZkeySource};

use crate::{commands::resolve_zkey, config::load_config, output};

pub fn public_size(zkey: Option<PathBuf>) -> Result<()> {
    let zkey = resolve_zkey(zkey, &load_config()?)?;
    let header = read_header(ZkeySource::File(&zkey)).with_context(|| format!("cannot read {}", zkey.display()))?;
    let size = header.public_output_size();

    if output::is_json() {
        output::json_output(serde_json::json!({
            "public_size": size,
            "proof_size": groth16_proof_size(),
        }));
    } else {
        println!("{size}");
    }
    Ok(())
}

pub fn run(zkey: Option<PathBuf>) -> Result<()> {
    let zkey = resolve_zkey(zkey, &load_config()?)?;
    let pb = output::spinner("loading zkey...");
    let key = ProvingKey::from_file(&zkey).with_context(|| format!("cannot load {}", zkey.display()));
    pb.finish_and_clear();
    let key = key?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "path": zkey.display().to_string(),
            "n_vars": key.n_vars(),
            "n_public": key.n_public(),
            "domain_size": key.domain_size(),
            "coefficients": key.coefficients().len(),
            "public_size": key.public_output_size(),
            "proof_size": groth16_proof_size(),
        }));
    } else {
        output::label("zkey", &zkey.display().to_string());
        output::label("signals", &key.n_vars().to_string());
        output::label("public", &key.n_public().to_string());
        output::label("domain", &key.domain_size().to_string());
        output::label("coefficients", &key.coefficients().len().to_string());
        output::label("public buffer", &format!("{} bytes", key.public_output_size()));
        output::label("proof buffer", &format!("{} bytes", groth16_proof_size()));
    }
    Ok(())
}
