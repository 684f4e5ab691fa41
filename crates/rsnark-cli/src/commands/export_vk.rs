// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use rsnark_groth16::json::vk_to_json;
use rsnark_zkey::ProvingKey;

use crate::{commands::resolve_zkey, config::load_config, output};

pub fn run(zkey: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let zkey = resolve_zkey(zkey, &load_config()?)?;
    let key = ProvingKey::from_file(&zkey).with_context(|| format!("cannot load {}", zkey.display()))?;
    let vk = vk_to_json(&key.verification_key());

    match out {
        Some(path) => {
            fs::write(&path, &vk).with_context(|| format!("cannot write {}", path.display()))?;
            if output::is_json() {
                output::json_output(serde_json::json!({ "out": path.display().to_string() }));
            } else {
                output::success(&format!("verification key written to {}", path.display()));
            }
        }
        None => println!("{vk}"),
    }
    Ok(())
}
