// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::config::{config_path, load_config, load_from, save_config, ALLOWED_KEYS};
use crate::output;

pub fn set(key: &str, value: &str) -> Result<()> {
    if !ALLOWED_KEYS.contains(&key) {
        return Err(output::fail_with_hint(
            &format!("unknown config key: {key}"),
            &format!("allowed keys: {}", ALLOWED_KEYS.join(", ")),
        ));
    }

    // Env overrides are not persisted.
    let mut config = load_from(&config_path()?)?;
    config.set(key, value)?;
    let path = save_config(&config)?;

    if output::is_json() {
        output::json_output(serde_json::json!({ "key": key, "value": value }));
    } else {
        output::success(&format!("{key} updated in {}", path.display()));
    }
    Ok(())
}

pub fn show() -> Result<()> {
    let config = load_config()?;
    let threads = config
        .threads
        .map_or_else(|| "auto".to_string(), |n| n.to_string());
    let default_zkey = config
        .default_zkey
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());

    if output::is_json() {
        output::json_output(serde_json::json!({
            "path": config_path()?.display().to_string(),
            "threads": config.threads,
            "msm_chunk_size": config.msm_chunk_size,
            "proof_buffer_size": config.proof_buffer_size,
            "error_buffer_size": config.error_buffer_size,
            "default_zkey": config.default_zkey,
        }));
    } else {
        output::label("config", &config_path()?.display().to_string());
        output::label("threads", &threads);
        output::label("msm_chunk_size", &config.msm_chunk_size.to_string());
        output::label("proof_buffer_size", &config.proof_buffer_size.to_string());
        output::label("error_buffer_size", &config.error_buffer_size.to_string());
        output::label("default_zkey", &default_zkey);
    }
    Ok(())
}
