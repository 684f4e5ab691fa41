// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

pub mod bench;
pub mod config;
pub mod export_vk;
pub mod info;
pub mod prove;
pub mod verify;

use std::path::PathBuf;

use anyhow::Result;

use crate::{config::CliConfig, output};

/// Explicit path, else `default_zkey` from the config.
pub fn resolve_zkey(explicit: Option<PathBuf>, config: &CliConfig) -> Result<PathBuf> {
    let path = explicit.or_else(|| config.default_zkey.clone()).ok_or_else(|| {
        output::fail_with_hint(
            "no proving key given",
            "pass --zkey <file> or run `rsnark config set default_zkey <file>`",
        )
    })?;
    if !path.exists() {
        return Err(output::fail_with_hint(
            &format!("zkey not found: {}", path.display()),
            "check the path or update default_zkey",
        ));
    }
    Ok(path)
}
