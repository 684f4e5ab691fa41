// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rsnark_ffi::{DEFAULT_ERROR_BUFFER_SIZE, DEFAULT_PROOF_BUFFER_SIZE};
use rsnark_msm::MsmConfig;
use serde::{Deserialize, Serialize};

pub const THREADS_ENV: &str = "RSNARK_THREADS";
pub const MSM_CHUNK_ENV: &str = "RSNARK_MSM_CHUNK";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Prover pool size; rayon's default when unset.
    pub threads: Option<usize>,
    pub msm_chunk_size: usize,
    pub proof_buffer_size: usize,
    pub error_buffer_size: usize,
    pub default_zkey: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            threads: None,
            msm_chunk_size: MsmConfig::default().chunk_size,
            proof_buffer_size: DEFAULT_PROOF_BUFFER_SIZE,
            error_buffer_size: DEFAULT_ERROR_BUFFER_SIZE,
            default_zkey: None,
        }
    }
}

pub const ALLOWED_KEYS: &[&str] = &[
    "threads",
    "msm_chunk_size",
    "proof_buffer_size",
    "error_buffer_size",
    "default_zkey",
];

impl CliConfig {
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let count = || -> Result<usize> {
            let n: usize = value.parse().with_context(|| format!("{key} must be a positive integer"))?;
            anyhow::ensure!(n > 0, "{key} must be a positive integer");
            Ok(n)
        };
        match key {
            "threads" => self.threads = if value == "auto" { None } else { Some(count()?) },
            "msm_chunk_size" => self.msm_chunk_size = count()?,
            "proof_buffer_size" => self.proof_buffer_size = count()?,
            "error_buffer_size" => self.error_buffer_size = count()?,
            "default_zkey" => {
                self.default_zkey = if value.is_empty() { None } else { Some(PathBuf::from(value)) }
            }
            _ => anyhow::bail!("unknown config key: {key}"),
        }
        Ok(())
    }

    /// Apply `RSNARK_THREADS` and `RSNARK_MSM_CHUNK` on top of the file.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = lookup(THREADS_ENV) {
            self.set("threads", &v).with_context(|| format!("invalid {THREADS_ENV}"))?;
        }
        if let Some(v) = lookup(MSM_CHUNK_ENV) {
            self.set("msm_chunk_size", &v).with_context(|| format!("invalid {MSM_CHUNK_ENV}"))?;
        }
        Ok(self)
    }

    pub fn msm(&self) -> MsmConfig {
        MsmConfig {
            chunk_size: self.msm_chunk_size,
            ..MsmConfig::default()
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".rsnark").join("config.json"))
}

/// File config with environment overrides; defaults when no file exists.
pub fn load_config() -> Result<CliConfig> {
    load_from(&config_path()?)?.with_env(|name| std::env::var(name).ok())
}

pub fn load_from(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let data = fs::read_to_string(path).with_context(|| format!("cannot read config at {}", path.display()))?;
    serde_json::from_str(&data).context("invalid config JSON")
}

pub fn save_config(config: &CliConfig) -> Result<PathBuf> {
    let path = config_path()?;
    save_to(&path, config)?;
    Ok(path)
}

pub fn save_to(path: &Path, config: &CliConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.proof_buffer_size, 1024);
        assert_eq!(config.error_buffer_size, 256);
    }

    #[test]
    fn saved_config_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = CliConfig::default();
        config.set("threads", "3").unwrap();
        config.set("default_zkey", "/keys/circuit.zkey").unwrap();
        save_to(&path, &config).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.threads, Some(3));
        assert_eq!(loaded.default_zkey, Some(PathBuf::from("/keys/circuit.zkey")));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"msm_chunk_size": 4096}"#).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.msm_chunk_size, 4096);
        assert_eq!(loaded.proof_buffer_size, DEFAULT_PROOF_BUFFER_SIZE);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = CliConfig::default();
        assert!(config.set("threads", "0").is_err());
        assert!(config.set("msm_chunk_size", "lots").is_err());
        assert!(config.set("rpc_url", "x").is_err());
        config.set("threads", "auto").unwrap();
        assert_eq!(config.threads, None);
    }

    #[test]
    fn env_overrides_file() {
        let config = CliConfig::default()
            .with_env(|name| match name {
                THREADS_ENV => Some("2".into()),
                MSM_CHUNK_ENV => Some("512".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.msm().chunk_size, 512);

        let bad = CliConfig::default().with_env(|name| (name == THREADS_ENV).then(|| "-1".into()));
        assert!(bad.is_err());
    }
}
