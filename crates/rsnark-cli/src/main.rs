// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rsnark", about = "Groth16 prover and verifier for snarkjs keys", version)]
struct Cli {
    /// Machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Generate a proof from a .zkey and a .wtns
    Prove {
        /// Witness file (.wtns)
        witness: PathBuf,
        /// Proving key; falls back to `default_zkey` from the config
        #[arg(long)]
        zkey: Option<PathBuf>,
        /// Write proof.json here instead of stdout
        #[arg(long)]
        proof: Option<PathBuf>,
        /// Write public.json here instead of stdout
        #[arg(long)]
        public: Option<PathBuf>,
        /// Public signals buffer size; computed from the key header when omitted
        #[arg(long)]
        public_buffer_size: Option<usize>,
    },
    /// Check a proof against public signals and a verification key
    Verify {
        /// verification_key.json
        vk: PathBuf,
        /// proof.json
        proof: PathBuf,
        /// public.json
        public: PathBuf,
    },
    /// Print the public signals buffer size a key requires
    PublicSize {
        zkey: Option<PathBuf>,
    },
    /// Extract verification_key.json from a .zkey
    ExportVk {
        zkey: Option<PathBuf>,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Show circuit dimensions of a .zkey
    Info {
        zkey: Option<PathBuf>,
    },
    /// Run concurrent proofs against one loaded key
    Bench {
        /// Witness file (.wtns)
        witness: PathBuf,
        #[arg(long)]
        zkey: Option<PathBuf>,
        /// Number of proofs
        #[arg(long, default_value_t = 3)]
        count: usize,
        /// Pool size; overrides the config
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Show or update ~/.rsnark/config.json
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set one key
    Set { key: String, value: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    output::set_json_mode(cli.json);

    match cli.command {
        Cmd::Prove {
            witness,
            zkey,
            proof,
            public,
            public_buffer_size,
        } => commands::prove::run(zkey, &witness, proof, public, public_buffer_size)?,
        Cmd::Verify { vk, proof, public } => commands::verify::run(&vk, &proof, &public)?,
        Cmd::PublicSize { zkey } => commands::info::public_size(zkey)?,
        Cmd::ExportVk { zkey, out } => commands::export_vk::run(zkey, out)?,
        Cmd::Info { zkey } => commands::info::run(zkey)?,
        Cmd::Bench {
            witness,
            zkey,
            count,
            threads,
        } => commands::bench::run(zkey, &witness, count, threads)?,
        Cmd::Config { action } => match action {
            ConfigAction::Show => commands::config::show()?,
            ConfigAction::Set { key, value } => commands::config::set(&key, &value)?,
        },
    }
    Ok(())
}
