/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tessel_build::generate_all;
use tessel_template::Compiler;

#[derive(Parser)]
#[command(name = "tessel")]
#[command(about = "Compile a tree of tessel templates into Rust formatter units")]
#[command(version)]
struct Cli {
    /// Directory containing .tessel template files
    source_root: PathBuf,

    /// Directory to write generated units into (cleared first)
    destination: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let compiler = Compiler::new();
    generate_all(&compiler, &cli.source_root, &cli.destination)?;
    Ok(())
}
