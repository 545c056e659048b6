//! Checksum utility for diabetes predictor model artifacts.
//!
//! Validates a model artifact against the application's feature schema and
//! writes its SHA-256 digest to the `<artifact>.sha256` sidecar checked at
//! startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin model_checksum -- <model.json> [--check]
//! ```
//!
//! With `--check`, the existing sidecar is compared instead of rewritten.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use diabetes_predictor::adapters::model::{checksum_path, sha256_hex};
use diabetes_predictor::adapters::ModelArtifact;
use diabetes_predictor::ports::Classifier;

fn parse_args() -> Result<(PathBuf, bool)> {
    let mut model_path: Option<PathBuf> = None;
    let mut check = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--check" => check = true,
            "-h" | "--help" => {
                bail!("Usage: model_checksum <model.json> [--check]");
            }
            s if s.starts_with('-') => bail!("Unknown argument: {s}"),
            s => {
                if model_path.is_some() {
                    bail!("Only one model path may be given");
                }
                model_path = Some(PathBuf::from(s));
            }
        }
    }

    let model_path = model_path.ok_or_else(|| anyhow!("Usage: model_checksum <model.json> [--check]"))?;
    Ok((model_path, check))
}

fn main() -> Result<()> {
    let (model_path, check) = parse_args()?;

    let bytes = fs::read(&model_path).with_context(|| format!("Failed to read {model_path:?}"))?;

    // Refuse to vouch for an artifact the application would reject anyway.
    let artifact = ModelArtifact::from_slice(&bytes)
        .with_context(|| format!("{model_path:?} is not a valid model artifact"))?;

    let digest = sha256_hex(&bytes);
    let sidecar = checksum_path(&model_path);

    if check {
        let recorded = fs::read_to_string(&sidecar)
            .with_context(|| format!("Failed to read {sidecar:?}"))?;
        let recorded = recorded.split_whitespace().next().unwrap_or_default();
        if !recorded.eq_ignore_ascii_case(&digest) {
            bail!("Checksum mismatch for {model_path:?}: sidecar has {recorded}, artifact is {digest}");
        }
        println!("OK {} ({})", model_path.display(), artifact.name());
        return Ok(());
    }

    let file_name = model_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::write(&sidecar, format!("{digest}  {file_name}\n"))
        .with_context(|| format!("Failed to write {sidecar:?}"))?;

    println!("Model: {} ({})", model_path.display(), artifact.name());
    println!(
        "Probabilities: {}",
        if artifact.probability_estimator().is_some() { "yes" } else { "no" }
    );
    println!("Wrote {} ({digest})", sidecar.display());
    Ok(())
}
