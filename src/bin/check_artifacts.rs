//! Artifact preflight utility for Glyscreen deployments.
//!
//! Loads an artifact directory exactly the way the server does at startup
//! and prints a one-screen summary, exiting non-zero when the directory
//! would fail that startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin check_artifacts -- [artifact_dir]
//! ```

use std::env;
use std::path::PathBuf;

use glyscreen::adapters::ArtifactStore;

fn usage() -> String {
    "Usage: check_artifacts [artifact_dir]".to_string()
}

fn parse_args() -> Result<PathBuf, String> {
    let mut dir: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage()),
            _ => {
                if dir.is_none() {
                    dir = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    Ok(dir.unwrap_or_else(|| PathBuf::from("artifacts")))
}

fn main() -> Result<(), String> {
    let dir = parse_args()?;

    let store = ArtifactStore::load(&dir).map_err(|e| format!("Artifact check failed: {e}"))?;
    let summary = store.summary();

    println!("Artifact directory {dir:?} is servable");
    println!(
        "  classifier:   {} ({} features)",
        summary.classifier_kind, summary.feature_count
    );
    println!("  genders:      {}", summary.genders.join(", "));
    match &summary.class_names {
        Some(classes) => println!("  classes:      {}", classes.join(", ")),
        None => println!("  classes:      (no class encoder; positive index decides)"),
    }
    println!("  mean columns: {}", summary.mean_columns);

    Ok(())
}
