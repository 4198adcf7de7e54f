//! CLI tool for normalizing asset references and validating attachment
//! manifests.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slideassets_core::{path, AttachmentFile, EditSession, NormalizedRef};
use std::path::PathBuf;
use std::process::ExitCode;

/// Inspect asset references and attachment sets the way the slide
/// editor would.
#[derive(Parser, Debug)]
#[command(name = "slide-assets")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize raw asset references to canonical paths
    Normalize {
        /// Raw reference(s): URLs, relative paths, or canonical paths
        #[arg(required = true)]
        refs: Vec<String>,
    },
    /// Replay an attachment manifest through the admission rules
    Check {
        /// JSON manifest: an array of candidate batches
        manifest: PathBuf,
    },
}

/// One candidate file as written in a manifest.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    name: String,
    #[serde(default)]
    last_modified_ms: u64,
    #[serde(default)]
    size_bytes: u64,
    mime_type: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match &args.command {
        Command::Normalize { refs } => normalize_refs(refs, args.verbose),
        Command::Check { manifest } => check_manifest(manifest),
    };

    match result {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Print the canonical form of each reference. Returns false if any
/// input carried no asset.
fn normalize_refs(refs: &[String], verbose: bool) -> Result<bool> {
    let mut clean = true;
    for raw in refs {
        match path::normalize(raw) {
            NormalizedRef::Missing => {
                println!("{}: (no asset)", display_raw(raw));
                clean = false;
            }
            NormalizedRef::Resolved { path, origin } => {
                if verbose {
                    println!("{}: {} [{:?}]", display_raw(raw), path, origin);
                } else {
                    println!("{}", path);
                }
            }
        }
    }
    Ok(clean)
}

/// Replay the manifest's batches against an accumulating working set.
/// Returns false if any batch was rejected.
fn check_manifest(manifest: &PathBuf) -> Result<bool> {
    let content = std::fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let batches: Vec<Vec<ManifestFile>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", manifest.display()))?;

    let mut session = EditSession::new();
    let mut clean = true;

    for (index, batch) in batches.into_iter().enumerate() {
        let candidates: Vec<AttachmentFile> = batch
            .into_iter()
            .map(|f| AttachmentFile::new(f.name, f.last_modified_ms, f.size_bytes, f.mime_type))
            .collect();

        log::debug!("batch {}: {} candidate(s)", index, candidates.len());
        let admission = session.admit_attachments(candidates);

        for file in &admission.accepted {
            println!("batch {}: accepted {}", index, file.name);
        }
        for file in &admission.rejected {
            println!("batch {}: rejected {}", index, file.name);
        }
        if let Some(reason) = &admission.reason {
            println!("batch {}: {}", index, reason);
            clean = false;
        }
    }

    println!("working set: {} file(s)", session.attachments().len());
    Ok(clean)
}

/// Show empty/whitespace input legibly.
fn display_raw(raw: &str) -> String {
    if raw.trim().is_empty() {
        "(empty)".to_string()
    } else {
        raw.to_string()
    }
}
