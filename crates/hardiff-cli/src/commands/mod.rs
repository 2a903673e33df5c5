//! Subcommands and the loading steps they share

pub mod align;
pub mod compare;

use std::path::Path;

use clap::ValueEnum;
use hardiff_core::{Engine, EngineConfig, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse both captures, left first
pub(crate) fn load_logs(
    left: &Path,
    right: &Path,
) -> Result<(Vec<Record>, Vec<Record>), Box<dyn std::error::Error>> {
    let left = hardiff_har::parse_har_file(left)?;
    let right = hardiff_har::parse_har_file(right)?;
    Ok((left, right))
}

pub(crate) fn load_config(
    path: Option<&Path>,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            Ok(EngineConfig::from_toml_str(&text)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Engine with the policy file, if any, already installed
pub(crate) fn build_engine(
    config: EngineConfig,
    policy: Option<&Path>,
) -> Result<Engine, Box<dyn std::error::Error>> {
    let engine = Engine::new(config);
    if let Some(path) = policy {
        engine.set_exemption_policy(Some(hardiff_har::parse_policy_file(path)?));
    }
    Ok(engine)
}

pub(crate) fn status_label(status: hardiff_core::ComparisonStatus) -> String {
    status.as_str().to_uppercase()
}
