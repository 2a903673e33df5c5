//! Align command
//!
//! Usage: hardiff align <LEFT> <RIGHT> [--mode grouped|sequential] [--policy <FILE>]
//!        [--config <FILE>] [--format text|json]

use clap::{Args, ValueEnum};
use hardiff_core::Correspondence;
use std::path::PathBuf;

use super::{build_engine, load_config, load_logs, status_label, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlignMode {
    /// Many-position matching by equivalence key
    Grouped,
    /// Order-preserving one-to-one matching
    Sequential,
}

#[derive(Debug, Args)]
pub struct AlignArgs {
    /// HAR capture used as log A
    pub left: PathBuf,

    /// HAR capture used as log B
    pub right: PathBuf,

    #[arg(short, long, value_enum, default_value_t = AlignMode::Sequential)]
    pub mode: AlignMode,

    /// Exemption policy (JSON)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override `sequence.max_exact_cells`
    #[arg(long)]
    pub max_exact_cells: Option<usize>,

    /// Override `sequence.band_width`
    #[arg(long)]
    pub band_width: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute align command
pub fn execute(args: AlignArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(cells) = args.max_exact_cells {
        config.sequence.max_exact_cells = cells;
    }
    if let Some(width) = args.band_width {
        config.sequence.band_width = width;
    }
    config.validate()?;

    let engine = build_engine(config, args.policy.as_deref())?;
    let (left, right) = load_logs(&args.left, &args.right)?;

    let pairs = match args.mode {
        AlignMode::Grouped => engine.align_grouped(&left, &right),
        AlignMode::Sequential => engine.align_sequential(&left, &right),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pairs)?),
        OutputFormat::Text => {
            for pair in &pairs {
                println!("{}", render_line(pair));
            }
            println!();
            println!("{}", render_summary(&pairs));
        }
    }
    Ok(())
}

fn side(index: Option<usize>) -> String {
    index.map_or_else(|| "-".to_string(), |i| format!("#{}", i))
}

/// `#left <-> #right  STATUS  detail`
fn render_line(pair: &Correspondence) -> String {
    let label = match (pair.result(), pair.left_index()) {
        (Some(result), _) => format!("{}  {}", status_label(result.status), result.detail),
        (None, Some(_)) => "LEFT_ONLY".to_string(),
        (None, None) => "RIGHT_ONLY".to_string(),
    };
    format!(
        "{} <-> {}  {}",
        side(pair.left_index()),
        side(pair.right_index()),
        label
    )
}

fn render_summary(pairs: &[Correspondence]) -> String {
    let paired = pairs.iter().filter(|p| p.is_paired()).count();
    let left_only = pairs
        .iter()
        .filter(|p| p.is_placeholder() && p.left_index().is_some())
        .count();
    let right_only = pairs.len() - paired - left_only;
    format!(
        "{} paired, {} left only, {} right only",
        paired, left_only, right_only
    )
}
