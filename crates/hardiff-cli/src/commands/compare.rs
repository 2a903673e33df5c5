//! Compare command
//!
//! Usage: hardiff compare <LEFT> <RIGHT> --left <N> --right <M> [--keys-only]
//!        [--policy <FILE>] [--format text|json] [--raw]

use clap::Args;
use hardiff_core::{
    DetailedComparisonReport, DifferenceKind, EngineConfig, KeyDifference, SectionReport,
};
use std::path::PathBuf;

use super::{build_engine, load_logs, status_label, OutputFormat};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// HAR capture used as log A
    pub left_log: PathBuf,

    /// HAR capture used as log B
    pub right_log: PathBuf,

    /// Sequence index of the record in log A
    #[arg(short, long)]
    pub left: usize,

    /// Sequence index of the record in log B
    #[arg(short, long)]
    pub right: usize,

    /// Compare key presence and shape only
    #[arg(short, long)]
    pub keys_only: bool,

    /// Exemption policy (JSON)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also print both requests in raw HTTP form (text format only)
    #[arg(long)]
    pub raw: bool,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(EngineConfig::default(), args.policy.as_deref())?;
    let (left_log, right_log) = load_logs(&args.left_log, &args.right_log)?;

    let left = hardiff_har::find_record(&left_log, "left", args.left)?;
    let right = hardiff_har::find_record(&right_log, "right", args.right)?;
    let report = engine.compare_records(left, right, args.keys_only);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_report(&report, args.raw)),
    }
    Ok(())
}

fn render_report(report: &DetailedComparisonReport, raw: bool) -> String {
    let mode = if report.keys_only { " (keys only)" } else { "" };
    let mut lines = vec![
        format!("#{} <-> #{}{}", report.left_index, report.right_index, mode),
        format!(
            "Overall: {}  {}",
            status_label(report.overall.status),
            report.overall.detail
        ),
    ];

    for section in &report.sections {
        lines.extend(render_section(section));
    }

    if raw {
        lines.push(String::new());
        lines.push(format!("--- left request\n{}", report.raw_request_left));
        lines.push(format!("--- right request\n{}", report.raw_request_right));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_section(section: &SectionReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "[{}] {}",
            section.section.name(),
            status_label(section.status)
        ),
    ];
    lines.extend(
        section
            .differences
            .iter()
            .map(|d| format!("  {}", render_difference(d))),
    );
    lines.extend(section.notes.iter().map(|note| format!("  note: {}", note)));
    lines
}

fn render_difference(difference: &KeyDifference) -> String {
    let value = |v: &Option<String>| v.clone().unwrap_or_else(|| "<absent>".to_string());
    let change = match difference.kind {
        DifferenceKind::Added => format!("+ {}: {}", difference.path, value(&difference.right)),
        DifferenceKind::Removed => format!("- {}: {}", difference.path, value(&difference.left)),
        DifferenceKind::Changed => format!(
            "~ {}: {} -> {}",
            difference.path,
            value(&difference.left),
            value(&difference.right)
        ),
    };
    if difference.exempted {
        format!("{} (exempted)", change)
    } else {
        change
    }
}
