// ==========================================
// Lesson Audit - command line entry
// ==========================================
// lesson-audit <INPUT> [--sheet NAME] [--tolerance-minutes N]
//              [--config FILE] [--out DIR] [--json]
// ==========================================

use anyhow::Context;
use clap::Parser;
use lesson_audit::{logging, AuditConfig, AuditOrchestrator, AuditReport, ReportAssembler};
use std::path::PathBuf;
use tracing::info;

/// Audit a lesson register for hour mismatches, duplicates and overlaps
#[derive(Parser, Debug)]
#[command(name = "lesson-audit", version)]
struct Args {
    /// Register file (.csv, .xlsx, .xlsm, .xls, .ods)
    input: PathBuf,

    /// Worksheet to read (default: first sheet)
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Hour-mismatch tolerance in minutes (default: 1)
    #[arg(long, value_name = "N")]
    tolerance_minutes: Option<f64>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the CSV tables and summary.json
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print the whole report as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> anyhow::Result<AuditConfig> {
    let mut config = match &args.config {
        Some(path) => AuditConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AuditConfig::default(),
    };
    config = config.with_env_overrides()?;

    // command line wins over file and environment
    if let Some(sheet) = &args.sheet {
        config.sheet_name = Some(sheet.clone());
    }
    if let Some(minutes) = args.tolerance_minutes {
        config.tolerance_minutes = minutes;
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(report: &AuditReport) {
    let s = &report.summary;
    println!("Lesson audit {}", report.run_id);
    if let Some(source) = &report.source {
        println!("  source:                   {}", source);
    }
    println!(
        "  tolerance:                {:.2} min",
        report.tolerance_hours * 60.0
    );
    println!("  records:                  {}", s.total_records);
    println!("  hour mismatches:          {}", s.hour_mismatches);
    println!("  duplicate pairs:          {}", s.duplicate_pairs);
    println!("  teacher overlaps:         {}", s.teacher_overlaps);
    println!("  class overlaps:           {}", s.class_overlaps);
    println!("  records without duration: {}", s.records_without_duration);
    println!("  records without date:     {}", s.records_without_date);
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    info!(
        version = lesson_audit::VERSION,
        input = %args.input.display(),
        "starting"
    );

    let report = AuditOrchestrator::new(config)
        .run_file(&args.input)
        .with_context(|| format!("auditing {}", args.input.display()))?;

    if let Some(dir) = &args.out {
        ReportAssembler::new(dir)
            .write(&report)
            .with_context(|| format!("writing report to {}", dir.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}
