//! Sentinel Shield - command line assessment
//!
//! ```text
//! sentinel-assess <request.json> [--replay <oracle-output.json>]
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use sentinel_core::constants::{APP_NAME, APP_VERSION};
use sentinel_core::{
    AssessmentPipeline, HttpOracle, ProgressConfig, ProgressReporter, ReasoningOracle,
    ReplayOracle, ReportSection, ThreatAssessmentReport,
};

/// Run one threat assessment and print the report
#[derive(Parser, Debug)]
#[command(name = "sentinel-assess", version, about)]
struct Args {
    /// Request JSON file
    request: PathBuf,

    /// Replay a recorded oracle output instead of calling the live oracle
    #[arg(long)]
    replay: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("{} v{} starting assessment", APP_NAME, APP_VERSION);

    let raw = match std::fs::read_to_string(&args.request)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).map_err(|e| e.to_string()))
    {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Failed to read request {}: {}", args.request.display(), e);
            return ExitCode::from(2);
        }
    };

    let oracle: Arc<dyn ReasoningOracle> = match &args.replay {
        Some(path) => match ReplayOracle::from_file(path) {
            Ok(oracle) => Arc::new(oracle),
            Err(e) => {
                eprintln!("Failed to read replay file {}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        },
        None => match HttpOracle::from_env() {
            Ok(oracle) => Arc::new(oracle),
            Err(e) => {
                eprintln!("{}", e.user_message());
                return ExitCode::FAILURE;
            }
        },
    };

    let pipeline = AssessmentPipeline::new(oracle);
    let reporter = ProgressReporter::new(ProgressConfig::from_env());

    let mut rx = reporter.subscribe();
    let phase_logger = tokio::spawn(async move {
        let mut last_phase = String::new();
        while rx.changed().await.is_ok() {
            let snap = rx.borrow_and_update().clone();
            if snap.phase != last_phase {
                log::info!("[{:>3.0}%] {}", snap.progress, snap.phase);
                last_phase = snap.phase;
            }
            if snap.status.is_terminal() {
                break;
            }
        }
    });

    let result = reporter.track(pipeline.assess_value(&raw)).await;
    let _ = phase_logger.await;

    match result {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &ThreatAssessmentReport) {
    println!("Threat Level:       {}", report.threat_level.as_str().to_uppercase());
    println!("Threat Vector:      {}", report.threat_vector);
    println!("Impact Assessment:  {}", report.impact_assessment);
    println!(
        "Confidence:         {:.0}% - {}",
        report.confidence_score * 100.0,
        report.confidence_reasoning
    );

    for section in ReportSection::ALL {
        println!("\n{}", section.title());
        let items = section.items(report);
        if items.is_empty() {
            println!("  {}", section.empty_text());
        }
        for (idx, item) in items.iter().enumerate() {
            println!("  {}. {}", idx + 1, item);
        }
    }
}
