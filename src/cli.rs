use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use van_scout::config::AppConfig;
use van_scout::error::AppError;
use van_scout::telemetry;
use van_scout::workflows::listings::{
    scan, CandidateExporter, ExportSummary, ListingEvaluator, ListingLoader,
};

#[derive(Parser, Debug)]
#[command(
    name = "van-scout",
    about = "Filter a listing feed down to ranked van candidates",
    version
)]
struct Cli {
    /// Listing feed to scan (overrides VAN_SCOUT_INPUT, default ./cardata)
    #[arg(long)]
    input: Option<PathBuf>,
    /// CSV destination (overrides VAN_SCOUT_CSV_PATH)
    #[arg(long)]
    csv: Option<PathBuf>,
    /// JSON destination (overrides VAN_SCOUT_JSON_PATH)
    #[arg(long)]
    json: Option<PathBuf>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(input) = cli.input {
        config.input.path = input;
    }
    if let Some(csv) = cli.csv {
        config.export.csv_path = csv;
    }
    if let Some(json) = cli.json {
        config.export.json_path = json;
    }
    config.export.validate()?;

    telemetry::init(&config.telemetry)?;

    run_scan(&config)
}

fn run_scan(config: &AppConfig) -> Result<(), AppError> {
    info!(input = %config.input.path.display(), filter = ?config.filter, "starting scan");

    let loaded = ListingLoader::from_path(&config.input.path)?;
    if let Some(err) = &loaded.parse_error {
        println!("Failed to parse data file: {err}");
    }

    println!("Scanning {} vehicles...", loaded.listings.len());

    let evaluator = ListingEvaluator::new(config.filter.clone());
    let report = scan(&loaded.listings, &evaluator);

    let exporter = CandidateExporter::new(&config.export.csv_path, &config.export.json_path);
    match exporter.export(&report.candidates)? {
        ExportSummary::Written {
            count,
            csv_path,
            json_path,
        } => {
            println!("Found {count} solid candidates!");
            println!("  -> {}", csv_path.display());
            println!("  -> {}", json_path.display());
        }
        ExportSummary::Empty => println!("No vans matched the criteria in this batch."),
    }

    Ok(())
}

/// Console instruction shown when the feed file is absent.
pub(crate) fn missing_input_message(path: &std::path::Path) -> String {
    format!(
        "Please save the data as '{}' in the same directory.",
        path.display()
    )
}
