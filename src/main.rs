use clap::{Parser, Subcommand};
use datacleaner::config::Config;
use datacleaner::constants;
use datacleaner::logging;
use datacleaner::pipeline::PipelineOutput;
use datacleaner::storage::{JsonFileStorage, Storage};
use datacleaner::tasks::{self, ExportDataParams, ExtractDataParams};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

#[derive(Parser)]
#[command(name = "datacleaner")]
#[command(about = "Extracts HTML tables, profiles and cleans the data, validates it, and exports CSV")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML file with transform and validation settings (defaults used if absent)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and persist all artifacts as JSON
    Extract {
        /// HTML document to extract tables from
        #[arg(long)]
        input: PathBuf,
        /// Directory artifacts are saved under
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Run the pipeline and write the transformed tables as CSV
    Export {
        /// HTML document to extract tables from
        #[arg(long)]
        input: PathBuf,
        /// Output CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn print_summary(output: &PipelineOutput) {
    let profile = &output.profiling_results;
    println!("\n📊 Profiling Results:");
    println!("   Total tables: {}", profile.total_tables);
    println!("   Total rows: {}", profile.total_rows);
    println!("   Missing values: {}", profile.missing_values);
    for (column, stats) in &profile.column_stats {
        println!(
            "   Column '{}': {} unique, {} empty",
            column, stats.unique_values, stats.empty_values
        );
    }

    let violations: usize = output.validation_results.iter().map(|entry| entry.len()).sum();
    if violations > 0 {
        println!("\n⚠️  {} validation violations:", violations);
        for entry in &output.validation_results {
            for message in entry.values() {
                println!("   - {}", message);
            }
        }
    } else {
        println!("\n✅ No validation violations");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Extract { input, data_dir } => {
            println!("🔄 Running extraction pipeline...");
            let html = fs::read_to_string(&input)?;
            let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::new(&data_dir));

            match tasks::extract_data(storage, &config, ExtractDataParams { html }).await {
                Ok(output) => {
                    print_summary(&output);
                    println!("\n💾 Artifacts saved under {}", data_dir.display());
                }
                Err(e) => {
                    error!("extraction failed: {}", e);
                    println!("❌ Extraction failed: {}", e);
                }
            }
        }
        Commands::Export { input, output } => {
            println!("🔄 Running export pipeline...");
            let html = fs::read_to_string(&input)?;

            let result = tasks::export_data(&config, ExportDataParams { html }).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(constants::EXPORT_FILENAME));
            fs::write(&path, &result.csv_data)?;
            println!(
                "💾 Saved CSV to {} ({})",
                path.display(),
                constants::CSV_MIME_TYPE
            );
        }
    }
    Ok(())
}
