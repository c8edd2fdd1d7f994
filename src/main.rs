use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use reg_formatter::config::Config;
use reg_formatter::constants::OUTPUT_COLUMNS;
use reg_formatter::ingest;
use reg_formatter::logging;
use reg_formatter::pipeline::{self, NormalizeOutput};

#[derive(Parser)]
#[command(name = "reg_formatter")]
#[command(about = "Formats raw registration exports into upload-ready CSVs")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raw registration CSV into the upload format
    Convert {
        /// Path to the raw registration CSV
        #[arg(long)]
        input: PathBuf,
        /// Where to write the cleaned CSV (defaults to the configured name)
        #[arg(long)]
        output: Option<PathBuf>,
        /// How many normalized rows to print (defaults to the configured count)
        #[arg(long)]
        preview: Option<usize>,
    },
    /// Show how the source columns would be interpreted, without converting
    Mapping {
        /// Path to the raw registration CSV
        #[arg(long)]
        input: PathBuf,
    },
}

fn run_convert(
    config: &Config,
    input: &Path,
    output: Option<PathBuf>,
    preview: Option<usize>,
) -> anyhow::Result<()> {
    let table = ingest::read_csv(input)?;
    info!(rows = table.len(), input = %input.display(), "loaded raw export");

    let result = pipeline::normalize(&table)?;

    let output_path = output.unwrap_or_else(|| PathBuf::from(&config.output_file));
    ingest::write_csv(&output_path, &result.rows)?;
    info!(output = %output_path.display(), "wrote cleaned CSV");

    print_report(&result, preview.unwrap_or(config.preview_rows))?;
    Ok(())
}

fn run_mapping(input: &Path) -> anyhow::Result<()> {
    let table = ingest::read_csv(input)?;
    let mapping = pipeline::detect_mapping(table.headers());
    let record = pipeline::MappingRecord::from(&mapping);

    println!("\n🔎 Detected mapping:");
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn print_report(result: &NormalizeOutput, preview_rows: usize) -> anyhow::Result<()> {
    let summary = &result.summary;
    println!("\n📊 Conversion Summary:");
    println!("   Rows processed: {}", summary.rows);
    println!("   Placeholder primaries: {}", summary.placeholder_primary_rows);
    println!("   Coach groups blanked: {}", summary.coach_blanked_rows);
    println!("   Invalid mobiles fixed: {}", summary.invalid_mobile_fixed_rows);

    println!("\n🔎 Detected mapping:");
    println!("{}", serde_json::to_string_pretty(&result.mapping)?);

    println!("\n⚠️  Issues:");
    if result.issues.is_empty() {
        println!("   none");
    } else {
        for issue in &result.issues {
            println!("   - {}", issue);
        }
    }

    let preview = result.rows.iter().take(preview_rows);
    println!("\n👀 Preview (first {} rows):", preview_rows.min(result.rows.len()));
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(OUTPUT_COLUMNS)?;
    for row in preview {
        writer.write_record(row.values())?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            preview,
        } => run_convert(&config, &input, output, preview),
        Commands::Mapping { input } => run_mapping(&input),
    }
}
