use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use folhatxt_core::{Extractor, ExtractorConfig, IdentifierStrategy, writer};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod formatter;

#[derive(Parser)]
#[command(name = "folhatxt")]
#[command(about = "Generate the payroll TXT file from a Fortes spreadsheet export", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the .xls/.xlsx/.ods payroll export
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Worksheet to read (defaults to the first one)
    #[arg(short, long, value_name = "SHEET")]
    sheet: Option<String>,

    /// Output file or directory (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// How the CNPJ is located
    #[arg(long, value_enum)]
    identifier: Option<IdentifierArg>,

    /// Accept code rows that carry no descriptive text
    #[arg(long)]
    allow_numeric_rows: bool,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Print the TXT to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Show the result without writing the TXT
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum IdentifierArg {
    /// Labeled CNPJ inside the header region only
    Label,
    /// Every CNPJ of the sheet, preferring the second one
    WholeSheet,
}

impl From<IdentifierArg> for IdentifierStrategy {
    fn from(arg: IdentifierArg) -> Self {
        match arg {
            IdentifierArg::Label => IdentifierStrategy::Label,
            IdentifierArg::WholeSheet => IdentifierStrategy::WholeSheet,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        ExtractorConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("folhatxt.toml");
        if default_config_path.exists() {
            ExtractorConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ExtractorConfig::default()
        }
    };

    // Command line overrides
    if cli.sheet.is_some() {
        config.sheet = cli.sheet.clone();
    }
    if let Some(identifier) = cli.identifier {
        config.identifier.strategy = identifier.into();
    }
    if cli.allow_numeric_rows {
        config.scan.require_description = false;
    }

    // Validate configuration
    let valid_tokens = folhatxt_core::rules::registry::get_all_valid_tokens();
    config
        .validate(&valid_tokens)
        .context("Invalid configuration")?;
    debug!(?config, "Effective configuration");

    let extractor = Extractor::with_config(config)?;
    let report = extractor
        .extract_file(&cli.file)
        .with_context(|| format!("Failed to process file: {}", cli.file.display()))?;

    if cli.stdout {
        print!("{}", report.document.text);
        formatter::print_diagnostics_stderr(&report.diagnostics);
        return Ok(());
    }

    let written = if cli.dry_run {
        None
    } else {
        let target = cli.output.clone().unwrap_or_else(|| PathBuf::from("."));
        Some(writer::write_document(&report.document, &target)?)
    };

    match cli.format {
        OutputFormat::Human => formatter::print_human(&cli.file, &report, written.as_deref()),
        OutputFormat::Json => formatter::print_json(&cli.file, &report, written.as_deref())?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for `--stdout` and `--format json`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}
