//! pdfoutline CLI - PDF title and heading outline extraction

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{list_pdfs, process_directory_with_progress};
use pdfoutline::{
    extract_outline, parse_file_with_options, to_json, BatchOptions, BatchReport, ErrorMode,
    JsonFormat, LevelCounting, OutlineConfig, ParseOptions,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract document titles and heading outlines from PDFs as JSON", long_about = None)]
struct Cli {
    /// Directory of PDF files
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Directory for JSON results
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(flatten)]
    tuning: TuningArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

/// Heuristic thresholds shared by all commands.
#[derive(Args)]
struct TuningArgs {
    /// Fraction of the first page searched for the title
    #[arg(long, global = true, value_name = "FRACTION", default_value_t = 0.3)]
    top_fraction: f64,

    /// Minimum length of a heading found by size or weight
    #[arg(long, global = true, value_name = "CHARS", default_value_t = 3)]
    min_heading_length: usize,

    /// Font size ratio over the body text that marks a heading
    #[arg(long, global = true, value_name = "RATIO", default_value_t = 1.2)]
    size_ratio: f64,

    /// Count heading level dots in the leading numeral only
    #[arg(long, global = true)]
    prefix_levels: bool,

    /// Fail a document when any page cannot be read
    #[arg(long, global = true)]
    strict: bool,
}

impl TuningArgs {
    fn outline_config(&self) -> OutlineConfig {
        let counting = if self.prefix_levels {
            LevelCounting::NumeralPrefix
        } else {
            LevelCounting::WholeLine
        };
        OutlineConfig::default()
            .with_top_fraction(self.top_fraction)
            .with_min_heading_length(self.min_heading_length)
            .with_size_ratio(self.size_ratio)
            .with_level_counting(counting)
    }

    fn parse_options(&self) -> ParseOptions {
        let mode = if self.strict {
            ErrorMode::Strict
        } else {
            ErrorMode::Lenient
        };
        ParseOptions::new().with_error_mode(mode)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            ref input,
            ref output,
            sequential,
        }) => cmd_batch(input, output, sequential, &cli.tuning),
        Some(Commands::Extract {
            ref input,
            ref output,
            compact,
        }) => cmd_extract(input, output.as_deref(), compact, &cli.tuning),
        None => {
            let input = cli.input.unwrap_or_else(|| PathBuf::from("input"));
            let output = cli.output.unwrap_or_else(|| PathBuf::from("output"));
            cmd_batch(&input, &output, false, &cli.tuning)
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new()
        .with_parse_options(tuning.parse_options())
        .with_outline_config(tuning.outline_config());
    if sequential {
        options = options.sequential();
    }

    let total = list_pdfs(input)?.len();
    if total == 0 {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_directory_with_progress(input, output, &options, |outcome| {
        let name = outcome
            .input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        pb.set_message(name);
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");
    print_summary(&report, output);

    if report.is_success() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} documents failed",
            report.failed(),
            report.outcomes.len()
        )
        .into())
    }
}

fn print_summary(report: &BatchReport, output: &Path) {
    println!("\n{}", "Results:".green().bold());

    let last = report.outcomes.len().saturating_sub(1);
    for (i, outcome) in report.outcomes.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        let name = outcome.input.display();
        match &outcome.result {
            Ok(outline) => println!(
                "  {} {} {} ({} headings)",
                branch.dimmed(),
                "✓".green(),
                name,
                outline.len()
            ),
            Err(e) => println!("  {} {} {}: {}", branch.dimmed(), "✗".red(), name, e),
        }
    }

    println!(
        "\n{} {} succeeded, {} failed, written to {}",
        "Summary:".bold(),
        report.succeeded().to_string().green(),
        report.failed().to_string().red(),
        output.display()
    );
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, tuning.parse_options())?;
    log::debug!("Parsed {} pages from {}", doc.page_count(), input.display());
    let outline = extract_outline(&doc, &tuning.outline_config());

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_batch() {
        let cli = Cli::try_parse_from(["pdfoutline"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.input.is_none());
        assert_eq!(cli.tuning.top_fraction, 0.3);
        assert!(!cli.tuning.strict);
    }

    #[test]
    fn test_positional_dirs() {
        let cli = Cli::try_parse_from(["pdfoutline", "pdfs", "json"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("pdfs")));
        assert_eq!(cli.output, Some(PathBuf::from("json")));
    }

    #[test]
    fn test_tuning_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pdfoutline",
            "extract",
            "doc.pdf",
            "--compact",
            "--min-heading-length",
            "5",
            "--prefix-levels",
            "--strict",
        ])
        .unwrap();

        let config = cli.tuning.outline_config();
        assert_eq!(config.min_heading_length, 5);
        assert_eq!(config.level_counting, LevelCounting::NumeralPrefix);
        assert_eq!(cli.tuning.parse_options().error_mode, ErrorMode::Strict);
        assert!(matches!(
            cli.command,
            Some(Commands::Extract { compact: true, .. })
        ));
    }

    #[test]
    fn test_batch_on_empty_directory() {
        let input = tempfile::TempDir::new().unwrap();
        let output = input.path().join("out");
        let cli = Cli::try_parse_from(["pdfoutline"]).unwrap();
        assert!(cmd_batch(input.path(), &output, true, &cli.tuning).is_ok());
    }

    #[test]
    fn test_batch_missing_directory_fails() {
        let cli = Cli::try_parse_from(["pdfoutline"]).unwrap();
        let result = cmd_batch(
            Path::new("/nonexistent/pdfs"),
            Path::new("/nonexistent/out"),
            true,
            &cli.tuning,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_output_default() {
        let cli = Cli::try_parse_from(["pdfoutline", "batch", "pdfs", "--sequential"]).unwrap();
        match cli.command {
            Some(Commands::Batch {
                output, sequential, ..
            }) => {
                assert_eq!(output, PathBuf::from("output"));
                assert!(sequential);
            }
            _ => panic!("expected batch command"),
        }
    }
}
