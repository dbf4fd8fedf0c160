//! # CLI Module
//!
//! Command-line interface for the pairing tool.
//!
//! ## Usage
//! ```bash
//! # Scan a directory of alternating image pairs
//! exif-pair scan-dir ~/flights/2024-06-01 --precision 10 --export
//!
//! # Inspect one file's tags
//! exif-pair scan-file ~/flights/2024-06-01/DJI_0042.jpg
//!
//! # Pair by filename convention
//! exif-pair find-pairs ~/flights/2024-06-01 --mode pattern \
//!     --starts-with radiometric --pattern-radiometric _T.jpg --pattern-rgb _V.jpg
//!
//! # Pair by metadata, then score against a trusted pairing
//! exif-pair find-pairs ~/flights/2024-06-01 --mode metric \
//!     --datetime-within 5 --latitude-within 0.0001 --score-against pairing.json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use exif_pair::core::matcher::{self, ImagePair, ImageRole, MatchCriteria, NOT_FOUND};
use exif_pair::core::pipeline::ScanEngine;
use exif_pair::core::scorer;
use exif_pair::core::tags::TagAttribute;
use exif_pair::core::{exporter, scanner, DirScanReport, ExifTagReader, TagReader};
use exif_pair::error::{InputError, Result};
use exif_pair::events::{CompareEvent, Event, EventChannel, EventReceiver, ExtractEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;

/// exif-pair - pair RGB and radiometric photos by capture metadata
#[derive(Parser, Debug)]
#[command(name = "exif-pair")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory of alternating image pairs and report tag deltas
    ScanDir {
        /// Directory to scan
        directory: PathBuf,

        /// Decimal digits in the report's numeric fields
        #[arg(short, long, default_value = "10")]
        precision: usize,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Export the report and comparison as JSON into the directory
        #[arg(long)]
        export: bool,
    },

    /// Extract and print the tags of a single image
    ScanFile {
        /// Image file to inspect
        file: PathBuf,
    },

    /// Find RGB/radiometric pairs in a directory
    FindPairs {
        /// Directory to look for pairs in
        directory: PathBuf,

        /// Method for finding pairs
        #[arg(short, long)]
        mode: MatchingMode,

        /// Which role comes first in the alternating listing (pattern mode)
        #[arg(long)]
        starts_with: Option<Role>,

        /// Filename suffix of RGB images (pattern mode)
        #[arg(long)]
        pattern_rgb: Option<String>,

        /// Filename suffix of radiometric images (pattern mode)
        #[arg(long)]
        pattern_radiometric: Option<String>,

        /// Tolerance for DateTimeOriginal, in seconds (metric mode)
        #[arg(long)]
        datetime_within: Option<f64>,

        /// Tolerance for GPSLatitude, in degrees (metric mode)
        #[arg(long)]
        latitude_within: Option<f64>,

        /// Tolerance for GPSLongitude, in degrees (metric mode)
        #[arg(long)]
        longitude_within: Option<f64>,

        /// Tolerance for GPSAltitude, in the source unit (metric mode)
        #[arg(long)]
        altitude_within: Option<f64>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Export the pairing as pairs.json into the directory
        #[arg(long)]
        export: bool,

        /// Score the produced pairing against a reference pairing file
        #[arg(long)]
        score_against: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MatchingMode {
    /// Pair by filename-suffix convention over the sorted listing
    Pattern,
    /// Pair by nearest-neighbor metadata matching under tolerances
    Metric,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    Rgb,
    Radiometric,
}

impl From<Role> for ImageRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Rgb => ImageRole::Rgb,
            Role::Radiometric => ImageRole::Radiometric,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ScanDir {
            directory,
            precision,
            output,
            export,
        } => run_scan_dir(&directory, precision, output, export),
        Commands::ScanFile { file } => run_scan_file(&file),
        Commands::FindPairs {
            directory,
            mode,
            starts_with,
            pattern_rgb,
            pattern_radiometric,
            datetime_within,
            latitude_within,
            longitude_within,
            altitude_within,
            output,
            export,
            score_against,
        } => {
            let criteria = MatchCriteria {
                date_time_within: datetime_within,
                latitude_within,
                longitude_within,
                altitude_within,
            };
            run_find_pairs(
                &directory,
                mode,
                starts_with,
                pattern_rgb.as_deref(),
                pattern_radiometric.as_deref(),
                &criteria,
                output,
                export,
                score_against.as_deref(),
            )
        }
    }
}

fn run_scan_dir(
    directory: &Path,
    precision: usize,
    output: OutputFormat,
    export: bool,
) -> Result<()> {
    let term = Term::stderr();
    print_header(&term, output);

    let files = scanner::list_files(directory)?;

    let reader = ExifTagReader::new();
    let mut engine = ScanEngine::new(&reader);

    let (sender, receiver) = EventChannel::new();
    let progress = pretty_progress(output, "pairs");
    let progress_thread = spawn_progress_thread(receiver, progress);

    let comparisons = engine.scan_pairs_with_events(directory, &files, &sender)?;
    drop(sender);
    progress_thread.join().ok();

    let report = engine.report(&comparisons, files.len(), precision)?;

    match output {
        OutputFormat::Pretty => {
            print_report(&term, &report);
            term.write_line("").ok();
            term.write_line(&format!("{}", style("Comparisons:").bold().underlined()))
                .ok();
            for comparison in &comparisons {
                let verdict = if comparison.identical {
                    style("identical").green()
                } else {
                    style("differs").yellow()
                };
                term.write_line(&format!(
                    "  {} / {} - {}",
                    comparison.img1, comparison.img2, verdict
                ))
                .ok();
                if let Some(diff) = &comparison.difference {
                    if !diff.is_empty() {
                        term.write_line(&format!("    {}", style(diff).dim())).ok();
                    }
                }
            }
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "report": report,
                "comparisons": comparisons,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).unwrap_or_default()
            );
        }
    }

    if export {
        let report_path = directory.join(exporter::REPORT_FILE);
        let comparison_path = directory.join(exporter::COMPARISON_FILE);
        exporter::save_report(&report_path, &report)?;
        exporter::save_comparisons(&comparison_path, &comparisons)?;
        term.write_line(&format!(
            "{} Exported {} and {}",
            style("✓").green().bold(),
            report_path.display(),
            comparison_path.display()
        ))
        .ok();
    }

    Ok(())
}

fn run_scan_file(file: &Path) -> Result<()> {
    let reader = ExifTagReader::new();
    let tags = reader.read_tags(file)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&tags).unwrap_or_default()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_find_pairs(
    directory: &Path,
    mode: MatchingMode,
    starts_with: Option<Role>,
    pattern_rgb: Option<&str>,
    pattern_radiometric: Option<&str>,
    criteria: &MatchCriteria,
    output: OutputFormat,
    export: bool,
    score_against: Option<&Path>,
) -> Result<()> {
    let term = Term::stderr();
    print_header(&term, output);

    let files = scanner::list_files(directory)?;

    let pairs = match mode {
        MatchingMode::Pattern => {
            let (Some(role), Some(rgb), Some(radiometric)) =
                (starts_with, pattern_rgb, pattern_radiometric)
            else {
                return Err(InputError::MissingPatternFlags.into());
            };

            if !matcher::matches_pattern(&files, role.into(), rgb, radiometric) {
                return Err(InputError::PatternMismatch.into());
            }
            matcher::pairs_from_order(&files)
        }
        MatchingMode::Metric => {
            let reader = ExifTagReader::new();
            let engine = ScanEngine::new(&reader);

            let (sender, receiver) = EventChannel::new();
            let progress = pretty_progress(output, "images");
            let progress_thread = spawn_progress_thread(receiver, progress);

            let (radiometric, rgb) =
                engine.load_populations_with_events(directory, &files, &sender)?;

            let pairs = matcher::find_pairs_with_events(&radiometric, &rgb, criteria, &sender);
            drop(sender);
            progress_thread.join().ok();
            pairs
        }
    };

    match output {
        OutputFormat::Pretty => print_pairs(&term, &pairs),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&pairs).unwrap_or_default()
        ),
    }

    if export {
        let path = directory.join(exporter::PAIRS_FILE);
        exporter::save_pairs(&path, &pairs)?;
        term.write_line(&format!(
            "{} Exported {}",
            style("✓").green().bold(),
            path.display()
        ))
        .ok();
    }

    if let Some(reference_path) = score_against {
        let reference = exporter::load_pairs(reference_path)?;
        let result = scorer::score(&reference, &pairs)?;

        term.write_line("").ok();
        term.write_line(&format!(
            "{} {}",
            style("Accuracy:").bold(),
            style(&result.accuracy).cyan()
        ))
        .ok();
        if !result.incorrect_pairs.is_empty() {
            term.write_line(&format!(
                "{}",
                style("Incorrect pairs:").bold().underlined()
            ))
            .ok();
            print_pairs(&term, &result.incorrect_pairs);
        }
    }

    Ok(())
}

fn print_header(term: &Term, output: OutputFormat) {
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("exif-pair").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }
}

fn print_report(term: &Term, report: &DirScanReport) {
    term.write_line(&format!("{}", style("Scan Report").bold().underlined()))
        .ok();
    term.write_line(&format!(
        "  {} images scanned, {} pairs",
        style(report.images_scanned).cyan(),
        style(report.pairs_scanned).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} identical, {} differing",
        style(report.pairs_with_identical_tags).green(),
        style(report.pairs_with_different_tags).yellow()
    ))
    .ok();

    for attr in TagAttribute::ALL {
        match report.stats(attr) {
            Some(stats) => {
                term.write_line(&format!(
                    "  {}: avg {} / min {} / max {} {}",
                    style(attr.tag_name()).bold(),
                    stats.avg,
                    stats.min,
                    stats.max,
                    style(attr.unit()).dim()
                ))
                .ok();
            }
            None => {
                term.write_line(&format!(
                    "  {}: {}",
                    style(attr.tag_name()).bold(),
                    style("no differing pairs").dim()
                ))
                .ok();
            }
        }
    }
}

fn print_pairs(term: &Term, pairs: &[ImagePair]) {
    for pair in pairs {
        let partner = if pair.b == NOT_FOUND {
            style(pair.b.as_str()).red()
        } else {
            style(pair.b.as_str()).green()
        };
        term.write_line(&format!("  {} -> {}", pair.a, partner)).ok();
    }
}

fn pretty_progress(output: OutputFormat, unit: &str) -> Option<ProgressBar> {
    if !matches!(output, OutputFormat::Pretty) {
        return None;
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message(unit.to_string());
    Some(pb)
}

fn spawn_progress_thread(
    receiver: EventReceiver,
    progress: Option<ProgressBar>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress else { continue };
            match event {
                Event::Compare(CompareEvent::Started { total_pairs }) => {
                    pb.set_length(total_pairs as u64);
                }
                Event::Compare(CompareEvent::PairCompared { completed, .. }) => {
                    pb.set_position(completed as u64);
                }
                Event::Extract(ExtractEvent::Started { total_files }) => {
                    pb.set_length(total_files as u64);
                }
                Event::Extract(ExtractEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                }
                Event::Compare(CompareEvent::Completed { .. })
                | Event::Extract(ExtractEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    })
}
