use anyhow::Result;
use clap::{Parser, ValueEnum};
use photo_date_renamer_core::{
    rename_directory, rename_photo, DatePattern, DirectoryEvent, DirectoryReport, RenameError,
    RenameResult, RunConfig, TransferMode,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const RULE_WIDTH: usize = 70;

#[derive(Debug, Parser)]
#[command(name = "photo-date-renamer", version)]
#[command(about = "Rename photos based on their EXIF date information")]
struct Cli {
    /// Path to a photo file or directory
    path: PathBuf,
    /// Output directory for renamed files (default: same directory)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Date format for new filenames
    #[arg(short, long, value_name = "PATTERN", default_value_t = DatePattern::default())]
    format: DatePattern,
    /// Copy files instead of renaming
    #[arg(short, long, default_value_t = false)]
    copy: bool,
    /// Process subdirectories recursively
    #[arg(short, long, default_value_t = false)]
    recursive: bool,
    /// Show what would be done without making changes
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    report: ReportFormat,
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let stdout = io::stdout();
    match run(cli, &mut stdout.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one invocation and returns the process exit code.
fn run(cli: Cli, out: &mut impl Write) -> Result<u8> {
    if !cli.path.exists() {
        writeln!(out, "Error: Path does not exist: {}", cli.path.display())?;
        return Ok(1);
    }

    let config = RunConfig {
        output_dir: cli.output,
        pattern: cli.format,
        mode: TransferMode::from_copy_flag(cli.copy),
        recursive: cli.recursive,
        dry_run: cli.dry_run,
    };
    log::debug!("{:?}", config);

    if cli.path.is_file() {
        let result = rename_photo(&cli.path, &config);
        match cli.report {
            ReportFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
            ReportFormat::Table => {
                writeln!(
                    out,
                    "{} {} -> {}",
                    status_mark(&result),
                    result.original_name,
                    result.new_name.as_deref().unwrap_or("ERROR")
                )?;
                writeln!(out, "{}", result.message)?;
            }
        }
        return Ok(if result.success { 0 } else { 1 });
    }

    let table = cli.report == ReportFormat::Table;
    let mut write_error = None;
    let outcome = rename_directory(&cli.path, &config, |event| {
        if table && write_error.is_none() {
            write_error = print_event(out, event).err();
        }
    });
    if let Some(err) = write_error {
        return Err(err.into());
    }

    match outcome {
        Ok(report) => match cli.report {
            ReportFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
            ReportFormat::Table => print_summary(out, &cli.path, &report, config.dry_run)?,
        },
        // Special files land here; a bad directory is reported but is not a failed run.
        Err(err @ (RenameError::NotADirectory(_) | RenameError::Scan { .. })) => {
            writeln!(out, "Error: {err}")?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(0)
}

fn print_event(out: &mut impl Write, event: DirectoryEvent<'_>) -> io::Result<()> {
    match event {
        DirectoryEvent::Found { total } => {
            writeln!(out, "\nFound {} photo(s)", total)?;
            writeln!(out, "{}", "=".repeat(RULE_WIDTH))
        }
        DirectoryEvent::Processed(result) => {
            writeln!(
                out,
                "{} {:40} -> {:40}",
                status_mark(result),
                result.original_name,
                result.new_name.as_deref().unwrap_or("ERROR")
            )?;
            writeln!(out, "  {}", result.message)
        }
    }
}

fn print_summary(
    out: &mut impl Write,
    dir: &Path,
    report: &DirectoryReport,
    dry_run: bool,
) -> io::Result<()> {
    if report.found == 0 {
        return writeln!(out, "No photo files found in {}", dir.display());
    }

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "\nResults: {} successful, {} failed",
        report.successful, report.failed
    )?;
    if dry_run {
        writeln!(out, "(Dry run - no changes made)")?;
    }
    Ok(())
}

fn status_mark(result: &RenameResult) -> &'static str {
    if result.success {
        "✓"
    } else {
        "✗"
    }
}
