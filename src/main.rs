//! Quacksense: Pseudoscience Risk Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use globset::GlobSet;
use log::{debug, warn};
use quacksense::analyzer::{AnalysisEngine, AnalyzedDocument};
use quacksense::config::{build_ignore_set, is_ignored, load_config, Config, CONFIG_FILENAME};
use quacksense::lexicon::canonical_language;
use quacksense::reporter::{ConsoleReporter, HtmlReporter, JsonReporter};
use quacksense::{AnalysisResult, Verdict};
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Directories never descended into when collecting files
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Quacksense: scores text for markers of pseudoscientific medical claims
#[derive(Parser, Debug)]
#[command(name = "quacksense")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text file or directory to analyze (reads stdin when omitted)
    path: Option<PathBuf>,

    /// Analyze this text instead of a file
    #[arg(long, short, conflicts_with = "path")]
    text: Option<String>,

    /// Text language: ru, en (default: from config, else ru)
    #[arg(long, short)]
    language: Option<String>,

    /// Report format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Path to config file (default: search .quacksenserc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit with status 1 when any verdict reaches this tier (low, moderate, high, critical)
    #[arg(long, value_name = "VERDICT")]
    fail_on: Option<Verdict>,

    /// Quiet mode (one line per document)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (all categories and markers)
    #[arg(long, short)]
    verbose: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .quacksenserc.json with sensible defaults
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Default text language (ru, en)
        #[arg(long)]
        language: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(Commands::Init { dir, language }) = &args.command {
        return run_init(dir.as_deref(), language.as_deref());
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = config_search_dir(args.path.as_deref(), &cwd);

    // CLI flags override the config file
    let config = load_config(&work_dir, args.config.as_deref())?
        .merge_with_cli(args.language.clone(), args.fail_on);
    let engine = AnalysisEngine::from_config(&config)?;
    debug!(
        "engine ready: language {}, {} lexicons",
        engine.options().language,
        engine.lexicons().len()
    );

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let docs = if let Some(text) = args.text.clone() {
        vec![engine.analyze_document(text, None, None)?]
    } else if let Some(path) = &args.path {
        let ignore_set = if config.ignore.is_empty() {
            None
        } else {
            Some(build_ignore_set(&config.ignore)?)
        };
        let files = collect_text_files(path, ignore_set.as_ref(), &config.extensions())?;
        if files.is_empty() {
            eprintln!("{}: No text files found", "Warning".yellow());
            return Ok(ExitCode::from(2));
        }
        let docs = analyze_files(&engine, &files, args.quiet);
        if docs.is_empty() {
            eprintln!("{}: All files failed to analyze", "Error".red());
            return Ok(ExitCode::from(2));
        }
        docs
    } else {
        let text = read_stdin()?;
        vec![engine.analyze_document(text, None, None)?]
    };

    let results: Vec<AnalysisResult> = docs.iter().map(|d| d.result.clone()).collect();
    let stats = AnalysisEngine::aggregate_stats(&results);

    let report = render_report(&args, &docs, &stats);
    match &args.output {
        Some(output) => {
            fs::write(output, &report)
                .with_context(|| format!("Failed to write report: {}", output.display()))?;
            if !args.quiet {
                eprintln!("{} Report written to {}", "✓".green(), output.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(ExitCode::from(exit_status(config.fail_on, stats.worst_verdict)))
}

/// Directory where the config search starts for the given input
fn config_search_dir(path: Option<&Path>, cwd: &Path) -> PathBuf {
    match path {
        Some(path) if path.is_file() => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => cwd.to_path_buf(),
        },
        Some(path) => path.to_path_buf(),
        None => cwd.to_path_buf(),
    }
}

/// 1 when the worst verdict reaches the fail-on tier, else 0
fn exit_status(fail_on: Option<Verdict>, worst: Verdict) -> u8 {
    match fail_on {
        Some(threshold) if worst >= threshold => 1,
        _ => 0,
    }
}

fn render_report(
    args: &Args,
    docs: &[AnalyzedDocument],
    stats: &quacksense::analyzer::AggregateStats,
) -> String {
    match args.format {
        OutputFormat::Json => {
            let reporter = JsonReporter::new().pretty();
            let mut json = if docs.len() == 1 {
                reporter.report(&docs[0])
            } else {
                reporter.report_with_summary(docs, stats)
            };
            json.push('\n');
            json
        }
        OutputFormat::Html => HtmlReporter::new().report(docs, stats),
        OutputFormat::Text => {
            let mut reporter = ConsoleReporter::new();
            if args.output.is_some() {
                reporter = reporter.without_colors();
            }
            if args.verbose {
                reporter = reporter.verbose();
            }

            if args.quiet {
                docs.iter()
                    .map(|d| format!("{}\n", reporter.render_quiet(d)))
                    .collect()
            } else if docs.len() == 1 {
                reporter.render(&docs[0])
            } else {
                reporter.render_many(docs, stats)
            }
        }
    }
}

/// Analyze files in parallel; failures are reported and skipped
fn analyze_files(engine: &AnalysisEngine, files: &[PathBuf], quiet: bool) -> Vec<AnalyzedDocument> {
    let mut docs = Vec::with_capacity(files.len());
    for (path, outcome) in files.iter().zip(engine.analyze_many_parallel(files)) {
        match outcome {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                warn!("skipping {}: {:#}", path.display(), e);
                if !quiet {
                    eprintln!("{}: {:#}", "Warning".yellow(), e);
                }
            }
        }
    }
    docs
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!(
            "{}",
            "Enter the text to analyze, then press Ctrl-D (Ctrl-Z on Windows):".dimmed()
        );
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

fn run_init(dir: Option<&Path>, language: Option<&str>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let language = canonical_language(language.unwrap_or(quacksense::config::DEFAULT_LANGUAGE))?;
    let json = serde_json::to_string_pretty(&Config::starter(language))
        .context("Failed to serialize config")?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Created {}", "✓".green(), config_path.display());
    Ok(ExitCode::SUCCESS)
}

fn collect_text_files(
    path: &Path,
    ignore_set: Option<&GlobSet>,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        // An explicitly named file is analyzed whatever its extension
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e.path()) || e.depth() == 0)
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && is_text_file(file_path, extensions) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_text_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| extensions.iter().any(|x| *x == e))
}
