//! HDIFF command-line interface.
//!
//! Thin wrapper over the library: reads two files, compares them and prints
//! either a change report or an annotated HTML preview.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use hdiff_rs::{
    compare_detailed, format_diff, preview, read_content, ContentKind, DiffConfig, OutputFormat,
    OutputOptions, PreviewOptions,
};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// HDIFF - Structural diff tool for HTML and plain text
///
/// Compares two versions of an HTML fragment or text file and reports added,
/// removed and renamed elements, attribute changes and character-level text
/// changes, or renders the new version with the changes highlighted.
#[derive(Parser)]
#[command(name = "hdiff")]
#[command(version)]
#[command(about = "Structural diff tool for HTML and plain text", long_about = None)]
#[command(author = "HDIFF Contributors")]
struct Cli {
    /// Old version of the content
    #[arg(value_name = "OLD")]
    old: PathBuf,

    /// New version of the content
    #[arg(value_name = "NEW")]
    new: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// How to compare the inputs
    #[arg(short, long, value_enum, default_value = "auto")]
    mode: ModeArg,

    /// Show full markup of added and removed nodes instead of previews
    #[arg(long)]
    show_values: bool,

    /// Maximum length for displayed values
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// Print unchanged runs of changed text (`false` elides them as `...`)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    show_unchanged_text: bool,

    /// Keep whitespace between tags instead of collapsing it before comparing
    #[arg(long)]
    keep_whitespace: bool,

    /// Tag wrapping the preview output
    #[arg(long, default_value = "div")]
    container_tag: String,

    /// Do not mark elements with structural changes in the preview
    #[arg(long)]
    no_markers: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
    /// Annotated HTML preview of the new content
    Preview,
}

/// Comparison mode argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ModeArg {
    /// Detect markup from the input
    Auto,
    /// Always compare as HTML trees
    Html,
    /// Always compare as flat text
    Text,
}

impl From<ModeArg> for Option<ContentKind> {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => None,
            ModeArg::Html => Some(ContentKind::Html),
            ModeArg::Text => Some(ContentKind::Text),
        }
    }
}

impl OutputFormatArg {
    fn report_format(self) -> Option<OutputFormat> {
        match self {
            OutputFormatArg::Terminal => Some(OutputFormat::Terminal),
            OutputFormatArg::Json => Some(OutputFormat::Json),
            OutputFormatArg::Plain => Some(OutputFormat::Plain),
            OutputFormatArg::Preview => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    debug!(path = %cli.old.display(), "reading old content");
    let old = read_content(&cli.old)
        .with_context(|| format!("Failed to read old file: {}", cli.old.display()))?;

    debug!(path = %cli.new.display(), "reading new content");
    let new = read_content(&cli.new)
        .with_context(|| format!("Failed to read new file: {}", cli.new.display()))?;

    let config = DiffConfig {
        normalize_whitespace: !cli.keep_whitespace,
        content_kind: cli.mode.into(),
        ..Default::default()
    };

    debug!("computing diff");
    let comparison = compare_detailed(&old, &new, &config);
    let changed = comparison.result.changed;

    let output = match cli.format.report_format() {
        Some(format) => {
            let options = OutputOptions {
                show_values: cli.show_values,
                max_value_length: cli.max_value_length,
                show_unchanged_text: cli.show_unchanged_text,
            };
            format_diff(&comparison.result, &format, &options)
                .context("Failed to format diff output")?
        }
        None => {
            let options = PreviewOptions {
                container_tag: cli.container_tag.clone(),
                mark_structural: !cli.no_markers,
                ..Default::default()
            };
            preview::render_comparison(&comparison, &old, &options)
                .context("Invalid preview options")?
        }
    };

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    if changed {
        Ok(1)
    } else {
        Ok(0)
    }
}
