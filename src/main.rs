// ABOUTME: Main entry point for the premark program.
// ABOUTME: Provides the CLI interface and renders a presentation to HTML.

use anyhow::Context;
use clap::Parser;
use log::{debug, LevelFilter};
use premark::config::KEY_OUTPUT_FILE;
use premark::{utils, Defaults, FileSource, PackageData, Presentation, PresentationOptions};
use std::path::PathBuf;

/// Generate a Remark.js HTML presentation from input markdown SOURCE.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Markdown file, or a directory of sections
    source: PathBuf,

    /// Path of premark configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Custom HTML template for the presentation
    #[arg(long)]
    html: Option<PathBuf>,

    /// Custom CSS to be included inline
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// HTML title of the presentation
    #[arg(short, long)]
    title: Option<String>,

    /// Write the output to a file instead of STDOUT
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Output debugging info
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    utils::validate_path_exists(&cli.source)?;
    for path in [&cli.config, &cli.html, &cli.stylesheet].into_iter().flatten() {
        utils::validate_file_exists(path)?;
    }

    let config = cli.config.clone().or_else(|| utils::discover_config(&cli.source));

    if cli.verbose {
        eprintln!("Input:");
        eprintln!("source: {}", cli.source.display());
        eprintln!("html template: {:?}", cli.html);
        eprintln!("stylesheet: {:?}", cli.stylesheet);
        eprintln!("title: {:?}", cli.title);
        eprintln!("config: {:?}", config);
        eprintln!("output file: {:?}", cli.outfile);
    }

    let defaults = Defaults::bundled(PackageData::from_env());
    let options = PresentationOptions {
        source: Some(FileSource::FilePath(cli.source.clone())),
        html_template: cli.html.clone().map(FileSource::FilePath),
        stylesheet: cli.stylesheet.clone().map(FileSource::FilePath),
        title: cli.title.clone(),
        config_file: config.map(FileSource::FilePath),
        ..PresentationOptions::default()
    };
    debug!("premark cli running with options: {:?}", options);

    let presentation = Presentation::with_defaults(options, &defaults)?;
    let html = presentation.to_html()?;

    let outfile = match cli.outfile {
        Some(path) => Some(path),
        None => presentation.config().get_path(KEY_OUTPUT_FILE)?,
    };
    premark::write_html(&html, outfile.as_deref())
        .with_context(|| format!("Failed to write output to {:?}", outfile))?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
