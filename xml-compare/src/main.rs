use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use xml_compare::config::load_config;
use xml_compare::report::{render_summary, render_text};
use xml_compare_core::{compare_with_options, format_json, CompareOptions};

mod cli;

use cli::{Cli, OutputFormat};

const EXIT_DIFFERENT: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_DIFFERENT),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let opts = resolve_options(&cli)?;
    debug!("options: {opts:?}");

    if is_stdin(&cli.lhs) && is_stdin(&cli.rhs) {
        bail!("stdin can be used for at most one side");
    }

    let lhs = read_side(&cli.lhs, cli.missing_as_nil)?;
    let rhs = read_side(&cli.rhs, cli.missing_as_nil)?;

    info!("comparing {} with {}", cli.lhs.display(), cli.rhs.display());
    let result = compare_with_options(lhs.as_ref(), rhs.as_ref(), &opts).with_context(|| {
        format!(
            "failed to compare {} with {}",
            cli.lhs.display(),
            cli.rhs.display()
        )
    })?;
    info!("equivalent={} reason={}", result.succeeded(), result.reason());

    if !cli.quiet {
        if cli.summary {
            println!("{}", render_summary(&result));
        } else {
            match cli.format {
                OutputFormat::Text => println!("{}", render_text(&result)),
                OutputFormat::Json => println!("{}", format_json(&result)),
            }
        }
    }

    Ok(result.succeeded())
}

fn resolve_options(cli: &Cli) -> Result<CompareOptions> {
    let mut opts = match &cli.config {
        Some(path) => {
            load_config(path)
                .context("failed to load comparison options")?
                .compare
        }
        None => CompareOptions::default(),
    };

    if cli.normalize_whitespace {
        opts.normalize_whitespace = true;
    }
    if cli.ignore_order {
        opts.element_order = false;
    }
    if cli.equate_nil_and_empty {
        opts.equate_nil_and_empty = true;
    }
    if let Some(depth) = cli.max_depth {
        opts.max_depth = Some(depth);
    }
    Ok(opts)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read one side; `None` stands for a missing document.
fn read_side(path: &Path, missing_as_nil: bool) -> Result<Option<String>> {
    if is_stdin(path) {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
        return Ok(Some(raw));
    }

    if missing_as_nil && !path.exists() {
        debug!("{} does not exist, treating it as nil", path.display());
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(raw))
}
