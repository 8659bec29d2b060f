use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use svgfit::{Options, Outcome, fit_file};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "svgfit", version)]
#[command(
    about = "Fit an SVG's viewBox, width and height to the bounds of its paths",
    long_about = None,
    arg_required_else_help = true
)]
struct Cli {
    /// SVG files to update in place (any argument that is not an option)
    #[arg(required = true, value_name = "SVG")]
    targets: Vec<PathBuf>,

    /// Padding around the detected bounds, in SVG units (may be negative)
    #[arg(
        short,
        long,
        default_value = "0",
        allow_negative_numbers = true,
        value_parser = parse_padding
    )]
    padding: f64,

    /// Decimal places to keep when writing numbers
    #[arg(long, default_value = "4")]
    precision: u8,

    /// Print the computed viewBox without modifying files
    #[arg(long)]
    dry_run: bool,
}

fn parse_padding(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(format!("`{}` is not a finite number", s)),
    }
}

/// Options that read the following argument as their value.
const VALUE_OPTIONS: &[&str] = &["-p", "--padding", "--precision"];

/// Options that stand alone.
const SWITCHES: &[&str] = &["--dry-run", "-h", "--help", "-V", "--version"];

/// Reorder the command line so every argument that is not an option reaches
/// clap as a target, even one starting with `-` such as `-logo.svg`.
///
/// Options keep working wherever they appear; targets keep their order and
/// are moved behind a `--`. When no target starts with `-` the arguments are
/// returned unchanged so clap reports problems with the original line.
fn targets_after_options(args: Vec<OsString>) -> Vec<OsString> {
    let mut options = Vec::with_capacity(args.len() + 1);
    let mut targets = Vec::new();
    let mut hyphenated = false;

    let mut iter = args.iter().cloned();
    options.extend(iter.next());
    while let Some(arg) = iter.next() {
        let text = arg.to_string_lossy().into_owned();
        if text == "--" {
            hyphenated = true;
            targets.extend(iter.by_ref());
        } else if VALUE_OPTIONS.contains(&text.as_str()) {
            let Some(value) = iter.next() else {
                return args;
            };
            options.push(arg);
            options.push(value);
        } else if SWITCHES.contains(&text.as_str())
            || text.starts_with("--padding=")
            || text.starts_with("--precision=")
        {
            options.push(arg);
        } else {
            hyphenated |= text.starts_with('-') && text != "-";
            targets.push(arg);
        }
    }

    if !hyphenated {
        return args;
    }
    options.push(OsString::from("--"));
    options.extend(targets);
    options
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .init();

    let cli = Cli::parse_from(targets_after_options(std::env::args_os().collect()));

    let options = Options {
        padding: cli.padding,
        precision: cli.precision,
        dry_run: cli.dry_run,
    };

    for target in &cli.targets {
        let fit = fit_file(target, &options)?;

        for failure in &fit.failures {
            warn!(
                "Unable to compute bounds for a path in {}: {}",
                target.display(),
                failure.error
            );
        }

        match fit.outcome {
            Outcome::Fitted(view_box) => {
                let mode = if options.dry_run { "dry-run" } else { "updated" };
                println!("[{}] {} → viewBox {}", mode, target.display(), view_box);
            }
            Outcome::Skipped(reason) => {
                warn!("Skipping {}: {}", target.display(), reason);
            }
        }
    }

    Ok(())
}
