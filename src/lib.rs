//! svgfit - fit an SVG's viewBox to its paths
//!
//! svgfit measures every `<path>` in a document (transforms included), then
//! rewrites `viewBox`, `width` and `height` on the root `<svg>` to frame them.
//! Everything else in the file is written back untouched.

mod ast;
mod bounds;
mod error;
mod fit;
mod number;
mod parse;
mod path;
mod scan;
mod serialize;
mod transform;

use std::fs;
use std::path::Path as FsPath;

pub use ast::*;
pub use bounds::*;
pub use error::*;
pub use fit::*;
pub use number::*;
pub use parse::*;
pub use path::{Command, Path, parse_path};
pub use serialize::*;
pub use transform::*;

/// Fitting options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Space added around the bounds on every side, in user units (default: 0)
    pub padding: f64,
    /// Number of decimal places for written values (default: 4)
    pub precision: u8,
    /// Report the result without writing files
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            padding: 0.0,
            precision: 4,
            dry_run: false,
        }
    }
}

/// Fit an SVG string, returning the outcome and the serialized document.
///
/// When the document is skipped the output is the input, unchanged.
pub fn fit_svg(svg: &str, options: &Options) -> Result<(Fit, String), FitError> {
    let mut doc = parse_svg(svg)?;
    let fit = fit_document(&mut doc, options);
    let output = match fit.outcome {
        Outcome::Fitted(_) => serialize(&doc),
        Outcome::Skipped(_) => svg.to_owned(),
    };
    Ok((fit, output))
}

/// Fit the SVG file at `path` in place. Nothing is written for skipped files
/// or in dry-run mode.
pub fn fit_file(path: &FsPath, options: &Options) -> Result<Fit, FitError> {
    let input = fs::read_to_string(path).map_err(|source| FitError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (fit, output) = fit_svg(&input, options)?;

    if matches!(fit.outcome, Outcome::Fitted(_)) && !options.dry_run {
        fs::write(path, output).map_err(|source| FitError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(fit)
}
