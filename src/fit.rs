//! Fitting the root `<svg>` to the geometry of its paths.

use std::fmt;

use kurbo::Affine;
use tracing::debug;

use crate::Options;
use crate::ast::*;
use crate::bounds::Rect;
use crate::error::FitError;
use crate::number::format_number;
use crate::path::parse_path;
use crate::transform::parse_transform;

/// Why a document was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `<svg>` element anywhere in the document
    MissingRoot,
    /// No `<path>` produced finite bounds
    NoBounds,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRoot => f.write_str("<svg> root not found"),
            SkipReason::NoBounds => f.write_str("no <path> elements with calculable bounds"),
        }
    }
}

/// A path whose bounds could not be computed.
#[derive(Debug)]
pub struct PathFailure {
    /// Position among the document's `<path>` elements, from 0
    pub index: usize,
    pub error: FitError,
}

/// What happened to one document.
#[derive(Debug)]
pub struct Fit {
    pub outcome: Outcome,
    /// Paths dropped from the bounds, in document order
    pub failures: Vec<PathFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The root was rewritten; carries the `viewBox` value that was set
    Fitted(String),
    Skipped(SkipReason),
}

/// The box written to the root, after padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Grow `bounds` by `padding` on every side. Negative padding shrinks it,
    /// possibly past zero; the result is not clamped.
    pub fn from_bounds(bounds: &Rect, padding: f64) -> Self {
        let min_x = bounds.min_x - padding;
        let min_y = bounds.min_y - padding;
        let max_x = bounds.max_x + padding;
        let max_y = bounds.max_y + padding;
        Self {
            min_x,
            min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// The `viewBox` attribute value: `min-x min-y width height`.
    pub fn to_attr(&self, precision: u8) -> String {
        [self.min_x, self.min_y, self.width, self.height]
            .iter()
            .map(|n| format_number(*n, precision))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The `transform` attributes in effect for `id`, outermost first, joined by a space.
///
/// Covers the element itself and every ancestor element; empty when none has one.
pub fn collect_transforms(doc: &Document, id: NodeId) -> String {
    let mut chain: Vec<String> = Vec::new();
    for ancestor in doc.ancestors(id) {
        if let Some(value) = doc.element(ancestor).and_then(|e| e.attr("transform")) {
            let value = value.trim();
            if !value.is_empty() {
                chain.push(value.to_owned());
            }
        }
    }
    chain.reverse();
    chain.join(" ")
}

/// Bounds of one `<path>` in root user space.
///
/// `Ok(None)` means the path contributes nothing: it has no `d`, or its
/// bounds are not finite.
pub fn path_bounds(doc: &Document, id: NodeId) -> Result<Option<Rect>, FitError> {
    let Some(elem) = doc.element(id) else {
        return Ok(None);
    };
    let Some(d) = elem.attr("d").filter(|d| !d.is_empty()) else {
        return Ok(None);
    };

    let path = parse_path(&d)?.to_absolute();
    let chain = collect_transforms(doc, id);
    let transform = if chain.is_empty() {
        Affine::IDENTITY
    } else {
        debug!(transform = %chain, d = %path, "applying transform chain");
        parse_transform(&chain)?
    };

    let rect = path.bounds(transform)?;
    if !rect.is_finite() {
        debug!(?rect, "dropping path with non-finite bounds");
        return Ok(None);
    }
    Ok(Some(rect))
}

/// Union of the bounds of every `<path>` in the document, with the failures
/// met along the way. `None` when no path contributed.
pub fn document_bounds(doc: &Document) -> (Option<Rect>, Vec<PathFailure>) {
    let mut union = Rect::EMPTY;
    let mut processed = 0usize;
    let mut failures = Vec::new();

    for (index, id) in doc.find_all("path").into_iter().enumerate() {
        match path_bounds(doc, id) {
            Ok(Some(rect)) => {
                debug!(index, ?rect, "path bounds");
                union = union.union(&rect);
                processed += 1;
            }
            Ok(None) => {}
            Err(error) => failures.push(PathFailure { index, error }),
        }
    }

    ((processed > 0).then_some(union), failures)
}

/// Set `viewBox`, `width` and `height` on the first `<svg>` element so it
/// frames every path, plus `options.padding` on each side.
pub fn fit_document(doc: &mut Document, options: &Options) -> Fit {
    let Some(root) = doc.find_first("svg") else {
        return Fit {
            outcome: Outcome::Skipped(SkipReason::MissingRoot),
            failures: Vec::new(),
        };
    };

    let (bounds, failures) = document_bounds(doc);
    let Some(bounds) = bounds else {
        return Fit {
            outcome: Outcome::Skipped(SkipReason::NoBounds),
            failures,
        };
    };

    let view_box = ViewBox::from_bounds(&bounds, options.padding);
    let attr = view_box.to_attr(options.precision);
    if let Some(elem) = doc.element_mut(root) {
        elem.set_attr("viewBox", &attr);
        elem.set_attr("width", &format_number(view_box.width, options.precision));
        elem.set_attr("height", &format_number(view_box.height, options.precision));
    }

    Fit {
        outcome: Outcome::Fitted(attr),
        failures,
    }
}
