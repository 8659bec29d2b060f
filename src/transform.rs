//! The SVG `transform` attribute.
//!
//! Transform list syntax: https://www.w3.org/TR/SVG11/coords.html#TransformAttribute

use std::str::FromStr;

use kurbo::Affine;

use crate::error::FitError;

/// Parse a transform list such as `translate(10,0) scale(2)` into a single matrix.
///
/// Functions compose in list order, so the rightmost one is applied to points first.
pub fn parse_transform(input: &str) -> Result<Affine, FitError> {
    let ts = svgtypes::Transform::from_str(input)
        .map_err(|e| FitError::InvalidTransform(format!("`{}`: {}", input.trim(), e)))?;
    Ok(Affine::new([ts.a, ts.b, ts.c, ts.d, ts.e, ts.f]))
}
