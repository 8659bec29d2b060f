//! Number formatting for attribute values.

/// Format a number with at most `precision` decimal places and no trailing zeros.
///
/// `10.50` prints as `10.5`, `10.0` as `10`, and `-0` as `0`. Rounding works
/// on the exact binary value and sends exact ties away from zero, so 10.005
/// (really 10.00499...) goes down to `10` while 2.5 goes up to `3`.
pub fn format_number(n: f64, precision: u8) -> String {
    let prec = precision as usize;
    let magnitude = n.abs();
    // Fixed-precision formatting sends ties to even; the next float up is past the tie
    let nudged = if is_tie(magnitude, prec) {
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };
    let fixed = format!("{:.prec$}", nudged);
    let rounded = fixed.parse::<f64>().unwrap_or(magnitude);
    shortest(rounded.copysign(n))
}

/// Whether `n` sits exactly halfway between two multiples of `10^-prec`.
fn is_tie(n: f64, prec: usize) -> bool {
    if !n.is_finite() {
        return false;
    }
    // 1100 places hold the full expansion of any finite f64
    let exact = format!("{:.1100}", n);
    let frac = exact.split_once('.').map_or("", |(_, frac)| frac);
    match frac.get(prec..).and_then(|rest| rest.strip_prefix('5')) {
        Some(rest) => rest.bytes().all(|b| b == b'0'),
        None => false,
    }
}

/// The shortest decimal representation that reads back as `n`.
///
/// Plain decimal notation is used from 1e-6 up to below 1e21; outside that
/// range the exponent form reads `1e-7`, `1.5e+21`.
pub fn shortest(n: f64) -> String {
    if n == 0.0 {
        return "0".into();
    }
    if !n.is_finite() {
        return n.to_string();
    }

    let mut buf = ryu::Buffer::new();
    let s = buf.format_finite(n);
    match s.split_once('e') {
        Some((mantissa, exp)) => expand_exponent(mantissa, exp),
        None => s.strip_suffix(".0").unwrap_or(s).to_string(),
    }
}

/// Rewrite ryu's `d.ddde±x` output in plain notation where it fits.
fn expand_exponent(mantissa: &str, exp: &str) -> String {
    let Ok(exp) = exp.parse::<i32>() else {
        return format!("{}e{}", mantissa, exp);
    };
    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{}{}", int, frac);
    // Position of the decimal point relative to the start of `digits`
    let point = int.len() as i32 + exp;

    if !(-5..=21).contains(&point) {
        let exp = if exp > 0 {
            format!("+{}", exp)
        } else {
            exp.to_string()
        };
        return format!("{}{}e{}", sign, unsigned, exp);
    }

    let body = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    };
    format!("{}{}", sign, body)
}
