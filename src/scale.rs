//! Linear rescaling of raw magnitudes into integer visual channels.
//!
//! Every call establishes its own minimum and maximum, so encodings are relative to the slice
//! passed in (one node layer, or one row of a connection matrix), never global.

use crate::foundation::error::{NetreelError, NetreelResult};

/// Map `values` linearly from `[min(values), max(values)]` onto `range = (b1, b2)`.
///
/// The minimum lands on `b1`, the maximum on `b2`; either endpoint order is accepted. Results
/// are truncated toward zero. When every value is equal (including a single value) each output
/// is `b2`.
///
/// Fails with [`NetreelError::InvalidInput`] for an empty slice or non-finite values.
pub fn map_range_int(values: &[f64], range: (i64, i64)) -> NetreelResult<Vec<i64>> {
    let (a1, a2) = extremes(values)?;
    let (b1, b2) = range;

    if a2 == a1 {
        return Ok(vec![b2; values.len()]);
    }

    let (lo, hi) = (b1.min(b2), b1.max(b2));
    let (fb1, fb2) = (b1 as f64, b2 as f64);
    Ok(values
        .iter()
        .map(|&s| {
            if s == a2 {
                return b2;
            }
            let v = fb1 + (s - a1) * (fb2 - fb1) / (a2 - a1);
            (v.trunc() as i64).clamp(lo, hi)
        })
        .collect())
}

fn extremes(values: &[f64]) -> NetreelResult<(f64, f64)> {
    let Some(&first) = values.first() else {
        return Err(NetreelError::invalid_input(
            "cannot normalize an empty magnitude sequence",
        ));
    };

    let mut min = first;
    let mut max = first;
    for &v in values {
        if !v.is_finite() {
            return Err(NetreelError::invalid_input(format!(
                "magnitude {v} is not finite"
            )));
        }
        min = min.min(v);
        max = max.max(v);
    }
    Ok((min, max))
}

#[cfg(test)]
#[path = "../tests/unit/scale.rs"]
mod tests;
