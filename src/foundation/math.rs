use crate::foundation::error::{CubeAnimError, CubeAnimResult};

/// Largest sample count [`arange`] will allocate.
pub const MAX_ARANGE_LEN: usize = 1 << 24;

/// Evenly spaced values in the half-open interval `[start, stop)`.
///
/// Length is `ceil((stop - start) / step)` clamped at zero and element `i` is `start + i * step`,
/// so accumulated floating-point error can add or drop one sample near `stop`. Ranges longer
/// than [`MAX_ARANGE_LEN`] are a configuration error.
pub fn arange(start: f64, stop: f64, step: f64) -> CubeAnimResult<Vec<f64>> {
    if step == 0.0 {
        return Err(CubeAnimError::config("arange step must be non-zero"));
    }
    if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
        return Err(CubeAnimError::config("arange bounds and step must be finite"));
    }

    let n = ((stop - start) / step).ceil();
    if n <= 0.0 {
        return Ok(Vec::new());
    }
    if n > MAX_ARANGE_LEN as f64 {
        return Err(CubeAnimError::config(format!(
            "arange [{start}, {stop}) with step {step} would produce {n:e} samples (limit {MAX_ARANGE_LEN})"
        )));
    }
    let n = n as usize;
    Ok((0..n).map(|i| start + (i as f64) * step).collect())
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
