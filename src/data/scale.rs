use crate::data::cube::Cube;
use crate::foundation::error::{CubeAnimError, CubeAnimResult};

/// Value range `(vmin, vmax)` mapped onto the colormap, shared by every frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorScale {
    /// Value mapped to the bottom of the colormap.
    pub vmin: f64,
    /// Value mapped to the top of the colormap.
    pub vmax: f64,
}

impl ColorScale {
    /// Create an explicit scale; bounds must be finite with `vmin <= vmax`.
    pub fn new(vmin: f64, vmax: f64) -> CubeAnimResult<Self> {
        if !vmin.is_finite() || !vmax.is_finite() {
            return Err(CubeAnimError::config(format!(
                "vmin/vmax must be finite, got ({vmin}, {vmax})"
            )));
        }
        if vmin > vmax {
            return Err(CubeAnimError::config(format!(
                "vmin must be <= vmax, got ({vmin}, {vmax})"
            )));
        }
        Ok(Self { vmin, vmax })
    }

    /// Global extrema over every finite sample of the cube.
    pub fn from_cube(cube: &Cube) -> CubeAnimResult<Self> {
        let (vmin, vmax) = cube
            .frames()
            .iter()
            .filter_map(|f| f.finite_min_max())
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
            .ok_or_else(|| CubeAnimError::validation("cube contains no finite samples"))?;
        Ok(Self { vmin, vmax })
    }

    /// Use both supplied bounds, or derive both from the cube when neither is supplied.
    ///
    /// Supplying only one bound is a configuration error.
    pub fn resolve(cube: &Cube, vmin: Option<f64>, vmax: Option<f64>) -> CubeAnimResult<Self> {
        match (vmin, vmax) {
            (Some(lo), Some(hi)) => Self::new(lo, hi),
            (None, None) => Self::from_cube(cube),
            (Some(_), None) => Err(CubeAnimError::config(
                "vmin was given without vmax; supply both bounds or neither",
            )),
            (None, Some(_)) => Err(CubeAnimError::config(
                "vmax was given without vmin; supply both bounds or neither",
            )),
        }
    }

    /// Map `v` into `[0, 1]`, clamping out-of-range values.
    ///
    /// Returns `None` for non-finite samples. A zero-width scale maps everything to 0.
    pub fn normalize(&self, v: f64) -> Option<f64> {
        if !v.is_finite() {
            return None;
        }
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return Some(0.0);
        }
        Some(((v - self.vmin) / span).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/scale.rs"]
mod tests;
