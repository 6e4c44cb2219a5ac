use crate::foundation::core::Extent;
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::foundation::math::arange;
use crate::wcs::header::Header;
use crate::wcs::units::AngularUnit;

/// Physical axis coordinates derived once per render from the header and frame shape.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Horizontal coordinates, running from `x1` towards `-x1`.
    pub x: Vec<f64>,
    /// Vertical coordinates, running from `-y1` towards `y1`.
    pub y: Vec<f64>,
    /// Horizontal reference offset, `(crpix1 - 1) * |dx|`.
    pub x1: f64,
    /// Vertical reference offset, `(crpix2 - 1) * dy`.
    pub y1: f64,
    /// Frame shape `(rows, cols)` these coordinates were computed for.
    pub shape: (usize, usize),
}

impl AxisSpec {
    /// Image extent `(x1, -x1, -y1, y1)` as passed to the image render.
    pub fn extent(&self) -> Extent {
        Extent {
            left: self.x1,
            right: -self.x1,
            bottom: -self.y1,
            top: self.y1,
        }
    }

    /// Whether the coordinate arrays have one entry per pixel column and row.
    ///
    /// The arrays come from the header's reference pixel, not the frame size, so this is often
    /// `false` for real data.
    pub fn matches_shape(&self) -> bool {
        self.x.len() == self.shape.1 && self.y.len() == self.shape.0
    }
}

/// Maps frame pixels to world coordinates using header scaling and an angular unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisMapper {
    header: Header,
    unit: AngularUnit,
}

impl AxisMapper {
    /// Create a mapper for `header` rescaled into `unit`.
    pub fn new(header: Header, unit: AngularUnit) -> Self {
        Self { header, unit }
    }

    /// Unit conversion factor applied to `cdelt`.
    pub fn factor(&self) -> f64 {
        self.unit.factor()
    }

    /// Pixel steps `(dx, dy)` in the target unit.
    pub fn steps(&self) -> (f64, f64) {
        let factor = self.factor();
        (self.header.cdelt1 * factor, self.header.cdelt2 * factor)
    }

    /// Compute axis coordinates for a frame of `shape = (rows, cols)`.
    ///
    /// `x1` takes the absolute value of `dx` but `y1` keeps the sign of `dy`; a negative `cdelt2`
    /// therefore flips the vertical extent.
    pub fn config_axes(&self, shape: (usize, usize)) -> CubeAnimResult<AxisSpec> {
        let (dx, dy) = self.steps();
        if dx == 0.0 || dy == 0.0 {
            return Err(CubeAnimError::config(format!(
                "header cdelt values must be non-zero (cdelt1={}, cdelt2={})",
                self.header.cdelt1, self.header.cdelt2
            )));
        }

        let x1 = (self.header.crpix1 - 1.0) * dx.abs();
        let y1 = (self.header.crpix2 - 1.0) * dy;
        let x = arange(x1, -x1 - dx, -dx)?;
        let y = arange(-y1, y1 + dy, dy)?;

        let spec = AxisSpec {
            x,
            y,
            x1,
            y1,
            shape,
        };
        if !spec.matches_shape() {
            tracing::debug!(
                x_len = spec.x.len(),
                y_len = spec.y.len(),
                rows = shape.0,
                cols = shape.1,
                "axis coordinate lengths differ from frame shape"
            );
        }
        Ok(spec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wcs/axes.rs"]
mod tests;
