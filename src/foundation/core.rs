use crate::foundation::error::{CubeAnimError, CubeAnimResult};

pub use kurbo::{Point, Rect};

/// 0-based frame index into the cube (and therefore the output timeline).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> CubeAnimResult<Self> {
        if den == 0 {
            return Err(CubeAnimError::config("fps denominator must be > 0"));
        }
        if num == 0 {
            return Err(CubeAnimError::config("fps must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Smallest canvas edge that still leaves room for the axes decorations.
    pub const MIN_EDGE: u32 = 64;

    /// Validate canvas dimensions.
    pub fn validate(self) -> CubeAnimResult<()> {
        if self.width < Self::MIN_EDGE || self.height < Self::MIN_EDGE {
            return Err(CubeAnimError::config(format!(
                "canvas must be at least {0}x{0}, got {1}x{2}",
                Self::MIN_EDGE,
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Number of bytes in one RGBA8 frame of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Bounding box `(left, right, bottom, top)` placing an image in physical coordinates.
///
/// `left > right` is legal and means the x axis decreases from left to right.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    /// Physical coordinate at the left image edge.
    pub left: f64,
    /// Physical coordinate at the right image edge.
    pub right: f64,
    /// Physical coordinate at the bottom image edge.
    pub bottom: f64,
    /// Physical coordinate at the top image edge.
    pub top: f64,
}

impl Extent {
    /// Extent in `[left, right, bottom, top]` order.
    pub fn as_array(self) -> [f64; 4] {
        [self.left, self.right, self.bottom, self.top]
    }

    /// Absolute physical width.
    pub fn width(self) -> f64 {
        (self.right - self.left).abs()
    }

    /// Absolute physical height.
    pub fn height(self) -> f64 {
        (self.top - self.bottom).abs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
