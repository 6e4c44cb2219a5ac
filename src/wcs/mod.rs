//! World-coordinate handling: header scaling, angular units and axis coordinates.

/// Pixel-to-world axis coordinates and image extent.
pub mod axes;
/// Header values required for axis scaling.
pub mod header;
/// Angular unit conversion factors.
pub mod units;
