//! Scalar cube data and the shared colour scale.

/// Frames, cubes and the cube JSON document.
pub mod cube;
/// Global colour-scale selection.
pub mod scale;
