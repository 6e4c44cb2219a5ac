use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use anyhow::Context as _;
use std::path::Path;

/// A single 2D scalar frame, row-major.
///
/// Row 0 is the bottom row of the displayed image.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Frame {
    /// Create a frame from row-major samples.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> CubeAnimResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(CubeAnimError::validation(format!(
                "frame must be non-empty, got {rows}x{cols}"
            )));
        }
        if data.len() != rows * cols {
            return Err(CubeAnimError::validation(format!(
                "frame data has {} samples, expected {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a frame from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> CubeAnimResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(CubeAnimError::validation(format!(
                "frame row {i} has {} columns, expected {n_cols}",
                r.len()
            )));
        }
        Self::new(n_rows, n_cols, rows.into_iter().flatten().collect())
    }

    /// Frame shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Sample at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Row-major samples.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Minimum and maximum over finite samples, or `None` when there are none.
    pub fn finite_min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Ordered frames sliced along a physical axis, one axis value per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Cube {
    frames: Vec<Frame>,
    axis: Vec<f64>,
}

impl Cube {
    /// Build a validated cube.
    ///
    /// Fails when the cube is empty, frame shapes differ, the axis length differs from the frame
    /// count, or an axis value is not finite.
    pub fn new(frames: Vec<Frame>, axis: Vec<f64>) -> CubeAnimResult<Self> {
        let Some(first) = frames.first() else {
            return Err(CubeAnimError::config("cube must contain at least one frame"));
        };
        let shape = first.shape();
        if let Some((i, f)) = frames.iter().enumerate().find(|(_, f)| f.shape() != shape) {
            return Err(CubeAnimError::validation(format!(
                "frame {i} has shape {:?}, expected {:?} (all frames must match frame 0)",
                f.shape(),
                shape
            )));
        }
        if axis.len() != frames.len() {
            return Err(CubeAnimError::validation(format!(
                "cube axis has {} values but cube has {} frames",
                axis.len(),
                frames.len()
            )));
        }
        if let Some((i, v)) = axis.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CubeAnimError::validation(format!(
                "cube axis value {i} must be finite, got {v}"
            )));
        }
        Ok(Self { frames, axis })
    }

    /// Load a cube JSON document from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> CubeAnimResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("open cube '{}'", path.display()))?;
        let file: CubeFile = serde_json::from_reader(std::io::BufReader::new(f))
            .map_err(|e| CubeAnimError::serde(format!("parse cube '{}': {e}", path.display())))?;
        file.into_cube()
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; construction rejects empty cubes.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared frame shape `(rows, cols)`.
    pub fn frame_shape(&self) -> (usize, usize) {
        self.frames[0].shape()
    }

    /// Borrow the frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Borrow the axis values in order.
    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    /// Frame `i` and its axis value.
    pub fn get(&self, i: usize) -> Option<(&Frame, f64)> {
        Some((self.frames.get(i)?, *self.axis.get(i)?))
    }
}

/// On-disk cube document.
///
/// `frames[i][row][col]`; `null` samples are read as NaN (blanked pixels).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CubeFile {
    /// Axis value per frame.
    pub axis: Vec<f64>,
    /// Frames as nested rows.
    pub frames: Vec<Vec<Vec<Option<f64>>>>,
}

impl CubeFile {
    /// Validate and convert into a [`Cube`].
    pub fn into_cube(self) -> CubeAnimResult<Cube> {
        let frames = self
            .frames
            .into_iter()
            .enumerate()
            .map(|(i, rows)| {
                let rows = rows
                    .into_iter()
                    .map(|r| r.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
                    .collect();
                Frame::from_rows(rows).map_err(|e| match e {
                    CubeAnimError::Validation(msg) => {
                        CubeAnimError::validation(format!("frame {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<CubeAnimResult<Vec<_>>>()?;
        Cube::new(frames, self.axis)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/cube.rs"]
mod tests;
