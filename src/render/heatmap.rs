use crate::data::cube::Frame;
use crate::data::scale::ColorScale;
use crate::foundation::core::{Extent, Rect};
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::render::colormap::Colormap;
use resvg::tiny_skia::Pixmap;

/// The image placed on the image axes: where it sits on the canvas and what it shows.
///
/// Built once per render; the displayed data and clim are swapped per frame with
/// [`ImageHandle::set_data`] and [`ImageHandle::set_clim`]. The handle borrows the displayed
/// frame rather than copying it.
#[derive(Clone, Debug)]
pub struct ImageHandle<'a> {
    rect: Rect,
    extent: Extent,
    shape: (usize, usize),
    cmap: Colormap,
    lut: Vec<[u8; 3]>,
    clim: ColorScale,
    col_of_px: Vec<usize>,
    row_of_px: Vec<usize>,
    data: Option<&'a Frame>,
}

impl<'a> ImageHandle<'a> {
    /// Place a `shape = (rows, cols)` image over the pixel-aligned `rect`, `origin = lower`.
    pub fn new(
        rect: Rect,
        extent: Extent,
        shape: (usize, usize),
        cmap: Colormap,
        clim: ColorScale,
    ) -> CubeAnimResult<Self> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(CubeAnimError::validation("image shape must be non-empty"));
        }
        let w = rect.width().round().max(0.0) as usize;
        let h = rect.height().round().max(0.0) as usize;
        if w == 0 || h == 0 {
            return Err(CubeAnimError::evaluation("image axes have zero pixel size"));
        }

        // Nearest-neighbour sampling at pixel centres. Screen rows run top-down, data rows
        // bottom-up.
        let col_of_px = (0..w)
            .map(|px| (((px as f64 + 0.5) / w as f64) * cols as f64) as usize)
            .map(|c| c.min(cols - 1))
            .collect();
        let row_of_px = (0..h)
            .map(|py| (((py as f64 + 0.5) / h as f64) * rows as f64) as usize)
            .map(|r| rows - 1 - r.min(rows - 1))
            .collect();

        Ok(Self {
            rect,
            extent,
            shape,
            lut: cmap.lut(),
            cmap,
            clim,
            col_of_px,
            row_of_px,
            data: None,
        })
    }

    /// Canvas rectangle covered by the image.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Physical extent of the image.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Colormap applied to the data.
    pub fn cmap(&self) -> Colormap {
        self.cmap
    }

    /// Current colour limits.
    pub fn clim(&self) -> ColorScale {
        self.clim
    }

    /// Replace the displayed data; the shape must match the image.
    pub fn set_data(&mut self, frame: &'a Frame) -> CubeAnimResult<()> {
        if frame.shape() != self.shape {
            return Err(CubeAnimError::validation(format!(
                "frame shape {:?} does not match image shape {:?}",
                frame.shape(),
                self.shape
            )));
        }
        self.data = Some(frame);
        Ok(())
    }

    /// Replace the colour limits.
    pub fn set_clim(&mut self, clim: ColorScale) {
        self.clim = clim;
    }

    /// Paint the current data into `pixmap`. Non-finite samples are left untouched (background
    /// shows through).
    pub fn paint(&self, pixmap: &mut Pixmap) -> CubeAnimResult<()> {
        let frame = self
            .data
            .ok_or_else(|| CubeAnimError::evaluation("image has no data to paint"))?;

        let stride = pixmap.width() as usize;
        let (pw, ph) = (pixmap.width() as i64, pixmap.height() as i64);
        let x0 = self.rect.x0.round() as i64;
        let y0 = self.rect.y0.round() as i64;
        let pixels = pixmap.data_mut();

        for (dy, &row) in self.row_of_px.iter().enumerate() {
            let y = y0 + dy as i64;
            if y < 0 || y >= ph {
                continue;
            }
            for (dx, &col) in self.col_of_px.iter().enumerate() {
                let x = x0 + dx as i64;
                if x < 0 || x >= pw {
                    continue;
                }
                let Some(t) = frame.get(row, col).and_then(|v| self.clim.normalize(v)) else {
                    continue;
                };
                let [r, g, b] = self.lut[(t * 255.0).round() as usize];
                let i = ((y as usize) * stride + x as usize) * 4;
                pixels[i..i + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/heatmap.rs"]
mod tests;
