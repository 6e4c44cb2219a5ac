use crate::foundation::core::{Canvas, Extent, Rect};

/// Figure width in inches at the reference canvas width; sets the dots-per-inch of the render.
const FIGURE_WIDTH_IN: f64 = 6.4;

// Subplot box as fractions of the canvas (left, right, bottom, top measured from the bottom).
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;

/// Pixel placement of the figure's axes on the canvas.
///
/// Coordinates are canvas pixels with the origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureLayout {
    /// Canvas the layout was computed for.
    pub canvas: Canvas,
    /// Pixel-aligned rectangle of the image axes.
    pub image: Rect,
    /// Extra title padding in points, on top of the default gap.
    pub title_pad_pt: f64,
}

impl FigureLayout {
    /// Colorbar width as a fraction of the image axes width.
    pub const COLORBAR_FRACTION: f64 = 0.05;
    /// Gap between image axes and colorbar, in inches.
    pub const COLORBAR_PAD_IN: f64 = 0.05;
    /// Default gap between the axes top and the title baseline, in points.
    pub const TITLE_GAP_PT: f64 = 6.0;

    /// Place an `aspect = equal` image axes for `extent` inside the subplot box, leaving room for
    /// an adjacent colorbar.
    ///
    /// A zero-width or zero-height extent falls back to the pixel aspect of `shape`.
    pub fn compute(canvas: Canvas, extent: Extent, shape: (usize, usize), title_pad_pt: f64) -> Self {
        let w_canvas = f64::from(canvas.width);
        let h_canvas = f64::from(canvas.height);
        let dpi = w_canvas / FIGURE_WIDTH_IN;

        let box_x0 = SUBPLOT_LEFT * w_canvas;
        let box_x1 = SUBPLOT_RIGHT * w_canvas;
        let box_y0 = (1.0 - SUBPLOT_TOP) * h_canvas;
        let box_y1 = (1.0 - SUBPLOT_BOTTOM) * h_canvas;
        let box_w = box_x1 - box_x0;
        let box_h = box_y1 - box_y0;

        let aspect = {
            let (w, h) = (extent.width(), extent.height());
            if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
                w / h
            } else {
                shape.1.max(1) as f64 / shape.0.max(1) as f64
            }
        };

        let pad = Self::COLORBAR_PAD_IN * dpi;
        let w_fit = ((box_w - pad) / (1.0 + Self::COLORBAR_FRACTION)).max(1.0);
        let w = w_fit.min(box_h * aspect).max(1.0);
        let h = (w / aspect).max(1.0);

        let group_w = w * (1.0 + Self::COLORBAR_FRACTION) + pad;
        let x0 = (box_x0 + (box_w - group_w) / 2.0).round();
        let y0 = (box_y0 + (box_h - h) / 2.0).round();
        let image = Rect::new(x0, y0, x0 + w.round().max(1.0), y0 + h.round().max(1.0));

        Self {
            canvas,
            image,
            title_pad_pt,
        }
    }

    /// Render resolution in dots per inch.
    pub fn dpi(&self) -> f64 {
        f64::from(self.canvas.width) / FIGURE_WIDTH_IN
    }

    /// Convert typographic points to canvas pixels.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi() / 72.0
    }

    /// Gap between image axes and colorbar, in pixels.
    pub fn colorbar_pad_px(&self) -> f64 {
        (Self::COLORBAR_PAD_IN * self.dpi()).round()
    }

    /// Title baseline position (centred over the image axes).
    pub fn title_anchor(&self) -> (f64, f64) {
        let gap = self.pt_to_px(Self::TITLE_GAP_PT + self.title_pad_pt);
        (self.image.center().x, self.image.y0 - gap)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
