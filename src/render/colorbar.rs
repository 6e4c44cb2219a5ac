use crate::data::scale::ColorScale;
use crate::foundation::core::Rect;
use crate::foundation::error::CubeAnimResult;
use crate::render::axes::{LABEL_FONT_PT, LINE_WIDTH_PT, TICK_LEN_PT, TICK_PAD_PT, estimate_text_width};
use crate::render::colormap::Colormap;
use crate::render::context::{AxesId, RenderContext};
use crate::render::heatmap::ImageHandle;
use crate::render::layout::FigureLayout;
use crate::render::overlay::{TextAnchor, TextBaseline, TextSpec};
use crate::render::ticks::{TickLocator, format_tick};

/// Major tick cap on the colour-scale legend.
pub const COLORBAR_MAX_TICKS: usize = 3;

/// Length of each extend triangle as a fraction of the colorbar interior.
const EXTEND_FRAC: f64 = 0.05;

/// A colour-scale legend attached next to an image.
#[derive(Clone, Debug, PartialEq)]
pub struct Colorbar {
    /// Full legend rectangle, extend triangles included.
    pub rect: Rect,
    /// Gradient interior mapping `vmin` (bottom) to `vmax` (top).
    pub interior: Rect,
    /// Major tick values.
    pub ticks: Vec<f64>,
    /// Caption.
    pub label: String,
}

/// Creates colour-scale legends beside an image's axes.
#[derive(Clone, Debug)]
pub struct ColorbarAttacher {
    label: String,
    locator: TickLocator,
}

impl ColorbarAttacher {
    /// Attacher captioning the legend with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            locator: TickLocator::new(COLORBAR_MAX_TICKS),
        }
    }

    /// Append colorbar axes to the right of `image`, draw the gradient, extend triangles, ticks
    /// and caption into the static layers of `ctx`.
    ///
    /// Focus moves to the colorbar axes while drawing and returns to whatever was current before.
    pub fn attach(
        &self,
        ctx: &mut RenderContext,
        image: &ImageHandle<'_>,
        scale: ColorScale,
        cmap: Colormap,
    ) -> CubeAnimResult<Colorbar> {
        let img = image.rect();
        let pad = ctx.layout().colorbar_pad_px();
        let width = (img.width() * FigureLayout::COLORBAR_FRACTION).round().max(1.0);
        let rect = Rect::new(img.x1 + pad, img.y0, img.x1 + pad + width, img.y1);
        ctx.add_axes(AxesId::Colorbar, rect)?;

        ctx.with_axes(AxesId::Colorbar, |ctx| {
            let rect = ctx.current_rect()?;
            let ext = (rect.height() * EXTEND_FRAC).round();
            let interior = Rect::new(rect.x0, rect.y0 + ext, rect.x1, rect.y1 - ext);

            paint_gradient(ctx, interior, cmap)?;
            let (ticks, step) = self.locator.locate(scale.vmin, scale.vmax);
            self.draw_vectors(ctx, rect, interior, &ticks, step, scale, cmap)?;

            Ok(Colorbar {
                rect,
                interior,
                ticks,
                label: self.label.clone(),
            })
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_vectors(
        &self,
        ctx: &mut RenderContext,
        rect: Rect,
        interior: Rect,
        ticks: &[f64],
        step: f64,
        scale: ColorScale,
        cmap: Colormap,
    ) -> CubeAnimResult<()> {
        let layout = *ctx.layout();
        let line_w = layout.pt_to_px(LINE_WIDTH_PT);
        let tick_len = layout.pt_to_px(TICK_LEN_PT);
        let pad = layout.pt_to_px(TICK_PAD_PT);
        let font_px = layout.pt_to_px(LABEL_FONT_PT);
        let mid = rect.center().x;

        let overlay = ctx.overlay_mut()?;
        overlay.polygon(
            &[
                (interior.x0, interior.y0),
                (mid, rect.y0),
                (interior.x1, interior.y0),
            ],
            Some(cmap.eval(1.0)),
            None,
        );
        overlay.polygon(
            &[
                (interior.x0, interior.y1),
                (mid, rect.y1),
                (interior.x1, interior.y1),
            ],
            Some(cmap.eval(0.0)),
            None,
        );
        overlay.polygon(
            &[
                (interior.x0, interior.y0),
                (mid, rect.y0),
                (interior.x1, interior.y0),
                (interior.x1, interior.y1),
                (mid, rect.y1),
                (interior.x0, interior.y1),
            ],
            None,
            Some(line_w),
        );

        let mut widest = 0.0f64;
        for &t in ticks {
            let y = match scale.normalize(t) {
                Some(n) => interior.y1 - n * interior.height(),
                None => continue,
            };
            let label = format_tick(t, step);
            widest = widest.max(estimate_text_width(&label, font_px));
            overlay.line(interior.x1, y, interior.x1 + tick_len, y, line_w);
            overlay.text(
                &label,
                &TextSpec {
                    x: interior.x1 + tick_len + pad,
                    y,
                    size_px: font_px,
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Middle,
                    rotate_deg: 0.0,
                },
            );
        }

        overlay.text(
            &self.label,
            &TextSpec {
                x: interior.x1 + tick_len + 2.0 * pad + widest,
                y: rect.center().y,
                size_px: font_px,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Hanging,
                rotate_deg: -90.0,
            },
        );
        Ok(())
    }
}

fn paint_gradient(ctx: &mut RenderContext, interior: Rect, cmap: Colormap) -> CubeAnimResult<()> {
    let layer = ctx.static_layer_mut()?;
    let stride = layer.width() as usize;
    let (lw, lh) = (layer.width() as i64, layer.height() as i64);
    let x0 = interior.x0.round() as i64;
    let x1 = interior.x1.round() as i64;
    let y0 = interior.y0.round() as i64;
    let y1 = interior.y1.round() as i64;
    let h = (y1 - y0).max(1) as f64;
    let pixels = layer.data_mut();

    for y in y0.max(0)..y1.min(lh) {
        let t = 1.0 - ((y - y0) as f64 + 0.5) / h;
        let [r, g, b] = cmap.eval(t);
        for x in x0.max(0)..x1.min(lw) {
            let i = ((y as usize) * stride + x as usize) * 4;
            pixels[i..i + 4].copy_from_slice(&[r, g, b, 255]);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/colorbar.rs"]
mod tests;
