use crate::foundation::core::Extent;
use crate::foundation::error::CubeAnimResult;
use crate::render::context::RenderContext;
use crate::render::overlay::{TextAnchor, TextBaseline, TextSpec};
use crate::render::ticks::{TickLocator, format_tick};

/// Font size of tick labels and axis labels, in points.
pub const LABEL_FONT_PT: f64 = 10.0;
/// Font size of the title, in points.
pub const TITLE_FONT_PT: f64 = 12.0;
/// Tick mark length, in points.
pub const TICK_LEN_PT: f64 = 3.5;
/// Gap between tick mark and tick label, in points.
pub const TICK_PAD_PT: f64 = 3.5;
/// Line width of spines and ticks, in points.
pub const LINE_WIDTH_PT: f64 = 0.8;
/// Tick cap on the image axes.
pub const AXIS_MAX_TICKS: usize = 6;

/// Rough rendered width of `s` at `size_px`; used only to keep labels clear of tick text.
pub(crate) fn estimate_text_width(s: &str, size_px: f64) -> f64 {
    s.chars().count() as f64 * size_px * 0.6
}

/// Draw spines, ticks, tick labels and axis labels for the current axes showing `extent`.
pub fn decorate_current_axes(
    ctx: &mut RenderContext,
    extent: Extent,
    xlabel: &str,
    ylabel: &str,
) -> CubeAnimResult<()> {
    let rect = ctx.current_rect()?;
    let layout = *ctx.layout();
    let line_w = layout.pt_to_px(LINE_WIDTH_PT);
    let tick_len = layout.pt_to_px(TICK_LEN_PT);
    let pad = layout.pt_to_px(TICK_PAD_PT);
    let font_px = layout.pt_to_px(LABEL_FONT_PT);
    let locator = TickLocator::new(AXIS_MAX_TICKS);

    let overlay = ctx.overlay_mut()?;
    overlay.polygon(
        &[
            (rect.x0, rect.y0),
            (rect.x1, rect.y0),
            (rect.x1, rect.y1),
            (rect.x0, rect.y1),
        ],
        None,
        Some(line_w),
    );

    if extent.right != extent.left {
        let (ticks, step) = locator.locate(extent.left, extent.right);
        for t in ticks {
            let x = rect.x0 + (t - extent.left) / (extent.right - extent.left) * rect.width();
            overlay.line(x, rect.y1, x, rect.y1 + tick_len, line_w);
            overlay.text(
                &format_tick(t, step),
                &TextSpec {
                    x,
                    y: rect.y1 + tick_len + pad,
                    size_px: font_px,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                    rotate_deg: 0.0,
                },
            );
        }
    }

    let mut widest = 0.0f64;
    if extent.top != extent.bottom {
        let (ticks, step) = locator.locate(extent.bottom, extent.top);
        for t in ticks {
            let y = rect.y1 - (t - extent.bottom) / (extent.top - extent.bottom) * rect.height();
            let label = format_tick(t, step);
            widest = widest.max(estimate_text_width(&label, font_px));
            overlay.line(rect.x0 - tick_len, y, rect.x0, y, line_w);
            overlay.text(
                &label,
                &TextSpec {
                    x: rect.x0 - tick_len - pad,
                    y,
                    size_px: font_px,
                    anchor: TextAnchor::End,
                    baseline: TextBaseline::Middle,
                    rotate_deg: 0.0,
                },
            );
        }
    }

    overlay.text(
        xlabel,
        &TextSpec {
            x: rect.center().x,
            y: rect.y1 + tick_len + 2.0 * pad + font_px,
            size_px: font_px,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Hanging,
            rotate_deg: 0.0,
        },
    );
    overlay.text(
        ylabel,
        &TextSpec {
            x: rect.x0 - tick_len - 2.0 * pad - widest,
            y: rect.center().y,
            size_px: font_px,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Alphabetic,
            rotate_deg: -90.0,
        },
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/axes.rs"]
mod tests;
