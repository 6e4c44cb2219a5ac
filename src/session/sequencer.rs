use crate::data::cube::Cube;
use crate::data::scale::ColorScale;
use crate::foundation::core::{Canvas, Extent, FrameIndex};
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::render::axes::{TITLE_FONT_PT, decorate_current_axes};
use crate::render::colorbar::{Colorbar, ColorbarAttacher};
use crate::render::colormap::Colormap;
use crate::render::context::{AxesId, RenderContext};
use crate::render::frame::FrameRGBA;
use crate::render::heatmap::ImageHandle;
use crate::render::layout::FigureLayout;
use crate::render::overlay::{FontBook, SvgOverlay, TextAnchor, TextBaseline, TextSpec};
use crate::session::config::{AnimationOptions, format_frame_title};
use resvg::tiny_skia::Pixmap;
use std::path::PathBuf;

/// Fixed inputs of one figure, resolved before any rendering.
#[derive(Clone, Debug)]
pub struct FigurePlan {
    /// Canvas size.
    pub canvas: Canvas,
    /// Image extent in world coordinates.
    pub extent: Extent,
    /// Colour limits shared by every frame.
    pub clim: ColorScale,
    /// Colormap.
    pub cmap: Colormap,
    /// Extra title gap in points.
    pub title_pad_pt: f64,
    /// Axis labels `(x, y)`.
    pub labels: (String, String),
    /// Colorbar caption.
    pub cblabel: String,
    /// Initial title.
    pub title: String,
    /// Text before the axis value in per-frame titles.
    pub frame_title_prefix: String,
    /// Unit after the axis value in per-frame titles.
    pub axis_unit: String,
    /// Extra font directory.
    pub font_dir: Option<PathBuf>,
}

impl FigurePlan {
    /// Plan a figure from job options plus the resolved extent, colour limits and colormap.
    pub fn from_options(
        opts: &AnimationOptions,
        extent: Extent,
        clim: ColorScale,
        cmap: Colormap,
    ) -> Self {
        Self {
            canvas: opts.canvas(),
            extent,
            clim,
            cmap,
            title_pad_pt: opts.title_pad,
            labels: (opts.xlabel.clone(), opts.ylabel.clone()),
            cblabel: opts.cblabel.clone(),
            title: opts.title.clone(),
            frame_title_prefix: opts.frame_title_prefix.clone(),
            axis_unit: opts.axis_unit.clone(),
            font_dir: opts.font_dir.clone(),
        }
    }

    /// Title shown while the frame at axis `value` is displayed.
    pub fn frame_title(&self, value: f64) -> String {
        format_frame_title(&self.frame_title_prefix, value, &self.axis_unit)
    }
}

/// What the figure currently shows.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    /// Displayed frame.
    pub frame: FrameIndex,
    /// Current title text.
    pub title: String,
    /// Current colour limits.
    pub clim: ColorScale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Rendering(FrameIndex),
    Done,
}

struct Figure<'a> {
    ctx: RenderContext,
    image: ImageHandle<'a>,
    colorbar: Colorbar,
}

/// Walks a cube frame by frame, updating one persistent figure and rasterizing it.
///
/// `Uninitialized -> Rendering(0) -> ... -> Rendering(n - 1) -> Done`. The first
/// [`advance`](Self::advance) builds the figure; each call after that swaps in the next frame's
/// data and title. Advancing past `Done` is an error.
pub struct FrameSequencer<'a> {
    cube: &'a Cube,
    plan: FigurePlan,
    phase: Phase,
    figure: Option<Figure<'a>>,
    state: Option<RenderState>,
}

impl<'a> FrameSequencer<'a> {
    /// Sequencer over `cube`. Nothing is drawn until the first advance.
    pub fn new(cube: &'a Cube, plan: FigurePlan) -> Self {
        Self {
            cube,
            plan,
            phase: Phase::Uninitialized,
            figure: None,
            state: None,
        }
    }

    /// Render the next frame, or return `Ok(None)` once every frame was produced.
    pub fn advance(&mut self) -> CubeAnimResult<Option<(FrameIndex, FrameRGBA)>> {
        let next = match self.phase {
            Phase::Uninitialized => {
                self.ensure_figure()?;
                FrameIndex(0)
            }
            Phase::Rendering(i) => FrameIndex(i.0 + 1),
            Phase::Done => {
                return Err(CubeAnimError::evaluation(
                    "frame sequencer advanced after the last frame",
                ));
            }
        };

        if next.0 >= self.cube.len() as u64 {
            self.phase = Phase::Done;
            self.state = None;
            return Ok(None);
        }

        let frame = self.render_index(next)?;
        self.phase = Phase::Rendering(next);
        Ok(Some((next, frame)))
    }

    /// Render frame `idx` without moving the sequence forward.
    pub fn render_at(&mut self, idx: FrameIndex) -> CubeAnimResult<FrameRGBA> {
        if self.phase == Phase::Done {
            return Err(CubeAnimError::evaluation("frame sequencer is finished"));
        }
        if idx.0 >= self.cube.len() as u64 {
            return Err(CubeAnimError::validation(format!(
                "frame {} is out of range (cube has {} frames)",
                idx.0,
                self.cube.len()
            )));
        }
        self.ensure_figure()?;
        self.render_index(idx)
    }

    /// Current figure state; `None` before the first frame and after the last.
    pub fn state(&self) -> Option<&RenderState> {
        self.state.as_ref()
    }

    /// Last frame produced by [`advance`](Self::advance).
    pub fn position(&self) -> Option<FrameIndex> {
        match self.phase {
            Phase::Rendering(i) => Some(i),
            _ => None,
        }
    }

    /// `true` once every frame was produced.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Colorbar built for the figure, once initialized.
    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.figure.as_ref().map(|f| &f.colorbar)
    }

    /// Pixel rectangle of the image axes, once initialized.
    pub fn image_rect(&self) -> Option<crate::foundation::core::Rect> {
        self.figure.as_ref().map(|f| f.image.rect())
    }

    fn ensure_figure(&mut self) -> CubeAnimResult<()> {
        if self.figure.is_some() {
            return Ok(());
        }
        let plan = &self.plan;
        let shape = self.cube.frame_shape();
        let layout = FigureLayout::compute(plan.canvas, plan.extent, shape, plan.title_pad_pt);
        let fonts = FontBook::load(plan.font_dir.as_deref());
        if fonts.face_count() == 0 {
            tracing::warn!("no fonts found; labels and titles will not be drawn");
        }

        let mut ctx = RenderContext::new(layout, fonts)?;
        ctx.add_axes(AxesId::Image, layout.image)?;
        let image = ImageHandle::new(layout.image, plan.extent, shape, plan.cmap, plan.clim)?;
        decorate_current_axes(&mut ctx, plan.extent, &plan.labels.0, &plan.labels.1)?;
        let colorbar =
            ColorbarAttacher::new(plan.cblabel.clone()).attach(&mut ctx, &image, plan.clim, plan.cmap)?;
        ctx.freeze()?;

        tracing::debug!(
            image = ?layout.image,
            colorbar = ?colorbar.rect,
            "figure initialized"
        );
        self.state = Some(RenderState {
            frame: FrameIndex(0),
            title: plan.title.clone(),
            clim: plan.clim,
        });
        self.figure = Some(Figure {
            ctx,
            image,
            colorbar,
        });
        Ok(())
    }

    fn render_index(&mut self, idx: FrameIndex) -> CubeAnimResult<FrameRGBA> {
        let cube: &'a Cube = self.cube;
        let figure = self
            .figure
            .as_mut()
            .ok_or_else(|| CubeAnimError::evaluation("figure is not initialized"))?;
        let (data, value) = cube
            .get(idx.0 as usize)
            .ok_or_else(|| CubeAnimError::validation(format!("frame {} is out of range", idx.0)))?;

        figure.image.set_data(data)?;
        figure.image.set_clim(self.plan.clim);
        let title = self.plan.frame_title(value);

        let mut pixmap = figure.ctx.blank_canvas()?;
        figure.image.paint(&mut pixmap)?;
        figure.ctx.draw_static(&mut pixmap)?;
        draw_title(&figure.ctx, &title, &mut pixmap)?;

        tracing::debug!(frame = idx.0, %title, "rendered frame");
        self.state = Some(RenderState {
            frame: idx,
            title,
            clim: figure.image.clim(),
        });
        Ok(figure.ctx.to_frame(pixmap))
    }
}

fn draw_title(ctx: &RenderContext, title: &str, pixmap: &mut Pixmap) -> CubeAnimResult<()> {
    if title.is_empty() {
        return Ok(());
    }
    let layout = ctx.layout();
    let (x, y) = layout.title_anchor();
    let mut overlay = SvgOverlay::new();
    overlay.text(
        title,
        &TextSpec {
            x,
            y,
            size_px: layout.pt_to_px(TITLE_FONT_PT),
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Alphabetic,
            rotate_deg: 0.0,
        },
    );
    let Canvas { width, height } = layout.canvas;
    ctx.fonts().render_onto(&overlay.to_svg(width, height), pixmap)
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
