use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::render::frame::FrameRGBA;
use crate::render::layout::FigureLayout;
use crate::render::overlay::{FontBook, SvgOverlay};
use resvg::tiny_skia::{Pixmap, PixmapPaint, Transform};

/// Axes a figure can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxesId {
    /// The image (heatmap) axes.
    Image,
    /// The colour-scale legend next to the image.
    Colorbar,
}

/// Explicit figure state owned by one render.
///
/// Holds the layout, registered axes and which of them is "current", the static decoration layer
/// and the font book. Drawing helpers act on the current axes; [`RenderContext::with_axes`]
/// switches focus for the duration of a closure and always restores it.
pub struct RenderContext {
    layout: FigureLayout,
    axes: Vec<(AxesId, Rect)>,
    current: Option<AxesId>,
    overlay: SvgOverlay,
    static_layer: Pixmap,
    frozen: bool,
    fonts: FontBook,
    background: [u8; 4],
}

impl RenderContext {
    /// Create a context for `layout` with a white background.
    pub fn new(layout: FigureLayout, fonts: FontBook) -> CubeAnimResult<Self> {
        let Canvas { width, height } = layout.canvas;
        let static_layer = Pixmap::new(width, height)
            .ok_or_else(|| CubeAnimError::evaluation("failed to allocate static layer pixmap"))?;
        Ok(Self {
            layout,
            axes: Vec::new(),
            current: None,
            overlay: SvgOverlay::new(),
            static_layer,
            frozen: false,
            fonts,
            background: [255, 255, 255, 255],
        })
    }

    /// Figure layout.
    pub fn layout(&self) -> &FigureLayout {
        &self.layout
    }

    /// Font book used for every text element.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Register axes at `rect`. The first registered axes becomes current.
    pub fn add_axes(&mut self, id: AxesId, rect: Rect) -> CubeAnimResult<()> {
        if self.axes.iter().any(|(a, _)| *a == id) {
            return Err(CubeAnimError::evaluation(format!(
                "{id:?} axes already exist in this figure"
            )));
        }
        self.axes.push((id, rect));
        if self.current.is_none() {
            self.current = Some(id);
        }
        Ok(())
    }

    /// Rectangle of registered axes.
    pub fn axes_rect(&self, id: AxesId) -> Option<Rect> {
        self.axes.iter().find(|(a, _)| *a == id).map(|(_, r)| *r)
    }

    /// Currently focused axes, if any.
    pub fn current_axes(&self) -> Option<AxesId> {
        self.current
    }

    /// Rectangle of the current axes.
    pub fn current_rect(&self) -> CubeAnimResult<Rect> {
        let id = self
            .current
            .ok_or_else(|| CubeAnimError::evaluation("figure has no current axes"))?;
        self.axes_rect(id)
            .ok_or_else(|| CubeAnimError::evaluation(format!("{id:?} axes are not registered")))
    }

    /// Run `f` with `id` as the current axes, then restore the previous focus.
    pub fn with_axes<R>(
        &mut self,
        id: AxesId,
        f: impl FnOnce(&mut Self) -> CubeAnimResult<R>,
    ) -> CubeAnimResult<R> {
        if self.axes_rect(id).is_none() {
            return Err(CubeAnimError::evaluation(format!(
                "cannot focus {id:?} axes before they are added"
            )));
        }
        let prev = self.current.replace(id);
        let out = f(self);
        self.current = prev;
        out
    }

    /// Static vector decorations (spines, ticks, labels). Locked after [`Self::freeze`].
    pub fn overlay_mut(&mut self) -> CubeAnimResult<&mut SvgOverlay> {
        if self.frozen {
            return Err(CubeAnimError::evaluation(
                "static decorations are frozen once rendering starts",
            ));
        }
        Ok(&mut self.overlay)
    }

    /// Static raster layer under the vector decorations (e.g. the colorbar gradient).
    pub fn static_layer_mut(&mut self) -> CubeAnimResult<&mut Pixmap> {
        if self.frozen {
            return Err(CubeAnimError::evaluation(
                "static decorations are frozen once rendering starts",
            ));
        }
        Ok(&mut self.static_layer)
    }

    /// Rasterize the vector decorations into the static layer and lock it.
    pub fn freeze(&mut self) -> CubeAnimResult<()> {
        if self.frozen {
            return Ok(());
        }
        if !self.overlay.is_empty() {
            let Canvas { width, height } = self.layout.canvas;
            let svg = self.overlay.to_svg(width, height);
            self.fonts.render_onto(&svg, &mut self.static_layer)?;
        }
        self.frozen = true;
        Ok(())
    }

    /// `true` once [`Self::freeze`] ran.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Fresh canvas filled with the background colour.
    pub fn blank_canvas(&self) -> CubeAnimResult<Pixmap> {
        let Canvas { width, height } = self.layout.canvas;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| CubeAnimError::evaluation("failed to allocate frame pixmap"))?;
        let [r, g, b, a] = self.background;
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
        Ok(pixmap)
    }

    /// Composite the static layer over `pixmap`.
    pub fn draw_static(&self, pixmap: &mut Pixmap) -> CubeAnimResult<()> {
        if !self.frozen {
            return Err(CubeAnimError::evaluation(
                "static decorations must be frozen before compositing",
            ));
        }
        pixmap.draw_pixmap(
            0,
            0,
            self.static_layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Convert a finished canvas into a frame.
    pub fn to_frame(&self, pixmap: Pixmap) -> FrameRGBA {
        FrameRGBA {
            width: pixmap.width(),
            height: pixmap.height(),
            data: pixmap.take(),
            premultiplied: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
