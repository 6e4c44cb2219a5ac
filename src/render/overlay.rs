use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use anyhow::Context as _;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centred on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Vertical text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// Anchor is the alphabetic baseline.
    Alphabetic,
    /// Anchor is the vertical middle of the glyphs.
    Middle,
    /// Anchor is the top of the glyphs.
    Hanging,
}

impl TextBaseline {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Middle => "central",
            Self::Hanging => "hanging",
        }
    }
}

/// Text element in canvas pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Font size in pixels.
    pub size_px: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Rotation in degrees around the anchor (negative is counter-clockwise).
    pub rotate_deg: f64,
}

/// Accumulates vector decorations and serializes them as a standalone SVG document.
#[derive(Clone, Debug, Default)]
pub struct SvgOverlay {
    body: String,
    elements: usize,
}

impl SvgOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements pushed so far.
    pub fn len(&self) -> usize {
        self.elements
    }

    /// `true` when nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.elements == 0
    }

    /// Black line segment.
    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64) {
        let _ = write!(
            self.body,
            r#"<line x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y1:.2}" stroke="black" stroke-width="{width:.2}" stroke-linecap="square"/>"#
        );
        self.elements += 1;
    }

    /// Closed polygon, optionally filled and/or stroked.
    pub fn polygon(&mut self, points: &[(f64, f64)], fill: Option<[u8; 3]>, stroke: Option<f64>) {
        let mut pts = String::new();
        for (x, y) in points {
            let _ = write!(pts, "{x:.2},{y:.2} ");
        }
        let fill = match fill {
            Some([r, g, b]) => format!("rgb({r},{g},{b})"),
            None => "none".to_string(),
        };
        let stroke = match stroke {
            Some(w) => format!(r#"stroke="black" stroke-width="{w:.2}" stroke-linejoin="miter""#),
            None => r#"stroke="none""#.to_string(),
        };
        let _ = write!(
            self.body,
            r#"<polygon points="{}" fill="{fill}" {stroke}/>"#,
            pts.trim_end()
        );
        self.elements += 1;
    }

    /// Text element; the content is XML-escaped.
    pub fn text(&mut self, content: &str, spec: &TextSpec) {
        if content.is_empty() {
            return;
        }
        let transform = if spec.rotate_deg != 0.0 {
            format!(
                r#" transform="rotate({:.2} {:.2} {:.2})""#,
                spec.rotate_deg, spec.x, spec.y
            )
        } else {
            String::new()
        };
        let _ = write!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-family="{FONT_FAMILY}" font-size="{:.2}" fill="black" text-anchor="{}" dominant-baseline="{}"{transform}>{}</text>"#,
            spec.x,
            spec.y,
            spec.size_px,
            spec.anchor.as_svg(),
            spec.baseline.as_svg(),
            xml_escape(content)
        );
        self.elements += 1;
    }

    /// Serialize as an SVG document of `width x height` pixels.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">{}</svg>"#,
            self.body
        )
    }
}

/// Escape the five XML special characters.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Parse options shared by every SVG the figure renders (font database and resolver).
pub struct FontBook {
    opts: usvg::Options<'static>,
}

impl FontBook {
    /// Load system fonts plus any `.ttf`/`.otf`/`.ttc` files in `extra_dir`.
    pub fn load(extra_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = extra_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database loaded");

        let opts = usvg::Options {
            fontdb: Arc::new(db),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        Self { opts }
    }

    /// Number of font faces available for text.
    pub fn face_count(&self) -> usize {
        self.opts.fontdb.len()
    }

    /// Parse `svg` and draw it over `pixmap`.
    pub fn render_onto(
        &self,
        svg: &str,
        pixmap: &mut resvg::tiny_skia::Pixmap,
    ) -> CubeAnimResult<()> {
        let tree = usvg::Tree::from_str(svg, &self.opts).context("parse overlay svg")?;
        let size = tree.size();
        if size.width() as u32 != pixmap.width() || size.height() as u32 != pixmap.height() {
            return Err(CubeAnimError::evaluation(format!(
                "overlay size {}x{} does not match target {}x{}",
                size.width(),
                size.height(),
                pixmap.width(),
                pixmap.height()
            )));
        }
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(())
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

// Requested families first, then generic sans-serif, then whatever face exists. Text is never
// dropped while the database has at least one face.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
