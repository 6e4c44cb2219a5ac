use crate::data::cube::{Cube, CubeFile};
use crate::encode::OutputFormat;
use crate::encode::sink::SinkConfig;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::render::colormap::{Colormap, DEFAULT_COLORMAP};
use crate::wcs::units::{AngularUnit, UnitPolicy};
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Everything about an animation that is not the data itself.
///
/// Every field has a default, so a job file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Units label the header scale is converted into (`degrees`, `arcmin`, `arcsec`, `rad`).
    pub units: String,
    /// How an unknown `units` label is handled.
    pub unit_policy: UnitPolicy,
    /// X axis label.
    pub xlabel: String,
    /// Y axis label.
    pub ylabel: String,
    /// Colorbar caption.
    pub cblabel: String,
    /// Title shown before the first per-frame title replaces it.
    pub title: String,
    /// Colormap name from the allow-list.
    pub cmap: String,
    /// Extra gap between the image axes and the title, in points.
    pub title_pad: f64,
    /// Lower colour bound. Must be given together with `vmax`.
    pub vmin: Option<f64>,
    /// Upper colour bound. Must be given together with `vmin`.
    pub vmax: Option<f64>,
    /// Output file. `.gif` writes a GIF, anything else an MP4.
    pub output: PathBuf,
    /// MP4 frame rate. `null` derives it from `interval_ms`.
    pub fps: Option<u32>,
    /// Delay between frames in milliseconds (GIF frame delay).
    pub interval_ms: u32,
    /// Loop the animation forever (GIF only).
    pub repeat: bool,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Text before the axis value in each frame title.
    pub frame_title_prefix: String,
    /// Unit suffix after the axis value in each frame title.
    pub axis_unit: String,
    /// Extra directory of `.ttf`/`.otf`/`.ttc` fonts.
    pub font_dir: Option<PathBuf>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            units: AngularUnit::Degrees.label().to_owned(),
            unit_policy: UnitPolicy::default(),
            xlabel: String::new(),
            ylabel: String::new(),
            cblabel: String::new(),
            title: String::new(),
            cmap: DEFAULT_COLORMAP.to_owned(),
            title_pad: 0.0,
            vmin: None,
            vmax: None,
            output: PathBuf::from("dynamic_images.mp4"),
            fps: Some(30),
            interval_ms: 50,
            repeat: false,
            width: canvas.width,
            height: canvas.height,
            frame_title_prefix: "Faraday Depth Spectrum at".to_owned(),
            axis_unit: "rad/m^2".to_owned(),
            font_dir: None,
        }
    }
}

impl AnimationOptions {
    /// Check the settings that do not depend on the header or the cube.
    pub fn validate(&self) -> CubeAnimResult<()> {
        self.canvas().validate()?;
        if self.interval_ms == 0 {
            return Err(CubeAnimError::config("interval_ms must be > 0"));
        }
        if !self.title_pad.is_finite() {
            return Err(CubeAnimError::config("title_pad must be finite"));
        }
        self.fps()?;
        if self.output.as_os_str().is_empty() {
            return Err(CubeAnimError::config("output path must not be empty"));
        }
        if OutputFormat::from_path(&self.output) == OutputFormat::Mp4
            && (!self.width.is_multiple_of(2) || !self.height.is_multiple_of(2))
        {
            return Err(CubeAnimError::config(format!(
                "mp4 output needs an even canvas size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Effective frame rate: `fps` when set, otherwise one frame per `interval_ms`.
    pub fn fps(&self) -> CubeAnimResult<Fps> {
        match self.fps {
            Some(n) => Fps::new(n, 1),
            None => Fps::new(1000, self.interval_ms),
        }
    }

    /// Resolve the configured colormap.
    pub fn colormap(&self) -> CubeAnimResult<Colormap> {
        Colormap::from_name(&self.cmap)
    }

    /// Resolve the configured units label under the configured policy.
    pub fn unit(&self) -> CubeAnimResult<AngularUnit> {
        self.unit_policy.resolve(&self.units)
    }

    /// Sink configuration for this job.
    pub fn sink_config(&self) -> CubeAnimResult<SinkConfig> {
        Ok(SinkConfig {
            width: self.width,
            height: self.height,
            fps: self.fps()?,
            frame_delay_ms: self.interval_ms,
            repeat: self.repeat,
        })
    }

    /// Title displayed while frame `value` is shown.
    pub fn frame_title(&self, value: f64) -> String {
        format_frame_title(&self.frame_title_prefix, value, &self.axis_unit)
    }
}

/// `"{prefix} {value:.4} {unit}"`, skipping empty parts.
pub fn format_frame_title(prefix: &str, value: f64, unit: &str) -> String {
    let mut title = format!("{prefix} {value:.4}");
    if !unit.is_empty() {
        title.push(' ');
        title.push_str(unit);
    }
    title.trim_start().to_owned()
}

/// JSON job document: header, cube (inline or by path) and flattened [`AnimationOptions`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct JobFile {
    /// World-coordinate header (`cdelt1`, `cdelt2`, `crpix1`, `crpix2`, extra keys ignored).
    pub header: serde_json::Map<String, serde_json::Value>,
    /// Inline cube.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube: Option<CubeFile>,
    /// Cube document path, relative to the job file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube_path: Option<PathBuf>,
    /// Render options.
    #[serde(flatten)]
    pub options: AnimationOptions,
    /// Keys no other field claimed. Must stay empty.
    #[serde(flatten, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobFile {
    /// Parse a job document from a string.
    pub fn from_json_str(s: &str) -> CubeAnimResult<Self> {
        let job: Self =
            serde_json::from_str(s).map_err(|e| CubeAnimError::serde(format!("job file: {e}")))?;
        job.check_unknown_keys()?;
        Ok(job)
    }

    /// Reject keys that match no job field or option, such as a misspelled `"unit"`.
    pub fn check_unknown_keys(&self) -> CubeAnimResult<()> {
        if self.extra.is_empty() {
            return Ok(());
        }
        let keys: Vec<&str> = self.extra.keys().map(String::as_str).collect();
        Err(CubeAnimError::config(format!(
            "job file has unknown key(s): {}",
            keys.join(", ")
        )))
    }

    /// Read and parse the job file at `path`.
    pub fn from_path(path: &Path) -> CubeAnimResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read job file '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Materialize the cube. A relative `cube_path` is resolved against `base_dir`.
    pub fn load_cube(&self, base_dir: &Path) -> CubeAnimResult<Cube> {
        match (&self.cube, &self.cube_path) {
            (Some(inline), None) => inline.clone().into_cube(),
            (None, Some(rel)) => {
                let path = if rel.is_absolute() {
                    rel.clone()
                } else {
                    base_dir.join(rel)
                };
                Cube::from_path(path)
            }
            (Some(_), Some(_)) => Err(CubeAnimError::config(
                "job file must give either 'cube' or 'cube_path', not both",
            )),
            (None, None) => Err(CubeAnimError::config(
                "job file must give 'cube' or 'cube_path'",
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
