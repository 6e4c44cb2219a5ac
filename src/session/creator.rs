use crate::data::cube::Cube;
use crate::data::scale::ColorScale;
use crate::encode::sink::FrameSink;
use crate::encode::sink_for_path;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::render::colormap::Colormap;
use crate::render::frame::FrameRGBA;
use crate::session::config::{AnimationOptions, JobFile};
use crate::session::sequencer::{FigurePlan, FrameSequencer};
use crate::wcs::axes::{AxisMapper, AxisSpec};
use crate::wcs::header::Header;
use crate::wcs::units::AngularUnit;
use std::path::{Path, PathBuf};

/// Render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames in the cube.
    pub frames_total: u64,
    /// Frames handed to the sink.
    pub frames_rendered: u64,
}

/// A validated animation job: header, cube and options, with axes and colour scale resolved.
///
/// All configuration problems surface from [`AnimationCreator::new`]; rendering only fails on
/// runtime issues (encoder, IO).
#[derive(Clone, Debug)]
pub struct AnimationCreator {
    cube: Cube,
    opts: AnimationOptions,
    unit: AngularUnit,
    axes: AxisSpec,
    scale: ColorScale,
    cmap: Colormap,
}

impl AnimationCreator {
    /// Validate a job and resolve everything the render needs.
    pub fn new(header: Header, cube: Cube, opts: AnimationOptions) -> CubeAnimResult<Self> {
        header.validate()?;
        opts.validate()?;
        if cube.is_empty() {
            return Err(CubeAnimError::config("cube must contain at least one frame"));
        }
        let unit = opts.unit()?;
        let cmap = opts.colormap()?;
        let axes = AxisMapper::new(header, unit).config_axes(cube.frame_shape())?;
        let scale = ColorScale::resolve(&cube, opts.vmin, opts.vmax)?;

        tracing::debug!(
            frames = cube.len(),
            shape = ?cube.frame_shape(),
            unit = %unit,
            cmap = %cmap,
            vmin = scale.vmin,
            vmax = scale.vmax,
            "animation job resolved"
        );
        Ok(Self {
            cube,
            opts,
            unit,
            axes,
            scale,
            cmap,
        })
    }

    /// Build from a parsed job document; `base_dir` anchors a relative `cube_path`.
    pub fn from_job(job: JobFile, base_dir: &Path) -> CubeAnimResult<Self> {
        job.check_unknown_keys()?;
        let header = Header::from_json_map(&job.header)?;
        let cube = job.load_cube(base_dir)?;
        Self::new(header, cube, job.options)
    }

    /// Read the job file at `path` and build from it.
    pub fn from_job_path(path: &Path) -> CubeAnimResult<Self> {
        let job = JobFile::from_path(path)?;
        Self::from_job(job, path.parent().unwrap_or_else(|| Path::new("")))
    }

    /// Options in effect.
    pub fn options(&self) -> &AnimationOptions {
        &self.opts
    }

    /// Cube being animated.
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Resolved angular unit.
    pub fn unit(&self) -> AngularUnit {
        self.unit
    }

    /// Axis coordinates and extent.
    pub fn axes(&self) -> &AxisSpec {
        &self.axes
    }

    /// Colour scale shared by every frame.
    pub fn color_scale(&self) -> ColorScale {
        self.scale
    }

    /// Resolved colormap.
    pub fn colormap(&self) -> Colormap {
        self.cmap
    }

    /// Replace the output path.
    pub fn set_output(&mut self, out: impl Into<PathBuf>) -> CubeAnimResult<()> {
        let mut opts = self.opts.clone();
        opts.output = out.into();
        opts.validate()?;
        self.opts = opts;
        Ok(())
    }

    /// Fresh sequencer over this job's cube.
    pub fn sequencer(&self) -> FrameSequencer<'_> {
        let plan = FigurePlan::from_options(&self.opts, self.axes.extent(), self.scale, self.cmap);
        FrameSequencer::new(&self.cube, plan)
    }

    /// Render a single frame.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(&self, idx: FrameIndex) -> CubeAnimResult<FrameRGBA> {
        self.sequencer().render_at(idx)
    }

    /// Render every frame in order into `sink`.
    ///
    /// On failure the sink is aborted before the error is returned.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_to_sink(&self, sink: &mut dyn FrameSink) -> CubeAnimResult<RenderStats> {
        let out = self.stream_into(sink);
        if out.is_err() {
            sink.abort();
        }
        out
    }

    /// Render the animation to `options().output`, choosing the container by extension.
    ///
    /// A failed render leaves no partial output file behind.
    #[tracing::instrument(skip(self), fields(out = %self.opts.output.display()))]
    pub fn render_to_file(&self) -> CubeAnimResult<RenderStats> {
        tracing::info!(
            frames = self.cube.len(),
            cmap = %self.cmap,
            "rendering animation"
        );
        let mut guard = SinkGuard::new(sink_for_path(&self.opts.output));
        let stats = self.render_to_sink(guard.sink_mut())?;
        guard.finish();
        tracing::info!(
            frames = stats.frames_rendered,
            out = %self.opts.output.display(),
            "animation written"
        );
        Ok(stats)
    }

    fn stream_into(&self, sink: &mut dyn FrameSink) -> CubeAnimResult<RenderStats> {
        let mut stats = RenderStats {
            frames_total: self.cube.len() as u64,
            frames_rendered: 0,
        };
        sink.begin(self.opts.sink_config()?)?;
        let mut seq = self.sequencer();
        while let Some((idx, frame)) = seq.advance()? {
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
        }
        sink.end()?;
        Ok(stats)
    }
}

/// Aborts the wrapped sink on drop unless the render finished.
struct SinkGuard {
    sink: Box<dyn FrameSink>,
    finished: bool,
}

impl SinkGuard {
    fn new(sink: Box<dyn FrameSink>) -> Self {
        Self {
            sink,
            finished: false,
        }
    }

    fn sink_mut(&mut self) -> &mut dyn FrameSink {
        self.sink.as_mut()
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.sink.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/creator.rs"]
mod tests;
