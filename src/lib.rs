//! cubeanim renders a cube of 2D scalar frames (for example Faraday-depth spectra) into one
//! colour-mapped video.
//!
//! The flow is:
//!
//! - Describe the job with a [`Header`], a [`Cube`] and [`AnimationOptions`] (or a JSON
//!   [`JobFile`])
//! - Build an [`AnimationCreator`], which resolves axes, the shared colour scale and the colormap
//! - Render to a file ([`AnimationCreator::render_to_file`]) or stream frames into any
//!   [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Cube data and colour scale.
pub mod data;
/// Frame sinks: ffmpeg MP4, GIF and in-memory.
pub mod encode;
/// Fixed figure renderer.
pub mod render;
/// Job configuration and rendering entry points.
pub mod session;
/// World-coordinate axes and units.
pub mod wcs;

pub use crate::foundation::core::{Canvas, Extent, Fps, FrameIndex, Point, Rect};
pub use crate::foundation::error::{CubeAnimError, CubeAnimResult};
pub use crate::foundation::math::arange;

pub use crate::data::cube::{Cube, CubeFile, Frame};
pub use crate::data::scale::ColorScale;
pub use crate::encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path, is_program_available,
};
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::{OutputFormat, sink_for_path};
pub use crate::render::colormap::{Colormap, colormap_names};
pub use crate::render::frame::FrameRGBA;
pub use crate::session::config::{AnimationOptions, JobFile};
pub use crate::session::creator::{AnimationCreator, RenderStats};
pub use crate::session::sequencer::{FigurePlan, FrameSequencer, RenderState};
pub use crate::wcs::axes::{AxisMapper, AxisSpec};
pub use crate::wcs::header::Header;
pub use crate::wcs::units::{AngularUnit, UnitPolicy, units_factor};
