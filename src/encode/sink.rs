use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Playback rate for constant-rate containers (MP4).
    pub fps: Fps,
    /// Per-frame delay for delay-based containers (GIF), in milliseconds.
    pub frame_delay_ms: u32,
    /// Loop playback forever where the container supports it.
    pub repeat: bool,
}

impl SinkConfig {
    /// Output dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

/// Sink contract for consuming rendered frames in cube order.
///
/// Ordering contract: `push_frame` is called with indices `0, 1, 2, ...` without gaps.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> CubeAnimResult<()>;
    /// Push the next frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CubeAnimResult<()>;
    /// Called once after the last frame is pushed; finalizes the output.
    fn end(&mut self) -> CubeAnimResult<()>;
    /// Release resources after a failed or interrupted render. Must be safe to call at any
    /// point, including before `begin` and after `end`.
    fn abort(&mut self) {}
}

/// Tracks the next expected frame index for a sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOrder {
    next: u64,
}

impl FrameOrder {
    /// Accept `idx` if it is exactly the next index.
    pub fn accept(&mut self, idx: FrameIndex) -> CubeAnimResult<()> {
        if idx.0 != self.next {
            return Err(CubeAnimError::evaluation(format!(
                "sink received frame {} but expected frame {}",
                idx.0, self.next
            )));
        }
        self.next += 1;
        Ok(())
    }

    /// Number of frames accepted so far.
    pub fn count(&self) -> u64 {
        self.next
    }
}

pub(crate) fn check_frame_size(cfg: &SinkConfig, frame: &FrameRGBA) -> CubeAnimResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(CubeAnimError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != cfg.canvas().rgba_len() {
        return Err(CubeAnimError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
    aborted: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` succeeded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `true` once `abort` ran.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CubeAnimResult<()> {
        self.cfg = Some(cfg);
        self.order = FrameOrder::default();
        self.frames.clear();
        self.finished = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CubeAnimResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| CubeAnimError::evaluation("in-memory sink not started"))?;
        check_frame_size(cfg, frame)?;
        self.order.accept(idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CubeAnimResult<()> {
        if self.cfg.is_none() {
            return Err(CubeAnimError::evaluation("in-memory sink not started"));
        }
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
