use crate::encode::ffmpeg::{ensure_parent_dir, flatten_to_opaque_rgba8};
use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, check_frame_size};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CubeAnimError, CubeAnimResult};
use crate::render::frame::FrameRGBA;
use image::codecs::gif::{GifEncoder, Repeat};
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;

/// Encoder speed passed to the GIF quantizer (1 = best quality, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// Writer shared between the sink and its encoder.
///
/// The encoder writes the GIF trailer on drop and discards IO errors there, so the first error
/// is recorded here for the sink to report.
struct SharedWriter<W>(Rc<RefCell<SharedState<W>>>);

struct SharedState<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W> SharedWriter<W> {
    fn new(out: W) -> Self {
        Self(Rc::new(RefCell::new(SharedState { out, error: None })))
    }

    fn handle(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<W: Write> SharedWriter<W> {
    fn record<T>(state: &mut SharedState<W>, res: io::Result<T>) -> io::Result<T> {
        if let Err(e) = &res {
            state
                .error
                .get_or_insert_with(|| io::Error::new(e.kind(), e.to_string()));
        }
        res
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.0.borrow_mut();
        let res = state.out.write(buf);
        Self::record(&mut state, res)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        let res = state.out.flush();
        Self::record(&mut state, res)
    }
}

/// Report the first error seen by `writer`, then flush it.
fn finish_writer<W: Write>(writer: &SharedWriter<W>) -> CubeAnimResult<()> {
    let mut state = writer.0.borrow_mut();
    if let Some(e) = state.error.take() {
        return Err(CubeAnimError::evaluation(format!("failed to write gif: {e}")));
    }
    state
        .out
        .flush()
        .map_err(|e| CubeAnimError::evaluation(format!("failed to flush gif: {e}")))
}

/// Sink writing an animated GIF with the `image` crate.
///
/// Frame timing comes from `SinkConfig::frame_delay_ms`; `fps` is not used.
pub struct GifSink {
    out_path: PathBuf,
    bg_rgba: [u8; 4],
    encoder: Option<GifEncoder<SharedWriter<BufWriter<File>>>>,
    writer: Option<SharedWriter<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    scratch: Vec<u8>,
}

impl GifSink {
    /// Create a sink writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            bg_rgba: [255, 255, 255, 255],
            encoder: None,
            writer: None,
            cfg: None,
            order: FrameOrder::default(),
            scratch: Vec::new(),
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> CubeAnimResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(CubeAnimError::config("gif sink width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(CubeAnimError::config(format!(
                "gif frames are limited to {0}x{0} pixels",
                u16::MAX
            )));
        }
        if cfg.frame_delay_ms == 0 {
            return Err(CubeAnimError::config("frame interval must be > 0 ms"));
        }
        ensure_parent_dir(&self.out_path)?;

        let file = File::create(&self.out_path).map_err(|e| {
            CubeAnimError::evaluation(format!(
                "failed to create '{}': {e}",
                self.out_path.display()
            ))
        })?;
        let writer = SharedWriter::new(BufWriter::new(file));
        let mut encoder = GifEncoder::new_with_speed(writer.handle(), GIF_SPEED);
        // Without a loop extension the GIF plays once.
        if cfg.repeat {
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| CubeAnimError::evaluation(format!("gif setup failed: {e}")))?;
        }

        tracing::debug!(out = %self.out_path.display(), delay_ms = cfg.frame_delay_ms, "gif encoder ready");
        self.scratch = vec![0u8; cfg.canvas().rgba_len()];
        self.encoder = Some(encoder);
        self.writer = Some(writer);
        self.cfg = Some(cfg);
        self.order = FrameOrder::default();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CubeAnimResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| CubeAnimError::evaluation("gif sink not started"))?;
        check_frame_size(cfg, frame)?;
        self.order.accept(idx)?;

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;
        let buffer = image::RgbaImage::from_raw(cfg.width, cfg.height, self.scratch.clone())
            .ok_or_else(|| CubeAnimError::validation("frame buffer does not match gif size"))?;
        let delay = image::Delay::from_numer_denom_ms(cfg.frame_delay_ms, 1);

        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| CubeAnimError::evaluation("gif sink is already finalized"))?;
        encoder
            .encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))
            .map_err(|e| {
                CubeAnimError::evaluation(format!("failed to encode gif frame {}: {e}", idx.0))
            })?;
        Ok(())
    }

    fn end(&mut self) -> CubeAnimResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| CubeAnimError::evaluation("gif sink not started"))?;
        // Dropping the encoder writes the trailer.
        drop(encoder);
        let writer = self.writer.take();
        self.cfg = None;
        if self.order.count() == 0 {
            drop(writer);
            let _ = std::fs::remove_file(&self.out_path);
            return Err(CubeAnimError::evaluation("gif sink received no frames"));
        }
        let finished = writer
            .as_ref()
            .ok_or_else(|| CubeAnimError::evaluation("gif writer missing"))
            .and_then(finish_writer);
        drop(writer);
        if let Err(e) = finished {
            let _ = std::fs::remove_file(&self.out_path);
            return Err(e);
        }
        tracing::debug!(frames = self.order.count(), "gif finished");
        Ok(())
    }

    fn abort(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            drop(encoder);
            drop(self.writer.take());
            let _ = std::fs::remove_file(&self.out_path);
            tracing::warn!(out = %self.out_path.display(), "gif encode aborted");
        }
        self.cfg = None;
    }
}

impl Drop for GifSink {
    fn drop(&mut self) {
        if self.encoder.is_some() {
            self.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
