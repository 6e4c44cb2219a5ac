pub(crate) mod ffmpeg;
pub(crate) mod gif;
pub(crate) mod sink;

use std::path::Path;

/// Output container chosen from the output path extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// H.264 MP4 via the system `ffmpeg`.
    Mp4,
    /// Animated GIF via the `image` crate.
    Gif,
}

impl OutputFormat {
    /// `.gif` (any case) selects GIF; everything else is handed to ffmpeg.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gif") => Self::Gif,
            _ => Self::Mp4,
        }
    }
}

/// Build the sink matching `path`'s container.
pub fn sink_for_path(path: &Path) -> Box<dyn sink::FrameSink> {
    match OutputFormat::from_path(path) {
        OutputFormat::Gif => Box::new(gif::GifSink::new(path)),
        OutputFormat::Mp4 => Box::new(ffmpeg::FfmpegSink::new(ffmpeg::FfmpegSinkOpts::new(path))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
