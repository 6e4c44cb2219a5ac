use super::*;
use crate::foundation::core::Fps;

fn cfg(repeat: bool) -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::new(20, 1).unwrap(),
        frame_delay_ms: 50,
        repeat,
    }
}

fn solid(rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 4,
        height: 2,
        data: rgba.repeat(8),
        premultiplied: true,
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cubeanim_gif_{}_{name}", std::process::id()))
}

#[test]
fn writes_animated_gif_with_all_frames() {
    let out = temp_path("ok.gif");
    let mut sink = GifSink::new(&out);
    sink.begin(cfg(false)).unwrap();
    sink.push_frame(FrameIndex(0), &solid([255, 0, 0, 255])).unwrap();
    sink.push_frame(FrameIndex(1), &solid([0, 0, 255, 255])).unwrap();
    sink.end().unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    assert_eq!(bytes.last(), Some(&0x3B));

    use image::AnimationDecoder as _;
    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 2);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 50);
    let _ = std::fs::remove_file(&out);
}

#[test]
fn out_of_order_frame_is_rejected() {
    let out = temp_path("order.gif");
    let mut sink = GifSink::new(&out);
    sink.begin(cfg(true)).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &solid([0, 0, 0, 255])).is_err());
    sink.abort();
    assert!(!out.exists());
}

#[test]
fn dropping_unfinished_sink_removes_partial_file() {
    let out = temp_path("drop.gif");
    {
        let mut sink = GifSink::new(&out);
        sink.begin(cfg(false)).unwrap();
        sink.push_frame(FrameIndex(0), &solid([1, 2, 3, 255])).unwrap();
    }
    assert!(!out.exists());
}

#[test]
fn zero_interval_is_a_config_error() {
    let mut sink = GifSink::new(temp_path("zero.gif"));
    let mut c = cfg(false);
    c.frame_delay_ms = 0;
    assert!(matches!(sink.begin(c), Err(CubeAnimError::Config(_))));
}

/// Accepts `budget` bytes, then fails every write.
struct ShortWriter {
    budget: usize,
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn trailer_write_failure_is_reported() {
    let writer = SharedWriter::new(ShortWriter { budget: 1 << 20 });
    let mut encoder = GifEncoder::new(writer.handle());
    let buffer = image::RgbaImage::from_raw(4, 2, [9u8, 9, 9, 255].repeat(8)).unwrap();
    encoder.encode_frame(image::Frame::new(buffer)).unwrap();
    // Leave no room for the trailer the encoder writes on drop.
    writer.0.borrow_mut().out.budget = 0;
    drop(encoder);

    let err = finish_writer(&writer).unwrap_err();
    assert!(matches!(err, CubeAnimError::Evaluation(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn clean_writer_finishes_ok() {
    let writer = SharedWriter::new(Vec::new());
    let mut encoder = GifEncoder::new(writer.handle());
    let buffer = image::RgbaImage::from_raw(4, 2, [9u8, 9, 9, 255].repeat(8)).unwrap();
    encoder.encode_frame(image::Frame::new(buffer)).unwrap();
    drop(encoder);

    finish_writer(&writer).unwrap();
    let state = writer.0.borrow();
    assert_eq!(state.out.last(), Some(&0x3B));
}
