use super::*;
use crate::data::cube::Frame;
use crate::encode::sink::InMemorySink;

fn header() -> Header {
    Header::new(0.5, 0.5, 50.0, 50.0).unwrap()
}

fn small_opts() -> AnimationOptions {
    AnimationOptions {
        width: 128,
        height: 96,
        ..AnimationOptions::default()
    }
}

fn two_frame_cube() -> Cube {
    let a = Frame::from_rows(vec![vec![-5.0, 10.0], vec![0.0, 1.0]]).unwrap();
    let b = Frame::from_rows(vec![vec![0.0, 3.0], vec![1.0, 2.0]]).unwrap();
    Cube::new(vec![a, b], vec![-1.0, 1.0]).unwrap()
}

#[test]
fn new_resolves_axes_and_global_scale() {
    let creator = AnimationCreator::new(header(), two_frame_cube(), small_opts()).unwrap();
    assert_eq!(creator.color_scale(), ColorScale::new(-5.0, 10.0).unwrap());
    assert_eq!(creator.axes().extent().as_array(), [24.5, -24.5, -24.5, 24.5]);
    assert_eq!(creator.unit(), AngularUnit::Degrees);
    assert_eq!(creator.colormap().name(), "Spectral");
}

#[test]
fn configuration_errors_surface_up_front() {
    let bad_cmap = AnimationOptions {
        cmap: "jet".to_owned(),
        ..small_opts()
    };
    assert!(matches!(
        AnimationCreator::new(header(), two_frame_cube(), bad_cmap),
        Err(CubeAnimError::Config(_))
    ));

    let partial = AnimationOptions {
        vmin: Some(0.0),
        ..small_opts()
    };
    assert!(matches!(
        AnimationCreator::new(header(), two_frame_cube(), partial),
        Err(CubeAnimError::Config(_))
    ));

    let zero_step = Header::new(0.0, 0.5, 50.0, 50.0).unwrap();
    assert!(matches!(
        AnimationCreator::new(zero_step, two_frame_cube(), small_opts()),
        Err(CubeAnimError::Config(_))
    ));
}

#[test]
fn render_to_sink_pushes_every_frame() {
    let creator = AnimationCreator::new(header(), two_frame_cube(), small_opts()).unwrap();
    let mut sink = InMemorySink::new();
    let stats = creator.render_to_sink(&mut sink).unwrap();

    assert_eq!(
        stats,
        RenderStats {
            frames_total: 2,
            frames_rendered: 2
        }
    );
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (128, 96));
    assert_eq!(cfg.frame_delay_ms, 50);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);
}

struct FailingSink {
    pushed: u64,
    aborted: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: crate::encode::sink::SinkConfig) -> CubeAnimResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> CubeAnimResult<()> {
        self.pushed += 1;
        if self.pushed == 2 {
            return Err(CubeAnimError::evaluation("disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> CubeAnimResult<()> {
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[test]
fn failed_render_aborts_the_sink() {
    let creator = AnimationCreator::new(header(), two_frame_cube(), small_opts()).unwrap();
    let mut sink = FailingSink {
        pushed: 0,
        aborted: false,
    };
    assert!(creator.render_to_sink(&mut sink).is_err());
    assert!(sink.aborted);
}

#[test]
fn render_frame_checks_bounds() {
    let creator = AnimationCreator::new(header(), two_frame_cube(), small_opts()).unwrap();
    let frame = creator.render_frame(FrameIndex(1)).unwrap();
    assert_eq!((frame.width, frame.height), (128, 96));
    assert!(creator.render_frame(FrameIndex(2)).is_err());
}

#[test]
fn render_to_file_writes_gif() {
    let out = std::env::temp_dir().join(format!("cubeanim_creator_{}.gif", std::process::id()));
    let mut creator = AnimationCreator::new(header(), two_frame_cube(), small_opts()).unwrap();
    creator.set_output(&out).unwrap();
    let stats = creator.render_to_file().unwrap();
    assert_eq!(stats.frames_rendered, 2);
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn set_output_revalidates() {
    let mut creator = AnimationCreator::new(
        header(),
        two_frame_cube(),
        AnimationOptions {
            width: 129,
            output: PathBuf::from("a.gif"),
            ..small_opts()
        },
    )
    .unwrap();
    assert!(creator.set_output("a.mp4").is_err());
    assert_eq!(creator.options().output, PathBuf::from("a.gif"));
}

#[test]
fn absurd_reference_pixel_is_a_config_error() {
    let header = Header::new(1.0, 1.0, 1e18, 1.0).unwrap();
    let err = AnimationCreator::new(header, two_frame_cube(), small_opts()).unwrap_err();
    assert!(matches!(err, CubeAnimError::Config(_)));
}
