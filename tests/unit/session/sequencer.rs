use super::*;
use crate::data::cube::Frame;

fn cube(values: &[f64]) -> Cube {
    let frames = values
        .iter()
        .map(|&v| Frame::new(4, 4, vec![v; 16]).unwrap())
        .collect();
    let axis = (0..values.len()).map(|i| i as f64 * 0.25 - 1.0).collect();
    Cube::new(frames, axis).unwrap()
}

fn plan() -> FigurePlan {
    FigurePlan {
        canvas: Canvas {
            width: 160,
            height: 120,
        },
        extent: Extent {
            left: 2.0,
            right: -2.0,
            bottom: -2.0,
            top: 2.0,
        },
        clim: ColorScale::new(0.0, 1.0).unwrap(),
        cmap: Colormap::from_name("viridis").unwrap(),
        title_pad_pt: 0.0,
        labels: ("x".to_owned(), "y".to_owned()),
        cblabel: "flux".to_owned(),
        title: "start".to_owned(),
        frame_title_prefix: "Faraday Depth Spectrum at".to_owned(),
        axis_unit: "rad/m^2".to_owned(),
        font_dir: None,
    }
}

#[test]
fn frames_come_out_in_order_then_done() {
    let cube = cube(&[0.0, 0.5, 1.0]);
    let mut seq = FrameSequencer::new(&cube, plan());
    assert!(seq.state().is_none());

    let mut seen = Vec::new();
    while let Some((idx, frame)) = seq.advance().unwrap() {
        assert_eq!((frame.width, frame.height), (160, 120));
        assert!(frame.premultiplied);
        assert_eq!(seq.position(), Some(idx));
        seen.push(idx.0);
    }
    assert_eq!(seen, vec![0, 1, 2]);
    assert!(seq.is_done());
    assert!(seq.state().is_none());
    assert!(seq.advance().is_err());
}

#[test]
fn title_tracks_the_axis_value() {
    let cube = cube(&[0.0, 0.5]);
    let mut seq = FrameSequencer::new(&cube, plan());
    seq.advance().unwrap();
    assert_eq!(
        seq.state().unwrap().title,
        "Faraday Depth Spectrum at -1.0000 rad/m^2"
    );
    seq.advance().unwrap();
    let state = seq.state().unwrap();
    assert_eq!(state.frame, FrameIndex(1));
    assert_eq!(state.title, "Faraday Depth Spectrum at -0.7500 rad/m^2");
    assert_eq!(state.clim, ColorScale::new(0.0, 1.0).unwrap());
}

#[test]
fn image_pixels_follow_the_shared_scale() {
    let cube = cube(&[1.0, 0.0]);
    let mut seq = FrameSequencer::new(&cube, plan());
    let cmap = Colormap::from_name("viridis").unwrap();

    let (_, first) = seq.advance().unwrap().unwrap();
    let rect = seq.image_rect().unwrap();
    let (cx, cy) = (rect.center().x as u32, rect.center().y as u32);
    let [r, g, b] = cmap.eval(1.0);
    assert_eq!(first.pixel(cx, cy), Some([r, g, b, 255]));

    let (_, second) = seq.advance().unwrap().unwrap();
    let [r, g, b] = cmap.eval(0.0);
    assert_eq!(second.pixel(cx, cy), Some([r, g, b, 255]));
}

#[test]
fn colorbar_sits_right_of_the_image() {
    let cube = cube(&[0.0]);
    let mut seq = FrameSequencer::new(&cube, plan());
    assert!(seq.colorbar().is_none());
    seq.advance().unwrap();
    let image = seq.image_rect().unwrap();
    let bar = seq.colorbar().unwrap();
    assert!(bar.rect.x0 > image.x1);
    assert!(bar.ticks.len() <= 3);
    assert_eq!(bar.label, "flux");
}

#[test]
fn render_at_does_not_move_the_sequence() {
    let cube = cube(&[0.0, 0.5, 1.0]);
    let mut seq = FrameSequencer::new(&cube, plan());
    let frame = seq.render_at(FrameIndex(2)).unwrap();
    assert_eq!(frame.width, 160);
    assert_eq!(seq.state().unwrap().frame, FrameIndex(2));
    assert_eq!(seq.position(), None);

    let (idx, _) = seq.advance().unwrap().unwrap();
    assert_eq!(idx, FrameIndex(0));
    assert!(seq.render_at(FrameIndex(3)).is_err());
}
