use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.as_f64(), 30.0);
}

#[test]
fn canvas_default_matches_figure_size() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (640, 480));
    assert_eq!(c.rgba_len(), 640 * 480 * 4);
    assert!(c.validate().is_ok());
    assert!(
        Canvas {
            width: 32,
            height: 480
        }
        .validate()
        .is_err()
    );
}

#[test]
fn extent_keeps_reversed_x_order() {
    let e = Extent {
        left: 24.5,
        right: -24.5,
        bottom: -24.5,
        top: 24.5,
    };
    assert_eq!(e.as_array(), [24.5, -24.5, -24.5, 24.5]);
    assert_eq!(e.width(), 49.0);
    assert_eq!(e.height(), 49.0);
}
