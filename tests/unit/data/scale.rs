use super::*;
use crate::data::cube::Frame;

fn two_frame_cube() -> Cube {
    Cube::new(
        vec![
            Frame::new(1, 2, vec![-5.0, 10.0]).unwrap(),
            Frame::new(1, 2, vec![0.0, 3.0]).unwrap(),
        ],
        vec![0.0, 1.0],
    )
    .unwrap()
}

#[test]
fn global_extrema_span_all_frames() {
    let s = ColorScale::from_cube(&two_frame_cube()).unwrap();
    assert_eq!((s.vmin, s.vmax), (-5.0, 10.0));
    assert_eq!(
        ColorScale::resolve(&two_frame_cube(), None, None).unwrap(),
        s
    );
}

#[test]
fn explicit_bounds_win_over_data() {
    let s = ColorScale::resolve(&two_frame_cube(), Some(-1.0), Some(1.0)).unwrap();
    assert_eq!((s.vmin, s.vmax), (-1.0, 1.0));
}

#[test]
fn partial_override_is_rejected() {
    let cube = two_frame_cube();
    let err = ColorScale::resolve(&cube, Some(0.0), None).unwrap_err();
    assert!(matches!(err, CubeAnimError::Config(_)));
    assert!(ColorScale::resolve(&cube, None, Some(0.0)).is_err());
}

#[test]
fn inverted_or_non_finite_bounds_are_rejected() {
    assert!(ColorScale::new(2.0, 1.0).is_err());
    assert!(ColorScale::new(f64::NAN, 1.0).is_err());
    assert!(ColorScale::new(1.0, 1.0).is_ok());
}

#[test]
fn all_nan_cube_has_no_scale() {
    let cube = Cube::new(vec![Frame::new(1, 1, vec![f64::NAN]).unwrap()], vec![0.0]).unwrap();
    assert!(ColorScale::from_cube(&cube).is_err());
}

#[test]
fn normalize_clamps_and_handles_degenerate_span() {
    let s = ColorScale::new(-5.0, 15.0).unwrap();
    assert_eq!(s.normalize(5.0), Some(0.5));
    assert_eq!(s.normalize(-100.0), Some(0.0));
    assert_eq!(s.normalize(100.0), Some(1.0));
    assert_eq!(s.normalize(f64::NAN), None);

    let flat = ColorScale::new(2.0, 2.0).unwrap();
    assert_eq!(flat.normalize(2.0), Some(0.0));
}
