use super::*;

fn extent() -> Extent {
    Extent {
        left: 1.0,
        right: -1.0,
        bottom: -1.0,
        top: 1.0,
    }
}

fn cmap() -> Colormap {
    Colormap::from_name("viridis").unwrap()
}

#[test]
fn origin_lower_puts_row_zero_at_bottom() {
    let clim = ColorScale::new(0.0, 1.0).unwrap();
    let frame = Frame::new(2, 2, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    let mut img = ImageHandle::new(Rect::new(0.0, 0.0, 4.0, 4.0), extent(), (2, 2), cmap(), clim)
        .unwrap();
    img.set_data(&frame).unwrap();

    let mut pixmap = Pixmap::new(4, 4).unwrap();
    img.paint(&mut pixmap).unwrap();

    let px = |x: usize, y: usize| {
        let i = (y * 4 + x) * 4;
        [pixmap.data()[i], pixmap.data()[i + 1], pixmap.data()[i + 2]]
    };
    assert_eq!(px(0, 0), cmap().eval(1.0));
    assert_eq!(px(3, 3), cmap().eval(0.0));
}

#[test]
fn clim_change_recolours_without_new_data() {
    let frame = Frame::new(1, 1, vec![0.5]).unwrap();
    let mut img = ImageHandle::new(
        Rect::new(1.0, 1.0, 3.0, 3.0),
        extent(),
        (1, 1),
        cmap(),
        ColorScale::new(0.0, 1.0).unwrap(),
    )
    .unwrap();
    img.set_data(&frame).unwrap();
    img.set_clim(ColorScale::new(0.5, 2.0).unwrap());
    assert_eq!(img.clim().vmin, 0.5);

    let mut pixmap = Pixmap::new(4, 4).unwrap();
    img.paint(&mut pixmap).unwrap();
    let i = (4 + 1) * 4;
    let [r, g, b] = cmap().eval(0.0);
    assert_eq!(&pixmap.data()[i..i + 4], &[r, g, b, 255]);
    // Outside the image rect stays transparent.
    assert_eq!(&pixmap.data()[0..4], &[0, 0, 0, 0]);
}

#[test]
fn nan_samples_leave_background() {
    let frame = Frame::new(1, 1, vec![f64::NAN]).unwrap();
    let mut img = ImageHandle::new(
        Rect::new(0.0, 0.0, 2.0, 2.0),
        extent(),
        (1, 1),
        cmap(),
        ColorScale::new(0.0, 1.0).unwrap(),
    )
    .unwrap();
    img.set_data(&frame).unwrap();
    let mut pixmap = Pixmap::new(2, 2).unwrap();
    img.paint(&mut pixmap).unwrap();
    assert!(pixmap.data().iter().all(|&b| b == 0));
}

#[test]
fn mismatched_shape_and_missing_data_are_errors() {
    let wrong = Frame::new(1, 2, vec![0.0, 1.0]).unwrap();
    let mut img = ImageHandle::new(
        Rect::new(0.0, 0.0, 2.0, 2.0),
        extent(),
        (2, 2),
        cmap(),
        ColorScale::new(0.0, 1.0).unwrap(),
    )
    .unwrap();
    let mut pixmap = Pixmap::new(2, 2).unwrap();
    assert!(img.paint(&mut pixmap).is_err());
    assert!(img.set_data(&wrong).is_err());
}

#[test]
fn set_data_borrows_the_frame() {
    let frames = [
        Frame::new(1, 1, vec![0.0]).unwrap(),
        Frame::new(1, 1, vec![1.0]).unwrap(),
    ];
    let mut img = ImageHandle::new(
        Rect::new(0.0, 0.0, 1.0, 1.0),
        extent(),
        (1, 1),
        cmap(),
        ColorScale::new(0.0, 1.0).unwrap(),
    )
    .unwrap();
    let mut pixmap = Pixmap::new(1, 1).unwrap();
    for (frame, t) in frames.iter().zip([0.0, 1.0]) {
        img.set_data(frame).unwrap();
        img.paint(&mut pixmap).unwrap();
        let [r, g, b] = cmap().eval(t);
        assert_eq!(pixmap.data(), &[r, g, b, 255]);
    }
}
