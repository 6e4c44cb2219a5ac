use super::*;

fn square_extent() -> Extent {
    Extent {
        left: 24.5,
        right: -24.5,
        bottom: -24.5,
        top: 24.5,
    }
}

#[test]
fn square_extent_gives_square_axes_inside_canvas() {
    let canvas = Canvas::default();
    let layout = FigureLayout::compute(canvas, square_extent(), (50, 50), 0.0);
    let r = layout.image;
    assert!((r.width() - r.height()).abs() <= 1.0);
    assert!(r.x0 >= 0.0 && r.y0 >= 0.0);
    let cbar_right = r.x1 + layout.colorbar_pad_px() + r.width() * FigureLayout::COLORBAR_FRACTION;
    assert!(cbar_right <= f64::from(canvas.width));
    assert!(r.y1 <= f64::from(canvas.height));
}

#[test]
fn degenerate_extent_uses_pixel_aspect() {
    let extent = Extent {
        left: 0.0,
        right: 0.0,
        bottom: -1.0,
        top: 1.0,
    };
    let layout = FigureLayout::compute(Canvas::default(), extent, (10, 20), 0.0);
    let r = layout.image;
    assert!((r.width() / r.height() - 2.0).abs() < 0.05);
}

#[test]
fn title_pad_moves_title_up() {
    let a = FigureLayout::compute(Canvas::default(), square_extent(), (50, 50), 0.0);
    let b = FigureLayout::compute(Canvas::default(), square_extent(), (50, 50), 10.0);
    assert!(b.title_anchor().1 < a.title_anchor().1);
    assert_eq!(a.dpi(), 100.0);
}
