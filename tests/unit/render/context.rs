use super::*;
use crate::foundation::core::Extent;

fn context() -> RenderContext {
    let extent = Extent {
        left: 1.0,
        right: -1.0,
        bottom: -1.0,
        top: 1.0,
    };
    let layout = FigureLayout::compute(Canvas::default(), extent, (4, 4), 0.0);
    RenderContext::new(layout, FontBook::load(None)).unwrap()
}

#[test]
fn first_axes_becomes_current() {
    let mut ctx = context();
    assert_eq!(ctx.current_axes(), None);
    assert!(ctx.current_rect().is_err());

    let image = ctx.layout().image;
    ctx.add_axes(AxesId::Image, image).unwrap();
    ctx.add_axes(AxesId::Colorbar, Rect::new(0.0, 0.0, 4.0, 4.0))
        .unwrap();
    assert_eq!(ctx.current_axes(), Some(AxesId::Image));
    assert_eq!(ctx.current_rect().unwrap(), image);
    assert!(ctx.add_axes(AxesId::Image, image).is_err());
}

#[test]
fn with_axes_restores_focus_on_success_and_error() {
    let mut ctx = context();
    let image = ctx.layout().image;
    ctx.add_axes(AxesId::Image, image).unwrap();
    ctx.add_axes(AxesId::Colorbar, Rect::new(0.0, 0.0, 4.0, 4.0))
        .unwrap();

    let seen = ctx
        .with_axes(AxesId::Colorbar, |ctx| Ok(ctx.current_axes()))
        .unwrap();
    assert_eq!(seen, Some(AxesId::Colorbar));
    assert_eq!(ctx.current_axes(), Some(AxesId::Image));

    let res: CubeAnimResult<()> = ctx.with_axes(AxesId::Colorbar, |_| {
        Err(CubeAnimError::evaluation("boom"))
    });
    assert!(res.is_err());
    assert_eq!(ctx.current_axes(), Some(AxesId::Image));
}

#[test]
fn focusing_unknown_axes_fails() {
    let mut ctx = context();
    let res = ctx.with_axes(AxesId::Colorbar, |_| Ok(()));
    assert!(res.is_err());
}

#[test]
fn freeze_locks_static_decorations() {
    let mut ctx = context();
    ctx.overlay_mut().unwrap().line(0.0, 0.0, 10.0, 10.0, 1.0);
    let mut canvas = ctx.blank_canvas().unwrap();
    assert!(ctx.draw_static(&mut canvas).is_err());

    ctx.freeze().unwrap();
    assert!(ctx.is_frozen());
    assert!(ctx.overlay_mut().is_err());
    assert!(ctx.static_layer_mut().is_err());
    ctx.draw_static(&mut canvas).unwrap();

    let frame = ctx.to_frame(canvas);
    assert_eq!((frame.width, frame.height), (640, 480));
    assert_eq!(frame.data.len(), 640 * 480 * 4);
    assert!(frame.premultiplied);
}
