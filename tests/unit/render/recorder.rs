use super::*;

use crate::render::surface::LineCap;

#[test]
fn save_restore_scopes_transform_alpha_and_clip() {
    let mut rec = CommandRecorder::new(Viewport::new(100, 50));
    rec.save();
    rec.transform(Affine::translate((10.0, 5.0)));
    rec.set_alpha(0.5);
    rec.clip_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
    rec.save();
    rec.set_alpha(0.5);
    rec.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::WHITE);
    rec.restore();
    rec.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba8::WHITE);
    rec.restore();
    rec.fill_rect(Rect::new(0.0, 0.0, 3.0, 3.0), Rgba8::WHITE);

    let cmds = rec.commands();
    assert!(matches!(cmds[0].op, DrawOp::Clip { rule: FillRule::NonZero, .. }));
    assert_eq!(cmds[1].alpha, 0.25);
    assert_eq!(cmds[1].clip_depth, 1);
    assert_eq!(cmds[1].transform, Affine::translate((10.0, 5.0)));
    assert_eq!(cmds[2].alpha, 0.5);
    assert_eq!(cmds[3].alpha, 1.0);
    assert_eq!(cmds[3].clip_depth, 0);
    assert_eq!(cmds[3].transform, Affine::IDENTITY);
    assert_eq!(rec.depth(), 0);
}

#[test]
fn unmatched_restore_is_ignored() {
    let mut rec = CommandRecorder::new(Viewport::new(10, 10));
    rec.restore();
    rec.set_alpha(2.0);
    rec.stroke_rect(
        Rect::new(0.0, 0.0, 5.0, 5.0),
        StrokeStyle::round(4.0),
        Rgba8::WHITE,
    );
    let cmd = &rec.commands()[0];
    assert_eq!(cmd.alpha, 1.0);
    let DrawOp::StrokeRect { style, .. } = &cmd.op else {
        panic!("expected stroke");
    };
    assert_eq!(style.cap, LineCap::Round);
    assert_eq!(style.width, 4.0);
}

#[test]
fn transforms_compose_in_call_order() {
    let mut rec = CommandRecorder::new(Viewport::new(10, 10));
    rec.transform(Affine::translate((5.0, 5.0)));
    rec.transform(Affine::scale(2.0));
    rec.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::WHITE);
    let t = rec.commands()[0].transform;
    assert_eq!(t * Point::new(1.0, 1.0), Point::new(7.0, 7.0));
    assert_eq!(rec.take().len(), 1);
    assert!(rec.commands().is_empty());
}
