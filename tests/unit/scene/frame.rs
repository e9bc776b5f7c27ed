use super::*;

use crate::foundation::core::Rgba8;
use crate::render::recorder::{CommandRecorder, DrawOp};

#[test]
fn wall_surrounds_the_frame() {
    let viewport = Viewport::new(1000, 500);
    let frame = FrameRect::from_viewport(viewport);
    let palette = Palette::default();
    let mut rec = CommandRecorder::new(viewport);
    draw_frame(&mut rec, viewport, &frame, &palette);

    let walls: Vec<Rect> = rec
        .commands()
        .iter()
        .filter_map(|c| match c.op {
            DrawOp::FillRect { rect, color } if color == palette.wall => Some(rect),
            _ => None,
        })
        .collect();
    assert_eq!(walls.len(), 4);
    let covered: f64 = walls.iter().map(|r| r.area()).sum();
    assert!((covered - (1000.0 * 500.0 - frame.width * frame.height)).abs() < 1e-6);
}

#[test]
fn frame_body_and_bevels_use_the_palette() {
    let viewport = Viewport::new(800, 600);
    let frame = FrameRect::from_viewport(viewport);
    let palette = Palette::default();
    let mut rec = CommandRecorder::new(viewport);
    draw_frame(&mut rec, viewport, &frame, &palette);

    let fills_of = |c: Rgba8| rec.count(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == c));
    assert_eq!(fills_of(palette.frame_black), 5);
    assert_eq!(fills_of(palette.frame_highlight), 2);
    assert_eq!(fills_of(palette.frame_dark), 2);
    assert_eq!(rec.count(|op| matches!(op, DrawOp::StrokeRect { .. })), 2);
}

#[test]
fn border_strips_have_the_frame_thickness() {
    let outer = Rect::new(10.0, 10.0, 110.0, 60.0);
    let strips = border_strips(outer, 20.0);
    assert_eq!(strips[0].height(), 20.0);
    assert_eq!(strips[1].y1, 60.0);
    assert_eq!(strips[2].width(), 20.0);
    assert_eq!(strips[3].x0, 90.0);
}
