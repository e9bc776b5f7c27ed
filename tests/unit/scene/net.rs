use super::*;

use kurbo::Shape;

use crate::render::recorder::{CommandRecorder, DrawOp};

#[test]
fn geometry_is_centred_full_width() {
    let net = NetGeometry::from_viewport(Viewport::new(1200, 1000));
    assert_eq!(net.width, 1200.0);
    assert_eq!(net.height, 200.0);
    assert_eq!(net.start_y, 400.0);
    let band = net.central_band();
    assert_eq!(band.center().x, 600.0);
    assert_eq!(band.width(), 8.0);
}

#[test]
fn vertical_mesh_skips_the_central_band_and_sags() {
    let net = NetGeometry::from_viewport(Viewport::new(300, 500));
    let strands = net.vertical_mesh();
    // 0, 15, ..., 300 is 21 strands; x = 150 falls inside the central band.
    assert_eq!(strands.len(), 20);
    for s in &strands {
        let b = s.bounding_box();
        assert!((b.x0 - 150.0).abs() > 4.0);
    }
    let edge = strands[0].bounding_box();
    let near_mid = strands[9].bounding_box();
    assert!(near_mid.y0 > edge.y0);
}

#[test]
fn hidden_net_draws_nothing() {
    let viewport = Viewport::new(400, 300);
    let mut rec = CommandRecorder::new(viewport);
    draw_net(&mut rec, viewport, 0.0, &Palette::default());
    assert!(rec.commands().is_empty());
}

#[test]
fn early_reveal_skips_the_mesh() {
    let viewport = Viewport::new(400, 300);
    let mut rec = CommandRecorder::new(viewport);
    draw_net(&mut rec, viewport, 0.2, &Palette::default());

    assert_eq!(rec.count(|op| matches!(op, DrawOp::FillPath { .. })), 1);
    assert_eq!(rec.count(|op| matches!(op, DrawOp::FillRect { .. })), 1);
    // Only the two contours.
    assert_eq!(rec.count(|op| matches!(op, DrawOp::StrokePath { .. })), 2);
    for cmd in rec.commands() {
        assert!((cmd.alpha - 0.2).abs() < 1e-12);
    }
    let scale = rec.commands()[0].transform.as_coeffs()[0];
    assert!((scale - 0.44).abs() < 1e-12);
}

#[test]
fn full_reveal_draws_the_mesh_at_full_alpha() {
    let viewport = Viewport::new(400, 300);
    let mut rec = CommandRecorder::new(viewport);
    draw_net(&mut rec, viewport, 1.0, &Palette::default());

    let net = NetGeometry::from_viewport(viewport);
    let mesh = net.vertical_mesh().len() + net.horizontal_mesh().len();
    assert_eq!(
        rec.count(|op| matches!(op, DrawOp::StrokePath { .. })),
        mesh + 2
    );
    assert!(rec.commands().iter().all(|c| c.alpha == 1.0));
    assert_eq!(rec.commands()[0].transform, Affine::IDENTITY);
    assert_eq!(rec.depth(), 0);
}

#[test]
fn mesh_fades_in_after_threshold() {
    let viewport = Viewport::new(400, 300);
    let mut rec = CommandRecorder::new(viewport);
    draw_net(&mut rec, viewport, 0.65, &Palette::default());
    let mesh_alpha = rec
        .commands()
        .iter()
        .find(|c| matches!(&c.op, DrawOp::StrokePath { style, .. } if style.width == 2.0))
        .map(|c| c.alpha)
        .unwrap();
    assert!((mesh_alpha - 0.65 * 0.5).abs() < 1e-12);
}
