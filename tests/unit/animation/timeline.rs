use super::*;

use crate::animation::cancel::Generation;
use crate::foundation::core::Viewport;
use crate::render::recorder::{CommandRecorder, DrawCmd, DrawOp};
use crate::render::surface::{RasterImage, TextBlock, TextBrushRgba8};
use crate::texture::synth::OverlayMode;

fn layout() -> CourtLayout {
    CourtLayout::from_viewport(Viewport::new(640, 360))
}

fn timeline(token: CancelToken) -> AnimationTimeline {
    AnimationTimeline::new(
        AnimationConfig::default(),
        Palette::default(),
        layout(),
        token,
    )
}

fn cache() -> TextureCache {
    TextureCache::new(OverlayMode::Disabled)
}

#[test]
fn zoom_factor_reaches_max_plus_one() {
    let cfg = AnimationConfig::default();
    let frame = sample_frame(&cfg, &layout(), 1.0);
    assert_eq!(frame.eased, 1.0);
    let PhaseState::Zoom {
        zoom_progress,
        zoom_factor,
        doors,
        net_reveal,
        title_progress,
    } = frame.phase
    else {
        panic!("expected zoom phase");
    };
    assert_eq!(zoom_progress, 1.0);
    assert_eq!(zoom_factor, 21.0);
    assert_eq!(doors, None);
    assert_eq!(net_reveal, Some(1.0));
    assert_eq!(title_progress, Some(1.0));
}

#[test]
fn door_phase_starts_closed() {
    let frame = sample_frame(&AnimationConfig::default(), &layout(), 0.0);
    assert_eq!(
        frame.phase,
        PhaseState::Doors {
            door_progress: 0.0,
            slide: 0.0
        }
    );
}

#[test]
fn door_formula_is_continuous_across_the_zoom_boundary() {
    let cfg = AnimationConfig::default();
    let layout = layout();

    // Same helper on both sides of the boundary.
    let at_boundary = door_slide(&cfg, &layout, cfg.zoom_start_ratio);
    let expected = (cfg.zoom_start_ratio / cfg.door_phase_ratio) * layout.service_box.width * 0.85;
    assert!((at_boundary - expected).abs() < 1e-9);
    assert_eq!(door_fade_opacity(0.0), 1.0);

    // eased(raw) crosses 0.4 near raw = 0.436; sample tightly around it.
    let (mut below, mut above) = (None, None);
    for i in 0..20_000 {
        let raw = 0.43 + f64::from(i) * 1e-6;
        match sample_frame(&cfg, &layout, raw).phase {
            PhaseState::Doors { slide, .. } => below = Some(slide),
            PhaseState::Zoom {
                doors: Some(fade), ..
            } => {
                above = Some(fade);
                break;
            }
            PhaseState::Zoom { .. } => panic!("doors missing right after the boundary"),
        }
    }
    let (below, above) = (below.unwrap(), above.unwrap());
    assert!((below - above.slide).abs() < 1e-2);
    assert!(above.opacity > 0.999);
}

#[test]
fn doors_fade_out_before_the_net() {
    assert_eq!(door_fade_opacity(0.9), 0.0);
    assert_eq!(door_fade_opacity(1.0), 0.0);
    assert!((door_fade_opacity(0.45) - 0.5).abs() < 1e-12);
}

#[test]
fn phases_follow_raw_progress_in_order() {
    let cfg = AnimationConfig::default();
    let layout = layout();
    let mut prev_eased = 0.0;
    let mut seen_zoom = false;
    let mut seen_net = false;
    for i in 0..=1000 {
        let frame = sample_frame(&cfg, &layout, f64::from(i) / 1000.0);
        assert!(frame.eased >= prev_eased);
        assert!((0.0..=1.0).contains(&frame.eased));
        prev_eased = frame.eased;
        match frame.phase {
            PhaseState::Doors { .. } => assert!(!seen_zoom, "doors after zoom at {i}"),
            PhaseState::Zoom {
                zoom_factor,
                net_reveal,
                title_progress,
                ..
            } => {
                seen_zoom = true;
                assert!((1.0..=21.0).contains(&zoom_factor));
                if net_reveal.is_some() {
                    seen_net = true;
                }
                if title_progress.is_some() {
                    assert!(net_reveal.unwrap() > cfg.text_start_ratio);
                }
            }
        }
    }
    assert!(seen_zoom && seen_net);
}

#[test]
fn zoom_is_pivoted_at_the_court_centre() {
    let pivot = Point::new(320.0, 180.0);
    let zoom = zoom_about(pivot, 4.0);
    assert_eq!(zoom * pivot, pivot);
    assert_eq!(zoom * Point::new(321.0, 180.0), Point::new(324.0, 180.0));
}

#[test]
fn start_paints_the_initial_pose_and_holds() {
    let mut tl = timeline(CancelToken::never());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();

    let step = tl.start(&mut rec, &mut cache, 100.0).unwrap();
    assert_eq!(step, Step::WaitUntil(2100.0));
    assert_eq!(tl.state(), TimelineState::Holding { until_ms: 2100.0 });

    let palette = Palette::default();
    assert_eq!(rec.count(|op| matches!(op, DrawOp::Clip { .. })), 1);
    assert!(rec.count(|op| matches!(op, DrawOp::Tile { .. })) > 0);
    assert_eq!(
        rec.count(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == palette.service_fill)),
        0
    );
    // Texture is drawn inside the frame-interior clip.
    assert!(
        rec.commands()
            .iter()
            .filter(|c| matches!(c.op, DrawOp::Tile { .. }))
            .all(|c| c.clip_depth == 1)
    );
    assert_eq!(rec.depth(), 0);

    // Starting again does not repaint.
    rec.take();
    assert_eq!(tl.start(&mut rec, &mut cache, 500.0).unwrap(), Step::WaitUntil(2100.0));
    assert!(rec.commands().is_empty());
}

#[test]
fn tick_runs_hold_then_frames_then_finishes() {
    let mut tl = timeline(CancelToken::never());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();
    let mut title = TitleAssets::default();

    tl.start(&mut rec, &mut cache, 0.0).unwrap();
    rec.take();

    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 1999.0).unwrap(),
        Step::WaitUntil(2000.0)
    );
    assert!(rec.commands().is_empty());
    assert_eq!(tl.progress(), 0.0);

    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 2000.0).unwrap(),
        Step::NextFrame
    );
    assert_eq!(tl.state(), TimelineState::Running);
    let palette = Palette::default();
    assert_eq!(
        rec.count(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == palette.service_fill)),
        2
    );
    assert!(matches!(rec.commands()[0].op, DrawOp::Clear { .. }));

    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 4500.0).unwrap(),
        Step::NextFrame
    );
    assert!((tl.progress() - 0.5).abs() < 1e-12);

    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 9000.0).unwrap(),
        Step::Finished
    );
    assert_eq!(tl.state(), TimelineState::Done);
    assert_eq!(tl.progress(), 1.0);

    rec.take();
    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 12_000.0).unwrap(),
        Step::Finished
    );
    assert!(rec.commands().is_empty());

    // Two tile sizes for the whole run: frame interior and service-box doors.
    assert_eq!(cache.synthesis_count(), 2);
}

#[test]
fn hold_counts_against_the_duration() {
    let mut tl = timeline(CancelToken::never());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();
    let mut title = TitleAssets::default();

    assert_eq!(
        tl.start(&mut rec, &mut cache, 0.0).unwrap(),
        Step::WaitUntil(2000.0)
    );
    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 2000.0).unwrap(),
        Step::NextFrame
    );
    assert!((tl.progress() - 2.0 / 9.0).abs() < 1e-12);

    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 9000.0).unwrap(),
        Step::Finished
    );
    assert_eq!(tl.progress(), 1.0);
}

#[test]
fn late_wake_up_measures_progress_from_start() {
    let mut tl = timeline(CancelToken::never());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();
    let mut title = TitleAssets::default();

    tl.start(&mut rec, &mut cache, 1000.0).unwrap();
    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 5500.0).unwrap(),
        Step::NextFrame
    );
    assert!((tl.progress() - 0.5).abs() < 1e-12);
}

#[test]
fn stale_timeline_is_cancelled_without_painting() {
    let generation = Generation::new();
    let mut tl = timeline(generation.token());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();
    let mut title = TitleAssets::default();

    tl.start(&mut rec, &mut cache, 0.0).unwrap();
    rec.take();
    generation.bump();

    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 5000.0).unwrap(),
        Step::Cancelled
    );
    assert_eq!(tl.state(), TimelineState::Cancelled);
    assert!(rec.commands().is_empty());
    assert_eq!(tl.start(&mut rec, &mut cache, 0.0).unwrap(), Step::Cancelled);
}

#[test]
fn zoomed_frames_scale_the_court_and_draw_the_net_unscaled() {
    let mut tl = timeline(CancelToken::never());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();
    let mut title = TitleAssets::default();

    tl.start(&mut rec, &mut cache, 0.0).unwrap();
    tl.tick(&mut rec, &mut cache, &mut title, 2000.0).unwrap();
    rec.take();
    // raw = 0.95: deep in the zoom with the net revealed.
    tl.tick(&mut rec, &mut cache, &mut title, 0.95 * 9000.0)
        .unwrap();

    let scales: Vec<f64> = rec
        .commands()
        .iter()
        .map(|c| c.transform.as_coeffs()[0])
        .collect();
    assert!(scales.iter().any(|s| *s > 15.0));
    // Net band drawn with the net's own 0.3..1 scale, not the court zoom.
    let band = rec
        .commands()
        .iter()
        .find(|c| matches!(c.op, DrawOp::FillPath { .. }))
        .unwrap();
    assert!(band.transform.as_coeffs()[0] <= 1.0);
}

#[test]
fn title_without_logo_draws_no_image() {
    let mut tl = timeline(CancelToken::never());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();

    let mut none = TitleAssets::default();
    tl.start(&mut rec, &mut cache, 0.0).unwrap();
    tl.tick(&mut rec, &mut cache, &mut none, 2000.0).unwrap();
    rec.take();
    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut none, 9000.0).unwrap(),
        Step::Finished
    );
    assert_eq!(rec.count(|op| matches!(op, DrawOp::Image { .. })), 0);
    assert_eq!(rec.count(|op| matches!(op, DrawOp::Text { .. })), 0);

    let mut tl = timeline(CancelToken::never());
    let img = RasterImage::new(2, 2, vec![255; 16]);
    let id = img.id;
    let mut with_logo = TitleAssets::with_parts(None, Some(img));
    tl.start(&mut rec, &mut cache, 0.0).unwrap();
    tl.tick(&mut rec, &mut cache, &mut with_logo, 2000.0).unwrap();
    rec.take();
    tl.tick(&mut rec, &mut cache, &mut with_logo, 9000.0).unwrap();
    assert_eq!(
        rec.count(|op| matches!(op, DrawOp::Image { image, .. } if *image == id)),
        1
    );
}

#[test]
fn title_with_text_and_no_logo_draws_the_text() {
    let mut tl = timeline(CancelToken::never());
    let mut rec = CommandRecorder::new(Viewport::new(640, 360));
    let mut cache = cache();
    let text = TextBlock {
        text: "Roland-Garros".to_string(),
        width: 100.0,
        height: 30.0,
        layout: std::sync::Arc::new(parley::Layout::<TextBrushRgba8>::new()),
        font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(vec![0u8; 4]), 0),
    };
    let mut title = TitleAssets::with_parts(Some(text), None);

    tl.start(&mut rec, &mut cache, 0.0).unwrap();
    rec.take();
    assert_eq!(
        tl.tick(&mut rec, &mut cache, &mut title, 9000.0).unwrap(),
        Step::Finished
    );
    assert_eq!(rec.count(|op| matches!(op, DrawOp::Image { .. })), 0);
    let texts: Vec<&DrawCmd> = rec
        .commands()
        .iter()
        .filter(|c| matches!(c.op, DrawOp::Text { .. }))
        .collect();
    assert_eq!(texts.len(), 1);
    // Screen space, centred in the 640x360 viewport.
    assert_eq!(texts[0].transform, Affine::IDENTITY);
    assert_eq!(
        texts[0].op,
        DrawOp::Text {
            text: "Roland-Garros".to_string(),
            origin: Point::new(270.0, 165.0),
        }
    );
}
