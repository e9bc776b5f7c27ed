use super::*;

use crate::animation::timeline::TimelineState;
use crate::render::recorder::CommandRecorder;
use crate::texture::synth::OverlayMode;

fn session(viewport: Viewport) -> IntroSession {
    IntroSession::with_parts(
        IntroConfig::default(),
        viewport,
        TextureCache::new(OverlayMode::Disabled),
        TitleAssets::default(),
    )
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = IntroConfig::default();
    config.animation.duration_ms = -1.0;
    assert!(IntroSession::new(config, Viewport::new(100, 100)).is_err());
}

#[test]
fn resize_cancels_the_old_timeline() {
    let mut s = session(Viewport::new(320, 240));
    let mut rec = CommandRecorder::new(Viewport::new(320, 240));
    s.start(&mut rec, 0.0).unwrap();
    assert_eq!(s.generation(), 0);

    let mut old = s.resize(Viewport::new(640, 480));
    assert_eq!(s.generation(), 1);
    assert_eq!(s.viewport(), Viewport::new(640, 480));
    assert_eq!(s.timeline().state(), TimelineState::Initial);

    rec.take();
    let mut cache = TextureCache::new(OverlayMode::Disabled);
    let mut title = TitleAssets::default();
    assert_eq!(
        old.tick(&mut rec, &mut cache, &mut title, 3000.0).unwrap(),
        Step::Cancelled
    );
    assert!(rec.commands().is_empty());

    // The new timeline runs normally.
    let mut rec = CommandRecorder::new(Viewport::new(640, 480));
    assert_eq!(s.tick(&mut rec, 10.0).unwrap(), Step::WaitUntil(2010.0));
    assert!(!rec.commands().is_empty());
}

#[test]
fn cache_survives_resize() {
    let mut s = session(Viewport::new(320, 240));
    let mut rec = CommandRecorder::new(Viewport::new(320, 240));
    s.start(&mut rec, 0.0).unwrap();
    let before = s.cache().synthesis_count();
    assert!(before > 0);

    s.resize(Viewport::new(320, 240));
    s.start(&mut rec, 0.0).unwrap();
    assert_eq!(s.cache().synthesis_count(), before);
}
