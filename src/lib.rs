//! courtintro renders the procedural clay-court intro: a textured court revealed by sliding
//! doors, a zoom onto the net and a title card.
//!
//! The public API is session-oriented:
//!
//! - Build an [`IntroConfig`] (defaults, or JSON)
//! - Create an [`IntroSession`] for a [`Viewport`]
//! - Drive it with `start`/`tick` against any [`Surface`], or render it offline into a
//!   [`FrameSink`] with [`render_intro`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod geometry;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod texture;

pub use crate::foundation::core::{
    Affine, BezPath, Fps, PaintId, Point, Rect, Rgba8, Vec2, Viewport,
};
pub use crate::foundation::error::{IntroError, IntroResult};
pub use crate::foundation::rng::Rng64;

pub use crate::animation::cancel::{CancelToken, Generation};
pub use crate::animation::clock::AnimationClock;
pub use crate::animation::ease::{Ease, ease_in_out_cubic, ease_in_out_sine};
pub use crate::animation::timeline::{
    AnimationTimeline, CourtPaint, DoorFade, FrameState, PhaseState, Step, TimelineState,
    door_fade_opacity, door_progress, door_slide, draw_door, paint_court, sample_frame,
    zoom_about,
};
pub use crate::assets::decode::{decode_image, load_image};
pub use crate::assets::pending::PendingAsset;
pub use crate::assets::text::TextLayoutEngine;
pub use crate::config::{AnimationConfig, IntroConfig, Palette, TitleConfig};
pub use crate::encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path, validate_sink_config,
};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::geometry::layout::{
    CourtLayout, CourtRect, DOOR_TRAVEL, DoorPlacement, FRAME_THICKNESS, FrameRect,
    ServiceBoxRect, Side,
};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::pipeline::{
    Clock, FrameClock, RenderOptions, RenderReport, SystemClock, expected_frame_count,
    render_intro, render_still,
};
pub use crate::render::recorder::{CommandRecorder, DrawCmd, DrawOp};
pub use crate::render::surface::{
    FillRule, FrameRGBA, LineCap, RasterImage, StrokeStyle, Surface, TextBlock, TextBrushRgba8,
};
pub use crate::scene::court::{LINE_WIDTH, LineSet, draw_court_lines};
pub use crate::scene::frame::draw_frame;
pub use crate::scene::net::{NetGeometry, draw_net};
pub use crate::scene::title::{TitleAssets, TitleContent, draw_title};
pub use crate::session::IntroSession;
pub use crate::texture::cache::{TextureCache, TileKey};
pub use crate::texture::noise::{fractal, hash};
pub use crate::texture::synth::{MAX_TILE_SIZE, OverlayMode, TextureTile, synthesize};
