use crate::animation::cancel::CancelToken;
use crate::animation::clock::AnimationClock;
use crate::config::{AnimationConfig, Palette};
use crate::foundation::core::{Affine, Point, Rgba8};
use crate::foundation::error::IntroResult;
use crate::foundation::math::clamp01;
use crate::geometry::layout::{CourtLayout, DoorPlacement, Side};
use crate::render::surface::{StrokeStyle, Surface};
use crate::scene::court::{LineSet, draw_court_lines, segment};
use crate::scene::frame::draw_frame;
use crate::scene::net::draw_net;
use crate::scene::title::{TitleAssets, draw_title};
use crate::texture::cache::TextureCache;

/// Zoom progress at which the doors have fully faded out.
const DOOR_FADE_END: f64 = 0.9;
const DOOR_BORDER_WIDTH: f64 = 3.0;

/// What the host should do after a `start`/`tick` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Call `tick` again on the next display frame.
    NextFrame,
    /// Nothing changes before this time (ms); call `tick` then.
    WaitUntil(f64),
    /// The last frame has been painted and stays on the surface.
    Finished,
    /// The timeline was superseded; nothing was painted.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelineState {
    Initial,
    Holding { until_ms: f64 },
    Running,
    Done,
    Cancelled,
}

/// Doors drawn inside the zoom, fading out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorFade {
    pub slide: f64,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhaseState {
    Doors {
        door_progress: f64,
        slide: f64,
    },
    Zoom {
        zoom_progress: f64,
        zoom_factor: f64,
        doors: Option<DoorFade>,
        net_reveal: Option<f64>,
        title_progress: Option<f64>,
    },
}

/// Everything a running frame needs, derived from raw progress alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    pub raw: f64,
    pub eased: f64,
    pub phase: PhaseState,
}

pub fn door_progress(config: &AnimationConfig, eased: f64) -> f64 {
    if config.door_phase_ratio > 0.0 {
        clamp01(eased / config.door_phase_ratio)
    } else {
        1.0
    }
}

/// Door slide for an eased progress; shared by the door and zoom sub-phases.
pub fn door_slide(config: &AnimationConfig, layout: &CourtLayout, eased: f64) -> f64 {
    layout.door_slide(door_progress(config, eased))
}

/// Door opacity during the zoom: 1 at the start, 0 from 90% zoom progress on.
pub fn door_fade_opacity(zoom_progress: f64) -> f64 {
    (1.0 - zoom_progress / DOOR_FADE_END).max(0.0)
}

/// Map raw progress to the sub-phase state for one frame.
pub fn sample_frame(config: &AnimationConfig, layout: &CourtLayout, raw: f64) -> FrameState {
    let raw = clamp01(raw);
    let eased = config.progress_ease.apply(raw);
    let slide = door_slide(config, layout, eased);

    let phase = if eased <= config.zoom_start_ratio {
        PhaseState::Doors {
            door_progress: door_progress(config, eased),
            slide,
        }
    } else {
        let zoom_progress = clamp01(
            (eased - config.zoom_start_ratio) / (1.0 - config.zoom_start_ratio),
        );
        let zoom_factor = 1.0 + config.zoom_ease.apply(zoom_progress) * config.max_zoom_factor;
        let doors = (zoom_progress < DOOR_FADE_END).then(|| DoorFade {
            slide,
            opacity: door_fade_opacity(zoom_progress),
        });
        let net_reveal = (zoom_progress > config.net_start_ratio).then(|| {
            config.net_ease.apply(
                (zoom_progress - config.net_start_ratio) / (1.0 - config.net_start_ratio),
            )
        });
        let title_progress = net_reveal
            .filter(|r| *r > config.text_start_ratio)
            .map(|r| clamp01((r - config.text_start_ratio) / (1.0 - config.text_start_ratio)));
        PhaseState::Zoom {
            zoom_progress,
            zoom_factor,
            doors,
            net_reveal,
            title_progress,
        }
    };

    FrameState { raw, eased, phase }
}

/// Uniform scale by `factor` about `pivot`.
pub fn zoom_about(pivot: Point, factor: f64) -> Affine {
    let p = pivot.to_vec2();
    Affine::translate(p) * Affine::scale(factor) * Affine::translate(-p)
}

/// How the clay court is painted: which lines, how opaque, and the service-box fill if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CourtPaint {
    pub line_set: LineSet,
    pub opacity: f64,
    pub service_fill: Option<Rgba8>,
}

/// Clay texture over the frame interior, court lines and optional service-box fills.
pub fn paint_court<S: Surface + ?Sized>(
    surface: &mut S,
    cache: &mut TextureCache,
    layout: &CourtLayout,
    palette: &Palette,
    paint: CourtPaint,
) -> IntroResult<()> {
    surface.save();
    surface.set_alpha(paint.opacity);
    cache.draw_tiled(surface, layout.frame.interior())?;
    draw_court_lines(surface, &layout.court, paint.line_set, 1.0, palette.lines);
    if let Some(fill) = paint.service_fill {
        for side in Side::BOTH {
            surface.fill_rect(layout.service_area(side), fill);
        }
    }
    surface.restore();
    Ok(())
}

/// A clay door over a service area: texture, the court lines underneath it, a white border
/// and the centre service line.
pub fn draw_door<S: Surface + ?Sized>(
    surface: &mut S,
    cache: &mut TextureCache,
    layout: &CourtLayout,
    palette: &Palette,
    door: DoorPlacement,
    opacity: f64,
) -> IntroResult<()> {
    if !door.visible {
        return Ok(());
    }
    let rect = door.rect;
    let border = StrokeStyle::new(DOOR_BORDER_WIDTH);

    surface.save();
    surface.set_alpha(opacity);
    cache.draw_tiled(surface, rect)?;

    surface.save();
    surface.clip_rect(rect);
    draw_court_lines(surface, &layout.court, LineSet::All, 1.0, palette.lines);
    surface.restore();

    surface.stroke_rect(rect, border, palette.lines);
    let cy = layout.court.center_y;
    surface.stroke_path(&segment((rect.x0, cy), (rect.x1, cy)), border, palette.lines);
    surface.restore();
    Ok(())
}

/// The intro's phase state machine: initial pose, hold, running sub-phases, done.
#[derive(Debug)]
pub struct AnimationTimeline {
    config: AnimationConfig,
    palette: Palette,
    layout: CourtLayout,
    clock: Option<AnimationClock>,
    state: TimelineState,
    token: CancelToken,
}

impl AnimationTimeline {
    pub fn new(
        config: AnimationConfig,
        palette: Palette,
        layout: CourtLayout,
        token: CancelToken,
    ) -> Self {
        Self {
            config,
            palette,
            layout,
            clock: None,
            state: TimelineState::Initial,
            token,
        }
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn layout(&self) -> &CourtLayout {
        &self.layout
    }

    /// Raw progress of the running phase (0 before it starts).
    pub fn progress(&self) -> f64 {
        self.clock.map_or(0.0, |c| c.progress())
    }

    fn check_cancelled(&mut self) -> bool {
        if self.token.is_cancelled() {
            if self.state != TimelineState::Cancelled {
                tracing::debug!("timeline superseded");
            }
            self.state = TimelineState::Cancelled;
            true
        } else {
            false
        }
    }

    /// Paint the initial pose once and ask to be woken after the hold.
    pub fn start<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        cache: &mut TextureCache,
        now_ms: f64,
    ) -> IntroResult<Step> {
        if self.check_cancelled() {
            return Ok(Step::Cancelled);
        }
        match self.state {
            TimelineState::Initial => {}
            TimelineState::Holding { until_ms } => return Ok(Step::WaitUntil(until_ms)),
            TimelineState::Running => return Ok(Step::NextFrame),
            TimelineState::Done => return Ok(Step::Finished),
            TimelineState::Cancelled => return Ok(Step::Cancelled),
        }

        surface.clear(Rgba8::TRANSPARENT);
        draw_frame(surface, self.layout.viewport, &self.layout.frame, &self.palette);
        surface.save();
        surface.clip_rect(self.layout.frame.interior());
        paint_court(
            surface,
            cache,
            &self.layout,
            &self.palette,
            CourtPaint {
                line_set: LineSet::All,
                opacity: 1.0,
                service_fill: None,
            },
        )?;
        surface.restore();

        let until_ms = now_ms + self.config.initial_hold_ms;
        self.clock = Some(AnimationClock::new(now_ms, self.config.duration_ms));
        self.state = TimelineState::Holding { until_ms };
        tracing::debug!(until_ms, "initial pose painted, holding");
        Ok(Step::WaitUntil(until_ms))
    }

    /// Advance to `now_ms` and repaint if the running phase is active.
    ///
    /// Progress is measured from `start`, so the hold counts against `duration_ms` and the
    /// first running frame is already part way through the doors.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        cache: &mut TextureCache,
        title: &mut TitleAssets,
        now_ms: f64,
    ) -> IntroResult<Step> {
        if self.check_cancelled() {
            return Ok(Step::Cancelled);
        }
        match self.state {
            TimelineState::Initial => return self.start(surface, cache, now_ms),
            TimelineState::Holding { until_ms } => {
                if now_ms < until_ms {
                    return Ok(Step::WaitUntil(until_ms));
                }
                self.state = TimelineState::Running;
                tracing::debug!(until_ms, "hold over, running");
            }
            TimelineState::Running => {}
            TimelineState::Done => return Ok(Step::Finished),
            TimelineState::Cancelled => return Ok(Step::Cancelled),
        }

        let raw = match self.clock.as_mut() {
            Some(clock) => clock.sample(now_ms),
            None => 1.0,
        };
        let frame = sample_frame(&self.config, &self.layout, raw);
        self.paint_running(surface, cache, title, &frame)?;

        if raw >= 1.0 {
            self.state = TimelineState::Done;
            tracing::debug!("timeline finished");
            Ok(Step::Finished)
        } else {
            Ok(Step::NextFrame)
        }
    }

    fn paint_running<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        cache: &mut TextureCache,
        title: &mut TitleAssets,
        frame: &FrameState,
    ) -> IntroResult<()> {
        let layout = &self.layout;
        let palette = &self.palette;
        let full_court = CourtPaint {
            line_set: LineSet::All,
            opacity: 1.0,
            service_fill: Some(palette.service_fill),
        };

        surface.clear(Rgba8::TRANSPARENT);
        draw_frame(surface, layout.viewport, &layout.frame, palette);
        paint_court(surface, cache, layout, palette, full_court)?;

        match frame.phase {
            PhaseState::Doors { slide, .. } => {
                for side in Side::BOTH {
                    draw_door(surface, cache, layout, palette, layout.door(side, slide), 1.0)?;
                }
            }
            PhaseState::Zoom {
                zoom_factor,
                doors,
                net_reveal,
                title_progress,
                ..
            } => {
                surface.save();
                surface.transform(zoom_about(layout.court.center(), zoom_factor));
                paint_court(surface, cache, layout, palette, full_court)?;
                if let Some(fade) = doors {
                    for side in Side::BOTH {
                        let door = layout.door(side, fade.slide);
                        draw_door(surface, cache, layout, palette, door, fade.opacity)?;
                    }
                }
                surface.restore();

                if let Some(reveal) = net_reveal {
                    draw_net(surface, layout.viewport, reveal, palette);
                }
                if let Some(progress) = title_progress {
                    let content = title.content();
                    draw_title(surface, layout.viewport, progress, &content, palette)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
