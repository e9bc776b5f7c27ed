use std::time::Instant;

use crate::{
    animation::timeline::Step,
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::Fps,
        error::{IntroError, IntroResult},
    },
    render::{
        cpu::CpuSurface,
        surface::{FrameRGBA, Surface},
    },
    session::IntroSession,
};

/// Source of "now" for a host driving the timeline.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Virtual time advancing one frame per step at a fixed rate.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    fps: Fps,
    frame: u64,
}

impl FrameClock {
    pub fn new(fps: Fps) -> Self {
        Self { fps, frame: 0 }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn advance(&mut self) {
        self.frame += 1;
    }
}

impl Clock for FrameClock {
    fn now_ms(&self) -> f64 {
        // Multiply before dividing so whole-millisecond frame times come out exact.
        (self.frame as f64) * 1000.0 * f64::from(self.fps.den) / f64::from(self.fps.num)
    }
}

/// Wall-clock milliseconds since construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Stop after this many frames even if the timeline has not finished.
    pub max_frames: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderReport {
    /// Frames handed to the sink, repeats included.
    pub frames: u64,
    /// Frames produced by an actual repaint.
    pub painted: u64,
    pub last_step: Step,
}

/// Drive `session` to completion on a fixed-rate clock.
///
/// One frame is emitted per clock step. While the timeline waits (initial hold) the last
/// presented frame is emitted again.
#[tracing::instrument(level = "debug", skip_all, fields(fps = ?clock.fps()))]
pub fn render_intro<K: FrameSink + ?Sized>(
    session: &mut IntroSession,
    surface: &mut CpuSurface,
    clock: &mut FrameClock,
    sink: &mut K,
    opts: RenderOptions,
) -> IntroResult<RenderReport> {
    if surface.viewport() != session.viewport() {
        return Err(IntroError::validation(format!(
            "surface is {}x{} but the session is laid out for {}x{}",
            surface.viewport().width,
            surface.viewport().height,
            session.viewport().width,
            session.viewport().height
        )));
    }

    let limit = opts.max_frames.unwrap_or(u64::MAX);
    let mut report = RenderReport {
        frames: 0,
        painted: 0,
        last_step: Step::NextFrame,
    };
    sink.begin(SinkConfig {
        width: surface.viewport().width,
        height: surface.viewport().height,
        fps: clock.fps(),
    })?;
    if limit == 0 {
        sink.end()?;
        return Ok(report);
    }

    let mut step = session.start(surface, clock.now_ms())?;
    report.last_step = step;
    if step == Step::Cancelled {
        sink.end()?;
        return Ok(report);
    }
    let mut last = surface.present()?;
    sink.push_frame(clock.frame(), &last)?;
    report.frames = 1;
    report.painted = 1;

    while !matches!(step, Step::Finished | Step::Cancelled) && report.frames < limit {
        clock.advance();
        let now = clock.now_ms();

        if let Step::WaitUntil(until) = step
            && now < until
        {
            sink.push_frame(clock.frame(), &last)?;
            report.frames += 1;
            continue;
        }

        step = session.tick(surface, now)?;
        report.last_step = step;
        match step {
            Step::Cancelled => break,
            Step::WaitUntil(_) => sink.push_frame(clock.frame(), &last)?,
            Step::NextFrame | Step::Finished => {
                last = surface.present()?;
                sink.push_frame(clock.frame(), &last)?;
                report.painted += 1;
            }
        }
        report.frames += 1;
    }

    sink.end()?;
    tracing::debug!(
        frames = report.frames,
        painted = report.painted,
        step = ?report.last_step,
        "offline render done"
    );
    Ok(report)
}

/// Render the single frame visible at `at_ms` after the start.
pub fn render_still(
    session: &mut IntroSession,
    surface: &mut CpuSurface,
    at_ms: f64,
) -> IntroResult<FrameRGBA> {
    let step = session.start(surface, 0.0)?;
    if step == Step::Cancelled {
        return Err(IntroError::render("session was cancelled before the first frame"));
    }
    let hold = session.config().animation.initial_hold_ms;
    if at_ms >= hold {
        session.tick(surface, at_ms)?;
    }
    surface.present()
}

/// Number of frames `render_intro` emits for a full run at `fps`, first frame included.
pub fn expected_frame_count(total_ms: f64, fps: Fps) -> u64 {
    fps.ms_to_frames_ceil(total_ms) + 1
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
