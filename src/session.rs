use crate::animation::cancel::Generation;
use crate::animation::timeline::{AnimationTimeline, Step};
use crate::config::IntroConfig;
use crate::foundation::core::Viewport;
use crate::foundation::error::IntroResult;
use crate::geometry::layout::CourtLayout;
use crate::render::surface::Surface;
use crate::scene::title::TitleAssets;
use crate::texture::cache::TextureCache;

/// One intro run bound to a viewport: the timeline plus the resources it paints with.
///
/// The texture cache and title assets outlive resizes; the timeline does not.
#[derive(Debug)]
pub struct IntroSession {
    config: IntroConfig,
    generation: Generation,
    timeline: AnimationTimeline,
    cache: TextureCache,
    title: TitleAssets,
}

impl IntroSession {
    #[tracing::instrument(level = "debug", skip(config))]
    pub fn new(config: IntroConfig, viewport: Viewport) -> IntroResult<Self> {
        config.validate()?;
        let cache = TextureCache::new(config.overlay_mode());
        let title = TitleAssets::load(&config.title, &config.palette);
        Ok(Self::with_parts(config, viewport, cache, title))
    }

    /// Build from already prepared resources (no file or thread access).
    pub fn with_parts(
        config: IntroConfig,
        viewport: Viewport,
        cache: TextureCache,
        title: TitleAssets,
    ) -> Self {
        let generation = Generation::new();
        let timeline = Self::build_timeline(&config, viewport, &generation);
        Self {
            config,
            generation,
            timeline,
            cache,
            title,
        }
    }

    fn build_timeline(
        config: &IntroConfig,
        viewport: Viewport,
        generation: &Generation,
    ) -> AnimationTimeline {
        AnimationTimeline::new(
            config.animation,
            config.palette,
            CourtLayout::from_viewport(viewport),
            generation.token(),
        )
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.timeline.layout().viewport
    }

    pub fn timeline(&self) -> &AnimationTimeline {
        &self.timeline
    }

    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    pub fn start<S: Surface + ?Sized>(&mut self, surface: &mut S, now_ms: f64) -> IntroResult<Step> {
        self.timeline.start(surface, &mut self.cache, now_ms)
    }

    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now_ms: f64) -> IntroResult<Step> {
        self.timeline
            .tick(surface, &mut self.cache, &mut self.title, now_ms)
    }

    /// Supersede the current timeline with a fresh one for `viewport`.
    ///
    /// Returns the old timeline; any further `start`/`tick` on it yields `Step::Cancelled`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resize(&mut self, viewport: Viewport) -> AnimationTimeline {
        let generation = self.generation.bump();
        tracing::debug!(generation, "viewport changed, restarting timeline");
        let fresh = Self::build_timeline(&self.config, viewport, &self.generation);
        std::mem::replace(&mut self.timeline, fresh)
    }

    /// Block until background asset loads have finished (offline rendering).
    pub fn wait_for_assets(&mut self) {
        self.title.wait_for_logo();
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
