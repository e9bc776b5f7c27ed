use std::path::{Path, PathBuf};

use crate::animation::ease::Ease;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{IntroError, IntroResult};
use crate::texture::synth::OverlayMode;

/// Top-level intro configuration. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroConfig {
    pub animation: AnimationConfig,
    pub palette: Palette,
    pub title: TitleConfig,
    /// Turn the decorative spot/streak texture pass on or off.
    pub overlay_enabled: bool,
    /// Fixed seed for the decorative pass; `None` seeds from the clock.
    pub overlay_seed: Option<u64>,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            palette: Palette::default(),
            title: TitleConfig::default(),
            overlay_enabled: true,
            overlay_seed: None,
        }
    }
}

impl IntroConfig {
    pub fn from_json_str(s: &str) -> IntroResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| IntroError::validation(format!("invalid intro config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> IntroResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            IntroError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            IntroError::validation(format!("invalid config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> IntroResult<()> {
        self.animation.validate()?;
        self.title.validate()
    }

    pub fn overlay_mode(&self) -> OverlayMode {
        match (self.overlay_enabled, self.overlay_seed) {
            (false, _) => OverlayMode::Disabled,
            (true, Some(seed)) => OverlayMode::Seeded(seed),
            (true, None) => OverlayMode::Entropy,
        }
    }
}

/// Timing of the intro. Ratios are fractions of eased progress (zoom) or of the previous
/// stage's local progress (net, text).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub duration_ms: f64,
    pub initial_hold_ms: f64,
    pub door_phase_ratio: f64,
    pub zoom_start_ratio: f64,
    pub net_start_ratio: f64,
    pub max_zoom_factor: f64,
    pub text_start_ratio: f64,
    /// Applied to raw progress before the phase thresholds.
    pub progress_ease: Ease,
    /// Applied to zoom progress to get the zoom factor.
    pub zoom_ease: Ease,
    /// Applied to local net progress to get the net reveal.
    pub net_ease: Ease,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 9000.0,
            initial_hold_ms: 2000.0,
            door_phase_ratio: 0.7,
            zoom_start_ratio: 0.4,
            net_start_ratio: 0.6,
            max_zoom_factor: 20.0,
            text_start_ratio: 0.8,
            progress_ease: Ease::InOutSine,
            zoom_ease: Ease::InOutSine,
            net_ease: Ease::InOutCubic,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> IntroResult<()> {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(IntroError::validation("animation.duration_ms must be > 0"));
        }
        if !(self.initial_hold_ms.is_finite() && self.initial_hold_ms >= 0.0) {
            return Err(IntroError::validation(
                "animation.initial_hold_ms must be >= 0",
            ));
        }
        for (name, v) in [
            ("door_phase_ratio", self.door_phase_ratio),
            ("zoom_start_ratio", self.zoom_start_ratio),
            ("net_start_ratio", self.net_start_ratio),
            ("text_start_ratio", self.text_start_ratio),
        ] {
            if !(v.is_finite() && (0.0..=1.0).contains(&v)) {
                return Err(IntroError::validation(format!(
                    "animation.{name} must be in [0, 1], got {v}"
                )));
            }
        }
        if self.door_phase_ratio == 0.0 {
            return Err(IntroError::validation(
                "animation.door_phase_ratio must be > 0",
            ));
        }
        if !(self.zoom_start_ratio < self.net_start_ratio
            && self.net_start_ratio < self.text_start_ratio
            && self.text_start_ratio < 1.0)
        {
            return Err(IntroError::validation(
                "animation ratios must satisfy zoom_start < net_start < text_start < 1",
            ));
        }
        if !(self.max_zoom_factor.is_finite() && self.max_zoom_factor >= 0.0) {
            return Err(IntroError::validation(
                "animation.max_zoom_factor must be >= 0",
            ));
        }
        Ok(())
    }

    /// Time from `start` to the last frame. The hold runs inside `duration_ms` and only
    /// extends the intro when it is longer.
    pub fn total_ms(&self) -> f64 {
        self.duration_ms.max(self.initial_hold_ms)
    }
}

/// Colours of everything except the clay texture, which has its own fixed ramp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub wall: Rgba8,
    pub lines: Rgba8,
    pub service_fill: Rgba8,
    pub frame_black: Rgba8,
    pub frame_dark: Rgba8,
    pub frame_highlight: Rgba8,
    pub shadow: Rgba8,
    pub net: Rgba8,
    pub title: Rgba8,
    pub backdrop: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Rgba8::WHITE,
            lines: Rgba8::WHITE,
            service_fill: Rgba8::rgb(0x00, 0x50, 0x3C),
            frame_black: Rgba8::rgb(0x1A, 0x1A, 0x1A),
            frame_dark: Rgba8::rgb(0x0D, 0x0D, 0x0D),
            frame_highlight: Rgba8::rgb(0x2D, 0x2D, 0x2D),
            shadow: Rgba8::rgba(0, 0, 0, 102),
            net: Rgba8::WHITE,
            title: Rgba8::WHITE,
            backdrop: Rgba8::rgba(0, 0, 0, 140),
        }
    }
}

/// Optional title reveal shown after the net.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleConfig {
    /// Empty by default; needs `font_path` to be drawn.
    pub text: String,
    /// TTF/OTF file used to shape `text`; without it only the logo is drawn.
    pub font_path: Option<PathBuf>,
    pub logo_path: Option<PathBuf>,
    pub size_px: f64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_path: None,
            logo_path: None,
            size_px: 64.0,
        }
    }
}

impl TitleConfig {
    pub fn validate(&self) -> IntroResult<()> {
        if !(self.size_px.is_finite() && self.size_px > 0.0) {
            return Err(IntroError::validation("title.size_px must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
