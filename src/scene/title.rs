use kurbo::Shape;

use crate::assets::decode::load_image;
use crate::assets::pending::PendingAsset;
use crate::assets::text::TextLayoutEngine;
use crate::config::{Palette, TitleConfig};
use crate::foundation::core::{BezPath, Point, Rect, Viewport};
use crate::foundation::error::IntroResult;
use crate::foundation::math::clamp01;
use crate::render::surface::{FillRule, RasterImage, Surface, TextBlock};

/// Vertical travel of the title block while it fades in.
const RISE_PX: f64 = 24.0;
const LOGO_MAX_HEIGHT_RATIO: f64 = 0.18;
const GAP_PX: f64 = 16.0;

/// What the title stage has available this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitleContent<'a> {
    pub text: Option<&'a TextBlock>,
    pub logo: Option<&'a RasterImage>,
}

impl TitleContent<'_> {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.logo.is_none()
    }
}

/// Shaped title text plus the logo, which may still be loading.
#[derive(Debug)]
pub struct TitleAssets {
    text: Option<TextBlock>,
    logo: PendingAsset<RasterImage>,
}

impl Default for TitleAssets {
    fn default() -> Self {
        Self {
            text: None,
            logo: PendingAsset::absent("logo"),
        }
    }
}

impl TitleAssets {
    /// Shape the text now and start loading the logo in the background.
    ///
    /// Font or logo problems are logged and leave that part of the title out.
    pub fn load(config: &TitleConfig, palette: &Palette) -> Self {
        let text = match (&config.font_path, config.text.trim().is_empty()) {
            (_, true) => None,
            (None, false) => {
                tracing::debug!("no title font configured, title text disabled");
                None
            }
            (Some(font_path), false) => TextLayoutEngine::new()
                .layout_from_path(
                    &config.text,
                    font_path,
                    config.size_px as f32,
                    palette.title,
                    None,
                )
                .map_err(|e| tracing::warn!(error = %e, "title text unavailable"))
                .ok(),
        };

        let logo = match &config.logo_path {
            Some(path) => {
                let path = path.clone();
                PendingAsset::spawn("logo", move || load_image(&path))
            }
            None => PendingAsset::absent("logo"),
        };

        Self { text, logo }
    }

    pub fn with_parts(text: Option<TextBlock>, logo: Option<RasterImage>) -> Self {
        Self {
            text,
            logo: match logo {
                Some(img) => PendingAsset::ready("logo", img),
                None => PendingAsset::absent("logo"),
            },
        }
    }

    /// Whatever is available right now; never blocks on the logo.
    pub fn content(&mut self) -> TitleContent<'_> {
        let logo = self.logo.poll();
        TitleContent {
            text: self.text.as_ref(),
            logo,
        }
    }

    /// Block until the logo loader (if any) has finished.
    pub fn wait_for_logo(&mut self) {
        self.logo.wait();
    }
}

/// Placement of the logo and text for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TitleLayout {
    pub logo: Option<Rect>,
    pub text_origin: Option<Point>,
    pub bounds: Rect,
}

pub(crate) fn layout_title(
    viewport: Viewport,
    progress: f64,
    content: &TitleContent<'_>,
) -> TitleLayout {
    let center = viewport.center();

    let logo_size = content.logo.map(|img| {
        let (w, h) = (f64::from(img.width), f64::from(img.height));
        let target_h = h.min(viewport.height_f64() * LOGO_MAX_HEIGHT_RATIO);
        (w * target_h / h, target_h)
    });
    let text_size = content.text.map(|t| (t.width, t.height));

    let gap = if logo_size.is_some() && text_size.is_some() {
        GAP_PX
    } else {
        0.0
    };
    let total_h = logo_size.map_or(0.0, |s| s.1) + gap + text_size.map_or(0.0, |s| s.1);
    let total_w = logo_size.map_or(0.0, |s| s.0).max(text_size.map_or(0.0, |s| s.0));
    let top = center.y - total_h / 2.0 + (1.0 - progress) * RISE_PX;

    let logo = logo_size.map(|(w, h)| Rect::from_origin_size((center.x - w / 2.0, top), (w, h)));
    let text_top = top + logo_size.map_or(0.0, |s| s.1) + gap;
    let text_origin = text_size.map(|(w, _)| Point::new(center.x - w / 2.0, text_top));

    TitleLayout {
        logo,
        text_origin,
        bounds: Rect::from_origin_size((center.x - total_w / 2.0, top), (total_w, total_h)),
    }
}

/// Darkened veil over the viewport with an elliptical hole around `bounds`.
pub(crate) fn spotlight_path(viewport: Viewport, bounds: Rect) -> BezPath {
    let mut path = viewport.rect().to_path(0.1);
    let radii = (
        (bounds.width() * 0.75).max(viewport.width_f64() * 0.2),
        (bounds.height() * 1.2).max(viewport.height_f64() * 0.15),
    );
    let hole = kurbo::Ellipse::new(bounds.center(), radii, 0.0);
    path.extend(hole.path_elements(0.1));
    path
}

/// Title reveal at `progress` in `[0, 1]`: a spotlight veil, then the logo above the text,
/// both fading in while rising into place.
pub fn draw_title<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
    progress: f64,
    content: &TitleContent<'_>,
    palette: &Palette,
) -> IntroResult<()> {
    let p = clamp01(progress);
    if p <= 0.0 || content.is_empty() {
        return Ok(());
    }
    let layout = layout_title(viewport, p, content);

    surface.save();
    surface.set_alpha(p);
    surface.fill_path(
        &spotlight_path(viewport, layout.bounds),
        FillRule::EvenOdd,
        palette.backdrop,
    );
    if let (Some(img), Some(dst)) = (content.logo, layout.logo) {
        surface.draw_image(img, dst)?;
    }
    if let (Some(text), Some(origin)) = (content.text, layout.text_origin) {
        surface.draw_text(text, origin)?;
    }
    surface.restore();
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/title.rs"]
mod tests;
