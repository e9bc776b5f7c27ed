use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, PaintId, Point, Rect, Rgba8, Viewport};
use crate::foundation::error::IntroResult;
use crate::texture::synth::TextureTile;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
        }
    }

    pub fn round(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Round,
        }
    }
}

/// Decoded raster image (premultiplied RGBA8), e.g. the title logo.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pub id: PaintId,
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> Self {
        Self {
            id: PaintId::next(),
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }
}

/// Brush carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A shaped, line-broken piece of text plus the font used to rasterize its glyphs.
#[derive(Clone)]
pub struct TextBlock {
    pub text: String,
    pub width: f64,
    pub height: f64,
    pub layout: Arc<parley::Layout<TextBrushRgba8>>,
    pub font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("text", &self.text)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// One rendered frame read back from a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// # Panics
    ///
    /// If `(x, y)` lies outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// Immediate-mode 2D drawing target.
///
/// State (transform, alpha, clip) is scoped by `save`/`restore` pairs. `transform` composes
/// onto the current transform and `set_alpha` multiplies into the current alpha, so nested
/// scopes combine the way a canvas does.
pub trait Surface {
    fn viewport(&self) -> Viewport;

    fn save(&mut self);
    /// Pop the last `save`; unmatched calls are ignored.
    fn restore(&mut self);

    fn transform(&mut self, affine: Affine);
    fn set_alpha(&mut self, alpha: f64);
    fn clip(&mut self, path: &BezPath, rule: FillRule);

    /// Fill the whole surface with `color`, ignoring transform and alpha.
    fn clear(&mut self, color: Rgba8);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    fn fill_path(&mut self, path: &BezPath, rule: FillRule, color: Rgba8);
    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle, color: Rgba8);
    fn stroke_path(&mut self, path: &BezPath, style: StrokeStyle, color: Rgba8);

    /// Blit the `src` sub-rectangle of `tile` (tile pixel space, unscaled) with its top-left
    /// corner at `origin`.
    fn draw_tile(&mut self, tile: &TextureTile, src: Rect, origin: Point) -> IntroResult<()>;
    /// Draw `image` scaled into `dst`.
    fn draw_image(&mut self, image: &RasterImage, dst: Rect) -> IntroResult<()>;
    /// Draw `block` with its layout origin at `origin`.
    fn draw_text(&mut self, block: &TextBlock, origin: Point) -> IntroResult<()>;

    fn clip_rect(&mut self, rect: Rect) {
        self.clip(&rect.to_path(0.1), FillRule::NonZero);
    }
}
