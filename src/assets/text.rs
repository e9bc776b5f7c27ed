use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{IntroError, IntroResult};
use crate::render::surface::{TextBlock, TextBrushRgba8};

/// Parley shaping front-end for the title text.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape `text` in the font given by `font_bytes`, wrapping at `max_width_px` when given.
    pub fn layout(
        &mut self,
        text: &str,
        font_bytes: Vec<u8>,
        size_px: f32,
        color: Rgba8,
        max_width_px: Option<f32>,
    ) -> IntroResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(IntroError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| IntroError::asset("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| IntroError::asset("registered font family has no name"))?
            .to_string();

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        Ok(TextBlock {
            text: text.to_string(),
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            layout: Arc::new(layout),
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    pub fn layout_from_path(
        &mut self,
        text: &str,
        font_path: &Path,
        size_px: f32,
        color: Rgba8,
        max_width_px: Option<f32>,
    ) -> IntroResult<TextBlock> {
        let bytes = std::fs::read(font_path).map_err(|e| {
            IntroError::asset(format!("failed to read font '{}': {e}", font_path.display()))
        })?;
        self.layout(text, bytes, size_px, color, max_width_px)
    }
}
