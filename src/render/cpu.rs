use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, PaintId, Point, Rect, Rgba8, Vec2, Viewport};
use crate::foundation::error::{IntroError, IntroResult};
use crate::render::surface::{
    FillRule, FrameRGBA, LineCap, RasterImage, StrokeStyle, Surface, TextBlock,
};
use crate::texture::synth::TextureTile;

#[derive(Clone, Copy, Debug)]
struct CpuState {
    transform: Affine,
    alpha: f64,
    /// Clip layers open on the context, including those of outer scopes.
    layers: usize,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            layers: 0,
        }
    }
}

/// [`Surface`] rasterized with `vello_cpu`.
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    viewport: Viewport,
    state: CpuState,
    stack: Vec<CpuState>,
    paints: HashMap<PaintId, vello_cpu::Image>,
}

impl CpuSurface {
    pub fn new(viewport: Viewport) -> IntroResult<Self> {
        let (w, h) = surface_dims(viewport)?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            viewport,
            state: CpuState::default(),
            stack: Vec::new(),
            paints: HashMap::new(),
        })
    }

    /// Rasterize everything drawn since the last `present` and start a fresh frame.
    pub fn present(&mut self) -> IntroResult<FrameRGBA> {
        self.close_layers(0);
        self.stack.clear();
        self.state = CpuState::default();

        let (w, h) = surface_dims(self.viewport)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        self.ctx.reset();

        Ok(FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    /// Number of uploaded image paints kept for reuse.
    pub fn cached_paints(&self) -> usize {
        self.paints.len()
    }

    fn close_layers(&mut self, keep: usize) {
        while self.state.layers > keep {
            self.ctx.pop_layer();
            self.state.layers -= 1;
        }
    }

    fn apply_transform(&mut self, local: Affine) {
        self.ctx
            .set_transform(affine_to_cpu(self.state.transform * local));
    }

    fn set_color(&mut self, color: Rgba8) {
        let c = color.with_alpha(self.state.alpha);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    fn paint_for(
        &mut self,
        id: PaintId,
        bytes: &[u8],
        width: u32,
        height: u32,
    ) -> IntroResult<vello_cpu::Image> {
        if let Some(p) = self.paints.get(&id) {
            return Ok(p.clone());
        }
        let paint = rgba_premul_to_image(bytes, width, height)?;
        self.paints.insert(id, paint.clone());
        Ok(paint)
    }

    /// Fill `rect` (in the local space set by `local`) with an image paint at the current
    /// alpha.
    fn fill_with_image(&mut self, paint: vello_cpu::Image, local: Affine, rect: Rect) {
        let opacity = self.state.alpha as f32;
        if opacity <= 0.0 {
            return;
        }
        self.apply_transform(local);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&rect_to_cpu(rect));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }
}

impl Surface for CpuSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.close_layers(prev.layers);
            self.state = prev;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.state.transform *= affine;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha *= alpha.clamp(0.0, 1.0);
    }

    fn clip(&mut self, path: &BezPath, rule: FillRule) {
        self.apply_transform(Affine::IDENTITY);
        self.ctx.set_fill_rule(fill_rule_to_cpu(rule));
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.state.layers += 1;
    }

    fn clear(&mut self, color: Rgba8) {
        if self.state.layers == 0 {
            self.ctx.reset();
        }
        if color.a == 0 {
            return;
        }
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.set_fill_rule(vello_cpu::peniko::Fill::NonZero);
        self.ctx.fill_rect(&rect_to_cpu(self.viewport.rect()));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.apply_transform(Affine::IDENTITY);
        self.set_color(color);
        self.ctx.set_fill_rule(vello_cpu::peniko::Fill::NonZero);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn fill_path(&mut self, path: &BezPath, rule: FillRule, color: Rgba8) {
        self.apply_transform(Affine::IDENTITY);
        self.set_color(color);
        self.ctx.set_fill_rule(fill_rule_to_cpu(rule));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle, color: Rgba8) {
        self.apply_transform(Affine::IDENTITY);
        self.set_color(color);
        self.ctx.set_stroke(stroke_to_cpu(style));
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    fn stroke_path(&mut self, path: &BezPath, style: StrokeStyle, color: Rgba8) {
        self.apply_transform(Affine::IDENTITY);
        self.set_color(color);
        self.ctx.set_stroke(stroke_to_cpu(style));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn draw_tile(&mut self, tile: &TextureTile, src: Rect, origin: Point) -> IntroResult<()> {
        let src = src.intersect(Rect::new(
            0.0,
            0.0,
            f64::from(tile.width),
            f64::from(tile.height),
        ));
        if src.width() <= 0.0 || src.height() <= 0.0 {
            return Ok(());
        }
        let paint = self.paint_for(tile.id, &tile.rgba8_premul, tile.width, tile.height)?;
        let local = Affine::translate(origin.to_vec2() - src.origin().to_vec2());
        self.fill_with_image(paint, local, src);
        Ok(())
    }

    fn draw_image(&mut self, image: &RasterImage, dst: Rect) -> IntroResult<()> {
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        if iw <= 0.0 || ih <= 0.0 || dst.width() <= 0.0 || dst.height() <= 0.0 {
            return Ok(());
        }
        let paint = self.paint_for(image.id, &image.rgba8_premul, image.width, image.height)?;
        let local = Affine::translate(Vec2::new(dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / iw, dst.height() / ih);
        self.fill_with_image(paint, local, Rect::new(0.0, 0.0, iw, ih));
        Ok(())
    }

    fn draw_text(&mut self, block: &TextBlock, origin: Point) -> IntroResult<()> {
        let opacity = self.state.alpha as f32;
        if opacity <= 0.0 {
            return Ok(());
        }
        self.apply_transform(Affine::translate(origin.to_vec2()));
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        for line in block.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&block.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }
}

fn surface_dims(viewport: Viewport) -> IntroResult<(u16, u16)> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(IntroError::surface_unavailable(format!(
            "viewport {}x{} has a zero dimension",
            viewport.width, viewport.height
        )));
    }
    let w: u16 = viewport.width.try_into().map_err(|_| {
        IntroError::surface_unavailable(format!("viewport width {} exceeds u16", viewport.width))
    })?;
    let h: u16 = viewport.height.try_into().map_err(|_| {
        IntroError::surface_unavailable(format!(
            "viewport height {} exceeds u16",
            viewport.height
        ))
    })?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn fill_rule_to_cpu(rule: FillRule) -> vello_cpu::peniko::Fill {
    match rule {
        FillRule::NonZero => vello_cpu::peniko::Fill::NonZero,
        FillRule::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
    }
}

fn stroke_to_cpu(style: StrokeStyle) -> vello_cpu::kurbo::Stroke {
    let cap = match style.cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
    };
    vello_cpu::kurbo::Stroke::new(style.width).with_caps(cap)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> IntroResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| IntroError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| IntroError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(IntroError::render("image byte length mismatch"));
    }

    let has_alpha = bytes.chunks_exact(4).any(|px| px[3] != 255);
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, has_alpha);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
