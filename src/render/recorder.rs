use crate::foundation::core::{Affine, BezPath, PaintId, Point, Rect, Rgba8, Viewport};
use crate::foundation::error::IntroResult;
use crate::render::surface::{FillRule, RasterImage, StrokeStyle, Surface, TextBlock};
use crate::texture::synth::TextureTile;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear {
        color: Rgba8,
    },
    Clip {
        path: BezPath,
        rule: FillRule,
    },
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    FillPath {
        path: BezPath,
        rule: FillRule,
        color: Rgba8,
    },
    StrokeRect {
        rect: Rect,
        style: StrokeStyle,
        color: Rgba8,
    },
    StrokePath {
        path: BezPath,
        style: StrokeStyle,
        color: Rgba8,
    },
    Tile {
        tile: PaintId,
        src: Rect,
        origin: Point,
    },
    Image {
        image: PaintId,
        dst: Rect,
    },
    Text {
        text: String,
        origin: Point,
    },
}

/// One recorded call with the state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCmd {
    pub op: DrawOp,
    pub transform: Affine,
    pub alpha: f64,
    /// Number of clips active when the call was made.
    pub clip_depth: usize,
}

#[derive(Clone, Copy, Debug)]
struct RecorderState {
    transform: Affine,
    alpha: f64,
    clip_depth: usize,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            clip_depth: 0,
        }
    }
}

/// [`Surface`] that rasterizes nothing and keeps every call as a [`DrawCmd`].
#[derive(Debug)]
pub struct CommandRecorder {
    viewport: Viewport,
    state: RecorderState,
    stack: Vec<RecorderState>,
    cmds: Vec<DrawCmd>,
}

impl CommandRecorder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            state: RecorderState::default(),
            stack: Vec::new(),
            cmds: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn take(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.cmds)
    }

    /// Current `save` nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.cmds.iter().filter(|c| pred(&c.op)).count()
    }

    fn push(&mut self, op: DrawOp) {
        self.cmds.push(DrawCmd {
            op,
            transform: self.state.transform,
            alpha: self.state.alpha,
            clip_depth: self.state.clip_depth,
        });
    }
}

impl Surface for CommandRecorder {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
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
        self.push(DrawOp::Clip {
            path: path.clone(),
            rule,
        });
        self.state.clip_depth += 1;
    }

    fn clear(&mut self, color: Rgba8) {
        self.push(DrawOp::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.push(DrawOp::FillRect { rect, color });
    }

    fn fill_path(&mut self, path: &BezPath, rule: FillRule, color: Rgba8) {
        self.push(DrawOp::FillPath {
            path: path.clone(),
            rule,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle, color: Rgba8) {
        self.push(DrawOp::StrokeRect { rect, style, color });
    }

    fn stroke_path(&mut self, path: &BezPath, style: StrokeStyle, color: Rgba8) {
        self.push(DrawOp::StrokePath {
            path: path.clone(),
            style,
            color,
        });
    }

    fn draw_tile(&mut self, tile: &TextureTile, src: Rect, origin: Point) -> IntroResult<()> {
        self.push(DrawOp::Tile {
            tile: tile.id,
            src,
            origin,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &RasterImage, dst: Rect) -> IntroResult<()> {
        self.push(DrawOp::Image {
            image: image.id,
            dst,
        });
        Ok(())
    }

    fn draw_text(&mut self, block: &TextBlock, origin: Point) -> IntroResult<()> {
        self.push(DrawOp::Text {
            text: block.text.clone(),
            origin,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recorder.rs"]
mod tests;
