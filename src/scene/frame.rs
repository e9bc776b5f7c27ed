use crate::config::Palette;
use crate::foundation::core::{Rect, Vec2, Viewport};
use crate::geometry::layout::FrameRect;
use crate::render::surface::{StrokeStyle, Surface};

const SHADOW_OFFSET: f64 = 12.0;
const SHADOW_SPREAD: f64 = 8.0;
const SHADOW_STEPS: usize = 4;
const BEVEL_WIDTH: f64 = 6.0;

/// Paint the white wall, the drop shadow and the bevelled black frame.
///
/// The frame interior is left filled with the frame colour; callers paint the court over it.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
    frame: &FrameRect,
    palette: &Palette,
) {
    let (vw, vh) = (viewport.width_f64(), viewport.height_f64());
    let outer = frame.outer();

    // Wall strips around the frame.
    for wall in [
        Rect::new(0.0, 0.0, vw, outer.y0),
        Rect::new(0.0, outer.y1, vw, vh),
        Rect::new(0.0, outer.y0, outer.x0, outer.y1),
        Rect::new(outer.x1, outer.y0, vw, outer.y1),
    ] {
        if wall.area() > 0.0 {
            surface.fill_rect(wall, palette.wall);
        }
    }

    // Soft shadow: stacked translucent rects, widest first.
    let shadow = outer + Vec2::new(SHADOW_OFFSET, SHADOW_OFFSET);
    let step_alpha = 1.0 / SHADOW_STEPS as f64;
    for i in (0..SHADOW_STEPS).rev() {
        let spread = SHADOW_SPREAD * (i as f64 + 1.0) / SHADOW_STEPS as f64;
        surface.fill_rect(
            shadow.inflate(spread, spread),
            palette.shadow.with_alpha(step_alpha),
        );
    }

    surface.fill_rect(outer, palette.frame_black);

    let t = frame.thickness;
    for strip in border_strips(outer, t) {
        surface.fill_rect(strip, palette.frame_black);
    }

    // Bevel: light on top/left, dark on bottom/right.
    surface.fill_rect(
        Rect::from_origin_size(
            (outer.x0 + 2.0, outer.y0 + 2.0),
            (frame.width - 4.0, BEVEL_WIDTH),
        ),
        palette.frame_highlight,
    );
    surface.fill_rect(
        Rect::from_origin_size(
            (outer.x0 + 2.0, outer.y0 + 2.0),
            (BEVEL_WIDTH, frame.height - 4.0),
        ),
        palette.frame_highlight,
    );
    surface.fill_rect(
        Rect::from_origin_size(
            (outer.x0 + 2.0, outer.y1 - t + 2.0),
            (frame.width - 4.0, BEVEL_WIDTH),
        ),
        palette.frame_dark,
    );
    surface.fill_rect(
        Rect::from_origin_size(
            (outer.x1 - t + 2.0, outer.y0 + 2.0),
            (BEVEL_WIDTH, frame.height - 4.0),
        ),
        palette.frame_dark,
    );

    surface.stroke_rect(
        Rect::from_origin_size(
            (outer.x0 + t - 1.0, outer.y0 + t - 1.0),
            (frame.width - 2.0 * t + 2.0, frame.height - 2.0 * t + 2.0),
        ),
        StrokeStyle::new(2.0),
        palette.frame_dark,
    );
    surface.stroke_rect(
        Rect::from_origin_size(
            (outer.x0 + 1.0, outer.y0 + 1.0),
            (frame.width - 2.0, frame.height - 2.0),
        ),
        StrokeStyle::new(1.0),
        palette.frame_highlight,
    );
}

fn border_strips(outer: Rect, t: f64) -> [Rect; 4] {
    [
        Rect::new(outer.x0, outer.y0, outer.x1, outer.y0 + t),
        Rect::new(outer.x0, outer.y1 - t, outer.x1, outer.y1),
        Rect::new(outer.x0, outer.y0, outer.x0 + t, outer.y1),
        Rect::new(outer.x1 - t, outer.y0, outer.x1, outer.y1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/frame.rs"]
mod tests;
