use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::geometry::layout::CourtRect;
use crate::render::surface::{StrokeStyle, Surface};

pub const LINE_WIDTH: f64 = 4.0;

/// Which interior lines to draw besides the two outer rectangles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineSet {
    /// Centre line, both service lines and the centre service line.
    #[default]
    All,
    /// Centre line outside the singles area, split service lines and short centre stubs.
    Partial,
}

pub(crate) fn segment(a: impl Into<Point>, b: impl Into<Point>) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(a);
    p.line_to(b);
    p
}

/// Stroke the court markings (4 px, round caps) at `opacity`.
pub fn draw_court_lines<S: Surface + ?Sized>(
    surface: &mut S,
    court: &CourtRect,
    lines: LineSet,
    opacity: f64,
    color: Rgba8,
) {
    let style = StrokeStyle::round(LINE_WIDTH);

    surface.save();
    surface.set_alpha(opacity);

    surface.stroke_rect(court.outer(), style, color);
    surface.stroke_rect(court.singles(), style, color);

    for path in line_paths(court, lines) {
        surface.stroke_path(&path, style, color);
    }

    surface.restore();
}

pub(crate) fn line_paths(court: &CourtRect, lines: LineSet) -> Vec<BezPath> {
    let cx = court.center_x;
    let cy = court.center_y;
    let top = court.start_y;
    let bottom = court.start_y + court.height;
    let singles_top = court.single_start_y;
    let singles_bottom = court.single_start_y + court.single_court_height;
    let left = court.left_service_x();
    let right = court.right_service_x();

    match lines {
        LineSet::All => vec![
            segment((cx, top), (cx, bottom)),
            segment((left, singles_top), (left, singles_bottom)),
            segment((right, singles_top), (right, singles_bottom)),
            segment((left, cy), (right, cy)),
        ],
        LineSet::Partial => {
            let stub = (cx - left) * 0.1;
            let mut out = vec![
                segment((cx, top), (cx, singles_top)),
                segment((cx, singles_bottom), (cx, bottom)),
            ];
            for x in [left, right] {
                out.push(segment((x, singles_top), (x, cy)));
                out.push(segment((x, cy), (x, singles_bottom)));
            }
            out.push(segment((left, cy), (left + stub, cy)));
            out.push(segment((cx + (cx - left) * 0.9, cy), (right, cy)));
            out
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/court.rs"]
mod tests;
