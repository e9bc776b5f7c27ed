use crate::foundation::core::{Point, Rect, Viewport};

pub const FRAME_THICKNESS: f64 = 20.0;
/// Fraction of the service-box width a door travels when fully open.
pub const DOOR_TRAVEL: f64 = 0.85;

/// Picture frame placed in the viewport (90% x 80%, centred).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRect {
    pub width: f64,
    pub height: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub thickness: f64,
}

impl FrameRect {
    pub fn from_viewport(viewport: Viewport) -> Self {
        let (vw, vh) = (viewport.width_f64(), viewport.height_f64());
        let width = vw * 0.9;
        let height = vh * 0.8;
        Self {
            width,
            height,
            start_x: (vw - width) / 2.0,
            start_y: (vh - height) / 2.0,
            thickness: FRAME_THICKNESS,
        }
    }

    pub fn outer(&self) -> Rect {
        Rect::new(
            self.start_x,
            self.start_y,
            self.start_x + self.width,
            self.start_y + self.height,
        )
    }

    /// Area inside the border strips; empty (never inverted) for tiny viewports.
    pub fn interior(&self) -> Rect {
        let t = self.thickness;
        let x0 = self.start_x + t;
        let y0 = self.start_y + t;
        Rect::new(
            x0,
            y0,
            (self.start_x + self.width - t).max(x0),
            (self.start_y + self.height - t).max(y0),
        )
    }
}

/// Court placed in the frame (85% x 80% of it, centred).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CourtRect {
    pub width: f64,
    pub height: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub single_court_height: f64,
    pub single_start_y: f64,
    pub service_line_distance: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl CourtRect {
    pub fn from_frame(frame: &FrameRect) -> Self {
        let width = frame.width * 0.85;
        let height = frame.height * 0.8;
        let start_x = frame.start_x + (frame.width - width) / 2.0;
        let start_y = frame.start_y + (frame.height - height) / 2.0;
        let single_court_height = height * 0.77;
        Self {
            width,
            height,
            start_x,
            start_y,
            single_court_height,
            single_start_y: start_y + (height - single_court_height) / 2.0,
            service_line_distance: width * 0.25,
            center_x: start_x + width / 2.0,
            center_y: start_y + height / 2.0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn outer(&self) -> Rect {
        Rect::new(
            self.start_x,
            self.start_y,
            self.start_x + self.width,
            self.start_y + self.height,
        )
    }

    pub fn singles(&self) -> Rect {
        Rect::new(
            self.start_x,
            self.single_start_y,
            self.start_x + self.width,
            self.single_start_y + self.single_court_height,
        )
    }

    /// X of the left service line.
    pub fn left_service_x(&self) -> f64 {
        self.start_x + self.service_line_distance
    }

    /// X of the right service line.
    pub fn right_service_x(&self) -> f64 {
        self.start_x + self.width - self.service_line_distance
    }
}

/// One service box (between a service line and the centre line, one singles half).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ServiceBoxRect {
    pub width: f64,
    pub height: f64,
}

impl ServiceBoxRect {
    pub fn from_court(court: &CourtRect) -> Self {
        Self {
            width: court.center_x - court.left_service_x(),
            height: court.center_y - court.single_start_y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// Where a sliding service-box door sits for a given slide distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorPlacement {
    pub side: Side,
    pub rect: Rect,
    pub visible: bool,
}

/// Every derived rectangle for one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CourtLayout {
    pub viewport: Viewport,
    pub frame: FrameRect,
    pub court: CourtRect,
    pub service_box: ServiceBoxRect,
}

impl CourtLayout {
    pub fn from_viewport(viewport: Viewport) -> Self {
        let frame = FrameRect::from_viewport(viewport);
        let court = CourtRect::from_frame(&frame);
        let service_box = ServiceBoxRect::from_court(&court);
        Self {
            viewport,
            frame,
            court,
            service_box,
        }
    }

    /// Both singles halves of the service boxes on `side` (width x 2 * height).
    pub fn service_area(&self, side: Side) -> Rect {
        let x = match side {
            Side::Left => self.court.left_service_x(),
            Side::Right => self.court.center_x,
        };
        Rect::new(
            x,
            self.court.single_start_y,
            x + self.service_box.width,
            self.court.single_start_y + self.service_box.height * 2.0,
        )
    }

    /// Slide distance for a door progress in `[0, 1]`.
    pub fn door_slide(&self, door_progress: f64) -> f64 {
        door_progress * self.service_box.width * DOOR_TRAVEL
    }

    /// Door rectangle after sliding outwards by `slide`.
    pub fn door(&self, side: Side, slide: f64) -> DoorPlacement {
        let court = &self.court;
        let width = self.service_box.width;
        let x = match side {
            Side::Left => court.left_service_x() - slide,
            Side::Right => court.center_x + slide,
        };
        let visible = match side {
            Side::Left => x + width > court.left_service_x(),
            Side::Right => x < court.center_x + width,
        };
        let y = court.single_start_y;
        DoorPlacement {
            side,
            rect: Rect::new(x, y, x + width, y + self.service_box.height * 2.0),
            visible,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/layout.rs"]
mod tests;
