use std::f64::consts::PI;

use crate::config::Palette;
use crate::foundation::core::{Affine, BezPath, Rect, Viewport};
use crate::foundation::math::clamp01;
use crate::render::surface::{FillRule, StrokeStyle, Surface};
use crate::scene::court::segment;

const BAND_HEIGHT: f64 = 12.0;
const SAG: f64 = 8.0;
const CENTRAL_BAND_WIDTH: f64 = 8.0;
const MESH_SIZE: f64 = 15.0;
const MESH_LINE_WIDTH: f64 = 2.0;
const CONTOUR_WIDTH: f64 = 4.0;
/// Reveal level after which the mesh starts to appear.
const MESH_START: f64 = 0.3;

/// Screen-space net spanning the viewport width, 20% of its height, vertically centred.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetGeometry {
    pub width: f64,
    pub height: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub band_height: f64,
    pub sag: f64,
    pub central_band_width: f64,
    pub mesh_size: f64,
}

impl NetGeometry {
    pub fn from_viewport(viewport: Viewport) -> Self {
        let vh = viewport.height_f64();
        let height = vh * 0.2;
        Self {
            width: viewport.width_f64(),
            height,
            start_x: 0.0,
            start_y: (vh - height) / 2.0,
            band_height: BAND_HEIGHT,
            sag: SAG,
            central_band_width: CENTRAL_BAND_WIDTH,
            mesh_size: MESH_SIZE,
        }
    }

    fn center_x(&self) -> f64 {
        self.start_x + self.width / 2.0
    }

    fn mesh_start_y(&self) -> f64 {
        self.start_y + self.band_height + self.sag / 2.0
    }

    fn mesh_height(&self) -> f64 {
        self.height - self.band_height - self.sag / 2.0
    }

    /// Sagging curve from the left edge to the right edge at height `y`.
    fn sagging(&self, y: f64, sag: f64) -> BezPath {
        let mut p = BezPath::new();
        p.move_to((self.start_x, y));
        p.quad_to((self.center_x(), y + sag), (self.start_x + self.width, y));
        p
    }

    pub(crate) fn band_path(&self) -> BezPath {
        let x1 = self.start_x + self.width;
        let bottom = self.start_y + self.band_height + self.sag / 2.0;
        let mut p = self.sagging(self.start_y, self.sag);
        p.line_to((x1, bottom));
        p.quad_to(
            (self.center_x(), self.start_y + self.band_height + self.sag + self.sag / 2.0),
            (self.start_x, bottom),
        );
        p.close_path();
        p
    }

    pub(crate) fn central_band(&self) -> Rect {
        Rect::from_origin_size(
            (self.center_x() - self.central_band_width / 2.0, self.start_y),
            (self.central_band_width, self.height),
        )
    }

    /// Vertical mesh strands, skipping the central band, bowed by the sag.
    pub(crate) fn vertical_mesh(&self) -> Vec<BezPath> {
        let (top, h) = (self.mesh_start_y(), self.mesh_height());
        let count = (self.width / self.mesh_size).floor() as usize;
        (0..=count)
            .map(|i| self.start_x + i as f64 * self.mesh_size)
            .filter(|x| (x - self.center_x()).abs() > self.central_band_width / 2.0)
            .map(|x| {
                let t = (x - self.start_x) / self.width;
                let offset = self.sag * (t * PI).sin();
                segment((x, top + offset), (x, top + h + offset))
            })
            .collect()
    }

    pub(crate) fn horizontal_mesh(&self) -> Vec<BezPath> {
        let (top, h) = (self.mesh_start_y(), self.mesh_height());
        if h < 0.0 {
            return Vec::new();
        }
        let count = (h / self.mesh_size).floor() as usize;
        (0..=count)
            .map(|i| self.sagging(top + i as f64 * self.mesh_size, self.sag / 2.0))
            .collect()
    }

    pub(crate) fn contours(&self) -> [BezPath; 2] {
        [
            self.sagging(self.start_y, self.sag),
            self.sagging(self.start_y + self.height, self.sag),
        ]
    }
}

/// Draw the net at `reveal` in `[0, 1]`: fading in and growing from 30% scale about the
/// viewport centre.
pub fn draw_net<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
    reveal: f64,
    palette: &Palette,
) {
    let r = clamp01(reveal);
    if r <= 0.0 {
        return;
    }
    let net = NetGeometry::from_viewport(viewport);
    let scale = 0.3 + 0.7 * r;
    let pivot = viewport.center().to_vec2();

    surface.save();
    surface.set_alpha(r);
    surface.transform(
        Affine::translate(pivot) * Affine::scale(scale) * Affine::translate(-pivot),
    );

    surface.fill_path(&net.band_path(), FillRule::NonZero, palette.net);
    surface.fill_rect(net.central_band(), palette.net);

    if r > MESH_START {
        let mesh_alpha = ((r - MESH_START) / (1.0 - MESH_START)).min(1.0);
        let style = StrokeStyle::new(MESH_LINE_WIDTH);
        surface.save();
        surface.set_alpha(mesh_alpha);
        for strand in net.vertical_mesh().iter().chain(net.horizontal_mesh().iter()) {
            surface.stroke_path(strand, style, palette.net);
        }
        surface.restore();
    }

    for contour in net.contours() {
        surface.stroke_path(&contour, StrokeStyle::new(CONTOUR_WIDTH), palette.net);
    }

    surface.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/scene/net.rs"]
mod tests;
