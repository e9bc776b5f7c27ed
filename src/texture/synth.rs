use std::sync::Arc;

use rayon::prelude::*;

use crate::foundation::core::{PaintId, Rgba8};
use crate::foundation::math::{channel_u8, lerp};
use crate::foundation::rng::Rng64;
use crate::texture::noise::{fractal, hash};

/// Largest tile edge ever synthesized; bigger areas are covered by tiling.
pub const MAX_TILE_SIZE: u32 = 256;

const CLAY: Rgba8 = Rgba8::rgb(201, 89, 23);
const CLAY_LIGHT: Rgba8 = Rgba8::rgb(214, 107, 26);
const CLAY_DARK: Rgba8 = Rgba8::rgb(160, 75, 20);
const CLAY_VERY_LIGHT: Rgba8 = Rgba8::rgb(232, 125, 32);
const CLAY_VERY_DARK: Rgba8 = Rgba8::rgb(139, 63, 16);

/// `(scale, octaves, weight)` for each noise layer of the base pass.
const NOISE_LAYERS: [(f64, u32, f64); 4] = [
    (0.015, 3, 1.2),
    (0.07, 2, 0.8),
    (0.3, 2, 0.5),
    (0.8, 1, 0.3),
];

const GRAIN_SCALE: f64 = 0.4;
const GRAIN_SEED: f64 = 999.0;
const GRAIN_AMPLITUDE: f64 = 25.0;

const MAX_SPOTS: f64 = 35.0;
const AREA_PER_SPOT: f64 = 7_000.0;
const MAX_STREAKS: f64 = 20.0;
const WIDTH_PER_STREAK: f64 = 50.0;
const STREAK_ALPHA: f64 = 0.1;

/// Randomness policy for the decorative spot/streak pass.
///
/// The noise base layer is always deterministic; only this overlay consumes random numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayMode {
    /// Skip the overlay entirely.
    Disabled,
    /// Reproducible overlay derived from the given seed.
    Seeded(u64),
    /// Seed from the system clock; differs run to run.
    #[default]
    Entropy,
}

/// Immutable clay texture tile (opaque RGBA8, so straight and premultiplied bytes coincide).
#[derive(Clone, Debug)]
pub struct TextureTile {
    pub id: PaintId,
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl TextureTile {
    /// RGBA at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` lies outside the tile.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} tile",
            self.width,
            self.height
        );
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        [px[0], px[1], px[2], px[3]]
    }
}

/// Build a clay tile of `min(width, 256) x min(height, 256)` pixels.
#[tracing::instrument(level = "debug")]
pub fn synthesize(width: u32, height: u32, overlay: OverlayMode) -> TextureTile {
    let w = width.clamp(1, MAX_TILE_SIZE);
    let h = height.clamp(1, MAX_TILE_SIZE);

    let mut bytes = base_layer(w, h);
    match overlay {
        OverlayMode::Disabled => {}
        OverlayMode::Seeded(seed) => add_organic_details(&mut bytes, w, h, &mut Rng64::new(seed)),
        OverlayMode::Entropy => {
            add_organic_details(&mut bytes, w, h, &mut Rng64::from_entropy());
        }
    }

    TextureTile {
        id: PaintId::next(),
        width: w,
        height: h,
        rgba8_premul: Arc::new(bytes),
    }
}

/// Deterministic noise-coloured pixels plus fine grain.
pub(crate) fn base_layer(w: u32, h: u32) -> Vec<u8> {
    let row_len = (w as usize) * 4;
    let mut bytes = vec![0u8; row_len * (h as usize)];
    bytes
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as f64;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let x = x as f64;
                let total: f64 = NOISE_LAYERS
                    .iter()
                    .map(|&(scale, octaves, weight)| fractal(x * scale, y * scale, octaves) * weight)
                    .sum();
                let (mut r, mut g, mut b) = clay_for_noise(total);

                let grain = hash(x * GRAIN_SCALE, y * GRAIN_SCALE, GRAIN_SEED) * GRAIN_AMPLITUDE;
                r += grain;
                g += grain * 0.8;
                b += grain * 0.6;

                px[0] = channel_u8(r);
                px[1] = channel_u8(g);
                px[2] = channel_u8(b);
                px[3] = 255;
            }
        });
    bytes
}

/// Map summed noise to a clay colour using five threshold buckets.
pub(crate) fn clay_for_noise(total: f64) -> (f64, f64, f64) {
    let towards = |target: Rgba8, factor: f64| {
        (
            lerp(f64::from(CLAY.r), f64::from(target.r), factor),
            lerp(f64::from(CLAY.g), f64::from(target.g), factor),
            lerp(f64::from(CLAY.b), f64::from(target.b), factor),
        )
    };

    if total > 0.25 {
        towards(CLAY_VERY_LIGHT, (total * 1.5).min(1.2) * 0.8)
    } else if total > 0.1 {
        towards(CLAY_LIGHT, ((total - 0.1) * 2.0).min(1.0))
    } else if total < -0.25 {
        towards(CLAY_VERY_DARK, ((total + 0.25).abs() * 1.5).min(1.2) * 0.8)
    } else if total < -0.1 {
        towards(CLAY_DARK, ((total + 0.1).abs() * 2.0).min(1.0))
    } else {
        let variation = total * 40.0;
        (
            f64::from(CLAY.r) + variation,
            f64::from(CLAY.g) + variation * 0.8,
            f64::from(CLAY.b) + variation * 0.6,
        )
    }
}

pub(crate) fn spot_count(w: u32, h: u32) -> usize {
    (f64::from(w) * f64::from(h) / AREA_PER_SPOT)
        .min(MAX_SPOTS)
        .ceil() as usize
}

pub(crate) fn streak_count(w: u32) -> usize {
    (f64::from(w) / WIDTH_PER_STREAK).min(MAX_STREAKS).ceil() as usize
}

/// Scatter translucent spots and short streaks over an opaque tile.
fn add_organic_details(bytes: &mut [u8], w: u32, h: u32, rng: &mut Rng64) {
    let (wf, hf) = (f64::from(w), f64::from(h));

    for _ in 0..spot_count(w, h) {
        let cx = rng.next_f64() * wf;
        let cy = rng.next_f64() * hf;
        let radius = rng.next_f64() * 4.0 + 1.5;
        let opacity = rng.next_f64() * 0.3 + 0.1;
        let choice = rng.next_f64();
        let color = if choice > 0.6 {
            CLAY_LIGHT
        } else if choice > 0.4 {
            CLAY_DARK
        } else if rng.next_f64() > 0.5 {
            CLAY_VERY_LIGHT
        } else {
            CLAY_VERY_DARK
        };
        fill_disc(bytes, w, h, (cx, cy), radius, color, opacity);
    }

    for _ in 0..streak_count(w) {
        let sx = rng.next_f64() * wf;
        let sy = rng.next_f64() * hf;
        let length = rng.next_f64() * 25.0 + 8.0;
        let angle = rng.next_f64() * std::f64::consts::TAU;
        let end = (sx + angle.cos() * length, sy + angle.sin() * length);
        draw_line(bytes, w, h, (sx, sy), end, CLAY_DARK, STREAK_ALPHA);
    }
}

fn blend_px(bytes: &mut [u8], w: u32, x: u32, y: u32, color: Rgba8, alpha: f64) {
    let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
    let px = &mut bytes[idx..idx + 4];
    px[0] = channel_u8(lerp(f64::from(px[0]), f64::from(color.r), alpha));
    px[1] = channel_u8(lerp(f64::from(px[1]), f64::from(color.g), alpha));
    px[2] = channel_u8(lerp(f64::from(px[2]), f64::from(color.b), alpha));
}

fn fill_disc(
    bytes: &mut [u8],
    w: u32,
    h: u32,
    (cx, cy): (f64, f64),
    radius: f64,
    color: Rgba8,
    opacity: f64,
) {
    let x0 = (cx - radius - 1.0).floor().max(0.0) as u32;
    let y0 = (cy - radius - 1.0).floor().max(0.0) as u32;
    let x1 = ((cx + radius + 1.0).ceil().max(0.0) as u32).min(w);
    let y1 = ((cy + radius + 1.0).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_px(bytes, w, x, y, color, opacity * coverage);
            }
        }
    }
}

fn draw_line(
    bytes: &mut [u8],
    w: u32,
    h: u32,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    color: Rgba8,
    alpha: f64,
) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        let x = lerp(x0, x1, t).floor();
        let y = lerp(y0, y1, t).floor();
        if x < 0.0 || y < 0.0 || x >= f64::from(w) || y >= f64::from(h) {
            continue;
        }
        blend_px(bytes, w, x as u32, y as u32, color, alpha);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/synth.rs"]
mod tests;
