use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::IntroResult;
use crate::render::surface::Surface;
use crate::texture::synth::{MAX_TILE_SIZE, OverlayMode, TextureTile, synthesize};

/// Cache key: requested tile dimensions clamped to `[1, 256]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    pub width: u32,
    pub height: u32,
}

impl TileKey {
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.clamp(1, MAX_TILE_SIZE),
            height: height.clamp(1, MAX_TILE_SIZE),
        }
    }

    /// Key for a destination area measured in (possibly fractional) pixels.
    pub fn for_area(width: f64, height: f64) -> Self {
        Self::clamped(px_ceil(width), px_ceil(height))
    }
}

impl std::fmt::Display for TileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.width, self.height)
    }
}

fn px_ceil(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.ceil().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Owned store of synthesized clay tiles. Entries live as long as the cache.
#[derive(Debug, Default)]
pub struct TextureCache {
    tiles: HashMap<TileKey, Arc<TextureTile>>,
    synthesis_count: u64,
    overlay: OverlayMode,
}

impl TextureCache {
    pub fn new(overlay: OverlayMode) -> Self {
        Self {
            tiles: HashMap::new(),
            synthesis_count: 0,
            overlay,
        }
    }

    pub fn overlay(&self) -> OverlayMode {
        self.overlay
    }

    /// Tile for `(width, height)`, synthesizing it on the first request for its key.
    pub fn get(&mut self, width: u32, height: u32) -> Arc<TextureTile> {
        self.get_key(TileKey::clamped(width, height))
    }

    pub fn get_key(&mut self, key: TileKey) -> Arc<TextureTile> {
        if let Some(tile) = self.tiles.get(&key) {
            return Arc::clone(tile);
        }

        tracing::debug!(key = %key, "texture cache miss");
        let overlay = match self.overlay {
            OverlayMode::Seeded(seed) => OverlayMode::Seeded(mix_seed(seed, key)),
            other => other,
        };
        let tile = Arc::new(synthesize(key.width, key.height, overlay));
        self.synthesis_count += 1;
        self.tiles.insert(key, Arc::clone(&tile));
        tile
    }

    /// Number of tiles synthesized so far (cache misses).
    pub fn synthesis_count(&self) -> u64 {
        self.synthesis_count
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Cover `rect` with copies of the tile for its size.
    ///
    /// The last row and column are cropped to `rect`; tiles are never scaled.
    pub fn draw_tiled<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        rect: Rect,
    ) -> IntroResult<()> {
        let rect = rect.abs();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Ok(());
        }

        let tile = self.get_key(TileKey::for_area(rect.width(), rect.height()));
        let (tw, th) = (f64::from(tile.width), f64::from(tile.height));

        let mut y = rect.y0;
        while y < rect.y1 {
            let h = th.min(rect.y1 - y);
            let mut x = rect.x0;
            while x < rect.x1 {
                let w = tw.min(rect.x1 - x);
                surface.draw_tile(&tile, Rect::new(0.0, 0.0, w, h), Point::new(x, y))?;
                x += tw;
            }
            y += th;
        }
        Ok(())
    }
}

fn mix_seed(seed: u64, key: TileKey) -> u64 {
    let k = (u64::from(key.width) << 32) | u64::from(key.height);
    seed ^ k.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/cache.rs"]
mod tests;
