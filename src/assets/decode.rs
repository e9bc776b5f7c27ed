use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{IntroError, IntroResult};
use crate::foundation::math::mul_div255;
use crate::render::surface::RasterImage;

/// Decode PNG/JPEG/... bytes into a premultiplied [`RasterImage`].
pub fn decode_image(bytes: &[u8]) -> IntroResult<RasterImage> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(IntroError::asset("decoded image is empty"));
    }

    let mut bytes = rgba.into_raw();
    premultiply_in_place(&mut bytes);
    Ok(RasterImage::new(width, height, bytes))
}

pub fn load_image(path: &Path) -> IntroResult<RasterImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| IntroError::asset(format!("failed to read '{}': {e}", path.display())))?;
    decode_image(&bytes)
        .map_err(|e| IntroError::asset(format!("failed to decode '{}': {e}", path.display())))
}

pub(crate) fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255(u16::from(*c), a) as u8;
        }
    }
}
