//! Hash-based coherent noise used by the clay texture.
//!
//! Both functions are pure: the same inputs always produce the same output.

/// Sine-hash pseudo-random value in `[-1, 1]` for a 2D position and seed.
///
/// Not suitable for anything security related; it only exists to give visual variation.
pub fn hash(x: f64, y: f64, seed: f64) -> f64 {
    let n = (x * 12.9898 + y * 78.233 + seed * 37.719).sin() * 43_758.545_3;
    (n - n.floor()) * 2.0 - 1.0
}

const OCTAVE_GAIN: f64 = 0.6;
const OCTAVE_LACUNARITY: f64 = 2.2;
const CONTRAST_EXPONENT: f64 = 0.75;

/// Fractal sum of `octaves` hash layers, normalized to `[-1, 1]`.
///
/// Each octave multiplies the frequency by 2.2 and the amplitude by 0.6. The normalized sum is
/// pushed towards the extremes with a signed `|v|^0.75` curve, which gives the sharper
/// light/dark grains of packed clay.
pub fn fractal(x: f64, y: f64, octaves: u32) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for i in 0..octaves {
        value += hash(x * frequency, y * frequency, f64::from(i)) * amplitude;
        max_value += amplitude;
        amplitude *= OCTAVE_GAIN;
        frequency *= OCTAVE_LACUNARITY;
    }

    if max_value == 0.0 {
        return 0.0;
    }

    let normalized = value / max_value;
    // `f64::signum` maps +0.0 to 1.0, which is harmless here since |0|^0.75 == 0.
    normalized.signum() * normalized.abs().powf(CONTRAST_EXPONENT)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/noise.rs"]
mod tests;
