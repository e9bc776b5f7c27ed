use std::f64::consts::PI;

/// Shaping functions applied to normalized `[0, 1]` progress.
///
/// Every variant is total on `[0, 1]` with `apply(0) == 0` and `apply(1) == 1`; inputs outside
/// the range are clamped first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InOutSine,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = crate::foundation::math::clamp01(t);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => {
                // cos(PI) is exactly -1.0, so the endpoints land on 0 and 1 without drift.
                -((PI * t).cos() - 1.0) / 2.0
            }
        }
    }
}

pub fn ease_in_out_sine(t: f64) -> f64 {
    Ease::InOutSine.apply(t)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    Ease::InOutCubic.apply(t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
