// Stage 3: intensities -> visibility weights.

use crate::types::{VisibilityMask, WeightMask};

/// Fixed divisor tying every severity preset to the same scale.
pub const FULL_INTENSITY: f32 = 255.0;

/// Divide every value by 255. There is no per-frame stretch: a heavily blurred
/// mask that never reaches 255 keeps a ceiling below 1.0, which is how large
/// blur radii dim the whole field.
pub fn normalize(mask: &VisibilityMask) -> WeightMask {
    WeightMask {
        width: mask.width,
        height: mask.height,
        weights: mask.values.iter().map(|&v| v as f32 / FULL_INTENSITY).collect(),
    }
}
