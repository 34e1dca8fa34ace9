// Stage 4: darken the frame by the visibility weights.
// Visual: center stays as the camera sees it, outside fades to black
// (or to `darkness` worth of the original light).

use crate::error::Error;
use crate::types::{CHANNELS, Frame, WeightMask};

/// `out = clamp(src * (darkness + weight), 0, 255)` for every channel.
///
/// `darkness` is a uniform floor added to every weight. Keep it in `[0, 1)`
/// for "dim but not black" surroundings; combined with a weight near 1 it can
/// push the total above 1, which brightens the center. That is left as is
/// rather than renormalized, so preset calibration does not shift.
pub fn blend(frame: &Frame, weights: &WeightMask, darkness: f32) -> Result<Frame, Error> {
    if !darkness.is_finite() {
        return Err(Error::InvalidParameter(format!("darkness must be finite, got {darkness}")));
    }
    if weights.width != frame.width || weights.height != frame.height {
        return Err(Error::InvalidParameter(format!(
            "mask is {}x{} but frame is {}x{}",
            weights.width, weights.height, frame.width, frame.height
        )));
    }
    if frame.data.len() != frame.pixel_count() * CHANNELS {
        return Err(Error::InvalidParameter("frame buffer does not match its dimensions".into()));
    }

    let mut out = Vec::with_capacity(frame.data.len());
    for (px, &w) in frame.data.chunks_exact(CHANNELS).zip(&weights.weights) {
        let gain = darkness + w;
        for &c in px {
            out.push(scale_saturating(c, gain));
        }
    }
    Ok(Frame { width: frame.width, height: frame.height, data: out })
}

/// Multiply then saturate to 0..=255 (fraction truncated), never wrap.
#[inline]
fn scale_saturating(value: u8, gain: f32) -> u8 {
    (value as f32 * gain).clamp(0.0, 255.0) as u8
}
