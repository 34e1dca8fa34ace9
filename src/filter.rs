// The whole per-frame vision-loss filter: mask -> smooth -> normalize -> blend.
// Stateless: every call allocates its own intermediates and leaves the input alone.

use crate::blend::blend;
use crate::error::Error;
use crate::mask::generate_mask;
use crate::normalize::normalize;
use crate::preset::Severity;
use crate::smooth::smooth;
use crate::types::Frame;

pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_BLUR: f32 = 20.0;
pub const DEFAULT_DARKNESS: f32 = 0.0;

/// Tunables for one filter call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParams {
    /// Horizontal diameter of the clear field, pixels.
    pub width: u32,
    /// Gaussian sigma for the field edge, pixels.
    pub blur: f32,
    /// Uniform light floor added to every visibility weight.
    pub darkness: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, blur: DEFAULT_BLUR, darkness: DEFAULT_DARKNESS }
    }
}

impl FilterParams {
    pub fn new(width: u32, blur: f32, darkness: f32) -> Self {
        Self { width, blur, darkness }
    }

    /// Preset width and blur with the default darkness.
    pub fn from_severity(level: Severity) -> Self {
        Self { width: level.visible_width(), blur: level.blur_radius() as f32, ..Self::default() }
    }

    pub fn with_darkness(self, darkness: f32) -> Self {
        Self { darkness, ..self }
    }
}

impl From<Severity> for FilterParams {
    fn from(level: Severity) -> Self {
        Self::from_severity(level)
    }
}

/// Apply simulated field loss to one frame. The result has the same size and
/// channel count as `frame`.
pub fn apply_filter(frame: &Frame, params: &FilterParams) -> Result<Frame, Error> {
    log::trace!(
        "filter {}x{} width={} blur={} darkness={}",
        frame.width,
        frame.height,
        params.width,
        params.blur,
        params.darkness
    );
    let mask = generate_mask(frame.height, frame.width, params.width);
    let smoothed = smooth(&mask, params.blur)?;
    let weights = normalize(&smoothed);
    blend(frame, &weights, params.darkness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::ALL;
    use rstest::rstest;

    #[test]
    fn defaults_are_300_20_0() {
        let p = FilterParams::default();
        assert_eq!(p, FilterParams::new(300, 20.0, 0.0));
    }

    #[test]
    fn from_severity_copies_the_pair() {
        let p: FilterParams = Severity::Severe.into();
        assert_eq!(p, FilterParams::new(150, 150.0, 0.0));
        assert_eq!(p.with_darkness(0.2).darkness, 0.2);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(17, 9)]
    #[case(64, 48)]
    fn shape_is_preserved(#[case] w: usize, #[case] h: usize) {
        let frame = Frame::filled(w, h, 120);
        let out = apply_filter(&frame, &FilterParams::new(20, 3.0, 0.1)).unwrap();
        assert_eq!((out.width, out.height, out.data.len()), (w, h, frame.data.len()));
    }

    #[test]
    fn every_preset_preserves_shape() {
        let frame = Frame::filled(32, 24, 255);
        for level in ALL {
            let out = apply_filter(&frame, &level.into()).unwrap();
            assert_eq!((out.width, out.height), (32, 24));
            assert_eq!(out.data.len(), frame.data.len());
        }
    }

    #[test]
    fn empty_frame_passes_through() {
        let frame = Frame::filled(0, 0, 0);
        let out = apply_filter(&frame, &FilterParams::default()).unwrap();
        assert!(out.data.is_empty());
    }

    #[test]
    fn astronomically_large_blur_dims_evenly() {
        let frame = Frame::filled(16, 12, 200);
        let out = apply_filter(&frame, &FilterParams::new(10, 1e19, 0.0)).unwrap();
        assert_eq!((out.width, out.height), (16, 12));
        let min = *out.data.iter().min().unwrap();
        let max = *out.data.iter().max().unwrap();
        assert!(max < 200);
        assert!(max - min <= 3, "min = {min} max = {max}");
    }

    #[test]
    fn negative_blur_is_rejected() {
        let frame = Frame::filled(8, 8, 10);
        let err = apply_filter(&frame, &FilterParams::new(4, -1.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
