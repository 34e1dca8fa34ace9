// Stage 2: soften the ellipse edge.
// Visual: the hard white/black border becomes a gray ramp; bigger radius = wider ramp.

use crate::error::Error;
use crate::types::VisibilityMask;

/// Past this many pixels per frame dimension a larger sigma no longer changes
/// the result: the mirrored mask is already averaged to a flat gray.
pub const MAX_SIGMA_PER_PIXEL: f64 = 4.0;

/// Odd kernel size covering ±3 sigma, i.e. `round(6σ + 1) | 1`.
/// Sigma 0 yields a single tap (identity).
pub(crate) fn kernel_size_for_sigma(sigma: f64) -> usize {
    ((sigma * 6.0 + 1.0).round() as usize) | 1
}

/// Normalized 1D Gaussian (sums to 1) for the given standard deviation.
/// Callers bound sigma first; see [`effective_sigma`].
pub(crate) fn gaussian_kernel_1d(sigma: f64) -> Vec<f32> {
    let kernel_size = kernel_size_for_sigma(sigma);
    if kernel_size == 1 {
        return vec![1.0];
    }
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// The sigma actually used on a `width` x `height` mask: `radius`, capped at
/// `MAX_SIGMA_PER_PIXEL` times the larger dimension.
pub fn effective_sigma(radius: f32, width: usize, height: usize) -> f64 {
    let cap = MAX_SIGMA_PER_PIXEL * width.max(height).max(1) as f64;
    (radius as f64).min(cap)
}

/// Reflect-101 border (`dcb|abcd|cba`), folded as many times as needed so
/// kernels wider than the image still land on a valid index.
#[inline]
fn reflect_101(p: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let p = p.rem_euclid(period);
    if p < len as isize { p as usize } else { (period - p) as usize }
}

/// Kernel taps for one axis of length `len`, plus the offset of tap 0.
///
/// Reflect-101 repeats every `2 * (len - 1)` samples, so a kernel longer than
/// that period is wrapped onto it. Same sums, at most one period of taps.
fn axis_taps(kernel: &[f32], len: usize) -> (Vec<f32>, isize) {
    let half = (kernel.len() / 2) as isize;
    let period = 2 * len.saturating_sub(1);
    if period == 0 {
        // One sample: every tap reads it.
        return (vec![kernel.iter().sum()], 0);
    }
    if kernel.len() <= period {
        return (kernel.to_vec(), -half);
    }
    let mut folded = vec![0.0f32; period];
    for (t, &k) in kernel.iter().enumerate() {
        folded[(t as isize - half).rem_euclid(period as isize) as usize] += k;
    }
    (folded, 0)
}

/// Gaussian-blur the mask with standard deviation `radius` on both axes.
///
/// Any finite, non-negative radius is accepted. Radii comparable to the frame
/// size wash the mask toward a flat gray, which reads as global dimming.
pub fn smooth(mask: &VisibilityMask, radius: f32) -> Result<VisibilityMask, Error> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "blur radius must be a finite value >= 0, got {radius}"
        )));
    }
    let (w, h) = (mask.width, mask.height);
    if w == 0 || h == 0 {
        return Ok(mask.clone());
    }
    let kernel = gaussian_kernel_1d(effective_sigma(radius, w, h));
    if kernel.len() == 1 {
        return Ok(mask.clone());
    }
    let (row_taps, row_offset) = axis_taps(&kernel, w);
    let (col_taps, col_offset) = axis_taps(&kernel, h);

    /* ---- Pass 1: horizontal (mask -> temp) ----
       Rows outside the ellipse are all zero and stay zero. */
    let mut temp = vec![0.0f32; w * h];
    let mut row_live = vec![false; h];
    let mut padded = vec![0.0f32; w + row_taps.len() - 1];
    for y in 0..h {
        let src = &mask.values[y * w..(y + 1) * w];
        if src.iter().all(|&v| v == 0) {
            continue;
        }
        row_live[y] = true;
        for (i, p) in padded.iter_mut().enumerate() {
            *p = src[reflect_101(i as isize + row_offset, w)] as f32;
        }
        let dst = &mut temp[y * w..(y + 1) * w];
        for (x, out) in dst.iter_mut().enumerate() {
            *out = row_taps
                .iter()
                .zip(&padded[x..x + row_taps.len()])
                .map(|(k, v)| k * v)
                .sum();
        }
    }

    /* ---- Pass 2: vertical (temp -> out), one output row at a time ---- */
    let mut out = VisibilityMask::zeros(w, h);
    let mut acc = vec![0.0f32; w];
    for y in 0..h {
        acc.iter_mut().for_each(|a| *a = 0.0);
        for (k, &weight) in col_taps.iter().enumerate() {
            let sy = reflect_101(y as isize + k as isize + col_offset, h);
            if !row_live[sy] {
                continue;
            }
            let src = &temp[sy * w..(sy + 1) * w];
            for (a, &v) in acc.iter_mut().zip(src) {
                *a += weight * v;
            }
        }
        let dst = &mut out.values[y * w..(y + 1) * w];
        for (d, &a) in dst.iter_mut().zip(&acc) {
            *d = a.round().clamp(0.0, 255.0) as u8;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::generate_mask;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1)]
    #[case(1.0, 7)]
    #[case(20.0, 121)]
    #[case(50.0, 301)]
    #[case(200.0, 1201)]
    #[case(0.4, 3)]
    fn kernel_size_tracks_sigma(#[case] sigma: f64, #[case] expected: usize) {
        assert_eq!(kernel_size_for_sigma(sigma), expected);
        assert_eq!(gaussian_kernel_1d(sigma).len(), expected);
    }

    #[test]
    fn kernel_sums_to_one_and_peaks_in_middle() {
        let k = gaussian_kernel_1d(3.0);
        let sum: f32 = k.iter().sum();
        approx::assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-5);
        let mid = k.len() / 2;
        for i in 0..k.len() {
            approx::assert_abs_diff_eq!(k[i], k[k.len() - 1 - i], epsilon = 1e-7);
            assert!(k[mid] >= k[i]);
        }
    }

    #[rstest]
    #[case(-1, 5, 1)]
    #[case(-2, 5, 2)]
    #[case(5, 5, 3)]
    #[case(6, 5, 2)]
    #[case(-9, 5, 1)]
    #[case(3, 5, 3)]
    #[case(-7, 1, 0)]
    fn reflect_101_folds(#[case] p: isize, #[case] len: usize, #[case] expected: usize) {
        assert_eq!(reflect_101(p, len), expected);
    }

    #[test]
    fn zero_radius_is_identity() {
        let m = generate_mask(40, 50, 30);
        assert_eq!(smooth(&m, 0.0).unwrap(), m);
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn rejects_bad_radius(#[case] radius: f32) {
        let m = generate_mask(10, 10, 6);
        assert!(matches!(smooth(&m, radius), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn uniform_mask_unchanged() {
        let m = VisibilityMask { width: 12, height: 9, values: vec![255; 108] };
        assert_eq!(smooth(&m, 4.0).unwrap(), m);
    }

    #[test]
    fn edge_becomes_a_ramp() {
        let m = generate_mask(100, 100, 60);
        let s = smooth(&m, 4.0).unwrap();
        assert_eq!((s.width, s.height), (100, 100));
        assert_eq!(s.get(50, 50), 255);
        assert_eq!(s.get(0, 0), 0);
        // Top of the ellipse (y = 30) sits near half intensity.
        let edge = s.get(50, 30);
        assert!(edge > 80 && edge < 180, "edge = {edge}");
        // Ramp is monotone going outward along both axes.
        for x in 50..99 {
            assert!(s.get(x, 50) >= s.get(x + 1, 50), "x = {x}");
        }
        for y in (1..=50).rev() {
            assert!(s.get(50, y) >= s.get(50, y - 1), "y = {y}");
        }
    }

    #[test]
    fn huge_radius_on_small_frame_goes_flat() {
        let m = generate_mask(30, 40, 20);
        let s = smooth(&m, 200.0).unwrap();
        let min = *s.values.iter().min().unwrap();
        let max = *s.values.iter().max().unwrap();
        assert!(max - min <= 8, "min = {min} max = {max}");
        assert!(max < 255);
    }

    #[test]
    fn single_row_frame() {
        let m = VisibilityMask { width: 9, height: 1, values: vec![0, 0, 0, 0, 255, 0, 0, 0, 0] };
        let s = smooth(&m, 1.0).unwrap();
        assert!(s.values[4] < 255);
        assert!(s.values[3] > 0 && s.values[5] > 0);
        assert_eq!(s.values[3], s.values[5]);
    }

    /// Direct convolution with the full kernel and reflect-101 lookups.
    fn reference_blur(mask: &VisibilityMask, sigma: f64) -> Vec<u8> {
        let (w, h) = (mask.width, mask.height);
        let kernel = gaussian_kernel_1d(sigma);
        let half = (kernel.len() / 2) as isize;
        let mut temp = vec![0.0f64; w * h];
        for y in 0..h {
            for x in 0..w {
                temp[y * w + x] = kernel
                    .iter()
                    .enumerate()
                    .map(|(t, &k)| {
                        let sx = reflect_101(x as isize + t as isize - half, w);
                        k as f64 * mask.values[y * w + sx] as f64
                    })
                    .sum();
            }
        }
        let mut out = vec![0u8; w * h];
        for y in 0..h {
            for x in 0..w {
                let v: f64 = kernel
                    .iter()
                    .enumerate()
                    .map(|(t, &k)| {
                        let sy = reflect_101(y as isize + t as isize - half, h);
                        k as f64 * temp[sy * w + x]
                    })
                    .sum();
                out[y * w + x] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
        out
    }

    #[rstest]
    #[case(9, 11, 7, 5.0)] // kernel 31 wraps on both axes
    #[case(40, 6, 20, 3.0)] // wraps vertically only
    #[case(1, 12, 12, 2.0)] // single row
    fn wrapped_kernel_matches_direct_convolution(
        #[case] h: usize,
        #[case] w: usize,
        #[case] vis: u32,
        #[case] sigma: f32,
    ) {
        let m = generate_mask(h, w, vis);
        assert!(m.values.iter().any(|&v| v > 0));
        let got = smooth(&m, sigma).unwrap();
        let want = reference_blur(&m, sigma as f64);
        for (i, (&g, &e)) in got.values.iter().zip(&want).enumerate() {
            assert!((g as i16 - e as i16).abs() <= 1, "index {i}: got {g}, want {e}");
        }
    }

    #[rstest]
    #[case(1e19)]
    #[case(1e9)]
    #[case(f32::MAX)]
    fn enormous_radius_washes_flat(#[case] radius: f32) {
        let m = generate_mask(12, 16, 10);
        let s = smooth(&m, radius).unwrap();
        assert_eq!((s.width, s.height), (16, 12));
        let min = *s.values.iter().min().unwrap();
        let max = *s.values.iter().max().unwrap();
        assert!(max - min <= 2, "min = {min} max = {max}");
        assert!(max < 255);
    }

    #[test]
    fn sigma_is_capped_by_frame_size() {
        assert_eq!(effective_sigma(20.0, 640, 480), 20.0);
        assert_eq!(effective_sigma(1e19, 640, 480), 2560.0);
        assert_eq!(effective_sigma(1e19, 0, 0), MAX_SIGMA_PER_PIXEL);
    }
}
