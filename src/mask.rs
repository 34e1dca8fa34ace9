// Stage 1: the binary field-of-view mask.
// Visual: a white (255) ellipse in the middle of a black canvas the size of the frame.

use crate::types::VisibilityMask;

/// Value written inside the ellipse.
pub const VISIBLE: u8 = 255;

/// Centered, axis-aligned ellipse with a fixed 3:2 (horizontal:vertical) aspect,
/// roughly the shape of the human field of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EllipseGeometry {
    pub center_x: usize,
    pub center_y: usize,
    pub semi_major: usize, // horizontal, pixels
    pub semi_minor: usize, // vertical, pixels
}

impl EllipseGeometry {
    /// `visible_width` is the full horizontal diameter; odd widths truncate.
    pub fn new(height: usize, width: usize, visible_width: u32) -> Self {
        let semi_major = (visible_width / 2) as usize;
        let semi_minor = 2 * semi_major / 3;
        Self { center_x: width / 2, center_y: height / 2, semi_major, semi_minor }
    }

    /// No horizontal extent: nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.semi_major == 0
    }

    /// Pixel (x, y) lies on or inside the ellipse boundary. A flattened
    /// ellipse (semi-minor 0) is the segment `|dx| <= a` on the center row.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.semi_minor == 0 {
            return y == self.center_y && x.abs_diff(self.center_x) <= self.semi_major;
        }
        // dx²/a² + dy²/b² <= 1, kept in integers to stay exact.
        let a2 = (self.semi_major as i128).pow(2);
        let b2 = (self.semi_minor as i128).pow(2);
        let dx = x as i128 - self.center_x as i128;
        let dy = y as i128 - self.center_y as i128;
        dx * dx * b2 + dy * dy * a2 <= a2 * b2
    }
}

/// Draw the filled ellipse for `visible_width` on a `height` x `width` canvas.
/// Anything past the frame edges is clipped.
pub fn generate_mask(height: usize, width: usize, visible_width: u32) -> VisibilityMask {
    let geom = EllipseGeometry::new(height, width, visible_width);
    let mut mask = VisibilityMask::zeros(width, height);
    if geom.is_empty() || width == 0 || height == 0 {
        return mask;
    }

    // Only scan the ellipse's bounding box.
    let y0 = geom.center_y.saturating_sub(geom.semi_minor);
    let y1 = (geom.center_y + geom.semi_minor).min(height - 1);
    let x0 = geom.center_x.saturating_sub(geom.semi_major);
    let x1 = (geom.center_x + geom.semi_major).min(width - 1);

    for y in y0..=y1 {
        let row = &mut mask.values[y * width..(y + 1) * width];
        for x in x0..=x1 {
            if geom.contains(x, y) {
                row[x] = VISIBLE;
            }
        }
    }
    mask
}
