//! Fold geometry: pure functions from flip distance to render parameters.
//!
//! Flip distance is the single authoritative scalar: one page spans
//! [`UNITS_PER_PAGE`] units, and everything drawn — which pages are
//! visible, how far the fold is rotated, how dark the shadows are — is a
//! deterministic function of it and the orientation.

use pageflip_foundation::Orientation;

/// Angular units of flip distance spanned by one page.
pub const UNITS_PER_PAGE: f32 = 180.0;

/// Peak shadow alpha on the static halves, out of 255.
pub const MAX_SHADOW_ALPHA: u8 = 180;
/// Peak shade alpha on the folding surface past 90°, out of 255.
pub const MAX_SHADE_ALPHA: u8 = 130;
/// Peak shine alpha on the folding surface before 90°, out of 255.
pub const MAX_SHINE_ALPHA: u8 = 100;

/// The two clip halves of the viewport along the flip axis.
///
/// `Leading` is the top (vertical) or left (horizontal) half; `Trailing`
/// is the bottom or right half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Leading,
    Trailing,
}

/// Axis-aligned clip rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Clip rectangle of one viewport half for the given orientation.
pub fn half_rect(width: f32, height: f32, orientation: Orientation, half: Half) -> Rect {
    match (orientation, half) {
        (Orientation::Vertical, Half::Leading) => Rect {
            left: 0.0,
            top: 0.0,
            right: width,
            bottom: height / 2.0,
        },
        (Orientation::Vertical, Half::Trailing) => Rect {
            left: 0.0,
            top: height / 2.0,
            right: width,
            bottom: height,
        },
        (Orientation::Horizontal, Half::Leading) => Rect {
            left: 0.0,
            top: 0.0,
            right: width / 2.0,
            bottom: height,
        },
        (Orientation::Horizontal, Half::Trailing) => Rect {
            left: width / 2.0,
            top: 0.0,
            right: width,
            bottom: height,
        },
    }
}

/// Fold angle in `[0, 180)` derived from the flip distance.
///
/// Corrected for negative modulo so over-flipping before page zero still
/// produces a positive angle.
pub fn degrees_flipped(flip_distance: f32) -> f32 {
    let mut local = flip_distance % UNITS_PER_PAGE;
    if local < 0.0 {
        local += UNITS_PER_PAGE;
    }
    // A tiny negative remainder can round back up to exactly one page.
    if local >= UNITS_PER_PAGE {
        local = 0.0;
    }
    (local / UNITS_PER_PAGE) * 180.0
}

/// Page below (or at) the flip distance. Negative while over-flipping.
pub fn page_floor(flip_distance: f32) -> i64 {
    (flip_distance / UNITS_PER_PAGE).floor() as i64
}

/// Page above (or at) the flip distance.
pub fn page_ceil(flip_distance: f32) -> i64 {
    (flip_distance / UNITS_PER_PAGE).ceil() as i64
}

/// Nearest page. Half-values round up, matching `Math.round`.
pub fn page_round(flip_distance: f32) -> i64 {
    (flip_distance / UNITS_PER_PAGE + 0.5).floor() as i64
}

/// Everything a renderer needs to draw one fold frame.
///
/// Page indices are unclamped; callers clamp into `[0, page_count)` and
/// skip drawing pages that do not exist (reachable while rubber-band
/// over-flipping).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldParams {
    /// Fold angle in `[0, 180)`.
    pub degrees: f32,
    /// Static page shown on the leading half.
    pub previous_page: i64,
    /// Static page shown on the trailing half.
    pub next_page: i64,
    /// Page drawn on the folding surface.
    pub flipping_page: i64,
    /// Which half the folding surface is clipped to.
    pub flipping_half: Half,
    /// Signed camera rotation of the folding surface, degrees, about the
    /// cross axis (x when vertical, y when horizontal).
    pub rotation: f32,
    /// Shadow alpha over the static leading half, out of 255.
    pub previous_shadow_alpha: u8,
    /// Shadow alpha over the static trailing half, out of 255.
    pub next_shadow_alpha: u8,
    /// Shine overlay alpha on the folding surface before 90°, out of 255.
    pub shine_alpha: u8,
    /// Shade overlay alpha on the folding surface past 90°, out of 255.
    pub shade_alpha: u8,
}

/// Derives the full set of fold render parameters for a flip distance.
pub fn fold_params(flip_distance: f32, orientation: Orientation) -> FoldParams {
    let degrees = degrees_flipped(flip_distance);
    let vertical = orientation == Orientation::Vertical;

    let (flipping_half, rotation) = if degrees > 90.0 {
        let rotation = if vertical {
            degrees - 180.0
        } else {
            180.0 - degrees
        };
        (Half::Leading, rotation)
    } else {
        let rotation = if vertical { degrees } else { -degrees };
        (Half::Trailing, rotation)
    };

    let previous_shadow_alpha = if degrees > 90.0 {
        (((degrees - 90.0) / 90.0) * MAX_SHADOW_ALPHA as f32) as u8
    } else {
        0
    };
    let next_shadow_alpha = if degrees < 90.0 {
        (((degrees - 90.0).abs() / 90.0) * MAX_SHADOW_ALPHA as f32) as u8
    } else {
        0
    };
    let (shine_alpha, shade_alpha) = if degrees < 90.0 {
        (((degrees / 90.0) * MAX_SHINE_ALPHA as f32) as u8, 0)
    } else {
        (
            0,
            (((degrees - 180.0).abs() / 90.0) * MAX_SHADE_ALPHA as f32) as u8,
        )
    };

    FoldParams {
        degrees,
        previous_page: page_floor(flip_distance),
        next_page: page_ceil(flip_distance),
        flipping_page: page_round(flip_distance),
        flipping_half,
        rotation,
        previous_shadow_alpha,
        next_shadow_alpha,
        shine_alpha,
        shade_alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_degrees_zero_on_page_boundaries() {
        for page in 0..10 {
            assert_eq!(degrees_flipped(page as f32 * UNITS_PER_PAGE), 0.0);
        }
    }

    #[test]
    fn test_degrees_negative_modulo_corrected() {
        assert!((degrees_flipped(-30.0) - 150.0).abs() < 1e-4);
        assert!((degrees_flipped(-180.0) - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_page_selection() {
        assert_eq!(page_floor(250.0), 1);
        assert_eq!(page_ceil(250.0), 2);
        assert_eq!(page_round(250.0), 1);
        assert_eq!(page_round(270.0), 2); // half rounds up
        assert_eq!(page_floor(-10.0), -1);
        assert_eq!(page_round(-90.0), 0); // Math.round(-0.5) == 0
    }

    #[test]
    fn test_fold_rotation_before_90() {
        let params = fold_params(45.0, Orientation::Vertical);
        assert_eq!(params.flipping_half, Half::Trailing);
        assert!((params.rotation - 45.0).abs() < 1e-4);

        let params = fold_params(45.0, Orientation::Horizontal);
        assert!((params.rotation + 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_fold_rotation_past_90() {
        let params = fold_params(135.0, Orientation::Vertical);
        assert_eq!(params.flipping_half, Half::Leading);
        assert!((params.rotation + 45.0).abs() < 1e-4);

        let params = fold_params(135.0, Orientation::Horizontal);
        assert!((params.rotation - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_shadow_and_shine_curves() {
        // Mid-fold toward the next page: shine on the folding surface,
        // full-strength shadow fading on the trailing half.
        let params = fold_params(45.0, Orientation::Vertical);
        assert_eq!(params.previous_shadow_alpha, 0);
        assert_eq!(params.next_shadow_alpha, MAX_SHADOW_ALPHA / 2);
        assert_eq!(params.shine_alpha, MAX_SHINE_ALPHA / 2);
        assert_eq!(params.shade_alpha, 0);

        let params = fold_params(135.0, Orientation::Vertical);
        assert_eq!(params.previous_shadow_alpha, MAX_SHADOW_ALPHA / 2);
        assert_eq!(params.next_shadow_alpha, 0);
        assert_eq!(params.shine_alpha, 0);
        assert_eq!(params.shade_alpha, MAX_SHADE_ALPHA / 2);
    }

    #[test]
    fn test_page_triple_around_boundary() {
        let params = fold_params(90.0, Orientation::Vertical);
        assert_eq!(params.previous_page, 0);
        assert_eq!(params.next_page, 1);
        assert_eq!(params.flipping_page, 1);
    }

    #[test]
    fn test_half_rects_partition_viewport() {
        let top = half_rect(100.0, 200.0, Orientation::Vertical, Half::Leading);
        let bottom = half_rect(100.0, 200.0, Orientation::Vertical, Half::Trailing);
        assert_eq!(top.bottom, bottom.top);
        assert_eq!(top.right, 100.0);
        assert_eq!(bottom.bottom, 200.0);

        let left = half_rect(100.0, 200.0, Orientation::Horizontal, Half::Leading);
        let right = half_rect(100.0, 200.0, Orientation::Horizontal, Half::Trailing);
        assert_eq!(left.right, right.left);
        assert_eq!(right.right, 100.0);
    }

    proptest! {
        #[test]
        fn prop_degrees_always_in_range(distance in -100_000.0f32..100_000.0) {
            let degrees = degrees_flipped(distance);
            prop_assert!((0.0..180.0).contains(&degrees), "degrees {} for {}", degrees, distance);
        }

        #[test]
        fn prop_alphas_bounded(distance in -100_000.0f32..100_000.0) {
            let params = fold_params(distance, Orientation::Vertical);
            prop_assert!(params.previous_shadow_alpha <= MAX_SHADOW_ALPHA);
            prop_assert!(params.next_shadow_alpha <= MAX_SHADOW_ALPHA);
            prop_assert!(params.shine_alpha <= MAX_SHINE_ALPHA);
            prop_assert!(params.shade_alpha <= MAX_SHADE_ALPHA);
        }

        #[test]
        fn prop_floor_ceil_bracket_round(distance in -10_000.0f32..10_000.0) {
            let floor = page_floor(distance);
            let ceil = page_ceil(distance);
            let round = page_round(distance);
            prop_assert!(floor <= round && round <= ceil);
            prop_assert!(ceil - floor <= 1);
        }
    }
}
