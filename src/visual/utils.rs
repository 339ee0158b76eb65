// ============================================================================
// EASING + COLOR helpers for the card visuals
// ============================================================================

use bevy::color::Color;
use bevy::math::{Vec3, Vec4};

/// Ease-out cubic: fast at start, decelerates at end
/// Used for the focus zoom so the card "arrives" in the center
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = 1.0 - t.clamp(0.0, 1.0);
    1.0 - x * x * x
}

/// Convert HSV (all components in [0, 1]) to RGB
pub fn hsv_to_rgb(hsv: Vec3) -> Vec4 {
    let h = hsv.x.rem_euclid(1.0) * 6.0; // Hue in [0, 6)
    let s = hsv.y;
    let v = hsv.z;

    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Vec4::new(r + m, g + m, b + m, 1.0)
}

/// Muted color for the `index`-th of `count` cards, spread around the hue wheel
pub fn card_tint(index: usize, count: usize) -> Color {
    let hue = index as f32 / count.max(1) as f32;
    let rgb = hsv_to_rgb(Vec3::new(hue, 0.45, 0.55));
    Color::srgb(rgb.x, rgb.y, rgb.z)
}
