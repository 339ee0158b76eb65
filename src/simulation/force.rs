use bevy::math::Vec2;

use super::{TUNING, geometry::CardRect};

/// Push `moving` away from `blocking` by adding to `accel`.
///
/// The push is weighted by the overlap area and split between the axes by
/// the slope between the two top-left corners. Weights at or below
/// `throttle` contribute nothing.
pub fn accumulate_accel(accel: &mut Vec2, moving: &CardRect, blocking: &CardRect, throttle: f32) {
    let dis = moving.center() - blocking.center();

    let target_distance = (moving.size() + blocking.size()) / 2.0;
    let overlap = target_distance - dis.abs();

    let w = overlap.x * overlap.y * TUNING.weight_scale;
    if w <= throttle {
        return;
    }

    let slope = clamped_slope(moving.top_left(), blocking.top_left());
    let target_y = finite_or_zero(slope * w);
    let target_x = finite_or_zero(w / slope);

    accel.x += sign(dis.x) * target_x.abs();
    accel.y += sign(dis.y) * target_y.abs();
}

/// `|dy/dx|` clamped to the tuning range. 0/0 stays NaN so the caller drops
/// both axes; `f32::clamp` would also do that but `min`/`max` would not.
fn clamped_slope(from: Vec2, to: Vec2) -> f32 {
    let ratio = ((to.y - from.y) / (to.x - from.x)).abs();
    if ratio.is_nan() {
        return f32::NAN;
    }
    ratio.clamp(TUNING.min_slope, TUNING.max_slope)
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Sign with `sign(0) == 0`, unlike `f32::signum`
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
