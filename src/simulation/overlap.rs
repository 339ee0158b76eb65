use super::geometry::CardRect;

/// Two cards are in conflict when any corner of either one lies inside the
/// other (edges inclusive).
///
/// This is a corner test, not an interval overlap test: two rectangles
/// crossing like a plus sign, with no corner inside the other, report no
/// conflict.
pub fn has_rect_conflict(a: &CardRect, b: &CardRect) -> bool {
    let a_in_b = a.corners().iter().any(|&corner| b.contains_point(corner));
    let b_in_a = b.corners().iter().any(|&corner| a.contains_point(corner));

    a_in_b || b_in_a
}
