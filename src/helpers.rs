//! Utility functions for earthdiver

use bevy::prelude::*;

/// Axis-aligned overlap test between two centered boxes.
/// Boxes that only touch edges do not overlap.
pub fn boxes_overlap(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    let reach = (a_size + b_size) / 2.0;
    let gap = (a_center - b_center).abs();
    gap.x < reach.x && gap.y < reach.y
}

/// Clamp a box center so the whole box stays inside `0..area`.
/// A box larger than the area is pinned to the area's center on that axis.
pub fn clamp_box_to_area(center: Vec2, size: Vec2, area: Vec2) -> Vec2 {
    let half = size / 2.0;
    let axis = |c: f32, h: f32, extent: f32| {
        if h * 2.0 >= extent {
            extent / 2.0
        } else {
            c.clamp(h, extent - h)
        }
    };
    Vec2::new(axis(center.x, half.x, area.x), axis(center.y, half.y, area.y))
}

/// Collapse a pair of opposing held keys into one direction.
/// The negative key wins when both are held.
pub fn exclusive_axis(negative: bool, positive: bool) -> f32 {
    if negative {
        -1.0
    } else if positive {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_overlap() {
        let size = Vec2::splat(10.0);
        assert!(boxes_overlap(Vec2::ZERO, size, Vec2::new(9.0, 0.0), size));
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!boxes_overlap(Vec2::ZERO, size, Vec2::new(0.0, 20.0), size));
    }

    #[test]
    fn test_clamp_keeps_box_inside() {
        let area = Vec2::new(100.0, 50.0);
        let size = Vec2::splat(20.0);
        assert_eq!(clamp_box_to_area(Vec2::new(-30.0, 70.0), size, area), Vec2::new(10.0, 40.0));
        assert_eq!(clamp_box_to_area(Vec2::new(50.0, 25.0), size, area), Vec2::new(50.0, 25.0));
        // Wider than the area: centered
        let wide = Vec2::new(200.0, 10.0);
        assert_eq!(clamp_box_to_area(Vec2::new(0.0, 25.0), wide, area).x, 50.0);
    }

    #[test]
    fn test_exclusive_axis() {
        assert_eq!(exclusive_axis(true, true), -1.0);
        assert_eq!(exclusive_axis(false, true), 1.0);
        assert_eq!(exclusive_axis(false, false), 0.0);
    }
}
