//! Collision detection
//!
//! Axis-aligned bounding boxes only. Two rectangles collide iff their
//! projections overlap on both axes; touching edges do not count.

use super::state::{Obstacle, Rect};

/// Strict AABB overlap test (symmetric)
#[inline]
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Id of the first obstacle overlapping `player`, if any
pub fn first_collision(player: &Rect, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| rects_intersect(player, &o.rect))
        .map(|o| o.id)
}
