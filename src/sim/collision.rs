//! Axis-aligned bounding boxes
//!
//! Arrival at a slot is decided by box overlap, not by elapsed time. The
//! interpolation may overshoot; the first frame the enemy's box touches its
//! slot's box wins.

use glam::Vec3;

/// A world-space box given by center and half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// True if the boxes share any volume or touch on a face
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.cmple(b_max).all() && b_min.cmple(a_max).all()
    }
}
