//! Collision rects

use serde::{Deserialize, Serialize};

use diorama_core::Guid;

/// Identifier for a registered collision rect
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RectId(u32);

impl RectId {
    /// Create from a raw value
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned collision rect owned by a scene object
///
/// `x`/`y` anchor the rect at its owner's world position and are
/// refreshed from the owner every poll; width and height extend along +x
/// and +y. The entered flag latches on the tick an overlap begins and
/// stays set until a consumer clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionRect {
    /// Engine-assigned id
    pub id: RectId,
    /// Owning scene object
    pub owner: Guid,
    /// Anchor x in world units
    pub x: f32,
    /// Anchor y in world units
    pub y: f32,
    /// Extent along +x
    pub width: f32,
    /// Extent along +y
    pub height: f32,
    /// Latched when an overlap begins; cleared by the consumer
    pub hit_entered: bool,
    /// The rect that most recently entered this one
    pub last_hit: Option<RectId>,
}

impl CollisionRect {
    /// Create a rect at the origin
    pub fn new(id: RectId, owner: Guid, width: f32, height: f32) -> Self {
        Self {
            id,
            owner,
            x: 0.0,
            y: 0.0,
            width,
            height,
            hit_entered: false,
            last_hit: None,
        }
    }

    /// Check overlap with another rect
    ///
    /// Intervals are closed on both ends: rects that merely share an edge
    /// overlap, and two identical rects always overlap.
    pub fn overlaps(&self, other: &CollisionRect) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_at(id: u32, x: f32, y: f32, w: f32, h: f32) -> CollisionRect {
        let mut rect = CollisionRect::new(RectId::new(id), Guid::new(), w, h);
        rect.x = x;
        rect.y = y;
        rect
    }

    #[test]
    fn test_identical_rects_overlap() {
        let a = rect_at(0, 0.0, 0.0, 1.0, 1.0);
        let b = rect_at(1, 0.0, 0.0, 1.0, 1.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_overlap() {
        // Right edge of a is exactly the left edge of b
        let a = rect_at(0, 0.0, 0.0, 1.0, 1.0);
        let b = rect_at(1, 1.0, 0.0, 1.0, 1.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_corner_overlaps() {
        let a = rect_at(0, 0.0, 0.0, 1.0, 1.0);
        let b = rect_at(1, 1.0, 1.0, 1.0, 1.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_disjoint_rects_do_not_overlap() {
        let a = rect_at(0, 0.0, 0.0, 1.0, 1.0);
        let b = rect_at(1, 2.5, 0.0, 1.0, 1.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let c = rect_at(2, 0.0, 5.0, 1.0, 1.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = rect_at(0, 0.0, 0.0, 3.0, 1.0);
        let b = rect_at(1, 2.0, 0.5, 1.0, 4.0);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = rect_at(0, 0.0, 0.0, 10.0, 10.0);
        let inner = rect_at(1, 4.0, 4.0, 1.0, 1.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
