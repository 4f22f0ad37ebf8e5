//! Collision detection primitives for axis-aligned boxes
//!
//! Pure geometric predicates: nothing here mutates entities. Resolution lives
//! with the collision world, which owns the contact list and event queue.

use std::ops::BitOr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::rect::Rect;

/// What kind of contact produced a [`CollisionInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Player hurtbox crossed an arena edge
    PlayerBoundary,
    /// Two player hurtboxes overlap
    PlayerVsPlayer,
    /// An attack box landed on a hurtbox
    AttackHit,
    /// Two registered collidables overlap
    Registry,
}

/// Bitmask of collision layers. Two collidables interact when their masks
/// share at least one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    pub const NONE: Self = Self(0);
    pub const PLAYER: Self = Self(1 << 0);
    pub const ATTACK: Self = Self(1 << 1);
    pub const PROJECTILE: Self = Self(1 << 2);
    pub const STAGE: Self = Self(1 << 3);
    pub const PICKUP: Self = Self(1 << 4);

    #[inline]
    pub fn interacts_with(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for CollisionLayer {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Handle to a collidable registered with the collision world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// Participant in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    Player(PlayerId),
    Collider(ColliderId),
}

/// Geometry of a single overlap between two boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Midpoint of the overlap region
    pub point: Vec2,
    /// Unit axis-aligned normal pointing from the first box toward the second
    pub normal: Vec2,
    /// Overlap along the normal axis
    pub penetration: f32,
}

/// A detected contact, kept for one frame for inspection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionInfo {
    pub kind: CollisionKind,
    pub point: Vec2,
    pub normal: Vec2,
    pub penetration: f32,
    pub entity_a: EntityRef,
    /// Absent for boundary contacts
    pub entity_b: Option<EntityRef>,
}

impl CollisionInfo {
    pub fn from_contact(
        kind: CollisionKind,
        contact: Contact,
        entity_a: EntityRef,
        entity_b: Option<EntityRef>,
    ) -> Self {
        Self {
            kind,
            point: contact.point,
            normal: contact.normal,
            penetration: contact.penetration,
            entity_a,
            entity_b,
        }
    }
}

/// Anything the collision world can test against
///
/// Players implement this, as can projectiles, pickups and stage pieces.
pub trait Collidable {
    fn collision_box(&self) -> Rect;
    /// Zero-area when the entity is not striking
    fn attack_box(&self) -> Rect;
    fn layer(&self) -> CollisionLayer;
    fn is_enabled(&self) -> bool;
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn on_collision(&mut self, info: &CollisionInfo);
}

/// Strict AABB overlap. Touching edges and empty boxes do not overlap.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// AABB overlap with minimum-translation contact data
///
/// The axis with the smaller overlap becomes the separation axis. Equal
/// overlaps resolve vertically.
pub fn aabb_contact(a: &Rect, b: &Rect) -> Option<Contact> {
    if !rects_overlap(a, b) {
        return None;
    }

    let overlap = a.overlap_extents(b);
    let point = Vec2::new(
        a.x.max(b.x) + overlap.x * 0.5,
        a.y.max(b.y) + overlap.y * 0.5,
    );
    let diff = b.center() - a.center();

    let (normal, penetration) = if overlap.x < overlap.y {
        (Vec2::new(if diff.x > 0.0 { 1.0 } else { -1.0 }, 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, if diff.y > 0.0 { 1.0 } else { -1.0 }), overlap.y)
    };

    Some(Contact {
        point,
        normal,
        penetration,
    })
}

/// Translation that moves `a` out of `b` along the minimum-overlap axis.
/// Zero when the boxes do not overlap.
pub fn separation_vector(a: &Rect, b: &Rect) -> Vec2 {
    let overlap = a.overlap_extents(b);
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return Vec2::ZERO;
    }
    if overlap.x < overlap.y {
        Vec2::new(if a.x < b.x { -overlap.x } else { overlap.x }, 0.0)
    } else {
        Vec2::new(0.0, if a.y < b.y { -overlap.y } else { overlap.y })
    }
}

/// Circle test for round hit volumes. Touching counts as a hit.
pub fn circles_overlap(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    center_a.distance(center_b) <= radius_a + radius_b
}

/// Minimum of the two axis overlaps (negative when apart)
pub fn penetration_depth(a: &Rect, b: &Rect) -> f32 {
    let overlap = a.overlap_extents(b);
    overlap.x.min(overlap.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_detects_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
        assert!(aabb_contact(&a, &b).is_none());
    }

    #[test]
    fn test_zero_size_never_overlaps() {
        let a = Rect::new(5.0, 5.0, 0.0, 0.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
        assert!(!rects_overlap(&b, &a));
        assert!(aabb_contact(&a, &b).is_none());

        // Zero width but real height, still nothing to hit
        let sliver = Rect::new(5.0, 0.0, 0.0, 10.0);
        assert!(!rects_overlap(&sliver, &b));
    }

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 5.0, Vec2::new(8.0, 0.0), 5.0));
        // Exactly touching
        assert!(circles_overlap(a, 5.0, Vec2::new(0.0, 10.0), 5.0));
        assert!(!circles_overlap(a, 5.0, Vec2::new(10.5, 0.0), 5.0));
        // Concentric
        assert!(circles_overlap(a, 1.0, a, 0.0));
    }

    #[test]
    fn test_contact_picks_smaller_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // 2 units of x overlap, 8 of y
        let b = Rect::new(8.0, 2.0, 10.0, 10.0);
        let contact = aabb_contact(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert_eq!(contact.penetration, 2.0);
        assert_eq!(contact.point, Vec2::new(9.0, 6.0));

        // Swapped order flips the normal
        let contact = aabb_contact(&b, &a).unwrap();
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_contact_vertical_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(1.0, 7.0, 10.0, 10.0);
        let contact = aabb_contact(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::new(0.0, 1.0));
        assert_eq!(contact.penetration, 3.0);
    }

    #[test]
    fn test_equal_overlap_resolves_vertically() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(6.0, 6.0, 10.0, 10.0);
        let contact = aabb_contact(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::new(0.0, 1.0));
        assert_eq!(contact.penetration, 4.0);
    }

    #[test]
    fn test_separation_vector() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(8.0, 0.0, 10.0, 10.0);
        assert_eq!(separation_vector(&a, &b), Vec2::new(-2.0, 0.0));
        assert_eq!(separation_vector(&b, &a), Vec2::new(2.0, 0.0));

        let apart = Rect::new(50.0, 0.0, 10.0, 10.0);
        assert_eq!(separation_vector(&a, &apart), Vec2::ZERO);
    }

    #[test]
    fn test_penetration_depth() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(7.0, 1.0, 10.0, 10.0);
        assert_eq!(penetration_depth(&a, &b), 3.0);
    }

    #[test]
    fn test_layers() {
        let mask = CollisionLayer::PLAYER | CollisionLayer::PICKUP;
        assert!(mask.interacts_with(CollisionLayer::PICKUP));
        assert!(!mask.interacts_with(CollisionLayer::STAGE));
        assert!(!CollisionLayer::NONE.interacts_with(mask));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }

        #[test]
        fn prop_contact_penetration_non_negative(a in arb_rect(), b in arb_rect()) {
            if let Some(contact) = aabb_contact(&a, &b) {
                prop_assert!(contact.penetration >= 0.0);
                prop_assert!((contact.normal.length() - 1.0).abs() < 1e-6);
            } else {
                prop_assert!(!rects_overlap(&a, &b));
            }
        }

        #[test]
        fn prop_disjoint_boxes_produce_no_contact(
            a in arb_rect(),
            gap in 0.0f32..100.0,
            w in 0.0f32..100.0,
            h in 0.0f32..100.0,
        ) {
            let b = Rect::new(a.right() + gap, a.y, w, h);
            prop_assert!(aabb_contact(&a, &b).is_none());
            prop_assert!(aabb_contact(&b, &a).is_none());
        }
    }
}
