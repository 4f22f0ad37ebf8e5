//! Collision world: collidable registry, player-specific checks and resolution
//!
//! Owned by the game state and passed around explicitly. Every `update`
//! starts a fresh contact list; gameplay notifications accumulate in an event
//! queue until the caller drains them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    Collidable, ColliderId, CollisionInfo, CollisionKind, Contact, EntityRef, aabb_contact,
    rects_overlap,
};
use super::player::{Player, PlayerId};
use super::rect::Rect;
use crate::consts::{
    COLLISION_EPSILON, KNOCKBACK_FORCE, LOGICAL_HEIGHT, LOGICAL_WIDTH, SEPARATION_SHARE,
};
use crate::settings::Settings;

/// Gameplay notification produced during collision checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// An attack box landed on the defender's hurtbox
    PlayerHit { attacker: PlayerId, defender: PlayerId },
    /// A player was pushed back inside the arena
    BoundaryHit { player: PlayerId },
}

/// Non-owning registry entry
struct Registered {
    id: ColliderId,
    handle: Weak<RefCell<dyn Collidable>>,
}

/// Collision detection and resolution for one match
pub struct CollisionWorld {
    collidables: Vec<Registered>,
    next_id: u32,
    last_frame: Vec<CollisionInfo>,
    events: Vec<CollisionEvent>,
    world_bounds: Rect,
    knockback_force: f32,
    epsilon: f32,
    debug_visualization: bool,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, LOGICAL_WIDTH, LOGICAL_HEIGHT))
    }
}

impl CollisionWorld {
    pub fn new(world_bounds: Rect) -> Self {
        Self {
            collidables: Vec::new(),
            next_id: 1,
            last_frame: Vec::new(),
            events: Vec::new(),
            world_bounds,
            knockback_force: KNOCKBACK_FORCE,
            epsilon: COLLISION_EPSILON,
            debug_visualization: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut world = Self::new(settings.world_bounds);
        world.knockback_force = settings.knockback_force;
        world.epsilon = settings.collision_epsilon;
        world
    }

    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    pub fn set_world_bounds(&mut self, bounds: Rect) {
        self.world_bounds = bounds;
    }

    pub fn knockback_force(&self) -> f32 {
        self.knockback_force
    }

    pub fn set_debug_visualization(&mut self, enabled: bool) {
        self.debug_visualization = enabled;
    }

    pub fn is_debug_visualization_enabled(&self) -> bool {
        self.debug_visualization
    }

    /// Contacts recorded since the last `update`
    pub fn last_frame_collisions(&self) -> &[CollisionInfo] {
        &self.last_frame
    }

    /// Pending notifications, oldest first
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Registry ---

    /// Register a collidable without taking ownership. The entry goes away
    /// on `unregister` or once the last strong handle is dropped.
    pub fn register<C: Collidable + 'static>(&mut self, collidable: &Rc<RefCell<C>>) -> ColliderId {
        let weak = Rc::downgrade(collidable);
        let handle: Weak<RefCell<dyn Collidable>> = weak;
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.collidables.push(Registered { id, handle });
        id
    }

    /// Returns false when `id` was not registered
    pub fn unregister(&mut self, id: ColliderId) -> bool {
        let before = self.collidables.len();
        self.collidables.retain(|entry| entry.id != id);
        self.collidables.len() != before
    }

    /// Drop every registration and the contact snapshot
    pub fn clear_all(&mut self) {
        self.collidables.clear();
        self.last_frame.clear();
    }

    /// Number of registrations whose target is still alive
    pub fn live_count(&self) -> usize {
        self.collidables
            .iter()
            .filter(|entry| entry.handle.strong_count() > 0)
            .count()
    }

    /// Ids of live, enabled collidables whose box overlaps `area`
    pub fn query_area(&self, area: &Rect) -> Vec<ColliderId> {
        self.collidables
            .iter()
            .filter_map(|entry| {
                let rc = entry.handle.upgrade()?;
                let target = rc.borrow();
                let hit = target.is_enabled() && rects_overlap(area, &target.collision_box());
                hit.then_some(entry.id)
            })
            .collect()
    }

    pub fn check_collision(&self, a: &Rect, b: &Rect) -> bool {
        rects_overlap(a, b)
    }

    /// Start a frame: clear the contact snapshot and run the registry pass
    pub fn update(&mut self) {
        self.last_frame.clear();
        self.collidables.retain(|entry| entry.handle.strong_count() > 0);
        self.check_all_collisions();
    }

    /// Pairwise test of all registered collidables. Reports contacts to both
    /// participants; does not move anything.
    fn check_all_collisions(&mut self) {
        let live: Vec<(ColliderId, Rc<RefCell<dyn Collidable>>)> = self
            .collidables
            .iter()
            .filter_map(|entry| entry.handle.upgrade().map(|rc| (entry.id, rc)))
            .collect();

        for i in 0..live.len() {
            for j in (i + 1)..live.len() {
                let (id_a, obj_a) = &live[i];
                let (id_b, obj_b) = &live[j];
                // Same object registered twice
                if Rc::ptr_eq(obj_a, obj_b) {
                    continue;
                }

                let a = obj_a.borrow();
                let b = obj_b.borrow();
                if !a.is_enabled() || !b.is_enabled() || !a.layer().interacts_with(b.layer()) {
                    continue;
                }
                let contact = aabb_contact(&a.collision_box(), &b.collision_box());
                drop(a);
                drop(b);

                if let Some(contact) = contact {
                    let info = CollisionInfo::from_contact(
                        CollisionKind::Registry,
                        contact,
                        EntityRef::Collider(*id_a),
                        Some(EntityRef::Collider(*id_b)),
                    );
                    log::trace!("registry contact {:?} <-> {:?}", id_a, id_b);
                    self.last_frame.push(info);
                    obj_a.borrow_mut().on_collision(&info);
                    obj_b.borrow_mut().on_collision(&info);
                }
            }
        }
    }

    // --- Player checks ---

    /// Hurtbox against hurtbox. Overlapping players are pushed apart.
    pub fn check_player_pair(&mut self, a: Option<&mut Player>, b: Option<&mut Player>) {
        let (Some(a), Some(b)) = (a, b) else {
            return;
        };

        let Some(contact) = aabb_contact(&a.world_hurtbox(), &b.world_hurtbox()) else {
            return;
        };
        self.last_frame.push(CollisionInfo::from_contact(
            CollisionKind::PlayerVsPlayer,
            contact,
            EntityRef::Player(a.id),
            Some(EntityRef::Player(b.id)),
        ));

        if contact.penetration > self.epsilon {
            resolve_player_pair(a, b);
        }
    }

    /// Each arena edge is tested on its own so corner penetration reports
    /// one contact per edge. At most one boundary event per call.
    pub fn check_player_bounds(&mut self, player: Option<&mut Player>) {
        let Some(player) = player else {
            return;
        };

        let body = player.world_hurtbox();
        let pos = player.position();
        let bounds = self.world_bounds;
        let entity = EntityRef::Player(player.id);

        let edges = [
            (
                body.left() < bounds.left(),
                Vec2::new(bounds.left(), pos.y),
                Vec2::X,
                bounds.left() - body.left(),
            ),
            (
                body.right() > bounds.right(),
                Vec2::new(bounds.right(), pos.y),
                Vec2::NEG_X,
                body.right() - bounds.right(),
            ),
            (
                body.top() < bounds.top(),
                Vec2::new(pos.x, bounds.top()),
                Vec2::Y,
                bounds.top() - body.top(),
            ),
            (
                body.bottom() > bounds.bottom(),
                Vec2::new(pos.x, bounds.bottom()),
                Vec2::NEG_Y,
                body.bottom() - bounds.bottom(),
            ),
        ];

        let mut collided = false;
        for (violated, point, normal, penetration) in edges {
            if !violated {
                continue;
            }
            self.last_frame.push(CollisionInfo::from_contact(
                CollisionKind::PlayerBoundary,
                Contact {
                    point,
                    normal,
                    penetration,
                },
                entity,
                None,
            ));
            collided = true;
        }

        if collided {
            resolve_player_bounds(player, &bounds);
            log::debug!("{} pushed back inside arena", player.id.label());
            self.events.push(CollisionEvent::BoundaryHit { player: player.id });
        }
    }

    /// Attack box against hurtbox, only while the attacker plays its attack
    /// clip. Each activation of the clip lands at most one hit.
    pub fn check_player_attack(
        &mut self,
        attacker: Option<&mut Player>,
        defender: Option<&mut Player>,
    ) {
        let (Some(attacker), Some(defender)) = (attacker, defender) else {
            return;
        };
        if !attacker.is_attacking() || attacker.has_landed_hit() {
            return;
        }

        let Some(contact) = aabb_contact(&attacker.attack_box(), &defender.world_hurtbox()) else {
            return;
        };
        self.last_frame.push(CollisionInfo::from_contact(
            CollisionKind::AttackHit,
            contact,
            EntityRef::Player(attacker.id),
            Some(EntityRef::Player(defender.id)),
        ));

        resolve_attack_hit(attacker, defender, self.knockback_force);
        attacker.mark_hit_landed();
        log::debug!(
            "{} hit {} (depth {:.2})",
            attacker.id.label(),
            defender.id.label(),
            contact.penetration
        );
        self.events.push(CollisionEvent::PlayerHit {
            attacker: attacker.id,
            defender: defender.id,
        });
    }
}

/// Push two overlapping players apart along the minimum-overlap axis. Each
/// moves 51% of the overlap so they end up strictly separated.
pub fn resolve_player_pair(a: &mut Player, b: &mut Player) {
    let box_a = a.world_hurtbox();
    let box_b = b.world_hurtbox();
    let overlap = box_a.overlap_extents(&box_b);
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return;
    }

    let center_a = box_a.center();
    let center_b = box_b.center();

    let shift = if overlap.x < overlap.y {
        let sep = overlap.x * SEPARATION_SHARE;
        Vec2::new(if center_a.x < center_b.x { -sep } else { sep }, 0.0)
    } else {
        let sep = overlap.y * SEPARATION_SHARE;
        Vec2::new(0.0, if center_a.y < center_b.y { -sep } else { sep })
    };

    a.set_position(a.position() + shift);
    b.set_position(b.position() - shift);
}

/// Place the player so its hurtbox sits flush against whichever edges it crossed
pub fn resolve_player_bounds(player: &mut Player, bounds: &Rect) {
    let body = player.world_hurtbox();
    let mut corner = body.min();

    if body.left() < bounds.left() {
        corner.x = bounds.left();
    } else if body.right() > bounds.right() {
        corner.x = bounds.right() - body.w;
    }

    if body.top() < bounds.top() {
        corner.y = bounds.top();
    } else if body.bottom() > bounds.bottom() {
        corner.y = bounds.bottom() - body.h;
    }

    let current = player.position();
    let flush = player.position_for_hurtbox(corner);
    let target = Vec2::new(
        if corner.x != body.x { flush.x } else { current.x },
        if corner.y != body.y { flush.y } else { current.y },
    );
    player.set_position(target);
}

/// Put the defender into its hit reaction and knock it away from the attacker
pub fn resolve_attack_hit(attacker: &Player, defender: &mut Player, force: f32) {
    defender.play_taking_hit_animation();

    let dir = (defender.position() - attacker.position())
        .try_normalize()
        .unwrap_or(Vec2::X);
    defender.apply_knockback(dir * force);
}
