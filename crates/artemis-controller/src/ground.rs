//! Jump eligibility inferred from collision events.
//!
//! This is an event latch, not a contact query. A qualifying collision sets
//! the flag, and only a consumed jump clears it. Walking off a ledge keeps the
//! flag set until the player jumps. Resting on the ground keeps re-setting it
//! because the engine reports the contact on every step.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use glam::Vec3;

use crate::body::{BodyId, CollisionEvent, PhysicsBody};
use crate::events::ListenerId;

/// World up axis.
pub const UP: Vec3 = Vec3::Y;

/// Minimum alignment between the contact normal and [`UP`] for a surface to count as ground.
pub const GROUND_NORMAL_THRESHOLD: f32 = 0.5;

/// Contact normal pointing away from `player`, i.e. out of whatever it touched.
pub fn outward_normal(event: &CollisionEvent, player: BodyId) -> Vec3 {
    if event.first == player {
        -event.normal
    } else {
        event.normal
    }
}

/// Whether `event` means `player` is standing on something.
pub fn is_ground_contact(event: &CollisionEvent, player: BodyId) -> bool {
    outward_normal(event, player).dot(UP) > GROUND_NORMAL_THRESHOLD
}

/// Shared "can jump" flag written by the collision listener.
#[derive(Clone, Debug, Default)]
pub struct GroundLatch(Arc<AtomicBool>);

impl GroundLatch {
    /// Whether a jump is currently allowed.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::Relaxed)
    }
}

/// Listens to a body's collisions and latches jump eligibility.
#[derive(Debug)]
pub struct GroundContactDetector {
    latch: GroundLatch,
    subscription: Option<ListenerId>,
}

impl GroundContactDetector {
    /// Register on `body`'s collision stream.
    pub fn attach(body: &mut impl PhysicsBody) -> Self {
        let latch = GroundLatch::default();
        let player = body.id();
        let listener_latch = latch.clone();
        let subscription = body.subscribe_collisions(Box::new(move |event| {
            if is_ground_contact(event, player) {
                listener_latch.set();
            }
        }));
        Self {
            latch,
            subscription: Some(subscription),
        }
    }

    /// Whether a jump is currently allowed.
    pub fn can_jump(&self) -> bool {
        self.latch.is_set()
    }

    /// Consume the latch for a jump. Returns whether the jump may happen.
    pub fn consume(&self) -> bool {
        self.latch.take()
    }

    /// Stop listening to `body`. Safe to call more than once.
    pub fn detach(&mut self, body: &mut impl PhysicsBody) {
        if let Some(id) = self.subscription.take() {
            body.unsubscribe_collisions(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyProxy;

    const PLAYER: BodyId = BodyId(1);
    const FLOOR: BodyId = BodyId(2);

    fn event(first: BodyId, second: BodyId, normal: Vec3) -> CollisionEvent {
        CollisionEvent {
            first,
            second,
            normal,
        }
    }

    #[test]
    fn test_normal_flips_when_player_is_first() {
        // Out of the player, into the floor.
        let down = event(PLAYER, FLOOR, Vec3::NEG_Y);
        assert_eq!(outward_normal(&down, PLAYER), Vec3::Y);
        assert!(is_ground_contact(&down, PLAYER));

        // Out of the floor, into the player.
        let up = event(FLOOR, PLAYER, Vec3::Y);
        assert_eq!(outward_normal(&up, PLAYER), Vec3::Y);
        assert!(is_ground_contact(&up, PLAYER));
    }

    #[test]
    fn test_walls_and_ceilings_do_not_count() {
        assert!(!is_ground_contact(&event(FLOOR, PLAYER, Vec3::X), PLAYER));
        assert!(!is_ground_contact(
            &event(FLOOR, PLAYER, Vec3::NEG_Y),
            PLAYER
        ));
        // Exactly on the threshold is not enough.
        let slope = Vec3::new(0.0, 0.5, (0.75f32).sqrt());
        assert!(!is_ground_contact(&event(FLOOR, PLAYER, slope), PLAYER));
    }

    #[test]
    fn test_latch_set_by_qualifying_event_only() {
        let mut body = BodyProxy::new(PLAYER, Vec3::ZERO);
        let detector = GroundContactDetector::attach(&mut body);
        assert!(!detector.can_jump());

        body.emit_collision(&event(FLOOR, PLAYER, Vec3::X));
        assert!(!detector.can_jump());

        body.emit_collision(&event(PLAYER, FLOOR, Vec3::NEG_Y));
        assert!(detector.can_jump());
    }

    #[test]
    fn test_only_consume_clears() {
        let mut body = BodyProxy::new(PLAYER, Vec3::ZERO);
        let detector = GroundContactDetector::attach(&mut body);
        body.emit_collision(&event(FLOOR, PLAYER, Vec3::Y));

        // A disqualifying contact afterwards leaves the latch alone.
        body.emit_collision(&event(FLOOR, PLAYER, Vec3::X));
        assert!(detector.can_jump());

        assert!(detector.consume());
        assert!(!detector.can_jump());
        assert!(!detector.consume());
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut body = BodyProxy::new(PLAYER, Vec3::ZERO);
        let mut detector = GroundContactDetector::attach(&mut body);
        assert_eq!(body.collision_listener_count(), 1);
        detector.detach(&mut body);
        detector.detach(&mut body);
        assert_eq!(body.collision_listener_count(), 0);

        body.emit_collision(&event(FLOOR, PLAYER, Vec3::Y));
        assert!(!detector.can_jump());
    }
}
