//! Physics body contract consumed by the controller.
//!
//! The controller never creates, steps, or destroys a body. It reads the
//! position, overwrites parts of the velocity, and listens for collisions.

use glam::Vec3;

use crate::events::{Dispatcher, Listener, ListenerId};

/// Identity of a body inside the physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub u64);

/// A contact reported by the physics engine.
///
/// `normal` points out of `first` toward `second`. Which body ends up as
/// `first` is decided by the engine, so listeners must check the identities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionEvent {
    /// Reference body of the pair.
    pub first: BodyId,
    /// Other body of the pair.
    pub second: BodyId,
    /// Unit contact normal in world space.
    pub normal: Vec3,
}

/// Collision listener registered on a body.
pub type CollisionListener = Listener<CollisionEvent>;

/// Handle to an externally owned rigid body.
pub trait PhysicsBody {
    /// Identity used to tell which side of a collision pair this body is on.
    fn id(&self) -> BodyId;

    /// Current world-space position, as advanced by the last physics step.
    fn position(&self) -> Vec3;

    /// Current linear velocity.
    fn velocity(&self) -> Vec3;

    /// Overwrite the linear velocity. Consumed by the next physics step.
    fn set_velocity(&mut self, velocity: Vec3);

    /// Register a listener invoked for every collision involving this body.
    fn subscribe_collisions(&mut self, listener: CollisionListener) -> ListenerId;

    /// Remove a collision listener. Returns `false` if it was not registered.
    fn unsubscribe_collisions(&mut self, id: ListenerId) -> bool;
}

/// Snapshot of a body plus its collision event stream.
///
/// Engine integrations refresh the snapshot from the physics world each
/// frame, feed contacts through [`BodyProxy::emit_collision`], and copy the
/// velocity back once the controller has run.
#[derive(Debug)]
pub struct BodyProxy {
    id: BodyId,
    /// World-space position.
    pub position: Vec3,
    /// Linear velocity.
    pub velocity: Vec3,
    collisions: Dispatcher<CollisionEvent>,
}

impl BodyProxy {
    /// Create a proxy for the body `id` at rest at `position`.
    pub fn new(id: BodyId, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            collisions: Dispatcher::new(),
        }
    }

    /// Deliver a collision to every registered listener.
    pub fn emit_collision(&mut self, event: &CollisionEvent) {
        self.collisions.emit(event);
    }

    /// Number of registered collision listeners.
    pub fn collision_listener_count(&self) -> usize {
        self.collisions.len()
    }
}

impl PhysicsBody for BodyProxy {
    fn id(&self) -> BodyId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn subscribe_collisions(&mut self, listener: CollisionListener) -> ListenerId {
        self.collisions.subscribe(listener)
    }

    fn unsubscribe_collisions(&mut self, id: ListenerId) -> bool {
        self.collisions.unsubscribe(id)
    }
}
