//! The first-person controller facade.
//!
//! Wires input capture, spike filtering, orientation, ground detection and
//! motion integration onto an externally owned physics body.

use glam::Vec3;

use crate::body::PhysicsBody;
use crate::config::ControllerConfig;
use crate::error::Result;
use crate::events::{Dispatcher, ListenerId};
use crate::ground::GroundContactDetector;
use crate::input::{InputEvent, InputHost, KeyAction, KeyCode, MoveFlags};
use crate::motion;
use crate::orientation::Orientation;
use crate::rig::ViewRig;
use crate::spike::MouseSpikeFilter;

/// Pointer lock notification sent to observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockEvent {
    Lock,
    Unlock,
}

/// Whether [`FirstPersonController::update`] has any effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    #[default]
    Disabled,
    Enabled,
}

/// Pointer-lock first-person controller.
///
/// `B` is a handle to a body owned by the physics world and `H` is the host
/// environment that delivers input. Both transitions between
/// [`ControllerState::Disabled`] and [`ControllerState::Enabled`] come from the
/// host reporting pointer lock changes.
pub struct FirstPersonController<B: PhysicsBody, H: InputHost> {
    config: ControllerConfig,
    state: ControllerState,
    locked: bool,
    connected: bool,
    disposed: bool,
    flags: MoveFlags,
    spike_filter: MouseSpikeFilter,
    ground: GroundContactDetector,
    rig: ViewRig,
    lock_listeners: Dispatcher<LockEvent>,
    body: B,
    host: H,
}

impl<B: PhysicsBody, H: InputHost> FirstPersonController<B, H> {
    /// Build a controller, start listening to `body`'s collisions and connect to `host`.
    pub fn new(config: ControllerConfig, mut body: B, host: H) -> Result<Self> {
        config.validate()?;

        let ground = GroundContactDetector::attach(&mut body);
        let mut controller = Self {
            config,
            state: ControllerState::Disabled,
            locked: false,
            connected: false,
            disposed: false,
            flags: MoveFlags::default(),
            spike_filter: MouseSpikeFilter::new(),
            ground,
            rig: ViewRig::new(config.eye_height),
            lock_listeners: Dispatcher::new(),
            body,
            host,
        };
        controller.connect();
        tracing::debug!("first-person controller created: {config:?}");
        Ok(controller)
    }

    // ========================================================================
    // Connection and pointer lock
    // ========================================================================

    /// Attach input listeners. Does nothing if already connected or disposed.
    pub fn connect(&mut self) {
        if self.connected || self.disposed {
            return;
        }
        self.host.attach();
        self.connected = true;
        tracing::debug!("controller input connected");
    }

    /// Detach input listeners. Safe to call any number of times.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.host.detach();
        self.connected = false;
        tracing::debug!("controller input disconnected");
    }

    /// Disconnect input and stop listening to collisions. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disconnect();
        self.ground.detach(&mut self.body);
        self.disposed = true;
    }

    /// Ask the host for pointer lock. No-op while already locked.
    pub fn lock(&mut self) {
        if self.locked {
            return;
        }
        self.host.request_pointer_lock();
    }

    /// Ask the host to release pointer lock.
    pub fn unlock(&mut self) {
        if !self.locked {
            return;
        }
        self.host.exit_pointer_lock();
    }

    /// Observe pointer lock acquisition.
    pub fn on_lock(&mut self, mut listener: impl FnMut() + Send + Sync + 'static) -> ListenerId {
        self.lock_listeners.subscribe(Box::new(move |event| {
            if *event == LockEvent::Lock {
                listener();
            }
        }))
    }

    /// Observe pointer lock release.
    pub fn on_unlock(&mut self, mut listener: impl FnMut() + Send + Sync + 'static) -> ListenerId {
        self.lock_listeners.subscribe(Box::new(move |event| {
            if *event == LockEvent::Unlock {
                listener();
            }
        }))
    }

    /// Remove a lock or unlock observer.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.lock_listeners.unsubscribe(id)
    }

    // ========================================================================
    // Event handling
    // ========================================================================

    /// Dispatch every event the host has queued, in arrival order.
    pub fn process_input(&mut self) {
        if !self.connected {
            return;
        }
        while let Some(event) = self.host.poll_event() {
            self.handle_event(event);
        }
    }

    /// Dispatch a single host event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::PointerMove { dx, dy } => self.pointer_move(dx, dy),
            InputEvent::PointerLockChange { locked } => self.pointer_lock_change(locked),
            InputEvent::PointerLockError => {
                tracing::error!("first-person controller: unable to acquire pointer lock");
            }
        }
    }

    fn key_down(&mut self, key: KeyCode) {
        match key.action() {
            Some(KeyAction::Move(direction)) => self.flags.set(direction, true),
            Some(KeyAction::Jump) => self.jump(),
            None => {}
        }
    }

    fn key_up(&mut self, key: KeyCode) {
        if let Some(KeyAction::Move(direction)) = key.action() {
            self.flags.set(direction, false);
        }
    }

    fn jump(&mut self) {
        if !self.is_enabled() {
            return;
        }
        if self.ground.consume() {
            let velocity = motion::apply_jump(self.body.velocity(), self.config.jump_speed);
            self.body.set_velocity(velocity);
            tracing::trace!("jump: vy = {}", self.config.jump_speed);
        }
    }

    fn pointer_move(&mut self, dx: f32, dy: f32) {
        if !self.is_enabled() {
            return;
        }
        let (dx, dy) = self.spike_filter.filter(dx, dy);
        self.rig
            .orientation_mut()
            .apply_look(dx, dy, self.config.sensitivity);
    }

    fn pointer_lock_change(&mut self, locked: bool) {
        self.locked = locked;
        let event = if locked {
            self.state = ControllerState::Enabled;
            LockEvent::Lock
        } else {
            self.state = ControllerState::Disabled;
            LockEvent::Unlock
        };
        tracing::debug!("pointer lock changed: {event:?}");
        self.lock_listeners.emit(&event);
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Write movement into the body and move the rig onto it.
    ///
    /// Must run once per frame, after the physics step and before rendering.
    /// Does nothing while disabled.
    pub fn update(&mut self, _delta_seconds: f32) {
        if !self.is_enabled() {
            return;
        }

        let movement = motion::world_move_velocity(
            self.flags,
            self.rig.orientation().rotation(),
            self.config.move_speed,
        );
        let velocity = motion::apply_planar(self.body.velocity(), movement);
        self.body.set_velocity(velocity);

        self.rig.set_translation(self.body.position());
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Root node to insert into the scene graph.
    pub fn object(&self) -> &ViewRig {
        &self.rig
    }

    /// Unit vector the view currently faces.
    pub fn direction(&self) -> Vec3 {
        self.rig.orientation().forward()
    }

    /// Current look angles.
    pub fn orientation(&self) -> Orientation {
        self.rig.orientation()
    }

    /// Whether updates and pointer movement have any effect.
    pub fn is_enabled(&self) -> bool {
        self.state == ControllerState::Enabled
    }

    /// Current enable state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Whether the host reports pointer lock as held.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether input listeners are attached.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether the next jump trigger will take off.
    pub fn can_jump(&self) -> bool {
        self.ground.can_jump()
    }

    /// Currently held move keys.
    pub fn move_flags(&self) -> MoveFlags {
        self.flags
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The body handle.
    pub fn body(&self) -> &B {
        &self.body
    }

    /// The body handle, for engine integrations that refresh it each frame.
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// The input host, for engine integrations that feed it events.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<B: PhysicsBody, H: InputHost> Drop for FirstPersonController<B, H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, BodyProxy, CollisionEvent};
    use crate::input::QueuedInputHost;

    type TestController = FirstPersonController<BodyProxy, QueuedInputHost>;

    fn controller() -> TestController {
        let body = BodyProxy::new(BodyId(7), Vec3::new(0.0, 0.9, 0.0));
        FirstPersonController::new(ControllerConfig::default(), body, QueuedInputHost::new())
            .unwrap()
    }

    fn land(controller: &mut TestController) {
        controller.body_mut().emit_collision(&CollisionEvent {
            first: BodyId(0),
            second: BodyId(7),
            normal: Vec3::Y,
        });
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = ControllerConfig {
            move_speed: -1.0,
            ..Default::default()
        };
        let body = BodyProxy::new(BodyId(1), Vec3::ZERO);
        assert!(FirstPersonController::new(config, body, QueuedInputHost::new()).is_err());
    }

    #[test]
    fn test_starts_connected_and_disabled() {
        let controller = controller();
        assert!(controller.is_connected());
        assert_eq!(controller.state(), ControllerState::Disabled);
        assert!(!controller.can_jump());
    }

    #[test]
    fn test_lock_change_toggles_state() {
        let mut controller = controller();
        controller.handle_event(InputEvent::PointerLockChange { locked: true });
        assert!(controller.is_enabled() && controller.is_locked());
        controller.handle_event(InputEvent::PointerLockChange { locked: false });
        assert!(!controller.is_enabled() && !controller.is_locked());
    }

    #[test]
    fn test_jump_ignored_while_disabled() {
        let mut controller = controller();
        land(&mut controller);
        controller.handle_event(InputEvent::KeyDown(KeyCode::Space));
        assert!(controller.can_jump());
        assert_eq!(controller.body().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_keys_tracked_while_disabled() {
        let mut controller = controller();
        controller.handle_event(InputEvent::KeyDown(KeyCode::ArrowUp));
        assert!(controller.move_flags().forward);
        controller.update(0.016);
        assert_eq!(controller.body().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_dispose_releases_collision_listener() {
        let mut controller = controller();
        assert_eq!(controller.body().collision_listener_count(), 1);
        controller.dispose();
        controller.dispose();
        assert_eq!(controller.body().collision_listener_count(), 0);
        assert!(!controller.is_connected());

        // Disposed controllers stay disconnected.
        controller.connect();
        assert!(!controller.is_connected());
    }
}
