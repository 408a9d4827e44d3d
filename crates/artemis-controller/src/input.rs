//! Input capture: host events, pointer lock requests, and move flags.

use std::collections::VecDeque;

/// Host-neutral physical key identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    Space,
    /// Any key the controller does not react to.
    Other,
}

/// What a key does for the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Move(MoveDirection),
    Jump,
}

/// One of the four planar move intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl KeyCode {
    /// Controller action bound to this key, if any.
    pub fn action(self) -> Option<KeyAction> {
        match self {
            Self::KeyW | Self::ArrowUp => Some(KeyAction::Move(MoveDirection::Forward)),
            Self::KeyA | Self::ArrowLeft => Some(KeyAction::Move(MoveDirection::Left)),
            Self::KeyS | Self::ArrowDown => Some(KeyAction::Move(MoveDirection::Backward)),
            Self::KeyD | Self::ArrowRight => Some(KeyAction::Move(MoveDirection::Right)),
            Self::Space => Some(KeyAction::Jump),
            Self::Other => None,
        }
    }
}

/// Event delivered by the host environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Relative pointer movement in host units.
    PointerMove { dx: f32, dy: f32 },
    /// The host acquired or released pointer lock.
    PointerLockChange { locked: bool },
    /// The host refused a pointer lock request.
    PointerLockError,
}

/// Injected source of input events and owner of pointer lock.
pub trait InputHost {
    /// Start delivering events. Calling it while attached must not duplicate delivery.
    fn attach(&mut self);

    /// Stop delivering events. Safe to call while detached.
    fn detach(&mut self);

    /// Next pending event, if any.
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Ask the host for exclusive pointer capture. The outcome arrives as an event.
    fn request_pointer_lock(&mut self);

    /// Release pointer capture. The outcome arrives as an event.
    fn exit_pointer_lock(&mut self);
}

/// Pointer lock request recorded by [`QueuedInputHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockRequest {
    Acquire,
    Release,
}

/// Queue-backed [`InputHost`].
///
/// The embedding application pushes events into it and applies the lock
/// requests it records. Events pushed while detached are dropped, the same
/// way a detached DOM listener never hears them.
#[derive(Debug, Default)]
pub struct QueuedInputHost {
    attached: bool,
    events: VecDeque<InputEvent>,
    lock_request: Option<LockRequest>,
}

impl QueuedInputHost {
    /// Create a detached host with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether events are currently being delivered.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Queue an event from the host environment.
    pub fn push(&mut self, event: InputEvent) {
        if self.attached {
            self.events.push_back(event);
        }
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Take the most recent lock request, if any.
    pub fn take_lock_request(&mut self) -> Option<LockRequest> {
        self.lock_request.take()
    }
}

impl InputHost for QueuedInputHost {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.events.clear();
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    fn request_pointer_lock(&mut self) {
        self.lock_request = Some(LockRequest::Acquire);
    }

    fn exit_pointer_lock(&mut self) {
        self.lock_request = Some(LockRequest::Release);
    }
}

/// Currently held move keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveFlags {
    /// Set or clear the flag for `direction`.
    pub fn set(&mut self, direction: MoveDirection, held: bool) {
        match direction {
            MoveDirection::Forward => self.forward = held,
            MoveDirection::Backward => self.backward = held,
            MoveDirection::Left => self.left = held,
            MoveDirection::Right => self.right = held,
        }
    }

    /// Whether any move key is held.
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_alias_wasd() {
        assert_eq!(KeyCode::KeyW.action(), KeyCode::ArrowUp.action());
        assert_eq!(KeyCode::KeyA.action(), KeyCode::ArrowLeft.action());
        assert_eq!(KeyCode::KeyS.action(), KeyCode::ArrowDown.action());
        assert_eq!(KeyCode::KeyD.action(), KeyCode::ArrowRight.action());
        assert_eq!(KeyCode::Space.action(), Some(KeyAction::Jump));
        assert_eq!(KeyCode::Other.action(), None);
    }

    #[test]
    fn test_move_flags_set_and_clear() {
        let mut flags = MoveFlags::default();
        flags.set(MoveDirection::Left, true);
        flags.set(MoveDirection::Left, true);
        assert!(flags.left && flags.any());
        flags.set(MoveDirection::Left, false);
        assert!(!flags.any());
    }

    #[test]
    fn test_detached_host_drops_events() {
        let mut host = QueuedInputHost::new();
        host.push(InputEvent::KeyDown(KeyCode::KeyW));
        assert_eq!(host.pending(), 0);

        host.attach();
        host.attach();
        host.push(InputEvent::KeyDown(KeyCode::KeyW));
        assert_eq!(host.poll_event(), Some(InputEvent::KeyDown(KeyCode::KeyW)));
        assert_eq!(host.poll_event(), None);

        host.push(InputEvent::KeyUp(KeyCode::KeyW));
        host.detach();
        host.detach();
        assert_eq!(host.poll_event(), None);
    }

    #[test]
    fn test_latest_lock_request_wins() {
        let mut host = QueuedInputHost::new();
        host.request_pointer_lock();
        host.exit_pointer_lock();
        assert_eq!(host.take_lock_request(), Some(LockRequest::Release));
        assert_eq!(host.take_lock_request(), None);
    }
}
