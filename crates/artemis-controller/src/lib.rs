//! Pointer-lock first-person controller.
//!
//! Turns keyboard and pointer input into a view orientation and a velocity on
//! a rigid body owned by some physics engine. The controller filters glitchy
//! pointer deltas and infers jump eligibility from the body's collision
//! events. Engine integrations supply a [`PhysicsBody`] and an [`InputHost`],
//! then call [`FirstPersonController::update`] once per frame between the
//! physics step and rendering.

pub mod body;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod ground;
pub mod input;
pub mod motion;
pub mod orientation;
pub mod rig;
pub mod spike;

pub use body::{BodyId, BodyProxy, CollisionEvent, PhysicsBody};
pub use config::ControllerConfig;
pub use controller::{ControllerState, FirstPersonController, LockEvent};
pub use error::{ControllerError, Result};
pub use events::{Dispatcher, ListenerId};
pub use input::{InputEvent, InputHost, KeyCode, LockRequest, MoveFlags, QueuedInputHost};
pub use orientation::Orientation;
pub use rig::ViewRig;
pub use spike::MouseSpikeFilter;
