//! Host input plumbing for the controller.
//!
//! Maps Bevy keys onto the controller's key codes, defines the cursor actions
//! with `leafwing-input-manager`, and applies pointer lock requests to the
//! window cursor.

use artemis_controller::KeyCode as ControllerKey;
use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};
use leafwing_input_manager::prelude::*;

// ============================================================================
// Actions
// ============================================================================

/// Actions that acquire or release pointer lock.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum CursorAction {
    /// Grab cursor (left click).
    Grab,
    /// Release cursor (ESC).
    Release,
}

/// Create the default input map for cursor actions.
pub fn default_cursor_input_map() -> InputMap<CursorAction> {
    InputMap::default()
        .with(CursorAction::Grab, MouseButton::Left)
        .with(CursorAction::Release, KeyCode::Escape)
}

// ============================================================================
// Key mapping
// ============================================================================

/// Translate a Bevy key into the controller's key code.
pub fn controller_key(key: KeyCode) -> ControllerKey {
    match key {
        KeyCode::KeyW => ControllerKey::KeyW,
        KeyCode::KeyA => ControllerKey::KeyA,
        KeyCode::KeyS => ControllerKey::KeyS,
        KeyCode::KeyD => ControllerKey::KeyD,
        KeyCode::ArrowUp => ControllerKey::ArrowUp,
        KeyCode::ArrowLeft => ControllerKey::ArrowLeft,
        KeyCode::ArrowDown => ControllerKey::ArrowDown,
        KeyCode::ArrowRight => ControllerKey::ArrowRight,
        KeyCode::Space => ControllerKey::Space,
        _ => ControllerKey::Other,
    }
}

// ============================================================================
// Cursor grab helpers
// ============================================================================

/// Set cursor grab state, centering the cursor when grabbing.
pub fn set_cursor_grab(cursor: &mut CursorOptions, window: &mut Window, grabbed: bool) {
    if grabbed {
        // Native: Use Locked mode for true mouse capture.
        // WASM: Use Confined mode (Locked not supported in browsers).
        #[cfg(not(target_family = "wasm"))]
        {
            cursor.grab_mode = CursorGrabMode::Locked;
        }
        #[cfg(target_family = "wasm")]
        {
            cursor.grab_mode = CursorGrabMode::Confined;
        }
        cursor.visible = false;
        let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
        window.set_cursor_position(Some(center));
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// Whether the cursor is currently captured.
pub fn is_grabbed(cursor: &CursorOptions) -> bool {
    matches!(
        cursor.grab_mode,
        CursorGrabMode::Locked | CursorGrabMode::Confined
    )
}
