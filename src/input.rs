//! Host input aggregation.
//!
//! Backends feed raw key transitions in; the fixed-step loop drains one
//! [`TickInput`] per step. Held keys read as levels, triggers are edge
//! flags consumed by the drain so a single press never fires twice.

use glam::Vec3;

use crate::sim::TickInput;

/// Every key the game reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    W,
    A,
    S,
    D,
    Q,
    E,
    P,
    B,
    R,
    T,
}

const KEY_COUNT: usize = 15;

/// Level and edge state per key.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. The edge flag only arms on a real transition, so
    /// the host can forward auto-repeat events unfiltered.
    pub fn press(&mut self, key: Key) {
        let index = key as usize;
        if !self.held[index] {
            self.pressed[index] = true;
        }
        self.held[index] = true;
    }

    /// Key came back up.
    pub fn release(&mut self, key: Key) {
        self.held[key as usize] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key as usize]
    }

    /// Fold the current state into one tick's commands. Edge flags are
    /// consumed here; call once per simulation step.
    pub fn drain_tick_input(&mut self) -> TickInput {
        TickInput {
            rotate_left: self.is_held(Key::Left),
            rotate_right: self.is_held(Key::Right),
            thrust: self.is_held(Key::Up),
            fire: self.take_pressed(Key::Space),
            pause: self.take_pressed(Key::P),
            toggle_bounds: self.take_pressed(Key::B),
            toggle_testing: self.take_pressed(Key::T),
            reset_camera: self.take_pressed(Key::R),
            camera: self.camera_acceleration(),
        }
    }

    fn take_pressed(&mut self, key: Key) -> bool {
        std::mem::take(&mut self.pressed[key as usize])
    }

    /// WASD pans the debug camera, Q and E zoom it.
    fn camera_acceleration(&self) -> Vec3 {
        let mut acceleration = Vec3::ZERO;
        if self.is_held(Key::W) {
            acceleration.y = 1.0;
        }
        if self.is_held(Key::A) {
            acceleration.x = -1.0;
        }
        if self.is_held(Key::S) {
            acceleration.y = -1.0;
        }
        if self.is_held(Key::D) {
            acceleration.x = 1.0;
        }
        if self.is_held(Key::Q) {
            acceleration.z = -1.0;
        }
        if self.is_held(Key::E) {
            acceleration.z = 1.0;
        }
        acceleration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_read_as_levels() {
        let mut input = InputState::new();
        input.press(Key::Left);
        input.press(Key::Up);

        let first = input.drain_tick_input();
        assert!(first.rotate_left);
        assert!(first.thrust);
        assert!(!first.rotate_right);

        // Still held next tick.
        let second = input.drain_tick_input();
        assert!(second.rotate_left);
        assert!(second.thrust);
    }

    #[test]
    fn test_triggers_fire_once_per_press() {
        let mut input = InputState::new();
        input.press(Key::Space);

        assert!(input.drain_tick_input().fire);
        assert!(!input.drain_tick_input().fire);

        // A fresh press after release arms it again.
        input.release(Key::Space);
        input.press(Key::Space);
        assert!(input.drain_tick_input().fire);
    }

    #[test]
    fn test_auto_repeat_does_not_rearm_triggers() {
        let mut input = InputState::new();
        input.press(Key::P);
        input.press(Key::P);
        input.press(Key::P);

        assert!(input.drain_tick_input().pause);
        assert!(!input.drain_tick_input().pause);
    }

    #[test]
    fn test_camera_axes_combine_and_override() {
        let mut input = InputState::new();
        input.press(Key::W);
        input.press(Key::D);
        input.press(Key::E);
        assert_eq!(
            input.drain_tick_input().camera,
            Vec3::new(1.0, 1.0, 1.0)
        );

        // Opposing pan keys resolve to the later axis assignment.
        input.press(Key::S);
        assert_eq!(input.drain_tick_input().camera.y, -1.0);
    }
}
