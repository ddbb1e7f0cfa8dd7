//! Keyboard mapping for the demos.
//!
//! Only key presses matter. Releases and keys without a printable character
//! (apart from `Escape`) are dropped.

use cgmath::Vector2;
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{Key as WinitKey, NamedKey},
};

/// A pressed key, reduced to what the demos react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// A printable key, lowercased.
    Char(char),
}

impl Key {
    /// Translate a winit keyboard event. Returns `None` for releases and
    /// keys without a printable character.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.state != ElementState::Pressed {
            return None;
        }
        Self::from_logical(&event.logical_key)
    }

    pub fn from_logical(key: &WinitKey) -> Option<Self> {
        match key {
            WinitKey::Named(NamedKey::Escape) => Some(Key::Escape),
            WinitKey::Character(text) => text
                .chars()
                .next()
                .map(|c| Key::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }
}

/// Moves a 2D offset with w/a/s/d.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetController {
    pub offset: Vector2<f32>,
    pub step: f32,
}

impl OffsetController {
    pub const DEFAULT_STEP: f32 = 0.1;

    pub fn new(step: f32) -> Self {
        Self {
            offset: Vector2::new(0.0, 0.0),
            step,
        }
    }

    /// Apply `key`; returns whether it moved the offset.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        let delta = match key {
            Key::Char('w') => Vector2::new(0.0, self.step),
            Key::Char('s') => Vector2::new(0.0, -self.step),
            Key::Char('d') => Vector2::new(self.step, 0.0),
            Key::Char('a') => Vector2::new(-self.step, 0.0),
            _ => return false,
        };
        self.offset += delta;
        log::debug!("offset now ({:.2}, {:.2})", self.offset.x, self.offset.y);
        true
    }

    pub fn offset(&self) -> Vector2<f32> {
        self.offset
    }
}

impl Default for OffsetController {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector2<f32>, b: Vector2<f32>) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn wasd_moves_by_one_step() {
        let mut controller = OffsetController::default();
        assert!(controller.handle_key(&Key::Char('w')));
        assert!(close(controller.offset(), Vector2::new(0.0, 0.1)));
        controller.handle_key(&Key::Char('d'));
        controller.handle_key(&Key::Char('d'));
        assert!(close(controller.offset(), Vector2::new(0.2, 0.1)));
        controller.handle_key(&Key::Char('s'));
        controller.handle_key(&Key::Char('a'));
        assert!(close(controller.offset(), Vector2::new(0.1, 0.0)));
    }

    #[test]
    fn other_keys_are_not_handled() {
        let mut controller = OffsetController::default();
        assert!(!controller.handle_key(&Key::Char('q')));
        assert!(!controller.handle_key(&Key::Escape));
        assert_eq!(controller.offset(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn logical_keys_are_lowercased() {
        let upper = WinitKey::Character("W".into());
        assert_eq!(Key::from_logical(&upper), Some(Key::Char('w')));
        assert_eq!(
            Key::from_logical(&WinitKey::Named(NamedKey::Escape)),
            Some(Key::Escape)
        );
        assert_eq!(Key::from_logical(&WinitKey::Named(NamedKey::Shift)), None);
    }
}
