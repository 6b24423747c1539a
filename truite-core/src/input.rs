//! Held-key tracking and camera actions
//!
//! The core never sees concrete keys: hosts bind their own key type to
//! [`CameraAction`]s and refresh a [`KeyState`] once per tick.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Key identifier to held-state mapping, refreshed once per tick.
#[derive(Debug, Clone)]
pub struct KeyState<K> {
    held: HashMap<K, bool>,
}

impl<K: Eq + Hash> KeyState<K> {
    pub fn new() -> Self {
        Self {
            held: HashMap::new(),
        }
    }

    pub fn set(&mut self, key: K, held: bool) {
        self.held.insert(key, held);
    }

    pub fn press(&mut self, key: K) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: K) {
        self.set(key, false);
    }

    pub fn is_held(&self, key: &K) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    pub fn release_all(&mut self) {
        self.held.values_mut().for_each(|held| *held = false);
    }
}

impl<K: Eq + Hash> Default for KeyState<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Continuous camera movements a held key can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAction {
    Left,
    Right,
    Up,
    Down,
    Forward,
    Back,
    ZoomIn,
    ZoomOut,
}

/// Host-defined mapping from keys to camera actions.
#[derive(Debug, Clone)]
pub struct KeyBindings<K> {
    bindings: Vec<(K, CameraAction)>,
}

impl<K: Eq + Hash> KeyBindings<K> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, key: K, action: CameraAction) -> Self {
        self.bindings.push((key, action));
        self
    }

    /// Actions with at least one bound key currently held, each reported once.
    pub fn held_actions(&self, keys: &KeyState<K>) -> HashSet<CameraAction> {
        self.bindings
            .iter()
            .filter(|(key, _)| keys.is_held(key))
            .map(|(_, action)| *action)
            .collect()
    }
}

impl<K: Eq + Hash> Default for KeyBindings<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut keys = KeyState::new();
        assert!(!keys.is_held(&'a'));

        keys.press('a');
        keys.press('b');
        keys.release('b');
        assert!(keys.is_held(&'a'));
        assert!(!keys.is_held(&'b'));

        keys.release_all();
        assert!(!keys.is_held(&'a'));
    }

    #[test]
    fn test_held_actions_deduplicate() {
        let bindings = KeyBindings::new()
            .bind('d', CameraAction::Right)
            .bind('l', CameraAction::Right)
            .bind('w', CameraAction::Forward);

        let mut keys = KeyState::new();
        keys.press('d');
        keys.press('l');

        let actions = bindings.held_actions(&keys);
        assert_eq!(actions.len(), 1);
        assert!(actions.contains(&CameraAction::Right));
    }
}
