//! Platform abstraction layer
//!
//! Keyboard identifiers arrive in different shapes depending on the host
//! (DOM `key` vs `code`, terminal names). Everything is folded onto the four
//! simulation [`Key`]s here.

use crate::sim::Key;

/// Map a host key identifier to a movement key
pub fn normalize_key(name: &str) -> Option<Key> {
    match name.trim().to_ascii_lowercase().as_str() {
        "w" | "keyw" | "arrowup" | "up" => Some(Key::Up),
        "s" | "keys" | "arrowdown" | "down" => Some(Key::Down),
        "a" | "keya" | "arrowleft" | "left" => Some(Key::Left),
        "d" | "keyd" | "arrowright" | "right" => Some(Key::Right),
        _ => None,
    }
}

/// Keys that toggle pause
pub fn is_pause_key(name: &str) -> bool {
    matches!(name.trim().to_ascii_lowercase().as_str(), "escape" | "esc" | "p" | "keyp")
}
