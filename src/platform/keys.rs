//! Browser key name mapping

use crate::sim::Key;

/// Standard-mapping gamepad button index for Back/Select
pub const GAMEPAD_BACK_BUTTON: u32 = 8;

/// Map a DOM `KeyboardEvent.key` value to a logical key
pub fn key_from_dom(key: &str) -> Option<Key> {
    match key {
        "w" | "W" => Some(Key::W),
        "a" | "A" => Some(Key::A),
        "s" | "S" => Some(Key::S),
        "d" | "D" => Some(Key::D),
        "ArrowUp" | "Up" => Some(Key::Up),
        "ArrowDown" | "Down" => Some(Key::Down),
        "ArrowLeft" | "Left" => Some(Key::Left),
        "ArrowRight" | "Right" => Some(Key::Right),
        "Escape" | "Esc" => Some(Key::Escape),
        _ => None,
    }
}

/// Map a DOM `KeyboardEvent.code` value (physical key) to a logical key
pub fn key_from_code(code: &str) -> Option<Key> {
    match code {
        "KeyW" => Some(Key::W),
        "KeyA" => Some(Key::A),
        "KeyS" => Some(Key::S),
        "KeyD" => Some(Key::D),
        "ArrowUp" => Some(Key::Up),
        "ArrowDown" => Some(Key::Down),
        "ArrowLeft" => Some(Key::Left),
        "ArrowRight" => Some(Key::Right),
        "Escape" => Some(Key::Escape),
        _ => None,
    }
}

/// Resolve a key event, preferring the physical key so non-QWERTY layouts keep WASD in place
pub fn key_from_event(key: &str, code: &str) -> Option<Key> {
    key_from_code(code).or_else(|| key_from_dom(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_any_case() {
        assert_eq!(key_from_dom("w"), Some(Key::W));
        assert_eq!(key_from_dom("D"), Some(Key::D));
        assert_eq!(key_from_dom("q"), None);
    }

    #[test]
    fn test_arrows_and_legacy_names() {
        assert_eq!(key_from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(key_from_dom("Down"), Some(Key::Down));
        assert_eq!(key_from_dom("Esc"), Some(Key::Escape));
    }

    #[test]
    fn test_physical_code_wins() {
        // AZERTY: the key labelled "z" sits where W is
        assert_eq!(key_from_event("z", "KeyW"), Some(Key::W));
        assert_eq!(key_from_event("Escape", ""), Some(Key::Escape));
        assert_eq!(key_from_event(" ", "Space"), None);
    }
}
