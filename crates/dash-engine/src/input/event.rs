/// Logical keys the game reacts to. Several physical keys map to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
    Jump = 4,
    Pause = 5,
}

impl Key {
    pub const COUNT: usize = 6;

    /// Map a DOM `KeyboardEvent.code` to a logical key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "ArrowUp" | "KeyW" => Some(Key::Up),
            "ArrowDown" | "KeyS" => Some(Key::Down),
            "Space" => Some(Key::Jump),
            "KeyP" | "Escape" => Some(Key::Pause),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Input event types the engine understands, already in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// A touch point began.
    TouchStart { id: u32, x: f32, y: f32 },
    /// A touch point ended. `None` means the host could not tell which one,
    /// so every tracked touch is released.
    TouchEnd { id: Option<u32> },
    /// A mouse button was pressed.
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    /// The page lost focus; every held input is released.
    Blur,
}

impl InputEvent {
    /// Whether this event counts as a user gesture for audio unlocking.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyDown { .. } | InputEvent::TouchStart { .. } | InputEvent::PointerDown { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_codes_map_to_keys() {
        assert_eq!(Key::from_code("Space"), Some(Key::Jump));
        assert_eq!(Key::from_code("KeyA"), Some(Key::Left));
        assert_eq!(Key::from_code("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_code("KeyW"), Some(Key::Up));
        assert_eq!(Key::from_code("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_code("KeyP"), Some(Key::Pause));
        assert_eq!(Key::from_code("KeyQ"), None);
    }

    #[test]
    fn gestures() {
        assert!(InputEvent::KeyDown { key: Key::Left }.is_gesture());
        assert!(InputEvent::TouchStart { id: 0, x: 0.0, y: 0.0 }.is_gesture());
        assert!(!InputEvent::TouchEnd { id: None }.is_gesture());
        assert!(!InputEvent::Blur.is_gesture());
    }
}
