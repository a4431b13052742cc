/// Keys the player reacts to; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl From<&str> for Key {
    /// Accepts physical key codes (`"Space"`, `"ArrowLeft"`, `"ArrowRight"`).
    fn from(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlay,
    PreviousPoint,
    NextPoint,
}

impl KeyAction {
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::Space => Some(KeyAction::TogglePlay),
            Key::ArrowLeft => Some(KeyAction::PreviousPoint),
            Key::ArrowRight => Some(KeyAction::NextPoint),
            Key::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyAction};

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(
            KeyAction::for_key(Key::from("Space")),
            Some(KeyAction::TogglePlay)
        );
        assert_eq!(
            KeyAction::for_key(Key::from("ArrowLeft")),
            Some(KeyAction::PreviousPoint)
        );
        assert_eq!(
            KeyAction::for_key(Key::from("ArrowRight")),
            Some(KeyAction::NextPoint)
        );
        assert_eq!(KeyAction::for_key(Key::from("KeyF")), None);
    }
}
