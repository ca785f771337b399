//! Normalized carousel inputs and the effects they produce.

use crate::state::Navigation;

/// Arrow keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value. Every other key is ignored.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselInput {
    GestureStart { x: f64 },
    GestureMove { x: f64 },
    GestureEnd,
    GestureCancel,
    Key(NavKey),
    DotClicked(usize),
    PreviousClicked,
    NextClicked,
    ImageFailed,
}

/// What changed after applying an input; `None` means the view is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Navigated(Navigation),
    ImageHidden,
}

impl Effect {
    pub fn needs_render(self) -> bool {
        !matches!(self, Effect::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_horizontal_arrows_map() {
        assert_eq!(NavKey::from_dom_key("ArrowLeft"), Some(NavKey::Left));
        assert_eq!(NavKey::from_dom_key("ArrowRight"), Some(NavKey::Right));
        for key in ["ArrowUp", "ArrowDown", "Enter", "a", "Left", ""] {
            assert_eq!(NavKey::from_dom_key(key), None, "{key}");
        }
    }
}
