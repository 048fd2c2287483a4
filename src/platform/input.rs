//! Input mapping
//!
//! The only place raw key codes appear. Everything downstream works with
//! logical [`Action`]s.

use crate::sim::TickInput;

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a round from the menu, or flap while playing
    Activate,
    /// Return from game over to the menu
    Restart,
    TogglePause,
    /// Demo mode on/off
    ToggleIdle,
    /// Sound on/off (a setting, never reaches the simulation)
    ToggleMute,
}

impl Action {
    /// Whether the browser's default handling should be suppressed
    /// (Space and ArrowUp would otherwise scroll the page)
    pub fn prevents_default(&self) -> bool {
        matches!(self, Action::Activate)
    }

    /// Latch this action into the pending input for the next tick
    pub fn apply_to(&self, input: &mut TickInput) {
        match self {
            Action::Activate => input.activate = true,
            Action::Restart => input.restart = true,
            Action::TogglePause => input.toggle_pause = true,
            Action::ToggleIdle => input.idle_mode = !input.idle_mode,
            Action::ToggleMute => {}
        }
    }
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_key(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" => Some(Action::Activate),
        "Enter" => Some(Action::Restart),
        "KeyP" => Some(Action::TogglePause),
        "KeyI" => Some(Action::ToggleIdle),
        "KeyM" => Some(Action::ToggleMute),
        _ => None,
    }
}

/// Pointer presses always activate
pub const POINTER_ACTION: Action = Action::Activate;

/// On-screen control buttons by element id
pub const BUTTON_IDS: [&str; 2] = ["menu-btn", "pause-btn"];

/// Map an on-screen button's element id to an action
pub fn action_for_button(id: &str) -> Option<Action> {
    match id {
        "menu-btn" => Some(Action::Restart),
        "pause-btn" => Some(Action::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key("Space"), Some(Action::Activate));
        assert_eq!(action_for_key("ArrowUp"), Some(Action::Activate));
        assert_eq!(action_for_key("Enter"), Some(Action::Restart));
        assert_eq!(action_for_key("KeyP"), Some(Action::TogglePause));
        assert_eq!(action_for_key("KeyI"), Some(Action::ToggleIdle));
        assert_eq!(action_for_key("KeyM"), Some(Action::ToggleMute));
        assert_eq!(action_for_key("KeyX"), None);
        assert_eq!(POINTER_ACTION, Action::Activate);
    }

    #[test]
    fn test_buttons_cover_restart_and_pause() {
        let actions: Vec<_> = BUTTON_IDS.iter().map(|id| action_for_button(id)).collect();
        assert_eq!(
            actions,
            vec![Some(Action::Restart), Some(Action::TogglePause)]
        );
        assert_eq!(action_for_button("canvas"), None);
    }

    #[test]
    fn test_only_activate_prevents_default() {
        assert!(Action::Activate.prevents_default());
        assert!(!Action::Restart.prevents_default());
        assert!(!Action::TogglePause.prevents_default());
    }

    #[test]
    fn test_apply_latches_one_shots() {
        let mut input = TickInput::default();
        Action::Activate.apply_to(&mut input);
        Action::Activate.apply_to(&mut input);
        Action::TogglePause.apply_to(&mut input);
        assert!(input.activate);
        assert!(input.toggle_pause);
        assert!(!input.restart);
    }

    #[test]
    fn test_idle_toggles() {
        let mut input = TickInput::default();
        Action::ToggleIdle.apply_to(&mut input);
        assert!(input.idle_mode);
        input.clear_one_shots();
        assert!(input.idle_mode);
        Action::ToggleIdle.apply_to(&mut input);
        assert!(!input.idle_mode);
    }

    #[test]
    fn test_mute_leaves_tick_input_alone() {
        let mut input = TickInput::default();
        Action::ToggleMute.apply_to(&mut input);
        assert_eq!(input, TickInput::default());
    }
}
