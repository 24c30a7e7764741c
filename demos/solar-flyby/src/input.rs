/// Input mapper: host key codes and UI events to navigation commands.

use flyby_engine::InputEvent;

// ── Key codes (DOM `keyCode`) ────────────────────────────────────────

pub const KEY_RIGHT: u32 = 39;
pub const KEY_0: u32 = 48;
pub const KEY_9: u32 = 57;
pub const KEY_S: u32 = 83;
pub const KEY_T: u32 = 84;

// ── Custom event kinds from the page UI ──────────────────────────────

const CUSTOM_ADVANCE: u32 = 1;
const CUSTOM_JUMP: u32 = 2;
const CUSTOM_TOGGLE_VIEW: u32 = 3;
const CUSTOM_TOGGLE_SCALED: u32 = 4;
/// Viewport resize (sent by the page as kind=99).
const CUSTOM_RESIZE: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ToggleViewMode,
    /// Top-down only.
    ToggleScaledView,
    /// Navigation only.
    AdvanceStage,
    /// Navigation only. `0` is the overview, `n` rests at body `n - 1`.
    JumpToBody(usize),
    Resize { width: f32, height: f32 },
}

impl Command {
    /// Whether the command applies in the current view mode.
    pub fn allowed(self, top_down: bool) -> bool {
        match self {
            Command::ToggleViewMode | Command::Resize { .. } => true,
            Command::ToggleScaledView => top_down,
            Command::AdvanceStage | Command::JumpToBody(_) => !top_down,
        }
    }
}

pub fn map_key(key_code: u32) -> Option<Command> {
    match key_code {
        KEY_T => Some(Command::ToggleViewMode),
        KEY_S => Some(Command::ToggleScaledView),
        KEY_RIGHT => Some(Command::AdvanceStage),
        KEY_0..=KEY_9 => Some(Command::JumpToBody((key_code - KEY_0) as usize)),
        _ => None,
    }
}

pub fn map_custom(kind: u32, a: f32, b: f32) -> Option<Command> {
    match kind {
        CUSTOM_ADVANCE => Some(Command::AdvanceStage),
        CUSTOM_JUMP if a.is_finite() && a >= 0.0 => Some(Command::JumpToBody(a.round() as usize)),
        CUSTOM_TOGGLE_VIEW => Some(Command::ToggleViewMode),
        CUSTOM_TOGGLE_SCALED => Some(Command::ToggleScaledView),
        CUSTOM_RESIZE => Some(Command::Resize { width: a, height: b }),
        _ => None,
    }
}

pub fn map_event(event: &InputEvent) -> Option<Command> {
    match *event {
        InputEvent::KeyDown { key_code } => map_key(key_code),
        InputEvent::KeyUp { .. } => None,
        InputEvent::Resize { width, height } => Some(Command::Resize { width, height }),
        InputEvent::Custom { kind, a, b, .. } => map_custom(kind, a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(map_key(KEY_T), Some(Command::ToggleViewMode));
        assert_eq!(map_key(KEY_S), Some(Command::ToggleScaledView));
        assert_eq!(map_key(KEY_RIGHT), Some(Command::AdvanceStage));
        assert_eq!(map_key(KEY_0), Some(Command::JumpToBody(0)));
        assert_eq!(map_key(53), Some(Command::JumpToBody(5)));
        assert_eq!(map_key(KEY_9), Some(Command::JumpToBody(9)));
        assert_eq!(map_key(65), None);
    }

    #[test]
    fn mode_gating() {
        assert!(Command::ToggleScaledView.allowed(true));
        assert!(!Command::ToggleScaledView.allowed(false));
        assert!(!Command::AdvanceStage.allowed(true));
        assert!(Command::JumpToBody(3).allowed(false));
        assert!(Command::ToggleViewMode.allowed(true) && Command::ToggleViewMode.allowed(false));
    }

    #[test]
    fn custom_events_from_ui() {
        assert_eq!(map_custom(2, 4.0, 0.0), Some(Command::JumpToBody(4)));
        assert_eq!(map_custom(2, -1.0, 0.0), None);
        assert_eq!(map_custom(2, f32::NAN, 0.0), None);
        assert_eq!(
            map_custom(99, 1280.0, 720.0),
            Some(Command::Resize { width: 1280.0, height: 720.0 })
        );
        assert_eq!(map_custom(42, 0.0, 0.0), None);
    }

    #[test]
    fn key_up_is_ignored() {
        assert_eq!(map_event(&InputEvent::KeyUp { key_code: KEY_T }), None);
        assert_eq!(map_event(&InputEvent::KeyDown { key_code: KEY_T }), Some(Command::ToggleViewMode));
    }
}
