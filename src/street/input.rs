use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollAction {
    ScrollLeft,
    ScrollRight,
    FlingLeft,
    FlingRight,
    Stop,
    ToggleHud,
    OpenSettings,
}

impl ScrollAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ScrollLeft => "Scroll Left",
            Self::ScrollRight => "Scroll Right",
            Self::FlingLeft => "Fling Left",
            Self::FlingRight => "Fling Right",
            Self::Stop => "Stop",
            Self::ToggleHud => "Toggle HUD",
            Self::OpenSettings => "Settings",
        }
    }

    pub fn all() -> &'static [ScrollAction] {
        use ScrollAction::*;
        &[
            ScrollLeft, ScrollRight, FlingLeft, FlingRight,
            Stop, ToggleHud, OpenSettings,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub shift: bool,
}

impl KeyBind {
    pub fn new(code: KeyCode) -> Self {
        Self { code, shift: false }
    }

    pub fn with_shift(code: KeyCode) -> Self {
        Self { code, shift: true }
    }

    /// Whether the binding survives a trip through the settings file.
    pub fn is_storable(&self) -> bool {
        keycode_from_str(&format!("{:?}", self.code)).is_some()
    }

    pub fn display_name(&self) -> String {
        if self.shift {
            format!("Shift+{:?}", self.code)
        } else {
            format!("{:?}", self.code)
        }
    }
}

impl Serialize for KeyBind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_name())
    }
}

impl<'de> Deserialize<'de> for KeyBind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (shift, key_str) = match s.strip_prefix("Shift+") {
            Some(rest) => (true, rest),
            None => (false, s.as_str()),
        };
        let code = keycode_from_str(key_str).ok_or_else(|| {
            serde::de::Error::custom(format!("Unknown key code: {key_str}"))
        })?;
        Ok(KeyBind { code, shift })
    }
}

// Names match the Debug output of KeyCode.
fn keycode_from_str(s: &str) -> Option<KeyCode> {
    let code = match s {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "Space" => KeyCode::Space,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Enter" => KeyCode::Enter,
        "Backspace" => KeyCode::Backspace,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Backquote" => KeyCode::Backquote,
        "Minus" => KeyCode::Minus,
        "Equal" => KeyCode::Equal,
        "BracketLeft" => KeyCode::BracketLeft,
        "BracketRight" => KeyCode::BracketRight,
        "Comma" => KeyCode::Comma,
        "Period" => KeyCode::Period,
        "Slash" => KeyCode::Slash,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "F6" => KeyCode::F6,
        "F7" => KeyCode::F7,
        "F8" => KeyCode::F8,
        "F9" => KeyCode::F9,
        "F10" => KeyCode::F10,
        "F11" => KeyCode::F11,
        "F12" => KeyCode::F12,
        _ => return None,
    };
    Some(code)
}

pub fn default_bindings() -> HashMap<ScrollAction, KeyBind> {
    use ScrollAction::*;
    HashMap::from([
        (ScrollLeft, KeyBind::new(KeyCode::ArrowLeft)),
        (ScrollRight, KeyBind::new(KeyCode::ArrowRight)),
        (FlingLeft, KeyBind::with_shift(KeyCode::ArrowLeft)),
        (FlingRight, KeyBind::with_shift(KeyCode::ArrowRight)),
        (Stop, KeyBind::new(KeyCode::Space)),
        (ToggleHud, KeyBind::new(KeyCode::F3)),
        (OpenSettings, KeyBind::new(KeyCode::Escape)),
    ])
}

/// Resolves raw key events into scroll actions through the current bindings.
pub struct InputState {
    pub bindings: HashMap<ScrollAction, KeyBind>,
    reverse_map: HashMap<KeyCode, Vec<ScrollAction>>,
    active: HashSet<ScrollAction>,
    just_pressed: HashSet<ScrollAction>,
    pub shift_held: bool,
}

impl InputState {
    pub fn new(bindings: HashMap<ScrollAction, KeyBind>) -> Self {
        let reverse_map = build_reverse_map(&bindings);
        Self {
            bindings,
            reverse_map,
            active: HashSet::new(),
            just_pressed: HashSet::new(),
            shift_held: false,
        }
    }

    #[cfg(test)]
    pub fn with_defaults() -> Self {
        Self::new(default_bindings())
    }

    pub fn on_key_event(&mut self, code: KeyCode, pressed: bool) {
        if code == KeyCode::ShiftLeft || code == KeyCode::ShiftRight {
            self.shift_held = pressed;
        }

        let Some(actions) = self.reverse_map.get(&code) else {
            return;
        };
        for &action in actions {
            if !pressed {
                // release always clears, even if shift changed meanwhile
                self.active.remove(&action);
                continue;
            }
            let wants_shift = self.bindings.get(&action).is_some_and(|b| b.shift);
            if wants_shift != self.shift_held {
                continue;
            }
            if self.active.insert(action) {
                self.just_pressed.insert(action);
            }
        }
    }

    pub fn is_active(&self, action: ScrollAction) -> bool {
        self.active.contains(&action)
    }

    pub fn just_pressed(&self, action: ScrollAction) -> bool {
        self.just_pressed.contains(&action)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    pub fn rebind(&mut self, action: ScrollAction, bind: KeyBind) {
        self.bindings.insert(action, bind);
        self.reverse_map = build_reverse_map(&self.bindings);
        self.active.remove(&action);
    }
}

fn build_reverse_map(
    bindings: &HashMap<ScrollAction, KeyBind>,
) -> HashMap<KeyCode, Vec<ScrollAction>> {
    let mut map: HashMap<KeyCode, Vec<ScrollAction>> = HashMap::new();
    for (&action, bind) in bindings {
        map.entry(bind.code).or_default().push(action);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_all_actions() {
        let bindings = default_bindings();
        for action in ScrollAction::all() {
            assert!(bindings.contains_key(action), "{action:?} unbound");
        }
    }

    #[test]
    fn test_held_scroll() {
        let mut state = InputState::with_defaults();
        state.on_key_event(KeyCode::ArrowRight, true);
        assert!(state.is_active(ScrollAction::ScrollRight));
        assert!(!state.is_active(ScrollAction::FlingRight));
        assert!(state.just_pressed(ScrollAction::ScrollRight));

        state.end_frame();
        // key repeat must not re-trigger
        state.on_key_event(KeyCode::ArrowRight, true);
        assert!(state.is_active(ScrollAction::ScrollRight));
        assert!(!state.just_pressed(ScrollAction::ScrollRight));

        state.on_key_event(KeyCode::ArrowRight, false);
        assert!(!state.is_active(ScrollAction::ScrollRight));
    }

    #[test]
    fn test_shift_selects_fling() {
        let mut state = InputState::with_defaults();
        state.on_key_event(KeyCode::ShiftLeft, true);
        state.on_key_event(KeyCode::ArrowLeft, true);
        assert!(state.just_pressed(ScrollAction::FlingLeft));
        assert!(!state.is_active(ScrollAction::ScrollLeft));
    }

    #[test]
    fn test_rebinding() {
        let mut state = InputState::with_defaults();
        state.rebind(ScrollAction::ScrollLeft, KeyBind::new(KeyCode::KeyA));

        state.on_key_event(KeyCode::ArrowLeft, true);
        assert!(!state.is_active(ScrollAction::ScrollLeft));

        state.on_key_event(KeyCode::KeyA, true);
        assert!(state.is_active(ScrollAction::ScrollLeft));
    }

    #[test]
    fn test_keybind_string_form() {
        let mut map = HashMap::new();
        map.insert("fling", KeyBind::with_shift(KeyCode::ArrowRight));
        let s = toml::to_string(&map).expect("serialize");
        assert!(s.contains("Shift+ArrowRight"));

        let back: HashMap<String, KeyBind> = toml::from_str(&s).expect("deserialize");
        assert_eq!(back["fling"], KeyBind::with_shift(KeyCode::ArrowRight));
    }

    #[test]
    fn test_storable_keys() {
        assert!(KeyBind::new(KeyCode::KeyZ).is_storable());
        assert!(KeyBind::with_shift(KeyCode::F12).is_storable());
        assert!(!KeyBind::new(KeyCode::ShiftLeft).is_storable());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<HashMap<String, KeyBind>, _> = toml::from_str("k = \"Banana\"");
        assert!(result.is_err());
    }
}
