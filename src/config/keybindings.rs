//! Key binding configuration.
//!
//! Maps terminal key presses to abstract focus actions through an ordered
//! table. The first binding whose key and modifiers match wins, so every
//! modifier-qualified binding must come before the bare binding for the
//! same key.

use super::ConfigError;
use crate::focus::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A physical key press reduced to what the resolver looks at.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyPress {
    /// Return a press without modifiers.
    ///
    pub fn new(code: KeyCode) -> Self {
        KeyPress {
            code,
            ctrl: false,
            meta: false,
            shift: false,
            alt: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        KeyPress {
            code: event.code,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            meta: event.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
            alt: event.modifiers.contains(KeyModifiers::ALT),
        }
    }
}

/// Modifiers a binding requires. Ctrl and meta both stand for the
/// accelerator modifier.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default, skip_serializing_if = "is_false")]
    pub ctrl: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub meta: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub shift: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub alt: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub fn is_empty(&self) -> bool {
        *self == Modifiers::NONE
    }

    fn accelerator(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Decide whether a press satisfies the modifiers of a binding.
///
/// A binding without modifiers rejects any press holding ctrl, meta or alt
/// but ignores shift, so `BackTab` and capital letters still resolve. A
/// binding with modifiers needs the accelerator present or absent as
/// declared (ctrl and meta interchangeable) and shift and alt to match
/// exactly.
///
pub fn modifiers_match(press: &KeyPress, required: &Modifiers) -> bool {
    if required.is_empty() {
        return !press.ctrl && !press.meta && !press.alt;
    }
    (press.ctrl || press.meta) == required.accelerator()
        && press.shift == required.shift
        && press.alt == required.alt
}

/// One entry of the binding table.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub action: Action,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: Modifiers, action: Action) -> Self {
        KeyBinding {
            code,
            modifiers,
            action,
        }
    }

    pub fn matches(&self, press: &KeyPress) -> bool {
        self.code == press.code && modifiers_match(press, &self.modifiers)
    }

    /// Return the press this binding was written for.
    ///
    fn canonical_press(&self) -> KeyPress {
        KeyPress {
            code: self.code,
            ctrl: self.modifiers.ctrl,
            meta: self.modifiers.meta,
            shift: self.modifiers.shift,
            alt: self.modifiers.alt,
        }
    }
}

/// Custom serialization for KeyBinding.
///
impl Serialize for KeyBinding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let code = KeyCodeSerde::try_from(self.code).map_err(serde::ser::Error::custom)?;
        let mut state = serializer.serialize_struct("KeyBinding", 4)?;
        state.serialize_field("action", &self.action)?;
        state.serialize_field("code", &code)?;
        if let KeyCode::Char(c) = self.code {
            state.serialize_field("char", &c)?;
        }
        state.serialize_field("modifiers", &self.modifiers)?;
        state.end()
    }
}

/// Custom deserialization for KeyBinding.
///
impl<'de> Deserialize<'de> for KeyBinding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct KeyBindingHelper {
            action: Action,
            code: KeyCodeSerde,
            #[serde(default)]
            char: Option<char>,
            #[serde(default)]
            modifiers: Modifiers,
        }

        let helper = KeyBindingHelper::deserialize(deserializer)?;
        let code = match helper.code {
            KeyCodeSerde::Char => match helper.char {
                Some(c) => KeyCode::Char(c),
                None => {
                    return Err(serde::de::Error::custom(
                        "Char key code requires 'char' field",
                    ))
                }
            },
            KeyCodeSerde::Esc => KeyCode::Esc,
            KeyCodeSerde::Enter => KeyCode::Enter,
            KeyCodeSerde::Backspace => KeyCode::Backspace,
            KeyCodeSerde::Delete => KeyCode::Delete,
            KeyCodeSerde::Tab => KeyCode::Tab,
            KeyCodeSerde::BackTab => KeyCode::BackTab,
            KeyCodeSerde::Up => KeyCode::Up,
            KeyCodeSerde::Down => KeyCode::Down,
            KeyCodeSerde::Left => KeyCode::Left,
            KeyCodeSerde::Right => KeyCode::Right,
        };
        Ok(KeyBinding {
            code,
            modifiers: helper.modifiers,
            action: helper.action,
        })
    }
}

/// Helper enum for serializing KeyCode.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
enum KeyCodeSerde {
    Char,
    Esc,
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
}

impl TryFrom<KeyCode> for KeyCodeSerde {
    type Error = String;

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        Ok(match code {
            KeyCode::Char(_) => KeyCodeSerde::Char,
            KeyCode::Esc => KeyCodeSerde::Esc,
            KeyCode::Enter => KeyCodeSerde::Enter,
            KeyCode::Backspace => KeyCodeSerde::Backspace,
            KeyCode::Delete => KeyCodeSerde::Delete,
            KeyCode::Tab => KeyCodeSerde::Tab,
            KeyCode::BackTab => KeyCodeSerde::BackTab,
            KeyCode::Up => KeyCodeSerde::Up,
            KeyCode::Down => KeyCodeSerde::Down,
            KeyCode::Left => KeyCodeSerde::Left,
            KeyCode::Right => KeyCodeSerde::Right,
            other => return Err(format!("unsupported key code {:?}", other)),
        })
    }
}

/// Ordered binding table.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            bindings: default_bindings(),
        }
    }
}

impl KeyBindings {
    /// Build a table from configured bindings. A binding that can never be
    /// reached because an earlier entry already claims its key combination
    /// is rejected.
    ///
    pub fn new(bindings: Vec<KeyBinding>) -> Result<Self, ConfigError> {
        for (i, binding) in bindings.iter().enumerate() {
            let press = binding.canonical_press();
            if let Some(earlier) = bindings[..i].iter().find(|b| b.matches(&press)) {
                return Err(ConfigError::InvalidKeyBinding(format!(
                    "{} for '{}' is shadowed by the earlier binding for '{}'",
                    display(binding),
                    binding.action,
                    earlier.action
                )));
            }
        }
        Ok(KeyBindings { bindings })
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Resolve a press to its action by linear scan.
    ///
    pub fn event_to_action(&self, press: &KeyPress) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(press))
            .map(|binding| binding.action)
    }

    pub fn bindings_for(&self, action: Action) -> Vec<&KeyBinding> {
        self.bindings.iter().filter(|b| b.action == action).collect()
    }

    /// Display string of the first binding for an action, for footer hints.
    ///
    pub fn primary_key_for(&self, action: Action) -> Option<String> {
        self.bindings_for(action).first().map(|b| display(b))
    }
}

/// Returns the default binding table. Order is significant.
///
pub fn default_bindings() -> Vec<KeyBinding> {
    use Action::*;
    let ctrl = Modifiers::CTRL;
    let none = Modifiers::NONE;
    vec![
        KeyBinding::new(KeyCode::Char('s'), ctrl, Save),
        KeyBinding::new(KeyCode::Char('f'), ctrl, Search),
        KeyBinding::new(KeyCode::Left, ctrl, MoveLeft),
        KeyBinding::new(KeyCode::Right, ctrl, MoveRight),
        KeyBinding::new(KeyCode::Char('h'), ctrl, MoveLeft),
        KeyBinding::new(KeyCode::Char('l'), ctrl, MoveRight),
        KeyBinding::new(KeyCode::Tab, Modifiers::SHIFT, Up),
        KeyBinding::new(KeyCode::BackTab, none, Up),
        KeyBinding::new(KeyCode::Tab, none, Down),
        KeyBinding::new(KeyCode::Up, none, Up),
        KeyBinding::new(KeyCode::Down, none, Down),
        KeyBinding::new(KeyCode::Left, none, Left),
        KeyBinding::new(KeyCode::Right, none, Right),
        KeyBinding::new(KeyCode::Char('k'), none, Up),
        KeyBinding::new(KeyCode::Char('j'), none, Down),
        KeyBinding::new(KeyCode::Char('h'), none, Left),
        KeyBinding::new(KeyCode::Char('l'), none, Right),
        KeyBinding::new(KeyCode::Char(' '), none, Select),
        KeyBinding::new(KeyCode::Enter, none, Select),
        KeyBinding::new(KeyCode::Esc, none, Back),
        KeyBinding::new(KeyCode::Delete, none, Delete),
        KeyBinding::new(KeyCode::Backspace, none, Delete),
        KeyBinding::new(KeyCode::Char('a'), none, Archive),
        KeyBinding::new(KeyCode::Char('u'), none, Restore),
    ]
}

/// Formats a binding for display in the footer.
///
pub fn display(binding: &KeyBinding) -> String {
    let mut parts = Vec::new();
    if binding.modifiers.ctrl {
        parts.push("Ctrl");
    }
    if binding.modifiers.meta {
        parts.push("Meta");
    }
    if binding.modifiers.shift {
        parts.push("Shift");
    }
    if binding.modifiers.alt {
        parts.push("Alt");
    }

    let key_str = match binding.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if parts.is_empty() => c.to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => "Unknown".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn resolve(press: KeyPress) -> Option<Action> {
        KeyBindings::default().event_to_action(&press)
    }

    #[test]
    fn test_binding_priority() {
        assert_eq!(resolve(KeyPress::new(KeyCode::Char('h'))), Some(Action::Left));
        assert_eq!(resolve(KeyPress::new(KeyCode::Char('h')).with_ctrl()), Some(Action::MoveLeft));
        assert_eq!(resolve(KeyPress::new(KeyCode::Char('h')).with_meta()), Some(Action::MoveLeft));
        assert_eq!(resolve(KeyPress::new(KeyCode::Char('s'))), None);
        assert_eq!(resolve(KeyPress::new(KeyCode::Char('s')).with_ctrl()), Some(Action::Save));
        assert_eq!(resolve(KeyPress::new(KeyCode::Char('s')).with_meta()), Some(Action::Save));
    }

    #[test]
    fn test_shift_tab_variants() {
        assert_eq!(resolve(KeyPress::new(KeyCode::Tab)), Some(Action::Down));
        assert_eq!(resolve(KeyPress::new(KeyCode::Tab).with_shift()), Some(Action::Up));
        assert_eq!(resolve(KeyPress::new(KeyCode::BackTab).with_shift()), Some(Action::Up));
    }

    #[test]
    fn test_modifiers_match() {
        let press = KeyPress::new(KeyCode::Down);
        assert!(modifiers_match(&press, &Modifiers::NONE));
        assert!(modifiers_match(&press.with_shift(), &Modifiers::NONE));
        assert!(!modifiers_match(&press.with_alt(), &Modifiers::NONE));
        assert!(!modifiers_match(&press.with_ctrl(), &Modifiers::NONE));
        assert!(modifiers_match(&press.with_meta(), &Modifiers::CTRL));
        assert!(!modifiers_match(&press.with_ctrl().with_shift(), &Modifiers::CTRL));
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::NONE
        };
        assert!(modifiers_match(&press.with_ctrl().with_shift(), &ctrl_shift));
        assert!(!modifiers_match(&press.with_shift(), &ctrl_shift));
    }

    #[test]
    fn test_alt_blocks_plain_bindings() {
        assert_eq!(resolve(KeyPress::new(KeyCode::Char('j')).with_alt()), None);
    }

    #[test]
    fn test_key_press_from_event() {
        let event = KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::SUPER,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        };
        let press = KeyPress::from(event);
        assert!(press.meta && !press.ctrl);
        assert_eq!(resolve(press), Some(Action::Save));
    }

    #[test]
    fn test_display() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.primary_key_for(Action::Save).as_deref(), Some("Ctrl+S"));
        assert_eq!(bindings.primary_key_for(Action::Select).as_deref(), Some("Space"));
        assert_eq!(bindings.primary_key_for(Action::Back).as_deref(), Some("Esc"));
        assert_eq!(bindings.primary_key_for(Action::Left).as_deref(), Some("←"));
        assert_eq!(bindings.bindings_for(Action::MoveRight).len(), 2);
    }

    #[test]
    fn test_shadowed_binding_is_rejected() {
        let bindings = vec![
            KeyBinding::new(KeyCode::Char('x'), Modifiers::NONE, Action::Delete),
            KeyBinding::new(KeyCode::Char('x'), Modifiers::NONE, Action::Select),
        ];
        assert!(matches!(
            KeyBindings::new(bindings),
            Err(ConfigError::InvalidKeyBinding(_))
        ));
        assert!(KeyBindings::new(default_bindings()).is_ok());
    }

    #[test]
    fn test_binding_serialization() {
        let binding = KeyBinding::new(KeyCode::Char('d'), Modifiers::CTRL, Action::Delete);
        let serialized = serde_yaml::to_string(&binding).unwrap();
        assert!(serialized.contains("delete"));
        let deserialized: KeyBinding = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(binding, deserialized);

        let missing_char = "action: up\ncode: Char\n";
        assert!(serde_yaml::from_str::<KeyBinding>(missing_char).is_err());
    }
}
