//! Canonical input semantics for a single physical switch.

use serde::{Deserialize, Serialize};

/// What a switch does, independent of how the driver source spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    JoyUp,
    JoyDown,
    JoyLeft,
    JoyRight,
    LeftJoyUp,
    LeftJoyDown,
    LeftJoyLeft,
    LeftJoyRight,
    RightJoyUp,
    RightJoyDown,
    RightJoyLeft,
    RightJoyRight,
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
    Select,
    Start1,
    Start2,
    Service1,
    Service2,
    VolumeDown,
    PowerOn,
    PowerOff,
    /// Recognized, but keypads are not supported by consumers of the manifest.
    Keypad,
    /// Recognized, but cannot be mapped automatically.
    Custom,
    Unused,
}

/// Input type tokens as written in `PORT_BIT` lines.
const TOKENS: &[(&str, Action)] = &[
    ("IPT_JOYSTICK_UP", Action::JoyUp),
    ("IPT_JOYSTICK_DOWN", Action::JoyDown),
    ("IPT_JOYSTICK_LEFT", Action::JoyLeft),
    ("IPT_JOYSTICK_RIGHT", Action::JoyRight),
    ("IPT_JOYSTICKLEFT_UP", Action::LeftJoyUp),
    ("IPT_JOYSTICKLEFT_DOWN", Action::LeftJoyDown),
    ("IPT_JOYSTICKLEFT_LEFT", Action::LeftJoyLeft),
    ("IPT_JOYSTICKLEFT_RIGHT", Action::LeftJoyRight),
    ("IPT_JOYSTICKRIGHT_UP", Action::RightJoyUp),
    ("IPT_JOYSTICKRIGHT_DOWN", Action::RightJoyDown),
    ("IPT_JOYSTICKRIGHT_LEFT", Action::RightJoyLeft),
    ("IPT_JOYSTICKRIGHT_RIGHT", Action::RightJoyRight),
    ("IPT_BUTTON1", Action::Button1),
    ("IPT_BUTTON2", Action::Button2),
    ("IPT_BUTTON3", Action::Button3),
    ("IPT_BUTTON4", Action::Button4),
    ("IPT_BUTTON5", Action::Button5),
    ("IPT_BUTTON6", Action::Button6),
    ("IPT_BUTTON7", Action::Button7),
    ("IPT_BUTTON8", Action::Button8),
    ("IPT_SELECT", Action::Select),
    // Single-player machines write plain IPT_START
    ("IPT_START", Action::Start1),
    ("IPT_START1", Action::Start1),
    ("IPT_START2", Action::Start2),
    ("IPT_SERVICE1", Action::Service1),
    ("IPT_SERVICE2", Action::Service2),
    ("IPT_VOLUME_DOWN", Action::VolumeDown),
    ("IPT_POWER_ON", Action::PowerOn),
    ("IPT_POWER_OFF", Action::PowerOff),
    ("IPT_KEYPAD", Action::Keypad),
    ("IPT_CUSTOM", Action::Custom),
    ("IPT_UNUSED", Action::Unused),
];

impl Action {
    /// Resolve a driver input type token (e.g. `IPT_BUTTON1`).
    /// Returns `None` for anything outside the vocabulary.
    pub fn from_token(token: &str) -> Option<Self> {
        TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|&(_, action)| action)
    }
}
