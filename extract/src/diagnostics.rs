//! Recoverable anomalies found while extracting profiles.
//!
//! Nothing here aborts a run. Components push into a [`Diagnostics`] sink
//! and keep going; the caller decides how to surface the collected entries.

use std::fmt;

/// One anomaly, attributed to the device being processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub device: String,
    pub kind: DiagnosticKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `PORT_BIT` input type outside the action vocabulary.
    UnknownAction { token: String },
    /// `PORT_START`/`PORT_MODIFY` name that is not `IN.N`, `ACL`, `B`, `BA` or `FAKE`.
    UnknownPort { name: String },
    /// `PORT_BIT` with no port under construction.
    BitWithoutPort { line: String },
    /// `PORT_INCLUDE` target has no input block.
    MissingInclude { include: String },
    /// `PORT_INCLUDE` target itself includes another device; only one level is merged.
    NestedInclude { include: String },
    /// Neither the device nor its driver class has an input block.
    MissingInput { class: String },
    /// Declared in a driver class but its constructor definition was not found.
    MissingConstructor { class: String },
    /// Constructor does more than call its preset.
    ExtraConstructorLines,
    /// Constructor's first line is not `<preset>(config, ...)`.
    MalformedConstructor,
    UnknownPreset { preset: String },
    UnhandledArgument { argument: String },
    PresetArity {
        preset: String,
        expected: usize,
        actual: usize,
    },
    MissingRomBlock,
    /// A second main (or melody) ROM in one `ROM_START` block.
    DuplicateRom { melody: bool },
    MissingRomName,
    /// Homebrew title layered on a device that is not in the manifest.
    MissingHomebrewBase { base: String },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction { token } => write!(f, "unknown button action {token}"),
            Self::UnknownPort { name } => write!(f, "unknown port {name}"),
            Self::BitWithoutPort { line } => {
                write!(f, "button without an open port: {line}")
            }
            Self::MissingInclude { include } => {
                write!(f, "could not find included port {include}")
            }
            Self::NestedInclude { include } => write!(
                f,
                "included port {include} includes another port; only one level is merged"
            ),
            Self::MissingInput { class } => {
                write!(f, "constructor without an input, in class {class}")
            }
            Self::MissingConstructor { class } => {
                write!(f, "could not find constructor in class {class}")
            }
            Self::ExtraConstructorLines => write!(
                f,
                "may require additional configuration; constructor performs extra actions"
            ),
            Self::MalformedConstructor => write!(f, "could not extract preset call"),
            Self::UnknownPreset { preset } => write!(f, "no matching preset {preset}"),
            Self::UnhandledArgument { argument } => {
                write!(f, "unhandled preset argument {argument}")
            }
            Self::PresetArity {
                preset,
                expected,
                actual,
            } => write!(
                f,
                "preset {preset} takes {expected} arguments, constructor passes {actual}"
            ),
            Self::MissingRomBlock => write!(f, "could not find ROM block"),
            Self::DuplicateRom { melody: true } => write!(f, "melody ROM is already set"),
            Self::DuplicateRom { melody: false } => write!(f, "main ROM is already set"),
            Self::MissingRomName => write!(f, "could not find main ROM"),
            Self::MissingHomebrewBase { base } => {
                write!(f, "homebrew base device {base} is not in the manifest")
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.device, self.kind)
    }
}

/// Ordered collection of diagnostics, in detection order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, device: &str, kind: DiagnosticKind) {
        self.entries.push(Diagnostic {
            device: device.to_string(),
            kind,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics recorded for one device.
    pub fn for_device<'a>(&'a self, device: &'a str) -> impl Iterator<Item = &'a DiagnosticKind> {
        self.entries
            .iter()
            .filter(move |d| d.device == device)
            .map(|d| &d.kind)
    }
}
