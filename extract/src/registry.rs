//! Preset registry.
//!
//! Each configuration preset a driver constructor can call self-registers via
//! [`inventory::submit!`] with a [`PresetEntry`]: the helper's name, the CPU it
//! installs and the screen layout its numeric arguments describe. Resolution
//! looks presets up by name without any central list.

use handheld_core::profile::{CpuType, Preset, Screen, Size};

/// How a preset's numeric arguments map onto screen sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `(width, height)`
    Single,
    /// `(left width, left height, right width, right height)`
    DualHorizontal,
    /// `(top width, top height, bottom width, bottom height)`
    DualVertical,
}

impl Layout {
    /// Number of numeric arguments after `config`.
    pub fn arity(self) -> usize {
        match self {
            Self::Single => 2,
            Self::DualHorizontal | Self::DualVertical => 4,
        }
    }
}

/// A configuration helper as called from device constructors.
pub struct PresetEntry {
    /// Helper name, e.g. `sm510_common`.
    pub name: &'static str,
    pub cpu: CpuType,
    pub layout: Layout,
}

impl PresetEntry {
    pub const fn new(name: &'static str, cpu: CpuType, layout: Layout) -> Self {
        Self { name, cpu, layout }
    }

    /// Build the preset from the constructor's numeric arguments. Returns
    /// `None` when the argument count does not fit the layout.
    pub fn build(&self, args: &[f64]) -> Option<Preset> {
        if args.len() != self.layout.arity() {
            return None;
        }
        let screen = match self.layout {
            Layout::Single => Screen::Single {
                width: args[0],
                height: args[1],
            },
            Layout::DualHorizontal => Screen::DualHorizontal {
                left: Size::new(args[0], args[1]),
                right: Size::new(args[2], args[3]),
            },
            Layout::DualVertical => Screen::DualVertical {
                top: Size::new(args[0], args[1]),
                bottom: Size::new(args[2], args[3]),
            },
        };
        Some(Preset {
            cpu: self.cpu,
            screen,
        })
    }
}

inventory::collect!(PresetEntry);

/// All registered presets, sorted by name.
pub fn all() -> Vec<&'static PresetEntry> {
    let mut entries: Vec<_> = inventory::iter::<PresetEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a preset by its helper name.
pub fn find(name: &str) -> Option<&'static PresetEntry> {
    inventory::iter::<PresetEntry>
        .into_iter()
        .find(|e| e.name == name)
}
