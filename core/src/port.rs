//! Physical input wiring of a handheld: scan rows and auxiliary lines.

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Switch positions multiplexed on one indexed row (bits 0-3 of its nibble).
pub const SLOTS_PER_ROW: usize = 4;

/// One physical switch: the action it performs and how its line reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedAction {
    pub action: Action,
    /// The switch reads as pressed when its line is at logic 0.
    pub active_low: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedAction {
    pub fn new(action: Action, active_low: bool) -> Self {
        Self {
            action,
            active_low,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A port as declared by a `PORT_START`/`PORT_MODIFY` header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Port {
    /// Indexed scan row (`IN.N`).
    S {
        index: usize,
        bitmap: [Option<NamedAction>; SLOTS_PER_ROW],
    },
    /// Reset/clear line.
    Acl { bit: Option<NamedAction> },
    B { bit: Option<NamedAction> },
    Ba { bit: Option<NamedAction> },
}

/// Canonical identity of a port within one device.
///
/// The derived ordering is the presentation order of a finalized port list:
/// indexed rows by index, then `b`, `ba`, `acl`. Merging keys off the same
/// classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PortKey {
    S(usize),
    B,
    Ba,
    Acl,
}

impl Port {
    /// An indexed row with every slot empty.
    pub fn row(index: usize) -> Self {
        Self::S {
            index,
            bitmap: Default::default(),
        }
    }

    /// An empty port for the given key.
    pub fn empty(key: PortKey) -> Self {
        match key {
            PortKey::S(index) => Self::row(index),
            PortKey::B => Self::B { bit: None },
            PortKey::Ba => Self::Ba { bit: None },
            PortKey::Acl => Self::Acl { bit: None },
        }
    }

    pub fn key(&self) -> PortKey {
        match self {
            Self::S { index, .. } => PortKey::S(*index),
            Self::B { .. } => PortKey::B,
            Self::Ba { .. } => PortKey::Ba,
            Self::Acl { .. } => PortKey::Acl,
        }
    }

    /// The action wired at `slot`. Singleton ports ignore `slot`.
    pub fn slot(&self, slot: usize) -> Option<&NamedAction> {
        match self {
            Self::S { bitmap, .. } => bitmap.get(slot).and_then(Option::as_ref),
            Self::Acl { bit } | Self::B { bit } | Self::Ba { bit } => bit.as_ref(),
        }
    }

    /// Overwrite the action at `slot`. Singleton ports ignore `slot`.
    pub fn set_slot(&mut self, slot: usize, action: NamedAction) {
        match self {
            Self::S { bitmap, .. } => {
                if let Some(entry) = bitmap.get_mut(slot) {
                    *entry = Some(action);
                }
            }
            Self::Acl { bit } | Self::B { bit } | Self::Ba { bit } => *bit = Some(action),
        }
    }

    /// An indexed row with no wired slot. Singleton ports are never vacuous.
    pub fn is_vacuous(&self) -> bool {
        match self {
            Self::S { bitmap, .. } => bitmap.iter().all(Option::is_none),
            _ => false,
        }
    }

    /// Fill every empty slot of `self` from `fallback`. Slots already set on
    /// `self` win. Ports of different keys are left untouched.
    pub fn fill_from(&mut self, fallback: &Port) {
        match (self, fallback) {
            (Self::S { bitmap, .. }, Self::S { bitmap: other, .. }) => {
                for (own, inherited) in bitmap.iter_mut().zip(other) {
                    if own.is_none() {
                        *own = inherited.clone();
                    }
                }
            }
            (Self::Acl { bit }, Self::Acl { bit: other })
            | (Self::B { bit }, Self::B { bit: other })
            | (Self::Ba { bit }, Self::Ba { bit: other })
                if bit.is_none() =>
            {
                *bit = other.clone();
            }
            _ => {}
        }
    }
}

/// The complete input wiring of one device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub ports: Vec<Port>,
    /// Device whose wiring is layered underneath this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Index of the indexed row whose last wired switch is tied to ground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_last_index: Option<usize>,
}

impl PortMapping {
    /// Drop vacuous rows and order ports by [`PortKey`].
    pub fn finalize(&mut self) {
        self.ports.retain(|port| !port.is_vacuous());
        sort_ports(&mut self.ports);
    }

    /// Index of the last indexed row in list order.
    pub fn last_row_index(&self) -> Option<usize> {
        self.ports.iter().rev().find_map(|port| match port {
            Port::S { index, .. } => Some(*index),
            _ => None,
        })
    }
}

/// Stable sort by [`PortKey`].
pub fn sort_ports(ports: &mut [Port]) {
    ports.sort_by_key(Port::key);
}
