//! Per-device profile as written to the manifest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::port::PortMapping;

/// Manifest: device id → profile, ordered by id.
pub type Manifest = BTreeMap<String, Profile>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuType {
    Sm5a,
    Kb1013vk12,
    Sm510,
    Sm511,
    Sm512,
    Sm530,
    #[serde(rename = "sm510_tiger")]
    Sm510Tiger,
    #[serde(rename = "sm511_tiger1bit")]
    Sm511Tiger1Bit,
    #[serde(rename = "sm511_tiger2bit")]
    Sm511Tiger2Bit,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// LCD arrangement. Dual layouts carry one size per panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Screen {
    Single { width: f64, height: f64 },
    DualVertical { top: Size, bottom: Size },
    DualHorizontal { left: Size, right: Size },
}

/// CPU and screen as selected by the driver's configuration preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub cpu: CpuType,
    pub screen: Screen,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Kept as text: some release years are only partially known (`198?`).
    pub year: String,
    pub company: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RomProfile {
    /// Main program ROM file name.
    pub rom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melody: Option<String>,
    /// SHA1 of the main program ROM.
    pub rom_hash: String,
    /// Device that canonically owns this ROM content, when it is shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rom_owner: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub device: Preset,
    pub port_map: PortMapping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub rom: RomProfile,
}
