//! Homebrew titles: new programs that run on an existing handheld's
//! hardware. Each is listed in configuration and borrows the preset and
//! inputs of the device it was written for.

use handheld_core::profile::{Manifest, Metadata, Profile, RomProfile};
use serde::Deserialize;
use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HomebrewTitle {
    pub id: String,
    /// Device whose hardware the title targets.
    pub base: String,
    pub name: String,
    pub company: String,
    pub year: String,
    /// ROM file name.
    pub rom: String,
    pub sha1: String,
}

impl HomebrewTitle {
    fn profile(&self, base: &Profile) -> Profile {
        Profile {
            device: base.device.clone(),
            port_map: base.port_map.clone(),
            metadata: Some(Metadata {
                year: self.year.clone(),
                company: self.company.clone(),
                name: self.name.clone(),
            }),
            rom: RomProfile {
                rom: self.rom.clone(),
                melody: None,
                rom_hash: self.sha1.clone(),
                rom_owner: None,
            },
        }
    }
}

/// Add every title whose base device is in the manifest. A title replaces
/// any extracted profile with the same id.
pub fn apply_overlay(manifest: &mut Manifest, titles: &[HomebrewTitle], diags: &mut Diagnostics) {
    for title in titles {
        let Some(base) = manifest.get(&title.base) else {
            diags.push(
                &title.id,
                DiagnosticKind::MissingHomebrewBase {
                    base: title.base.clone(),
                },
            );
            continue;
        };
        let profile = title.profile(base);
        manifest.insert(title.id.clone(), profile);
    }
    debug!(titles = titles.len(), "applied homebrew overlay");
}

#[cfg(test)]
mod tests {
    use super::*;
    use handheld_core::port::{Port, PortMapping};
    use handheld_core::profile::{CpuType, Preset, Screen};

    fn base_profile() -> Profile {
        Profile {
            device: Preset {
                cpu: CpuType::Sm5a,
                screen: Screen::Single {
                    width: 1671.0,
                    height: 1080.0,
                },
            },
            port_map: PortMapping {
                ports: vec![Port::row(0)],
                include: None,
                ground_last_index: Some(0),
            },
            metadata: None,
            rom: RomProfile {
                rom: "ac-01".to_string(),
                melody: Some("ac-01.melody".to_string()),
                rom_hash: "7270cb2e".to_string(),
                rom_owner: Some("other".to_string()),
            },
        }
    }

    fn title(id: &str, base: &str) -> HomebrewTitle {
        HomebrewTitle {
            id: id.to_string(),
            base: base.to_string(),
            name: "Ball Redux".to_string(),
            company: "Homebrew".to_string(),
            year: "2024".to_string(),
            rom: "redux.bin".to_string(),
            sha1: "abcdef".to_string(),
        }
    }

    #[test]
    fn title_borrows_base_hardware() {
        let mut manifest = Manifest::new();
        manifest.insert("gnw_ball".to_string(), base_profile());
        let mut diags = Diagnostics::new();
        apply_overlay(&mut manifest, &[title("redux", "gnw_ball")], &mut diags);

        assert!(diags.is_empty());
        let redux = &manifest["redux"];
        let base = &manifest["gnw_ball"];
        assert_eq!(redux.device, base.device);
        assert_eq!(redux.port_map, base.port_map);
        assert_eq!(redux.metadata.as_ref().unwrap().name, "Ball Redux");
        assert_eq!(
            redux.rom,
            RomProfile {
                rom: "redux.bin".to_string(),
                melody: None,
                rom_hash: "abcdef".to_string(),
                rom_owner: None,
            }
        );
    }

    #[test]
    fn title_replaces_existing_id() {
        let mut manifest = Manifest::new();
        manifest.insert("gnw_ball".to_string(), base_profile());
        apply_overlay(
            &mut manifest,
            &[title("gnw_ball", "gnw_ball")],
            &mut Diagnostics::new(),
        );
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest["gnw_ball"].rom.rom, "redux.bin");
    }

    #[test]
    fn missing_base_is_reported() {
        let mut manifest = Manifest::new();
        let mut diags = Diagnostics::new();
        apply_overlay(&mut manifest, &[title("redux", "nowhere")], &mut diags);
        assert!(manifest.is_empty());
        assert_eq!(
            diags.for_device("redux").collect::<Vec<_>>(),
            vec![&DiagnosticKind::MissingHomebrewBase {
                base: "nowhere".to_string()
            }]
        );
    }

    #[test]
    fn deserializes_from_toml_shape() {
        let json = serde_json::json!({
            "id": "redux",
            "base": "gnw_ball",
            "name": "Ball Redux",
            "company": "Homebrew",
            "year": "2024",
            "rom": "redux.bin",
            "sha1": "abcdef",
        });
        let parsed: HomebrewTitle = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, title("redux", "gnw_ball"));
    }
}
