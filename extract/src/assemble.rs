//! Profile assembly: ties inputs, presets, metadata and ROM identity together
//! for every device a driver class declares.

use handheld_core::port::PortMapping;
use handheld_core::profile::{Manifest, Metadata, Preset, Profile, RomProfile};
use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::driver::{DriverClass, constructor_body, scan_classes};
use crate::error::Result;
use crate::input::{self, InputTable, apply_grounding, marker_observed};
use crate::metadata::scan_systems;
use crate::preset::resolve_preset;
use crate::rom::{OwnerCandidate, RomIdentity, RomIndex, rom_owners};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Zero-argument call that marks the last input row as grounded.
    pub grounding_marker: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            grounding_marker: input::ground::DEFAULT_MARKER.to_string(),
        }
    }
}

/// A device that made it through preset and ROM resolution, before ROM
/// ownership is known.
struct Candidate<'a> {
    device: &'a str,
    preset: Preset,
    port_map: PortMapping,
    metadata: Option<Metadata>,
    has_parent: bool,
    identity: RomIdentity,
    position: usize,
}

fn port_map_for(
    inputs: &InputTable,
    class: &DriverClass<'_>,
    device: &str,
    diags: &mut Diagnostics,
) -> PortMapping {
    if let Some(mapping) = inputs
        .get(device)
        .or_else(|| inputs.get(class.stem()))
    {
        return mapping.clone();
    }
    diags.push(
        device,
        DiagnosticKind::MissingInput {
            class: class.name.to_string(),
        },
    );
    PortMapping::default()
}

/// Extract the manifest from a complete driver source file.
///
/// Recoverable anomalies are pushed into `diags`; the only fatal condition
/// is a duplicated input block.
pub fn extract(source: &str, options: &ExtractOptions, diags: &mut Diagnostics) -> Result<Manifest> {
    let systems = scan_systems(source);
    let raw = input::parse_inputs(source, diags)?;
    let inputs = input::collapse(&raw, diags);
    let roms = RomIndex::scan(source);

    let mut candidates = Vec::new();
    for class in scan_classes(source) {
        for &device in &class.devices {
            let mut port_map = port_map_for(&inputs, &class, device, diags);

            let Some(body) = constructor_body(source, class.name, device) else {
                diags.push(
                    device,
                    DiagnosticKind::MissingConstructor {
                        class: class.name.to_string(),
                    },
                );
                continue;
            };
            let Some(preset) = resolve_preset(body, device, diags) else {
                continue;
            };
            apply_grounding(
                &mut port_map,
                marker_observed(body, &options.grounding_marker),
            );

            let Some(identity) = roms.identity(device, diags) else {
                continue;
            };
            let position = roms.block(device).map_or(usize::MAX, |block| block.position);
            let system = systems.get(device);

            candidates.push(Candidate {
                device,
                preset,
                port_map,
                metadata: system.map(|s| s.metadata.clone()),
                has_parent: system.is_some_and(|s| s.parent.is_some()),
                identity,
                position,
            });
        }
    }

    let mut owners = {
        let owner_candidates: Vec<_> = candidates
            .iter()
            .map(|c| OwnerCandidate {
                device: c.device,
                sha1: &c.identity.rom.sha1,
                has_parent: c.has_parent,
                position: c.position,
            })
            .collect();
        rom_owners(&owner_candidates)
    };

    let mut manifest = Manifest::new();
    for candidate in candidates {
        let RomIdentity { rom, melody } = candidate.identity;
        let profile = Profile {
            device: candidate.preset,
            port_map: candidate.port_map,
            metadata: candidate.metadata,
            rom: RomProfile {
                rom: rom.name,
                melody: melody.map(|m| m.name),
                rom_hash: rom.sha1,
                rom_owner: owners.remove(candidate.device),
            },
        };
        manifest.insert(candidate.device.to_string(), profile);
    }

    debug!(devices = manifest.len(), "assembled profiles");
    Ok(manifest)
}
