//! ROM identity: which program (and melody) ROM each device loads, by SHA1,
//! and which device canonically owns ROM content shared by several devices.

use std::collections::HashMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::scan::{find_calls, split_args, unquote};

const MAIN_TAG: &str = "maincpu";
const MELODY_TAG: &str = "maincpu:melody";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RomFile {
    pub name: String,
    pub sha1: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RomIdentity {
    pub rom: RomFile,
    pub melody: Option<RomFile>,
}

/// One `ROM_START( device ) ... ROM_END` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RomBlock<'a> {
    /// Offset of the block in the source; earlier blocks win ownership ties.
    pub position: usize,
    pub body: &'a str,
}

/// ROM blocks by device name. The first block for a name is kept.
pub struct RomIndex<'a> {
    blocks: HashMap<&'a str, RomBlock<'a>>,
}

impl<'a> RomIndex<'a> {
    pub fn scan(source: &'a str) -> Self {
        let mut blocks = HashMap::new();
        for call in find_calls(source, "ROM_START") {
            let name = call.args.trim();
            let rest = &source[call.end..];
            let Some(end) = rest.find("ROM_END") else {
                continue;
            };
            blocks.entry(name).or_insert(RomBlock {
                position: call.start,
                body: &rest[..end],
            });
        }
        Self { blocks }
    }

    pub fn block(&self, device: &str) -> Option<RomBlock<'a>> {
        self.blocks.get(device).copied()
    }

    /// ROM identity of `device`, or `None` (with a diagnostic) when its
    /// block is missing or ambiguous.
    pub fn identity(&self, device: &str, diags: &mut Diagnostics) -> Option<RomIdentity> {
        let Some(block) = self.block(device) else {
            diags.push(device, DiagnosticKind::MissingRomBlock);
            return None;
        };
        block.identity(device, diags)
    }
}

impl RomBlock<'_> {
    pub fn identity(&self, device: &str, diags: &mut Diagnostics) -> Option<RomIdentity> {
        let mut rom = None;
        let mut melody = None;

        for region in find_calls(self.body, "ROM_REGION") {
            let args = split_args(region.args);
            let Some(tag) = args.get(1).and_then(|arg| unquote(arg)) else {
                continue;
            };
            let is_melody = if tag.eq_ignore_ascii_case(MELODY_TAG) {
                true
            } else if tag.eq_ignore_ascii_case(MAIN_TAG) {
                false
            } else {
                continue;
            };
            let Some(file) = load_after(&self.body[region.end..]) else {
                continue;
            };

            let target = if is_melody { &mut melody } else { &mut rom };
            if target.is_some() {
                diags.push(device, DiagnosticKind::DuplicateRom { melody: is_melody });
                return None;
            }
            *target = Some(file);
        }

        let Some(rom) = rom else {
            diags.push(device, DiagnosticKind::MissingRomName);
            return None;
        };
        Some(RomIdentity { rom, melody })
    }
}

/// The `ROM_LOAD` that directly follows a region: its file name and the
/// `SHA1(...)` on the same line.
fn load_after(text: &str) -> Option<RomFile> {
    let text = text.trim_start();
    let load = find_calls(text, "ROM_LOAD").next().filter(|call| call.start == 0)?;
    let name = split_args(load.args).first().and_then(|arg| unquote(arg))?;

    let line = text.lines().next().unwrap_or_default();
    let sha1 = find_calls(line, "SHA1").next()?.args.trim();
    Some(RomFile {
        name: name.to_string(),
        sha1: sha1.to_string(),
    })
}

/// A device taking part in ROM ownership resolution.
#[derive(Clone, Copy, Debug)]
pub struct OwnerCandidate<'a> {
    pub device: &'a str,
    pub sha1: &'a str,
    /// The device is declared as a clone of another set.
    pub has_parent: bool,
    pub position: usize,
}

/// Group devices by ROM hash and pick each group's canonical owner:
/// parent sets before clones, then earliest ROM block in the source, then
/// name. Returns device → owner for every device that is not its group's owner.
pub fn rom_owners(candidates: &[OwnerCandidate<'_>]) -> HashMap<String, String> {
    let mut groups: HashMap<&str, Vec<&OwnerCandidate<'_>>> = HashMap::new();
    for candidate in candidates {
        groups.entry(candidate.sha1).or_default().push(candidate);
    }

    let mut owners = HashMap::new();
    for members in groups.values() {
        let Some(owner) = members
            .iter()
            .min_by_key(|c| (c.has_parent, c.position, c.device))
        else {
            continue;
        };
        for member in members {
            if member.device != owner.device {
                owners.insert(member.device.to_string(), owner.device.to_string());
            }
        }
    }
    owners
}
