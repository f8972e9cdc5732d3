//! Preset resolution from a device constructor body.
//!
//! The first statement of every constructor is a call to one of the shared
//! configuration helpers, `<helper>(config, w, h, ...)`. The helper fixes the
//! CPU; its numeric arguments are the screen artwork dimensions.

use handheld_core::profile::{CpuType, Preset};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::registry::{self, Layout, PresetEntry};
use crate::scan::{Cursor, matching_paren, split_args};

inventory::submit! { PresetEntry::new("sm5a_common", CpuType::Sm5a, Layout::Single) }
inventory::submit! { PresetEntry::new("kb1013vk12_common", CpuType::Kb1013vk12, Layout::Single) }
inventory::submit! { PresetEntry::new("sm510_common", CpuType::Sm510, Layout::Single) }
inventory::submit! { PresetEntry::new("sm511_common", CpuType::Sm511, Layout::Single) }
inventory::submit! { PresetEntry::new("sm530_common", CpuType::Sm530, Layout::Single) }

// Two-panel units
inventory::submit! { PresetEntry::new("sm510_dualh", CpuType::Sm510, Layout::DualHorizontal) }
inventory::submit! { PresetEntry::new("sm510_dualv", CpuType::Sm510, Layout::DualVertical) }
inventory::submit! { PresetEntry::new("sm511_dualv", CpuType::Sm511, Layout::DualVertical) }
inventory::submit! { PresetEntry::new("sm512_dualv", CpuType::Sm512, Layout::DualVertical) }

// Tiger Electronics
inventory::submit! { PresetEntry::new("sm510_tiger", CpuType::Sm510Tiger, Layout::Single) }
inventory::submit! { PresetEntry::new("sm511_tiger1bit", CpuType::Sm511Tiger1Bit, Layout::Single) }
inventory::submit! { PresetEntry::new("sm511_tiger2bit", CpuType::Sm511Tiger2Bit, Layout::Single) }

/// Numeric value of a preset argument: an integer, or `a/b` which is
/// evaluated (artwork sizes are sometimes written as fractions).
fn numeric_arg(arg: &str) -> Option<f64> {
    fn digits(s: &str) -> Option<u64> {
        (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .then(|| s.parse().ok())
            .flatten()
    }

    if let Some((dividend, divisor)) = arg.split_once('/') {
        let dividend = digits(dividend)?;
        let divisor_digits = divisor
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let divisor = digits(&divisor[..divisor_digits])?;
        if divisor == 0 {
            return None;
        }
        return Some(dividend as f64 / divisor as f64);
    }

    let magnitude = arg.strip_prefix('-').unwrap_or(arg);
    let value = digits(magnitude)? as f64;
    Some(if arg.starts_with('-') { -value } else { value })
}

/// Split the first constructor line into helper name and the arguments after
/// `config`.
fn preset_call(line: &str) -> Option<(&str, Vec<&str>)> {
    let mut cursor = Cursor::new(line, 0);
    cursor.skip_ws();
    let name = cursor.ident()?;
    cursor.skip_ws();
    let open = cursor.pos();
    let close = matching_paren(line, open)?;
    match split_args(&line[open + 1..close])[..] {
        ["config", ref rest @ ..] => Some((name, rest.to_vec())),
        _ => None,
    }
}

/// Resolve the preset a constructor body configures.
pub fn resolve_preset(body: &str, device: &str, diags: &mut Diagnostics) -> Option<Preset> {
    let mut lines = body.trim().lines();
    let first = lines.next().unwrap_or_default();
    if lines.next().is_some() {
        diags.push(device, DiagnosticKind::ExtraConstructorLines);
    }

    let Some((name, args)) = preset_call(first) else {
        diags.push(device, DiagnosticKind::MalformedConstructor);
        return None;
    };
    let Some(entry) = registry::find(name) else {
        diags.push(
            device,
            DiagnosticKind::UnknownPreset {
                preset: name.to_string(),
            },
        );
        return None;
    };

    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        let Some(value) = numeric_arg(arg) else {
            diags.push(
                device,
                DiagnosticKind::UnhandledArgument {
                    argument: arg.to_string(),
                },
            );
            return None;
        };
        values.push(value);
    }

    let preset = entry.build(&values);
    if preset.is_none() {
        diags.push(
            device,
            DiagnosticKind::PresetArity {
                preset: entry.name.to_string(),
                expected: entry.layout.arity(),
                actual: values.len(),
            },
        );
    }
    preset
}
