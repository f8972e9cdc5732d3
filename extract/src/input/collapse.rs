//! `PORT_INCLUDE` resolution.
//!
//! Each device that includes another is flattened against the included
//! device's *raw* mapping, so the result does not depend on table order.
//! Only one level is merged; a second level is reported and left alone.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use handheld_core::port::{Port, PortKey, PortMapping};

use super::InputTable;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Resolve every `include` in `raw`. The `include` field is kept on the
/// output; mappings without one pass through unchanged.
pub fn collapse(raw: &InputTable, diags: &mut Diagnostics) -> InputTable {
    raw.iter()
        .map(|(device, mapping)| (device.clone(), resolve(device, mapping, raw, diags)))
        .collect()
}

fn resolve(
    device: &str,
    mapping: &PortMapping,
    raw: &InputTable,
    diags: &mut Diagnostics,
) -> PortMapping {
    let Some(include) = mapping.include.as_deref() else {
        return mapping.clone();
    };
    let Some(included) = raw.get(include) else {
        diags.push(
            device,
            DiagnosticKind::MissingInclude {
                include: include.to_string(),
            },
        );
        return mapping.clone();
    };
    if included.include.is_some() {
        diags.push(
            device,
            DiagnosticKind::NestedInclude {
                include: include.to_string(),
            },
        );
    }

    PortMapping {
        ports: merge_ports(&mapping.ports, &included.ports),
        ..mapping.clone()
    }
}

/// Layer `own` over `inherited`, slot by slot. The result is ordered by
/// [`PortKey`].
pub fn merge_ports(own: &[Port], inherited: &[Port]) -> Vec<Port> {
    let mut merged: BTreeMap<PortKey, Port> =
        own.iter().map(|port| (port.key(), port.clone())).collect();

    for port in inherited {
        match merged.entry(port.key()) {
            Entry::Vacant(slot) => {
                slot.insert(port.clone());
            }
            Entry::Occupied(mut slot) => slot.get_mut().fill_from(port),
        }
    }

    merged.into_values().collect()
}
