//! Grounded last input: on some PCB variants the last wired row has no
//! switch and reads as tied to ground. Drivers flag this with a
//! zero-argument call in the device constructor.

use handheld_core::port::PortMapping;

use crate::scan::find_calls;

/// Marker call used by the driver source when not configured otherwise.
pub const DEFAULT_MARKER: &str = "inp_fixed_last";

/// True when `body` contains `marker()` as a call with no arguments.
pub fn marker_observed(body: &str, marker: &str) -> bool {
    find_calls(body, marker).any(|call| call.args.trim().is_empty())
}

/// Record the last indexed row as grounded when the marker was seen.
/// Singleton ports are never grounded; a mapping with no rows is untouched.
pub fn apply_grounding(mapping: &mut PortMapping, observed: bool) {
    if !observed || mapping.ports.is_empty() {
        return;
    }
    if let Some(index) = mapping.last_row_index() {
        mapping.ground_last_index = Some(index);
    }
}
