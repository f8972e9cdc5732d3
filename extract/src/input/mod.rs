//! Input port extraction: locate every `INPUT_PORTS_START` block, parse it
//! into a [`PortMapping`], then resolve `PORT_INCLUDE` layering.

pub mod block;
pub mod collapse;
pub mod ground;
pub mod line;

use std::collections::BTreeMap;

use handheld_core::port::PortMapping;
use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::error::{ExtractError, Result};
use crate::scan::find_calls;

pub use block::parse_block;
pub use collapse::collapse;
pub use ground::{apply_grounding, marker_observed};

/// Device id → port mapping.
pub type InputTable = BTreeMap<String, PortMapping>;

/// One `INPUT_PORTS_START( name ) ... INPUT_PORTS_END` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputBlock<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

/// All input blocks in source order. A block with no terminating
/// `INPUT_PORTS_END` is ignored.
pub fn input_blocks(source: &str) -> impl Iterator<Item = InputBlock<'_>> {
    find_calls(source, "INPUT_PORTS_START").filter_map(|call| {
        let name = call.args.trim();
        let rest = &source[call.end..];
        let end = rest.find("INPUT_PORTS_END")?;
        (!name.is_empty()).then_some(InputBlock {
            name,
            body: &rest[..end],
        })
    })
}

/// Parse every input block into the raw (unresolved) table.
///
/// Two blocks with the same name abort the whole run.
pub fn parse_inputs(source: &str, diags: &mut Diagnostics) -> Result<InputTable> {
    let mut table = InputTable::new();
    for block in input_blocks(source) {
        if table.contains_key(block.name) {
            return Err(ExtractError::DuplicateInput {
                device: block.name.to_string(),
            });
        }
        let mapping = parse_block(block.body, block.name, diags);
        table.insert(block.name.to_string(), mapping);
    }
    debug!(blocks = table.len(), "parsed input blocks");
    Ok(table)
}
