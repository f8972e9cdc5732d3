//! Line recognizers for input port blocks.
//!
//! Each line of a block is classified on its own into at most one
//! [`LineEvent`]. Shapes are tried in a fixed order: port header, bit
//! definition, configuration setting, include.

use crate::scan::{find_calls, is_hex_literal, parse_hex_literal, split_args, unquote};

/// Polarity token that marks a switch as active-high. Anything else is active-low.
pub const ACTIVE_HIGH: &str = "IP_ACTIVE_HIGH";

/// A `PORT_BIT( mask, polarity, type )` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitLine<'a> {
    pub mask: u32,
    pub active_high: bool,
    pub token: &'a str,
    /// `PORT_NAME("...")` following the bit definition.
    pub name: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// `PORT_START("name")` or `PORT_MODIFY("name")`.
    Header(&'a str),
    Bit(BitLine<'a>),
    /// `PORT_CONFSETTING( mask, ... )`.
    Setting { mask: u32 },
    /// `PORT_INCLUDE( device )`.
    Include(&'a str),
}

/// Slot of the lowest set bit among bits 0-3. Masks with none of those bits
/// set saturate to slot 3.
pub fn decode_slot(mask: u32) -> usize {
    (0..3).find(|&bit| mask & (1 << bit) != 0).unwrap_or(3)
}

pub fn classify(line: &str) -> Option<LineEvent<'_>> {
    header(line)
        .or_else(|| bit(line))
        .or_else(|| setting(line))
        .or_else(|| include(line))
}

fn header(line: &str) -> Option<LineEvent<'_>> {
    // PORT_START only counts as the first statement on a line
    let start = find_calls(line, "PORT_START")
        .next()
        .filter(|call| line[..call.start].trim().is_empty());
    let call = start.or_else(|| find_calls(line, "PORT_MODIFY").next())?;
    unquote(call.args).map(LineEvent::Header)
}

fn bit(line: &str) -> Option<LineEvent<'_>> {
    let call = find_calls(line, "PORT_BIT").next()?;
    let args = split_args(call.args);
    let [mask, polarity, token, ..] = args[..] else {
        return None;
    };
    if !is_hex_literal(mask) {
        return None;
    }

    let name = find_calls(&line[call.end..], "PORT_NAME")
        .next()
        .and_then(|name| unquote(name.args));

    Some(LineEvent::Bit(BitLine {
        mask: parse_hex_literal(mask),
        active_high: polarity == ACTIVE_HIGH,
        token,
        name,
    }))
}

fn setting(line: &str) -> Option<LineEvent<'_>> {
    let call = find_calls(line, "PORT_CONFSETTING").next()?;
    match split_args(call.args)[..] {
        [mask, _, ..] if is_hex_literal(mask) => Some(LineEvent::Setting {
            mask: parse_hex_literal(mask),
        }),
        _ => None,
    }
}

fn include(line: &str) -> Option<LineEvent<'_>> {
    let call = find_calls(line, "PORT_INCLUDE").next()?;
    let device = call.args.trim();
    (!device.is_empty()).then_some(LineEvent::Include(device))
}
