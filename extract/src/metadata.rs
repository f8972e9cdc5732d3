//! `SYST(...)` system definitions: release year, maker and title per device.

use std::collections::HashMap;

use handheld_core::profile::Metadata;

use crate::scan::{find_calls, split_args, unquote};

/// Metadata for one device plus the parent set it derives from, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemEntry {
    pub metadata: Metadata,
    pub parent: Option<String>,
}

// SYST( year, name, parent, compat, machine, input, class, init, company, fullname, flags )
const ARG_YEAR: usize = 0;
const ARG_NAME: usize = 1;
const ARG_PARENT: usize = 2;
const ARG_COMPANY: usize = 8;
const ARG_FULLNAME: usize = 9;

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit() || b == b'?')
}

fn parse_system(args: &str) -> Option<(String, SystemEntry)> {
    let args = split_args(args);
    if args.len() <= ARG_FULLNAME || !is_year(args[ARG_YEAR]) {
        return None;
    }
    let name = args[ARG_NAME];
    if name.is_empty() {
        return None;
    }

    let parent = match args[ARG_PARENT] {
        "0" | "" => None,
        parent => Some(parent.to_string()),
    };
    let metadata = Metadata {
        year: args[ARG_YEAR].to_string(),
        company: unquote(args[ARG_COMPANY])?.to_string(),
        name: unquote(args[ARG_FULLNAME])?.to_string(),
    };
    Some((name.to_string(), SystemEntry { metadata, parent }))
}

/// Scan every `SYST` invocation. A later definition of the same name
/// replaces an earlier one.
pub fn scan_systems(source: &str) -> HashMap<String, SystemEntry> {
    find_calls(source, "SYST")
        .filter_map(|call| parse_system(call.args))
        .collect()
}
