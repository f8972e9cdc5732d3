//! Driver class discovery.
//!
//! Devices are found through their driver state classes: each
//! `class foo_state : ...` declares one constructor per device it hosts,
//! `void device(machine_config &config);`, and the definition
//! `void foo_state::device(machine_config &config) { ... }` holds the preset
//! call and any extra wiring.

use crate::scan::{Cursor, word_positions};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverClass<'a> {
    /// Full class name, e.g. `gnw_ball_state`.
    pub name: &'a str,
    /// Device constructors declared in the class body, in order.
    pub devices: Vec<&'a str>,
}

impl DriverClass<'_> {
    /// Class name without the `_state` suffix. Shared input blocks are
    /// often named after it.
    pub fn stem(&self) -> &str {
        self.name.strip_suffix("_state").unwrap_or(self.name)
    }
}

/// After `void`, match `<name>(machine_config &config` and return `name`.
fn constructor_decl(source: &str, after_void: usize) -> Option<&str> {
    let mut cursor = Cursor::new(source, after_void);
    if cursor.skip_ws() == 0 {
        return None;
    }
    let name = cursor.ident()?;
    let matched = cursor.eat_ws("(")
        && cursor.eat_ws("machine_config")
        && cursor.eat_ws("&")
        && cursor.eat_ws("config");
    matched.then_some(name)
}

/// After `class`, match `<Name>_state :` and return the class name with the
/// offset just past the colon.
fn class_header(source: &str, after_class: usize) -> Option<(&str, usize)> {
    let mut cursor = Cursor::new(source, after_class);
    if cursor.skip_ws() == 0 {
        return None;
    }
    let name = cursor.ident()?;
    if !name.ends_with("_state") || cursor.skip_ws() == 0 || !cursor.eat(":") {
        return None;
    }
    Some((name, cursor.pos()))
}

/// Every driver state class in source order. A class body runs to the first
/// `};` after its header.
pub fn scan_classes(source: &str) -> Vec<DriverClass<'_>> {
    let mut classes = Vec::new();
    let mut resume = 0;
    for at in word_positions(source, "class") {
        if at < resume {
            continue;
        }
        let Some((name, body_start)) = class_header(source, at + "class".len()) else {
            continue;
        };
        let Some(len) = source[body_start..].find("};") else {
            continue;
        };
        let body_end = body_start + len;
        let body = &source[body_start..body_end];

        let devices = word_positions(body, "void")
            .filter_map(|void| constructor_decl(body, void + "void".len()))
            .collect();
        classes.push(DriverClass { name, devices });
        resume = body_end;
    }
    classes
}

/// Body of `void <class>::<device>(machine_config &config) { ... }`: the text
/// after `{` up to the first `}` preceded by whitespace, trimmed.
pub fn constructor_body<'a>(source: &'a str, class: &str, device: &str) -> Option<&'a str> {
    word_positions(source, "void").find_map(|at| {
        let mut cursor = Cursor::new(source, at + "void".len());
        if cursor.skip_ws() == 0 {
            return None;
        }
        let matched = cursor.eat(class)
            && cursor.eat("::")
            && cursor.eat(device)
            && cursor.eat_ws("(")
            && cursor.eat_ws("machine_config")
            && cursor.eat_ws("&")
            && cursor.eat_ws("config")
            && cursor.eat_ws(")")
            && cursor.eat_ws("{");
        if !matched {
            return None;
        }

        let open = cursor.pos();
        let body = cursor.rest();
        let close = body
            .match_indices('}')
            .map(|(offset, _)| offset)
            .find(|&offset| offset > 0 && body.as_bytes()[offset - 1].is_ascii_whitespace())?;
        Some(source[open..open + close].trim())
    })
}
