//! Port-block parser: one device's `INPUT_PORTS_START` body → [`PortMapping`].

use handheld_core::action::Action;
use handheld_core::port::{NamedAction, Port, PortKey, PortMapping};

use super::line::{self, BitLine, LineEvent};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// How a port header name is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortName {
    Known(PortKey),
    /// `FAKE` ports exist only for the emulator's own bookkeeping.
    Fake,
    Unknown,
}

pub fn classify_port_name(name: &str) -> PortName {
    if let Some(index) = name.strip_prefix("IN.") {
        return match index.parse() {
            Ok(index) => PortName::Known(PortKey::S(index)),
            Err(_) => PortName::Unknown,
        };
    }
    match name {
        "ACL" => PortName::Known(PortKey::Acl),
        "B" => PortName::Known(PortKey::B),
        "BA" => PortName::Known(PortKey::Ba),
        "FAKE" => PortName::Fake,
        _ => PortName::Unknown,
    }
}

/// Single-pass state machine over the lines of one block. The only state is
/// the port under construction.
pub struct BlockParser<'d> {
    device: &'d str,
    current: Option<Port>,
    ports: Vec<Port>,
    include: Option<String>,
}

impl<'d> BlockParser<'d> {
    pub fn new(device: &'d str) -> Self {
        Self {
            device,
            current: None,
            ports: Vec::new(),
            include: None,
        }
    }

    pub fn feed_line(&mut self, text: &str, diags: &mut Diagnostics) {
        match line::classify(text) {
            Some(LineEvent::Header(name)) => self.open(name, diags),
            Some(LineEvent::Bit(bit)) => self.bit(bit, text, diags),
            Some(LineEvent::Setting { mask }) => self.setting(mask),
            Some(LineEvent::Include(device)) => self.include = Some(device.to_string()),
            None => {}
        }
    }

    fn open(&mut self, name: &str, diags: &mut Diagnostics) {
        self.flush();
        match classify_port_name(name) {
            PortName::Known(key) => self.current = Some(self.reopen(key)),
            PortName::Fake => {}
            PortName::Unknown => diags.push(
                self.device,
                DiagnosticKind::UnknownPort {
                    name: name.to_string(),
                },
            ),
        }
    }

    fn bit(&mut self, bit: BitLine<'_>, text: &str, diags: &mut Diagnostics) {
        let Some(action) = Action::from_token(bit.token) else {
            diags.push(
                self.device,
                DiagnosticKind::UnknownAction {
                    token: bit.token.to_string(),
                },
            );
            return;
        };
        let Some(port) = self.current.as_mut() else {
            diags.push(
                self.device,
                DiagnosticKind::BitWithoutPort {
                    line: text.trim().to_string(),
                },
            );
            return;
        };

        let mut named = NamedAction::new(action, !bit.active_high);
        if let Some(name) = bit.name {
            named = named.with_name(name);
        }
        port.set_slot(line::decode_slot(bit.mask), named);
    }

    /// The first setting seen for an empty slot is the factory default; it
    /// becomes an `unused` placeholder. Later settings are alternatives and
    /// are dropped.
    fn setting(&mut self, mask: u32) {
        let Some(port) = self.current.as_mut() else {
            return;
        };
        let slot = line::decode_slot(mask);
        if port.slot(slot).is_some() {
            return;
        }
        let active_low = match port {
            Port::S { .. } => false,
            _ => mask == 1,
        };
        port.set_slot(slot, NamedAction::new(Action::Unused, active_low));
    }

    /// A header for a key already emitted in this block continues that port,
    /// so later bits overwrite its slots and settings see them as filled.
    fn reopen(&mut self, key: PortKey) -> Port {
        match self.ports.iter().position(|p| p.key() == key) {
            Some(index) => self.ports.remove(index),
            None => Port::empty(key),
        }
    }

    /// Move the port under construction onto the output list.
    fn flush(&mut self) {
        if let Some(port) = self.current.take() {
            self.ports.push(port);
        }
    }

    pub fn finish(mut self) -> PortMapping {
        self.flush();
        let mut mapping = PortMapping {
            ports: self.ports,
            include: self.include,
            ground_last_index: None,
        };
        mapping.finalize();
        mapping
    }
}

/// Parse one block body for `device`.
pub fn parse_block(body: &str, device: &str, diags: &mut Diagnostics) -> PortMapping {
    let mut parser = BlockParser::new(device);
    for text in body.trim().lines() {
        parser.feed_line(text, diags);
    }
    parser.finish()
}
