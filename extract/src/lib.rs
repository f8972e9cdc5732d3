//! Handheld profile extraction.
//!
//! Reads the driver source for Sharp SM5xx-family LCD handhelds and recovers,
//! per device, the input wiring, CPU and screen preset, ROM identity and
//! release metadata. The result is a [`Manifest`](handheld_core::profile::Manifest)
//! ready to be serialized.
//!
//! Extraction is best effort: anything the scanners cannot make sense of is
//! recorded as a [`Diagnostic`](diagnostics::Diagnostic) and the affected
//! device is skipped or left partial.

pub mod assemble;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod homebrew;
pub mod input;
pub mod metadata;
pub mod preset;
pub mod registry;
pub mod rom;
pub mod scan;

pub use assemble::{ExtractOptions, extract};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{ExtractError, Result};
pub use homebrew::{HomebrewTitle, apply_overlay};
