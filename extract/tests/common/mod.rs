use handheld_core::profile::Manifest;
use handheld_extract::{DiagnosticKind, Diagnostics, ExtractOptions, extract};

pub const MINI_DRIVER: &str = include_str!("../fixtures/mini_sm510.cpp");

/// Run extraction over `source` with default options.
pub fn run(source: &str) -> (Manifest, Diagnostics) {
    run_with(source, &ExtractOptions::default())
}

pub fn run_with(source: &str, options: &ExtractOptions) -> (Manifest, Diagnostics) {
    let mut diags = Diagnostics::new();
    let manifest = extract(source, options, &mut diags).expect("extraction aborted");
    (manifest, diags)
}

/// Diagnostics recorded for `device`, cloned for comparison.
pub fn kinds(diags: &Diagnostics, device: &str) -> Vec<DiagnosticKind> {
    diags.for_device(device).cloned().collect()
}
