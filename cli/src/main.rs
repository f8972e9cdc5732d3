use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use handheld_core::profile::Manifest;
use handheld_extract::{Diagnostics, apply_overlay, extract};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{info, warn};

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "handheld-manifest")]
#[command(about = "Extract handheld profiles from an SM5xx LCD driver source file", long_about = None)]
struct Args {
    /// Driver source file
    source: PathBuf,

    /// Configuration file (default: <config dir>/handheld-manifest/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path, overriding the configured one
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print diagnostics
    #[arg(short, long)]
    quiet: bool,
}

/// Pretty JSON with four-space indentation.
fn to_json(manifest: &Manifest) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    manifest.serialize(&mut serializer)?;
    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    run(args)
}

/// Extract, overlay and write the manifest. Nothing is written when
/// extraction fails.
fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let output = args.output.unwrap_or_else(|| config.output.clone());

    let source = fs::read_to_string(&args.source)
        .with_context(|| format!("failed to read driver source {}", args.source.display()))?;

    let mut diags = Diagnostics::new();
    let mut manifest = extract(&source, &config.extract_options(), &mut diags)
        .with_context(|| format!("extraction of {} aborted", args.source.display()))?;
    apply_overlay(&mut manifest, &config.homebrew, &mut diags);

    if !args.quiet {
        for diag in diags.iter() {
            warn!("{diag}");
        }
    }

    fs::write(&output, to_json(&manifest)?)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        devices = manifest.len(),
        diagnostics = diags.len(),
        "wrote {}",
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn source_is_required() {
        assert!(Args::try_parse_from(["handheld-manifest"]).is_err());
        assert!(Args::try_parse_from(["handheld-manifest", "a.cpp", "b.cpp"]).is_err());
    }

    #[test]
    fn flags() {
        let args =
            Args::try_parse_from(["handheld-manifest", "hh_sm510.cpp", "-q", "-o", "out.json"])
                .unwrap();
        assert_eq!(args.source, PathBuf::from("hh_sm510.cpp"));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.quiet);
        assert!(args.config.is_none());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn args_for(dir: &std::path::Path, source: &str) -> Args {
        let source_path = dir.join("driver.cpp");
        let config_path = dir.join("config.toml");
        fs::write(&source_path, source).unwrap();
        fs::write(&config_path, "").unwrap();
        Args {
            source: source_path,
            config: Some(config_path),
            output: Some(dir.join("manifest.json")),
            quiet: true,
        }
    }

    const BLOCK: &str = "INPUT_PORTS_START( foo )\n\tPORT_START(\"IN.0\")\n\tPORT_BIT( 0x01, IP_ACTIVE_HIGH, IPT_BUTTON1 )\nINPUT_PORTS_END\n";

    #[test]
    fn duplicate_block_writes_no_manifest() {
        let dir = scratch_dir("handheld_manifest_test_duplicate");
        let args = args_for(&dir, &format!("{BLOCK}{BLOCK}"));
        let output = args.output.clone().unwrap();

        let err = run(args).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate input definition for foo"));
        assert!(!output.exists());
    }

    #[test]
    fn clean_run_writes_manifest() {
        let dir = scratch_dir("handheld_manifest_test_clean");
        let args = args_for(&dir, BLOCK);
        let output = args.output.clone().unwrap();

        run(args).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn json_uses_four_space_indent() {
        let manifest = Manifest::new();
        assert_eq!(to_json(&manifest).unwrap(), b"{}");

        let text = String::from_utf8(to_json(&serde_json::from_str(EMPTY_PORTS).unwrap()).unwrap())
            .unwrap();
        assert!(text.starts_with("{\n    \"dev\": {\n        \"device\""));
    }

    const EMPTY_PORTS: &str = r#"{
        "dev": {
            "device": { "cpu": "sm510", "screen": { "type": "single", "width": 1.0, "height": 2.0 } },
            "portMap": { "ports": [] },
            "rom": { "rom": "dev.program", "romHash": "00" }
        }
    }"#;
}
