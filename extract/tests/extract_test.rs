use handheld_core::action::Action;
use handheld_core::port::{NamedAction, Port};
use handheld_core::profile::{CpuType, Screen, Size};
use handheld_extract::{DiagnosticKind, Diagnostics, ExtractError, ExtractOptions, extract};
use serde_json::json;
mod common;
use common::{MINI_DRIVER, kinds, run, run_with};

fn low(action: Action) -> NamedAction {
    NamedAction::new(action, true)
}

fn high(action: Action) -> NamedAction {
    NamedAction::new(action, false)
}

// =============================================================================
// Device discovery
// =============================================================================

#[test]
fn test_profiled_devices() {
    let (manifest, _) = run(MINI_DRIVER);
    let ids: Vec<_> = manifest.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["foo", "gnw_bar", "gnw_bar_b", "tdual"]);
}

#[test]
fn test_dropped_devices_are_reported() {
    let (manifest, diags) = run(MINI_DRIVER);
    assert!(!manifest.contains_key("nrom"));
    assert_eq!(kinds(&diags, "nrom"), vec![DiagnosticKind::MissingRomBlock]);

    assert!(!manifest.contains_key("badpre"));
    assert_eq!(
        kinds(&diags, "badpre"),
        vec![DiagnosticKind::UnknownPreset {
            preset: "sm590_common".to_string()
        }]
    );
}

#[test]
fn test_preset_helpers_are_not_devices() {
    let (manifest, diags) = run(MINI_DRIVER);
    assert!(!manifest.contains_key("sm5a_common"));
    assert_eq!(
        kinds(&diags, "sm5a_common"),
        vec![
            DiagnosticKind::MissingInput {
                class: "hh_sm510_state".to_string()
            },
            DiagnosticKind::MissingConstructor {
                class: "hh_sm510_state".to_string()
            },
        ]
    );
}

// =============================================================================
// Single device, end to end
// =============================================================================

#[test]
fn test_foo_profile_json() {
    let (manifest, diags) = run(MINI_DRIVER);
    assert!(kinds(&diags, "foo").is_empty());

    let value = serde_json::to_value(&manifest["foo"]).unwrap();
    assert_eq!(
        value,
        json!({
            "device": {
                "cpu": "sm5a",
                "screen": { "type": "single", "width": 1671.0, "height": 1080.0 }
            },
            "portMap": {
                "ports": [
                    {
                        "type": "s",
                        "index": 0,
                        "bitmap": [{ "action": "button1", "activeLow": false }, null, null, null]
                    },
                    {
                        "type": "acl",
                        "bit": { "action": "service1", "activeLow": false, "name": "Reset" }
                    }
                ]
            },
            "metadata": { "year": "1980", "company": "Nintendo", "name": "Foo" },
            "rom": {
                "rom": "foo.program",
                "romHash": "1111111111111111111111111111111111111111"
            }
        })
    );
}

// =============================================================================
// Inputs: settings, includes and grounding
// =============================================================================

#[test]
fn test_parent_inputs() {
    let (manifest, diags) = run(MINI_DRIVER);
    let bar = &manifest["gnw_bar"].port_map;
    assert_eq!(
        bar.ports,
        vec![
            Port::S {
                index: 0,
                bitmap: [Some(low(Action::JoyLeft)), Some(high(Action::Unused)), None, None],
            },
            Port::S {
                index: 1,
                bitmap: [None, None, Some(high(Action::Button1)), None],
            },
            Port::B {
                bit: Some(high(Action::PowerOn).with_name("Power On/Start")),
            },
            // Factory default of a configuration switch
            Port::Ba {
                bit: Some(low(Action::Unused)),
            },
        ]
    );
    assert_eq!(bar.include, None);
    assert_eq!(bar.ground_last_index, None);

    assert_eq!(
        kinds(&diags, "gnw_bar"),
        vec![
            DiagnosticKind::UnknownAction {
                token: "IPT_COIN1".to_string()
            },
            DiagnosticKind::BitWithoutPort {
                line: "PORT_BIT( 0x01, IP_ACTIVE_HIGH, IPT_BUTTON2 )".to_string()
            },
        ]
    );
}

#[test]
fn test_include_layers_over_parent() {
    let (manifest, _) = run(MINI_DRIVER);
    let bar = &manifest["gnw_bar"].port_map;
    let revb = &manifest["gnw_bar_b"].port_map;

    assert_eq!(revb.include.as_deref(), Some("gnw_bar"));
    assert_eq!(
        revb.ports[0],
        Port::S {
            index: 0,
            bitmap: [Some(low(Action::JoyLeft)), Some(high(Action::Start1)), None, None],
        }
    );
    assert_eq!(revb.ports[1..], bar.ports[1..]);
}

#[test]
fn test_grounding_marker() {
    let (manifest, diags) = run(MINI_DRIVER);
    assert_eq!(manifest["gnw_bar_b"].port_map.ground_last_index, Some(1));
    assert_eq!(manifest["gnw_bar"].port_map.ground_last_index, None);
    assert_eq!(
        kinds(&diags, "gnw_bar_b"),
        vec![DiagnosticKind::ExtraConstructorLines]
    );
}

#[test]
fn test_custom_grounding_marker() {
    let options = ExtractOptions {
        grounding_marker: "inp_grounded".to_string(),
    };
    let (manifest, _) = run_with(MINI_DRIVER, &options);
    assert_eq!(manifest["gnw_bar_b"].port_map.ground_last_index, None);
}

#[test]
fn test_missing_inputs_leave_empty_mapping() {
    let (manifest, diags) = run(MINI_DRIVER);
    assert!(manifest["tdual"].port_map.ports.is_empty());
    assert_eq!(
        kinds(&diags, "tdual"),
        vec![DiagnosticKind::MissingInput {
            class: "tdual_state".to_string()
        }]
    );
}

// =============================================================================
// Presets, metadata and ROMs
// =============================================================================

#[test]
fn test_fractional_screen_size() {
    let (manifest, _) = run(MINI_DRIVER);
    let device = &manifest["gnw_bar"].device;
    assert_eq!(device.cpu, CpuType::Sm510);
    assert_eq!(
        device.screen,
        Screen::Single {
            width: 855.5,
            height: 1080.0
        }
    );
}

#[test]
fn test_dual_screen_with_melody() {
    let (manifest, _) = run(MINI_DRIVER);
    let tdual = &manifest["tdual"];
    assert_eq!(
        tdual.device.screen,
        Screen::DualVertical {
            top: Size::new(1920.0, 1282.0),
            bottom: Size::new(1920.0, 1230.0),
        }
    );
    assert_eq!(tdual.rom.melody.as_deref(), Some("tdual.melody"));
    assert_eq!(tdual.metadata, None);

    let value = serde_json::to_value(tdual).unwrap();
    assert!(value.get("metadata").is_none());
}

#[test]
fn test_rom_owner_prefers_parent_set() {
    let (manifest, _) = run(MINI_DRIVER);
    let bar = &manifest["gnw_bar"].rom;
    let revb = &manifest["gnw_bar_b"].rom;
    assert_eq!(bar.rom_hash, revb.rom_hash);
    assert_eq!(bar.rom_owner, None);
    assert_eq!(revb.rom_owner.as_deref(), Some("gnw_bar"));
    assert_eq!(manifest["foo"].rom.rom_owner, None);
}

#[test]
fn test_year_placeholder_kept() {
    let source = MINI_DRIVER.replace("SYST( 1980, foo,", "SYST( 198?, foo,");
    let (manifest, _) = run(&source);
    assert_eq!(manifest["foo"].metadata.as_ref().unwrap().year, "198?");
}

// =============================================================================
// Fatal errors
// =============================================================================

#[test]
fn test_duplicate_input_block_aborts() {
    let source = format!(
        "{MINI_DRIVER}\nstatic INPUT_PORTS_START( foo )\n\tPORT_START(\"IN.0\")\nINPUT_PORTS_END\n"
    );
    let mut diags = Diagnostics::new();
    let result = extract(&source, &ExtractOptions::default(), &mut diags);
    assert_eq!(
        result,
        Err(ExtractError::DuplicateInput {
            device: "foo".to_string()
        })
    );
}
