//! File-backed preset tests.

use std::fs;

use tempfile::TempDir;
use threeverb_config::{
    ConfigError, Preset, PresetVariant, factory_presets, list_presets_in_dir,
    preset_name_from_path, resolve_preset_in,
};
use threeverb_core::ReverbParameters;
use threeverb_processor::{BusVariant, ReverbProcessor, ReverbShared};

#[test]
fn save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("room.toml");

    let preset = Preset::new("Room")
        .with_description("Tight and bright")
        .with_variant(PresetVariant::Ambisonic)
        .with_param("size", 0.25)
        .with_param("damp", 0.75)
        .with_param("freeze", true);
    preset.save(&path).unwrap();

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, preset);
    assert_eq!(BusVariant::from(loaded.variant.unwrap()), BusVariant::Ambisonic);
}

#[test]
fn applying_preset_reaches_processor_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.toml");
    fs::write(
        &path,
        "name = \"Wide\"\n\n[params]\nwidth = 0.0\nwet = 0.25\nfreeze = true\n",
    )
    .unwrap();

    let processor = ReverbProcessor::new(BusVariant::MonoStereo);
    Preset::load(&path)
        .unwrap()
        .apply(processor.shared())
        .unwrap();

    let snapshot = processor.shared().snapshot();
    assert_eq!(snapshot.width, 0.0);
    assert_eq!(snapshot.wet_level, 0.25);
    assert!(snapshot.freeze_mode);
    assert_eq!(snapshot.room_size, ReverbParameters::default().room_size);
}

#[test]
fn invalid_preset_leaves_bridge_untouched() {
    let shared = ReverbShared::new(None);
    let before = shared.snapshot();

    let bad = Preset::new("Bad").with_param("size", 0.9).with_param("wet", 1.5);
    assert!(matches!(
        bad.apply(&shared),
        Err(ConfigError::InvalidValue { .. })
    ));

    let unknown = Preset::new("Unknown").with_param("predelay", 0.2);
    assert!(matches!(
        unknown.apply(&shared),
        Err(ConfigError::UnknownParameter(_))
    ));

    assert_eq!(shared.snapshot(), before);
}

#[test]
fn captured_state_survives_file() {
    let dir = TempDir::new().unwrap();
    let shared = ReverbShared::new(None);
    shared.set_parameters(&ReverbParameters {
        room_size: 0.8,
        damping: 0.2,
        width: 0.6,
        dry_level: 0.4,
        wet_level: 0.7,
        freeze_mode: false,
    });

    let path = dir.path().join("captured.toml");
    Preset::from_parameters("Captured", &shared.snapshot())
        .save(&path)
        .unwrap();

    let restored = ReverbShared::new(None);
    Preset::load(&path).unwrap().apply(&restored).unwrap();
    assert_eq!(restored.snapshot(), shared.snapshot());
}

#[test]
fn factory_presets_saved_to_disk_are_listed_and_resolved() {
    let dir = TempDir::new().unwrap();
    for preset in factory_presets() {
        let file = preset.name.to_lowercase().replace(' ', "-");
        preset.save(dir.path().join(format!("{file}.toml"))).unwrap();
    }
    fs::write(dir.path().join("readme.md"), "not a preset").unwrap();

    let listed = list_presets_in_dir(dir.path());
    assert_eq!(listed.len(), factory_presets().len());
    let names: Vec<String> = listed
        .iter()
        .filter_map(|p| preset_name_from_path(p))
        .collect();
    assert!(names.contains(&"frozen-pad".to_string()));

    let resolved = resolve_preset_in(dir.path(), "frozen-pad").unwrap();
    assert_eq!(resolved.name, "Frozen Pad");
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "name = [unterminated").unwrap();
    assert!(matches!(Preset::load(&path), Err(ConfigError::TomlParse(_))));
    assert!(matches!(
        Preset::load(dir.path().join("missing.toml")),
        Err(ConfigError::ReadFile { .. })
    ));
}
