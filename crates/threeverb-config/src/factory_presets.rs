//! Presets compiled into the binary.
//!
//! Stored as TOML text and parsed on demand like any user file.

use crate::Preset;

/// File-style names of the built-in presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "small_room",
    "large_hall",
    "wide_plate",
    "frozen_pad",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("small_room", SMALL_ROOM_PRESET),
    ("large_hall", LARGE_HALL_PRESET),
    ("wide_plate", WIDE_PLATE_PRESET),
    ("frozen_pad", FROZEN_PAD_PRESET),
];

/// Every parameter at its default.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Default settings"

[params]
size = 0.5
damp = 0.5
width = 1.0
wet = 0.5
dry = 1.0
freeze = false
"#;

const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short, bright ambience"

[params]
size = 0.25
damp = 0.3
width = 0.7
wet = 0.3
dry = 1.0
freeze = false
"#;

const LARGE_HALL_PRESET: &str = r#"
name = "Large Hall"
description = "Long, dark tail"

[params]
size = 0.9
damp = 0.6
width = 1.0
wet = 0.45
dry = 0.7
freeze = false
"#;

const WIDE_PLATE_PRESET: &str = r#"
name = "Wide Plate"
description = "Dense and bright, full stereo spread"

[params]
size = 0.7
damp = 0.1
width = 1.0
wet = 0.4
dry = 0.8
freeze = false
"#;

const FROZEN_PAD_PRESET: &str = r#"
name = "Frozen Pad"
description = "Infinite sustain of whatever is in the tank"

[params]
size = 1.0
damp = 0.0
width = 1.0
wet = 0.8
dry = 0.0
freeze = true
"#;

/// All factory presets, parsed.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use threeverb_config::get_factory_preset;
///
/// let hall = get_factory_preset("large_hall").unwrap();
/// assert_eq!(hall.name, "Large Hall");
/// assert!(get_factory_preset("Large Hall").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Preset::from_toml(toml).ok().map(|p| (id, p)))
        .find(|(id, preset)| id.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name))
        .map(|(_, preset)| preset)
}

/// Identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
