//! Presets and settings for the ThreeVerb reverb.
//!
//! # Features
//!
//! - **Presets**: load and save parameter sets as TOML, keyed by parameter
//!   string ID
//! - **Factory Presets**: built-in starting points
//! - **Paths**: platform-specific user preset and config directories
//! - **Settings**: render defaults for the command-line tool
//!
//! # Example
//!
//! ```rust,no_run
//! use threeverb_config::{Preset, resolve_preset, user_presets_dir};
//! use threeverb_processor::ReverbShared;
//!
//! // A factory preset, or a user file with the same name if one exists
//! let hall = resolve_preset("large_hall").unwrap();
//!
//! let shared = ReverbShared::new(None);
//! hall.apply(&shared).unwrap();
//!
//! // Save a tweaked copy next to the user's other presets
//! let mine = Preset::from_parameters("My Hall", &shared.snapshot())
//!     .with_description("Large hall, a little drier");
//! mine.save(user_presets_dir().join("my_hall.toml")).unwrap();
//! ```

mod error;
mod preset;
mod settings;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    find_preset_in, list_presets_in_dir, list_user_presets, preset_name_from_path,
    resolve_preset, resolve_preset_in, settings_path, user_config_dir, user_presets_dir,
};
pub use preset::{ParamValue, Preset, PresetVariant};
pub use settings::{MAX_TAIL_SECONDS, SUPPORTED_BIT_DEPTHS, Settings};
