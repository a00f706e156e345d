//! Named parameter sets stored as TOML.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use threeverb_core::{ParameterInfo, ReverbParameters};
use threeverb_processor::{BusVariant, ReverbShared};

use crate::error::ConfigError;

/// Bus layout family a preset was designed for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PresetVariant {
    /// Mono or stereo.
    MonoStereo,
    /// First-order ambisonic.
    Ambisonic,
}

impl From<PresetVariant> for BusVariant {
    fn from(v: PresetVariant) -> Self {
        match v {
            PresetVariant::MonoStereo => BusVariant::MonoStereo,
            PresetVariant::Ambisonic => BusVariant::Ambisonic,
        }
    }
}

impl From<BusVariant> for PresetVariant {
    fn from(v: BusVariant) -> Self {
        match v {
            BusVariant::MonoStereo => PresetVariant::MonoStereo,
            BusVariant::Ambisonic => PresetVariant::Ambisonic,
        }
    }
}

/// A parameter value as written in TOML: a number, or a boolean for
/// switches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    /// `freeze = true`
    Bool(bool),
    /// `size = 0.8`
    Number(f64),
}

impl ParamValue {
    /// Numeric value; booleans map to 1.0 / 0.0.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Bool(true) => 1.0,
            Self::Bool(false) => 0.0,
            Self::Number(v) => v,
        }
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// A named set of reverb parameter values.
///
/// Keys are the parameters' stable string IDs. Missing keys keep their
/// defaults when the preset is applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Large Hall"
/// description = "Long, dark tail"
/// variant = "mono_stereo"
///
/// [params]
/// size = 0.9
/// damp = 0.6
/// width = 1.0
/// wet = 0.45
/// dry = 0.7
/// freeze = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Display name.
    pub name: String,

    /// One-line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Layout family the preset targets, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<PresetVariant>,

    /// Parameter values keyed by string ID.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl Preset {
    /// Preset with no values; applying it restores the defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            variant: None,
            params: BTreeMap::new(),
        }
    }

    /// Capture every value of a parameter set.
    pub fn from_parameters(name: impl Into<String>, params: &ReverbParameters) -> Self {
        let mut preset = Self::new(name);
        for index in 0..params.param_count() {
            let Some(desc) = params.param_info(index) else {
                continue;
            };
            let value = params.get_param(index);
            let value = if desc.flags.contains(threeverb_core::ParamFlags::STEPPED) {
                ParamValue::Bool(value >= 0.5)
            } else {
                ParamValue::from(value)
            };
            preset.params.insert(desc.string_id.to_string(), value);
        }
        preset
    }

    /// Attach a summary.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the target layout family.
    pub fn with_variant(mut self, variant: PresetVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set one parameter by string ID.
    pub fn with_param(mut self, string_id: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(string_id.into(), value.into());
        self
    }

    /// Read and parse a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Parse TOML text. Values are not range-checked here.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Write as TOML, creating missing parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Render as TOML text.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve into a full parameter set, starting from defaults.
    ///
    /// Every key must be a parameter's exact string ID and every value must
    /// lie inside its range; nothing is clamped.
    pub fn to_parameters(&self) -> Result<ReverbParameters, ConfigError> {
        let mut params = ReverbParameters::default();
        for (key, value) in &self.params {
            let (index, desc) = (0..params.param_count())
                .filter_map(|i| Some((i, params.param_info(i)?)))
                .find(|(_, desc)| desc.string_id == key.as_str())
                .ok_or_else(|| ConfigError::UnknownParameter(key.clone()))?;
            let v = value.as_f64();
            if !v.is_finite() || v < f64::from(desc.min) || v > f64::from(desc.max) {
                return Err(ConfigError::InvalidValue {
                    param: key.clone(),
                    value: v,
                    reason: format!("expected {} to {}", desc.min, desc.max),
                });
            }
            params.set_param(index, v as f32);
        }
        Ok(params)
    }

    /// Check keys and ranges without applying anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_parameters().map(|_| ())
    }

    /// Write the preset's values into a parameter bridge.
    ///
    /// Validation happens first, so an invalid preset changes nothing.
    pub fn apply(&self, shared: &ReverbShared) -> Result<(), ConfigError> {
        let params = self.to_parameters()?;
        shared.set_parameters(&params);
        tracing::debug!(name = %self.name, "applied preset");
        Ok(())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
