//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use threeverb_processor::ReverbShared;

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format: '{s}' (expected key=value)"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Apply `key=value` overrides to the parameter bridge.
///
/// Keys are string IDs (`size`, `damp`, ...). Values use the parameter's
/// display syntax, so `freeze=on` works. Numbers are clamped to range.
pub fn apply_param_overrides(
    shared: &ReverbShared,
    overrides: &[(String, String)],
) -> anyhow::Result<()> {
    for (key, text) in overrides {
        let index = shared
            .index_by_string_id(key)
            .with_context(|| format!("unknown parameter '{key}' (see 'threeverb params')"))?;
        let value = shared
            .parse_value(index, text)
            .with_context(|| format!("invalid value '{text}' for parameter '{key}'"))?;
        shared.set_value(index, value);
        tracing::debug!(param = %key, value, "parameter override");
    }
    Ok(())
}

/// Convert linear amplitude to dBFS, floored at -120.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        (20.0 * linear.log10()).max(-120.0)
    }
}

/// Largest absolute sample across all channels.
pub fn peak(channels: &[Vec<f32>]) -> f32 {
    channels
        .iter()
        .flatten()
        .map(|s| s.abs())
        .fold(0.0, f32::max)
}
