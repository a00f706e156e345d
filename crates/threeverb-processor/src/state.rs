//! Parameter state save/restore.
//!
//! Format: JSON object mapping stable `ParamId` to value.
//!
//! ```json
//! {"1500": 0.5, "1501": 0.5, "1502": 1.0, "1503": 0.5, "1504": 1.0, "1505": 0.0}
//! ```
//!
//! Keys are stable IDs rather than indices, so saved sessions survive
//! parameter reordering.

use threeverb_core::ParamId;

use crate::error::ProcessorError;
use crate::shared::ReverbShared;

/// Serialize every parameter value.
pub fn save(shared: &ReverbShared) -> Result<Vec<u8>, ProcessorError> {
    let mut state = serde_json::Map::new();

    for (i, desc) in shared.descriptors().iter().enumerate() {
        if let Some(val) = shared.get_value(i) {
            state.insert(
                desc.id.0.to_string(),
                serde_json::Value::from(f64::from(val)),
            );
        }
    }

    serde_json::to_vec(&serde_json::Value::Object(state))
        .map_err(|_| ProcessorError::SerializeState)
}

/// Restore values from a blob produced by [`save`].
///
/// Unknown IDs and non-numeric values are skipped; values are clamped.
/// Input that is not a JSON object is rejected before anything changes.
/// Returns the number of parameters applied.
pub fn load(shared: &ReverbShared, data: &[u8]) -> Result<usize, ProcessorError> {
    let value: serde_json::Value = serde_json::from_slice(data)
        .map_err(|_| ProcessorError::InvalidState("state is not valid JSON"))?;

    let Some(obj) = value.as_object() else {
        return Err(ProcessorError::InvalidState("state is not a JSON object"));
    };

    let mut applied = 0;
    for (key, val) in obj {
        let Some(index) = key
            .parse::<u32>()
            .ok()
            .and_then(|id| shared.index_by_id(ParamId(id)))
        else {
            tracing::warn!(key = %key, "ignoring unknown parameter in state");
            continue;
        };
        let Some(v) = val.as_f64() else {
            tracing::warn!(key = %key, value = %val, "ignoring non-numeric parameter value");
            continue;
        };
        shared.set_value(index, v as f32);
        applied += 1;
    }

    tracing::debug!(applied, "restored parameter state");
    Ok(applied)
}
