//! Thread-safe parameter bridge.
//!
//! `ReverbShared` lives for the lifetime of the processor and is reachable
//! from both the control side (host automation, state, presets) and the
//! audio thread (one snapshot per block). Values are stored as `AtomicU32`
//! (f32 bit-cast) for lock-free access.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use threeverb_core::engine::{
    PARAM_COUNT, PARAM_DAMPING, PARAM_DRY, PARAM_FREEZE, PARAM_SIZE, PARAM_WET, PARAM_WIDTH,
};
use threeverb_core::{ParamDescriptor, ParamId, ParameterInfo, ReverbParameters};

/// Callback asking the host to pick up a parameter change.
pub type HostNotify = Box<dyn Fn() + Send + Sync>;

struct ReverbSharedData {
    /// Parameter descriptors, indexed by parameter position.
    descriptors: Vec<ParamDescriptor>,
    /// Current values as f32 bit-cast to u32.
    values: Vec<AtomicU32>,
    /// Called after every `set_value`.
    host_notify: Option<HostNotify>,
}

/// Shared parameter state for one processor instance.
///
/// Cheap to clone: clones share the same values.
///
/// # Example
///
/// ```rust
/// use threeverb_processor::ReverbShared;
///
/// let shared = ReverbShared::new(None);
/// let control = shared.clone();
///
/// let size = control.index_by_string_id("size").unwrap();
/// control.set_value(size, 0.8);
/// assert_eq!(shared.snapshot().room_size, 0.8);
/// ```
#[derive(Clone)]
pub struct ReverbShared {
    inner: Arc<ReverbSharedData>,
}

impl ReverbShared {
    /// Create shared state with every parameter at its default.
    ///
    /// `host_notify` runs after each value change; pass `None` for offline use.
    pub fn new(host_notify: Option<HostNotify>) -> Self {
        let params = ReverbParameters::default();
        let descriptors: Vec<ParamDescriptor> = (0..params.param_count())
            .filter_map(|i| params.param_info(i))
            .collect();
        let values = descriptors
            .iter()
            .map(|d| AtomicU32::new(d.default.to_bits()))
            .collect();

        Self {
            inner: Arc::new(ReverbSharedData {
                descriptors,
                values,
                host_notify,
            }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        self.inner.descriptors.len()
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&ParamDescriptor> {
        self.inner.descriptors.get(index)
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.inner.descriptors
    }

    /// Find parameter index by stable `ParamId`.
    pub fn index_by_id(&self, id: ParamId) -> Option<usize> {
        self.inner.descriptors.iter().position(|d| d.id == id)
    }

    /// Find parameter index by string ID (`"size"`, `"damp"`, ...).
    pub fn index_by_string_id(&self, string_id: &str) -> Option<usize> {
        self.inner
            .descriptors
            .iter()
            .position(|d| d.string_id == string_id)
    }

    /// Read the current value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds,
    /// then notifies the host.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self
            .inner
            .values
            .get(index)
            .zip(self.inner.descriptors.get(index))
        {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
            self.notify_host();
        }
    }

    /// Current value mapped to \[0, 1\].
    pub fn get_normalized(&self, index: usize) -> Option<f32> {
        let desc = self.descriptor(index)?;
        self.get_value(index).map(|v| desc.normalize(v))
    }

    /// Write a value given in \[0, 1\].
    pub fn set_normalized(&self, index: usize, normalized: f32) {
        if let Some(desc) = self.descriptor(index) {
            self.set_value(index, desc.denormalize(normalized));
        }
    }

    /// Display text for `value` under parameter `index`.
    pub fn format_value(&self, index: usize, value: f32) -> Option<String> {
        self.descriptor(index).map(|d| d.format_value(value))
    }

    /// Parse display text for parameter `index`.
    pub fn parse_value(&self, index: usize, text: &str) -> Option<f32> {
        self.descriptor(index).and_then(|d| d.parse_value(text))
    }

    /// Read all six values into an engine parameter set.
    ///
    /// One atomic load per parameter; no lock. Freeze is on at `>= 0.5`.
    pub fn snapshot(&self) -> ReverbParameters {
        let mut values = [0.0f32; PARAM_COUNT];
        for (slot, atomic) in values.iter_mut().zip(&self.inner.values) {
            *slot = f32::from_bits(atomic.load(Ordering::Acquire));
        }
        ReverbParameters {
            room_size: values[PARAM_SIZE],
            damping: values[PARAM_DAMPING],
            width: values[PARAM_WIDTH],
            wet_level: values[PARAM_WET],
            dry_level: values[PARAM_DRY],
            freeze_mode: values[PARAM_FREEZE] >= 0.5,
        }
    }

    /// Write every value from a parameter set.
    pub fn set_parameters(&self, params: &ReverbParameters) {
        for index in 0..self.param_count() {
            self.set_value(index, params.get_param(index));
        }
    }

    /// Restore every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for (atomic, desc) in self.inner.values.iter().zip(&self.inner.descriptors) {
            atomic.store(desc.default.to_bits(), Ordering::Release);
        }
        self.notify_host();
    }

    /// Ask the host to pick up pending changes. No-op without a callback.
    pub fn notify_host(&self) {
        if let Some(cb) = &self.inner.host_notify {
            cb();
        }
    }
}

impl fmt::Debug for ReverbShared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverbShared")
            .field("values", &self.snapshot())
            .field("host_notify", &self.inner.host_notify.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn defaults_match_descriptors() {
        let shared = ReverbShared::new(None);
        assert_eq!(shared.param_count(), 6);
        for (i, desc) in shared.descriptors().iter().enumerate() {
            let val = shared.get_value(i).unwrap();
            assert_eq!(
                val, desc.default,
                "param {i} ({}) default mismatch: got {val}, expected {}",
                desc.name, desc.default
            );
        }
        assert_eq!(shared.snapshot(), ReverbParameters::default());
    }

    #[test]
    fn set_value_clamps() {
        let shared = ReverbShared::new(None);
        shared.set_value(PARAM_SIZE, 100.0);
        assert_eq!(shared.get_value(PARAM_SIZE), Some(1.0));
        shared.set_value(PARAM_SIZE, -100.0);
        assert_eq!(shared.get_value(PARAM_SIZE), Some(0.0));
        shared.set_value(PARAM_SIZE, f32::NAN);
        assert_eq!(shared.get_value(PARAM_SIZE), Some(0.5));
    }

    #[test]
    fn index_lookups() {
        let shared = ReverbShared::new(None);
        assert_eq!(shared.index_by_id(ParamId(1500)), Some(PARAM_SIZE));
        assert_eq!(shared.index_by_id(ParamId(1505)), Some(PARAM_FREEZE));
        assert_eq!(shared.index_by_id(ParamId(999)), None);
        assert_eq!(shared.index_by_string_id("wet"), Some(PARAM_WET));
        assert_eq!(shared.index_by_string_id("dry"), Some(PARAM_DRY));
        assert_eq!(shared.index_by_string_id("gain"), None);
    }

    #[test]
    fn out_of_range_safe() {
        let shared = ReverbShared::new(None);
        assert_eq!(shared.get_value(999), None);
        assert_eq!(shared.descriptor(999), None);
        assert_eq!(shared.get_normalized(999), None);
        shared.set_value(999, 1.0);
        shared.set_normalized(999, 1.0);
    }

    #[test]
    fn freeze_threshold() {
        let shared = ReverbShared::new(None);
        shared.set_value(PARAM_FREEZE, 1.0);
        assert!(shared.snapshot().freeze_mode);
        shared.set_normalized(PARAM_FREEZE, 0.4);
        assert_eq!(shared.get_value(PARAM_FREEZE), Some(0.0));
        assert!(!shared.snapshot().freeze_mode);
    }

    #[test]
    fn notify_runs_on_every_write() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let shared = ReverbShared::new(Some(Box::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })));

        shared.set_value(PARAM_WET, 0.3);
        shared.set_normalized(PARAM_DRY, 0.7);
        shared.set_value(999, 0.1);
        assert_eq!(count.load(Ordering::Relaxed), 2);

        shared.reset_to_defaults();
        assert_eq!(count.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn clones_share_values() {
        let shared = ReverbShared::new(None);
        let other = shared.clone();
        other.set_value(PARAM_WIDTH, 0.25);
        assert_eq!(shared.get_value(PARAM_WIDTH), Some(0.25));
    }

    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReverbShared>();
    };

    #[test]
    fn control_thread_writes_reach_audio_snapshot() {
        let audio = ReverbShared::new(None);
        let control = audio.clone();

        std::thread::spawn(move || {
            control.set_value(PARAM_SIZE, 0.9);
            control.set_value(PARAM_WET, 0.2);
            control.set_value(PARAM_FREEZE, 1.0);
        })
        .join()
        .unwrap();

        let snap = audio.snapshot();
        assert_eq!(snap.room_size, 0.9);
        assert_eq!(snap.wet_level, 0.2);
        assert!(snap.freeze_mode);
    }

    #[test]
    fn concurrent_snapshots_see_whole_values() {
        let audio = ReverbShared::new(None);
        let control = audio.clone();

        let writer = std::thread::spawn(move || {
            for i in 0..10_000 {
                let v = if i % 2 == 0 { 0.25 } else { 0.75 };
                control.set_value(PARAM_DAMPING, v);
            }
        });
        while !writer.is_finished() {
            let damping = audio.snapshot().damping;
            assert!(
                [0.5, 0.25, 0.75].contains(&damping),
                "torn or foreign value {damping}"
            );
        }
        writer.join().unwrap();
        assert_eq!(audio.get_value(PARAM_DAMPING), Some(0.75));
    }

    #[test]
    fn text_round_trip() {
        let shared = ReverbShared::new(None);
        assert_eq!(shared.format_value(PARAM_DAMPING, 0.25).as_deref(), Some("0.25"));
        assert_eq!(shared.format_value(PARAM_FREEZE, 1.0).as_deref(), Some("On"));
        assert_eq!(shared.parse_value(PARAM_FREEZE, "off"), Some(0.0));
        assert_eq!(shared.parse_value(PARAM_WET, "0.6"), Some(0.6));
        assert_eq!(shared.parse_value(PARAM_WET, "loud"), None);
    }

    #[test]
    fn reset_restores_defaults() {
        let shared = ReverbShared::new(None);
        shared.set_parameters(&ReverbParameters {
            room_size: 0.9,
            damping: 0.1,
            width: 0.2,
            dry_level: 0.3,
            wet_level: 0.4,
            freeze_mode: true,
        });
        assert!(shared.snapshot().freeze_mode);
        shared.reset_to_defaults();
        assert_eq!(shared.snapshot(), ReverbParameters::default());
    }
}
