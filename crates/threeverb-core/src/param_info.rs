//! Parameter metadata shared by the engine, the host bridge and presets.
//!
//! One [`ParamDescriptor`] per parameter carries everything a host needs to
//! show and automate it, and everything a preset needs to name it.
//!
//! [`ParamId`] for sessions, a string ID for presets, [`ParamFlags`] for
//! host capabilities and [`ParamUnit`] for text rendering.
//!
//! # Example
//!
//! ```rust
//! use threeverb_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Tilt {
//!     amount: f32,
//! }
//!
//! impl ParameterInfo for Tilt {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::unit_interval("Tilt", "Tilt", 0.5)
//!                 .with_id(ParamId(42), "tilt")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.amount,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.amount = value.clamp(0.0, 1.0);
//!         }
//!     }
//! }
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Numeric parameter ID written into host sessions and state blobs.
///
/// Independent of the parameter's index. Changing one breaks every saved
/// session that refers to it. The reverb uses 1500..=1505.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// What a host may do with a parameter.
///
/// # Example
///
/// ```rust
/// use threeverb_core::ParamFlags;
///
/// let freeze = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(freeze.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::AUTOMATABLE.contains(freeze));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host may record and play back automation.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Only whole steps are meaningful (switches).
    pub const STEPPED: Self = Self(1 << 1);

    /// `true` when every flag of `other` is also set here.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Both sets combined.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Index-based access to a parameter set.
///
/// Indices run from 0 to [`param_count`](Self::param_count). The trait is
/// single-threaded; the processor's shared state owns the atomics that
/// cross threads.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Metadata for `index`, or `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value at `index`; `0.0` past the end.
    fn get_param(&self, index: usize) -> f32;

    /// Store a value at `index`, clamped to its range. Ignored past the end.
    fn set_param(&mut self, index: usize, value: f32);

    /// Index whose name, short name or string ID equals `name`, ignoring
    /// ASCII case.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// [`ParamId`] of `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Index carrying `id`. Linear scan; keep it off the audio thread.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Range, default, display and identity of one parameter.
///
/// # Example
///
/// ```rust
/// use threeverb_core::{ParamDescriptor, ParamId};
///
/// let size = ParamDescriptor::unit_interval("Size", "Size", 0.5)
///     .with_id(ParamId(1500), "size");
///
/// assert_eq!(size.format_value(0.25), "0.25");
/// assert_eq!(size.parse_value("0.8"), Some(0.8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name ("Damping").
    pub name: &'static str,

    /// Abbreviation for narrow displays ("Damp").
    pub short_name: &'static str,

    /// Text rendering.
    pub unit: ParamUnit,

    /// Lowest value.
    pub min: f32,

    /// Highest value.
    pub max: f32,

    /// Value after construction or reset.
    pub default: f32,

    /// Increment for stepped parameters and encoders.
    pub step: f32,

    /// Session ID; `ParamId(0)` until [`with_id`](Self::with_id) is called.
    pub id: ParamId,

    /// Preset key (`"damp"`); empty until assigned.
    pub string_id: &'static str,

    /// Host capabilities.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous parameter over \[0.0, 1.0\].
    pub fn unit_interval(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// On/off switch stored as 0.0 / 1.0.
    pub fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Toggle,
            min: 0.0,
            max: 1.0,
            default: if default { 1.0 } else { 0.0 },
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Assign the session ID and preset key.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Replace the flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamp into \[min, max\]. NaN becomes the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Plain value to host-normalized \[0, 1\].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            (self.clamp(value) - self.min) / span
        }
    }

    /// Host-normalized value to plain, snapped to steps for switches.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let plain = self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min);
        if self.flags.contains(ParamFlags::STEPPED) && self.step > 0.0 {
            self.clamp(self.min + libm::roundf((plain - self.min) / self.step) * self.step)
        } else {
            plain
        }
    }

    /// Format a value as display text.
    pub fn format_value(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Toggle => {
                if value >= 0.5 {
                    String::from("On")
                } else {
                    String::from("Off")
                }
            }
            ParamUnit::None => format!("{:.2}", self.clamp(value)),
        }
    }

    /// Parse display text back into a (clamped) value.
    ///
    /// Toggles accept `on`/`off`, `true`/`false`, `yes`/`no` and `1`/`0`.
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let text = text.trim();
        match self.unit {
            ParamUnit::Toggle => {
                if ["on", "true", "yes", "1"]
                    .iter()
                    .any(|t| text.eq_ignore_ascii_case(t))
                {
                    Some(1.0)
                } else if ["off", "false", "no", "0"]
                    .iter()
                    .any(|t| text.eq_ignore_ascii_case(t))
                {
                    Some(0.0)
                } else {
                    None
                }
            }
            ParamUnit::None => text
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| self.clamp(v)),
        }
    }
}

/// How a value is shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Dimensionless continuous value, shown with two decimals.
    None,

    /// Boolean switch, shown as `On` / `Off`.
    Toggle,
}
