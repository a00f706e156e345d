//! Bus layout negotiation.
//!
//! A host proposes an input/output channel configuration; the processor
//! accepts it only if it matches one of the layouts its [`BusVariant`]
//! declares. Validation happens here, at negotiation time, so the audio path
//! needs no channel-count checks beyond clearing unused outputs.

use core::fmt;

/// Channel configuration of one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelSet {
    /// Bus present but switched off.
    Disabled,
    /// One channel.
    Mono,
    /// Left and right.
    Stereo,
    /// Full-sphere ambisonics of the given order: `(order + 1)^2` channels.
    Ambisonic {
        /// Ambisonic order (1 = first order, four channels).
        order: u32,
    },
    /// Unlabelled channels.
    Discrete(usize),
}

impl ChannelSet {
    /// First-order ambisonics (W, X, Y, Z).
    pub const FIRST_ORDER_AMBISONIC: Self = Self::Ambisonic { order: 1 };

    /// Number of channels in the set.
    pub fn channel_count(self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Ambisonic { order } => {
                let n = order as usize + 1;
                n * n
            }
            Self::Discrete(n) => n,
        }
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Mono => f.write_str("mono"),
            Self::Stereo => f.write_str("stereo"),
            Self::Ambisonic { order } => write!(f, "ambisonic order {order}"),
            Self::Discrete(n) => write!(f, "{n} discrete"),
        }
    }
}

/// Main input and output bus of a processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusesLayout {
    /// Main input bus.
    pub input: ChannelSet,
    /// Main output bus.
    pub output: ChannelSet,
}

impl BusesLayout {
    /// Same channel set on input and output.
    pub const fn symmetric(set: ChannelSet) -> Self {
        Self {
            input: set,
            output: set,
        }
    }

    /// Input channel count.
    pub fn input_channels(&self) -> usize {
        self.input.channel_count()
    }
}

impl fmt::Display for BusesLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in / {} out", self.input, self.output)
    }
}

/// Which family of layouts a processor instance accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BusVariant {
    /// Mono or stereo, input matching output.
    #[default]
    MonoStereo,
    /// First-order ambisonic (four channels), input matching output.
    Ambisonic,
}

impl BusVariant {
    /// Whether `layout` is one this variant declares. Pure.
    pub fn supports(self, layout: &BusesLayout) -> bool {
        if layout.input != layout.output {
            return false;
        }
        match self {
            Self::MonoStereo => matches!(layout.output, ChannelSet::Mono | ChannelSet::Stereo),
            Self::Ambisonic => layout.output == ChannelSet::FIRST_ORDER_AMBISONIC,
        }
    }

    /// Layout a fresh processor starts with.
    pub fn default_layout(self) -> BusesLayout {
        match self {
            Self::MonoStereo => BusesLayout::symmetric(ChannelSet::Stereo),
            Self::Ambisonic => BusesLayout::symmetric(ChannelSet::FIRST_ORDER_AMBISONIC),
        }
    }

    /// Variant whose default layout carries `channels` channels, if any.
    pub fn for_channel_count(channels: usize) -> Option<Self> {
        match channels {
            1 | 2 => Some(Self::MonoStereo),
            4 => Some(Self::Ambisonic),
            _ => None,
        }
    }

    /// Layout with `channels` on both buses, if this variant supports it.
    pub fn layout_for_channels(self, channels: usize) -> Option<BusesLayout> {
        let set = match (self, channels) {
            (Self::MonoStereo, 1) => ChannelSet::Mono,
            (Self::MonoStereo, 2) => ChannelSet::Stereo,
            (Self::Ambisonic, 4) => ChannelSet::FIRST_ORDER_AMBISONIC,
            _ => return None,
        };
        Some(BusesLayout::symmetric(set))
    }
}

impl fmt::Display for BusVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MonoStereo => "mono_stereo",
            Self::Ambisonic => "ambisonic",
        })
    }
}
