//! Channel specifier parsing.
//!
//! A specifier is a short string of channel letters, at most one per RGBA
//! channel. [`SourceMap`] parses source specifiers (physical channels plus
//! pseudo-channels, repeats allowed); [`DestMap`] parses destination
//! specifiers (unique physical channels only). All validation happens at
//! parse time, before the engine touches any buffer.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Number of physical channels in every buffer.
pub const CHANNEL_COUNT: usize = 4;

/// Maximum specifier length (one entry per physical channel).
pub const MAX_MAP_LEN: usize = CHANNEL_COUNT;

/// A physical color/alpha channel of an RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
    /// Alpha.
    A,
}

impl Channel {
    /// All physical channels in storage order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::R, Channel::G, Channel::B, Channel::A];

    /// Index of this channel within an interleaved RGBA pixel.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
            Channel::A => 3,
        }
    }

    /// Parses a lowercase channel letter, as written in scripts.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'r' => Some(Channel::R),
            'g' => Some(Channel::G),
            'b' => Some(Channel::B),
            'a' => Some(Channel::A),
            _ => None,
        }
    }

    /// The script letter for this channel.
    pub fn to_char(self) -> char {
        match self {
            Channel::R => 'r',
            Channel::G => 'g',
            Channel::B => 'b',
            Channel::A => 'a',
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A per-pixel reduction over a set of channel samples.
///
/// Reducers serve double duty: they define the pseudo-channels (`A`, `M`,
/// `m` in source specifiers) and the combine step of many-to-one mappings.
/// The set is closed; dispatch is a plain `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Arithmetic mean, truncating toward zero. Pseudo-channel `A`.
    Mean,
    /// Maximum. Pseudo-channel `M`.
    Max,
    /// Minimum. Pseudo-channel `m`.
    Min,
}

impl Reducer {
    /// Parses a pseudo-channel code.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(Reducer::Mean),
            'M' => Some(Reducer::Max),
            'm' => Some(Reducer::Min),
            _ => None,
        }
    }

    /// Human-readable description, for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Reducer::Mean => "average of all channels",
            Reducer::Max => "maximum of all channels",
            Reducer::Min => "minimum of all channels",
        }
    }

    /// Reduces a set of samples to one value.
    ///
    /// `Mean` uses truncating integer division, matching a float mean cast
    /// down to u8. Returns 0 for an empty slice, which no caller produces.
    pub fn reduce(self, samples: &[u8]) -> u8 {
        if samples.is_empty() {
            return 0;
        }
        match self {
            Reducer::Mean => {
                let sum: u32 = samples.iter().map(|&v| u32::from(v)).sum();
                (sum / samples.len() as u32) as u8
            }
            Reducer::Max => samples.iter().copied().fold(u8::MIN, u8::max),
            Reducer::Min => samples.iter().copied().fold(u8::MAX, u8::min),
        }
    }
}

/// One entry of a source specifier: a physical channel or a derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChannel {
    /// A physical plane of the source image.
    Physical(Channel),
    /// A per-pixel reduction across all physical planes.
    Pseudo(Reducer),
}

impl SourceChannel {
    /// Parses a source specifier character.
    pub fn from_char(ch: char) -> Result<Self> {
        if let Some(channel) = Channel::from_char(ch) {
            Ok(SourceChannel::Physical(channel))
        } else if let Some(reducer) = Reducer::from_char(ch) {
            Ok(SourceChannel::Pseudo(reducer))
        } else {
            Err(Error::UnknownSourceChannel { ch })
        }
    }
}

fn check_len(map: &str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::EmptyMap);
    }
    if len > MAX_MAP_LEN {
        return Err(Error::MapTooLong {
            map: map.to_string(),
            len,
            max: MAX_MAP_LEN,
        });
    }
    Ok(())
}

/// A parsed source specifier.
///
/// Ordered, 1 to 4 entries, repeats allowed, physical and pseudo-channels
/// may mix freely (`"rA"` is valid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMap {
    channels: Vec<SourceChannel>,
    text: String,
}

impl SourceMap {
    /// The parsed entries, in specifier order.
    #[inline]
    pub fn channels(&self) -> &[SourceChannel] {
        &self.channels
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always `false`; empty specifiers fail to parse.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// The specifier as written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for SourceMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        check_len(s, s.chars().count())?;
        let channels = s
            .chars()
            .map(SourceChannel::from_char)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            channels,
            text: s.to_string(),
        })
    }
}

impl fmt::Display for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A parsed destination specifier.
///
/// Ordered, 1 to 4 unique physical channels. Pseudo-channels and repeats
/// are rejected at parse time, so within one directive every destination
/// channel is written exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestMap {
    channels: Vec<Channel>,
    text: String,
}

impl DestMap {
    /// The parsed channels, in specifier order.
    #[inline]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Number of channels.
    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always `false`; empty specifiers fail to parse.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// The specifier as written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for DestMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        check_len(s, s.chars().count())?;
        let mut seen = [false; CHANNEL_COUNT];
        let mut channels = Vec::with_capacity(s.len());
        for ch in s.chars() {
            let channel = Channel::from_char(ch).ok_or(Error::UnknownChannel { ch })?;
            if seen[channel.index()] {
                return Err(Error::DuplicateChannel { ch });
            }
            seen[channel.index()] = true;
            channels.push(channel);
        }
        Ok(Self {
            channels,
            text: s.to_string(),
        })
    }
}

impl fmt::Display for DestMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
