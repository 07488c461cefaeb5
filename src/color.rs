//! The four game colors and their hardware mappings.
//!
//! Each color corresponds to one physical button/LED channel and one tone
//! frequency. The `Srgb` values are provided for LED implementations that
//! render colors rather than driving dedicated single-color channels.

use palette::Srgb;

/// One of the four colored input/output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl GameColor {
    /// Number of colors in the fixed game set.
    pub const COUNT: usize = 4;

    /// All colors, in channel order.
    pub const ALL: [GameColor; Self::COUNT] = [
        GameColor::Red,
        GameColor::Green,
        GameColor::Blue,
        GameColor::Yellow,
    ];

    /// Returns the color for a channel index, if in range.
    pub fn from_index(index: usize) -> Option<GameColor> {
        Self::ALL.get(index).copied()
    }

    /// Channel index of this color.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tone frequency associated with this color's button, in Hz.
    pub fn tone_frequency_hz(self) -> u16 {
        match self {
            GameColor::Red => 218,
            GameColor::Green => 163,
            GameColor::Blue => 330,
            GameColor::Yellow => 276,
        }
    }

    /// Display color for RGB-capable LED hardware.
    pub fn srgb(self) -> Srgb {
        match self {
            GameColor::Red => Srgb::new(1.0, 0.0, 0.0),
            GameColor::Green => Srgb::new(0.0, 1.0, 0.0),
            GameColor::Blue => Srgb::new(0.0, 0.0, 1.0),
            GameColor::Yellow => Srgb::new(1.0, 1.0, 0.0),
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            GameColor::Red => "red",
            GameColor::Green => "green",
            GameColor::Blue => "blue",
            GameColor::Yellow => "yellow",
        }
    }
}
