//! Simulated time-of-day lighting for tour photos.
//!
//! A stylized piecewise-linear approximation keyed only on the hour the
//! visitor picks on the slider. No geolocation or real sun position.

use std::fmt;

/// Hour chosen on the lighting slider, always within `6..=20`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightingHour(u8);

impl LightingHour {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 20;

    /// Clamp any requested hour into the slider range
    pub fn new(hour: u8) -> Self {
        Self(hour.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for LightingHour {
    fn default() -> Self {
        Self(12)
    }
}

impl fmt::Display for LightingHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// CSS-style filter multipliers applied over photos and panoramas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunFilter {
    pub brightness: f64,
    pub sepia: f64,
    pub saturation: f64,
}

impl SunFilter {
    pub const NEUTRAL: SunFilter = SunFilter {
        brightness: 1.0,
        sepia: 0.0,
        saturation: 1.0,
    };

    /// Render as a CSS `filter` value
    pub fn css(&self) -> String {
        format!(
            "brightness({}) sepia({}) saturate({})",
            self.brightness, self.sepia, self.saturation
        )
    }
}

/// Map an hour to its filter: warm and dim at dawn, neutral at midday,
/// warm and saturated towards evening
pub fn compute_filter(hour: LightingHour) -> SunFilter {
    let h = f64::from(hour.get());

    if h < 8.0 {
        SunFilter {
            brightness: 0.7 + (h - 6.0) * 0.1,
            sepia: 0.3 - (h - 6.0) * 0.1,
            saturation: 1.0,
        }
    } else if h < 10.0 {
        SunFilter {
            brightness: 0.9 + (h - 8.0) * 0.05,
            sepia: 0.1 - (h - 8.0) * 0.05,
            saturation: 1.0,
        }
    } else if h < 14.0 {
        SunFilter::NEUTRAL
    } else if h < 17.0 {
        SunFilter {
            brightness: 1.0 - (h - 14.0) * 0.03,
            sepia: (h - 14.0) * 0.1,
            saturation: 1.0 + (h - 14.0) * 0.05,
        }
    } else {
        SunFilter {
            brightness: 0.85 - (h - 17.0) * 0.1,
            sepia: 0.3 + (h - 17.0) * 0.1,
            saturation: 1.15,
        }
    }
}
