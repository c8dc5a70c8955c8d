//! The five absorbable colors and what each one does to the player

use serde::{Deserialize, Serialize};

/// Orb / target / enemy color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl OrbColor {
    pub const ALL: [OrbColor; 5] = [
        OrbColor::Red,
        OrbColor::Blue,
        OrbColor::Green,
        OrbColor::Yellow,
        OrbColor::Purple,
    ];

    /// Pick a palette entry from a uniform index roll
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn hex(&self) -> &'static str {
        match self {
            OrbColor::Red => "#ff0000",
            OrbColor::Blue => "#0000ff",
            OrbColor::Green => "#00ff00",
            OrbColor::Yellow => "#ffff00",
            OrbColor::Purple => "#ff00ff",
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex))
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrbColor::Red => "Red",
            OrbColor::Blue => "Blue",
            OrbColor::Green => "Green",
            OrbColor::Yellow => "Yellow",
            OrbColor::Purple => "Purple",
        }
    }

    pub fn rgba(&self) -> [f32; 4] {
        match self {
            OrbColor::Red => [1.0, 0.0, 0.0, 1.0],
            OrbColor::Blue => [0.0, 0.0, 1.0, 1.0],
            OrbColor::Green => [0.0, 1.0, 0.0, 1.0],
            OrbColor::Yellow => [1.0, 1.0, 0.0, 1.0],
            OrbColor::Purple => [1.0, 0.0, 1.0, 1.0],
        }
    }

    pub fn ability(&self) -> ColorAbility {
        match self {
            OrbColor::Red => ColorAbility::Speed,
            OrbColor::Blue => ColorAbility::HighJump,
            OrbColor::Green => ColorAbility::Invisibility,
            OrbColor::Yellow => ColorAbility::Shield,
            OrbColor::Purple => ColorAbility::DoublePoints,
        }
    }
}

/// Ability granted while a color is absorbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAbility {
    Speed,
    HighJump,
    Invisibility,
    Shield,
    DoublePoints,
}

impl ColorAbility {
    pub fn label(&self) -> &'static str {
        match self {
            ColorAbility::Speed => "Speed Boost",
            ColorAbility::HighJump => "High Jump",
            ColorAbility::Invisibility => "Invisibility",
            ColorAbility::Shield => "Shield",
            ColorAbility::DoublePoints => "Double Points",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_lookup() {
        assert_eq!(OrbColor::from_hex("#ff00ff"), Some(OrbColor::Purple));
        assert_eq!(OrbColor::from_hex("#FF0000"), Some(OrbColor::Red));
        assert_eq!(OrbColor::from_hex("#ffffff"), None);
    }

    #[test]
    fn test_every_color_has_distinct_ability() {
        let mut seen = Vec::new();
        for color in OrbColor::ALL {
            let ability = color.ability();
            assert!(!seen.contains(&ability));
            seen.push(ability);
        }
    }
}
