//! Data-driven game balance
//!
//! Every number that scales with the level lives here so the level
//! initializer only has to consume a table.

use serde::{Deserialize, Serialize};

/// Score needed per level before advancing
pub const LEVEL_SCORE_STEP: u64 = 300;
/// Target value per level
pub const TARGET_POINTS_PER_LEVEL: u64 = 50;

/// Population and difficulty for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTuning {
    pub level: u32,
    pub orb_count: usize,
    pub enemy_count: usize,
    pub enemy_speed: f32,
    /// Probability that a given enemy chases the player
    pub chase_chance: f64,
    pub target_count: usize,
    pub target_points: u64,
    pub powerup_count: usize,
    pub static_platforms: usize,
    pub moving_platforms: usize,
    /// Score at which the next level starts
    pub score_threshold: u64,
}

impl LevelTuning {
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        let n = level as usize;
        Self {
            level,
            orb_count: 5 + n,
            enemy_count: 2 + n,
            enemy_speed: 1.0 + 0.5 * level as f32,
            chase_chance: if level > 1 { 0.5 } else { 0.0 },
            target_count: 3 + n,
            target_points: target_points_for_level(level),
            powerup_count: 2 + n,
            static_platforms: if level >= 2 { 3 + n } else { 0 },
            moving_platforms: if level >= 3 { 2 } else { 0 },
            score_threshold: LEVEL_SCORE_STEP * level as u64,
        }
    }
}

/// Points a target is worth on the given level
#[inline]
pub fn target_points_for_level(level: u32) -> u64 {
    TARGET_POINTS_PER_LEVEL * level as u64
}

/// Two-stop vertical background gradient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub top: [f32; 4],
    pub bottom: [f32; 4],
}

impl Background {
    /// Levels 1-3 each get their own palette, later levels share a fourth
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => Self {
                top: [0.10, 0.10, 0.18, 1.0],
                bottom: [0.09, 0.13, 0.24, 1.0],
            },
            2 => Self {
                top: [0.18, 0.11, 0.41, 1.0],
                bottom: [0.07, 0.60, 0.56, 1.0],
            },
            3 => Self {
                top: [0.26, 0.05, 0.22, 1.0],
                bottom: [0.55, 0.17, 0.13, 1.0],
            },
            _ => Self {
                top: [0.05, 0.05, 0.05, 1.0],
                bottom: [0.20, 0.03, 0.30, 1.0],
            },
        }
    }
}
