//! Chroma Blob - A single-screen color-matching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Frame driver with level-up/game-over callbacks
//! - `renderer`: Draw-list generation and the WebGPU pipeline
//! - `platform`: Keyboard/touch input state
//! - `tuning`: Data-driven difficulty per level

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameOutcome, GameObserver, Session};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical drawing surface (all coordinates live in this space)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Inset used when picking random spawn positions
    pub const PLAY_MARGIN: f32 = 50.0;

    /// Host animation-frame rate the tick constants are tuned for
    pub const FRAME_RATE: u32 = 60;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 450.0;
    pub const STARTING_LIVES: u32 = 3;
    pub const DEFAULT_SPEED: f32 = 5.0;
    pub const DEFAULT_JUMP_POWER: f32 = 15.0;
    pub const RED_SPEED: f32 = 8.0;
    pub const BLUE_JUMP_POWER: f32 = 20.0;
    pub const GRAVITY: f32 = 0.8;

    /// Timer durations (ticks)
    pub const LEVEL_START_INVINCIBILITY: f32 = 120.0;
    pub const HIT_INVINCIBILITY: f32 = 180.0;
    pub const INVISIBILITY_TICKS: f32 = 300.0;
    pub const SHIELD_TICKS: f32 = 600.0;
    pub const MULTIPLIER_TICKS: f32 = 600.0;
    pub const SLOW_MOTION_TICKS: f32 = 300.0;
    pub const MAGNET_TICKS: f32 = 600.0;
    pub const MAGNET_RADIUS: f32 = 150.0;
    pub const MAGNET_STRENGTH: f32 = 5.0;
    pub const SLOW_MOTION_SCALE: f32 = 0.5;

    /// Respawn delays (real time, unaffected by slow motion)
    pub const ORB_RESPAWN_MS: u32 = 5000;
    pub const POWERUP_RESPAWN_MS: u32 = 15000;
    pub const TARGET_RESPAWN_MS: u32 = 3000;

    /// Entity geometry (half extents)
    pub const ORB_SIZE: f32 = 15.0;
    pub const POWERUP_SIZE: f32 = 15.0;
    pub const TARGET_SIZE: f32 = 25.0;
    pub const ENEMY_BASE_SIZE: f32 = 40.0;
    pub const ENEMY_SIZE_SWING: f32 = 5.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;

    /// Enemies re-aim at the player this often (ticks)
    pub const CHASE_INTERVAL: u64 = 30;
    /// Points for defeating an enemy (before multiplier)
    pub const DEFEAT_POINTS: u64 = 10;

    /// Particles
    pub const PARTICLE_LIFE: f32 = 60.0;
    pub const MAX_PARTICLES: usize = 512;
    pub const ORB_BURST: usize = 20;
    pub const POWERUP_BURST: usize = 15;
    pub const HIT_BURST: usize = 15;
    pub const TARGET_BURST: usize = 30;
}

/// Convert a real-time delay to whole frames at [`consts::FRAME_RATE`]
#[inline]
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms * consts::FRAME_RATE / 1000
}
