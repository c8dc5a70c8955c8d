//! Game state and core simulation types
//!
//! Everything the frame loop reads or mutates lives in [`GameState`]; the
//! host only ever touches it through `tick` and read-only rendering.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::palette::OrbColor;
use crate::consts::*;
use crate::tuning::{Background, LevelTuning};

/// Current phase of gameplay
///
/// Level transitions complete inside a single tick, so they never show up
/// as a resting phase; hosts observe them through [`GameEvent::LevelUp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Why an enemy contact counted as a defeat instead of a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatReason {
    Invincible,
    Invisible,
    ColorMatch,
    Shield,
}

/// Things the simulation reports to the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelUp { level: u32 },
    GameOver { final_score: u64 },
    OrbAbsorbed { color: OrbColor },
    PowerUpCollected { kind: PowerUpKind },
    EnemyDefeated { reason: DefeatReason, points: u64 },
    PlayerHit { lives_left: u32 },
    TargetMatched { points: u64 },
}

/// Countdown timers (ticks remaining, 0 = inactive)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerTimers {
    pub invincible: f32,
    pub shield: f32,
    pub multiplier: f32,
    pub magnet: f32,
    pub slow_motion: f32,
    pub invisible: f32,
}

/// The player's blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half extent of the collision box (also the drawn radius)
    pub size: f32,
    /// Absorbed color (`None` = neutral)
    pub color: Option<OrbColor>,
    pub speed: f32,
    pub jump_power: f32,
    pub lives: u32,
    pub score: u64,
    pub airborne: bool,
    pub score_multiplier: u64,
    pub magnet_radius: f32,
    pub timers: PlayerTimers,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            color: None,
            speed: DEFAULT_SPEED,
            jump_power: DEFAULT_JUMP_POWER,
            lives: STARTING_LIVES,
            score: 0,
            airborne: true,
            score_multiplier: 1,
            magnet_radius: 0.0,
            timers: PlayerTimers::default(),
        }
    }

    /// Back to the spawn point for a new level, keeping score and lives
    pub fn reset_for_level(&mut self) {
        let (score, lives) = (self.score, self.lives);
        *self = Self::new();
        self.score = score;
        self.lives = lives;
        self.timers.invincible = LEVEL_START_INVINCIBILITY;
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.timers.invincible > 0.0
    }

    #[inline]
    pub fn is_shielded(&self) -> bool {
        self.timers.shield > 0.0
    }

    #[inline]
    pub fn is_invisible(&self) -> bool {
        self.timers.invisible > 0.0
    }

    #[inline]
    pub fn is_slow_motion(&self) -> bool {
        self.timers.slow_motion > 0.0
    }

    #[inline]
    pub fn has_magnet(&self) -> bool {
        self.magnet_radius > 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Tick every countdown. Slow motion always runs at full rate.
    pub fn decay_timers(&mut self, speed_scale: f32) {
        let t = &mut self.timers;
        t.invincible = (t.invincible - speed_scale).max(0.0);
        t.shield = (t.shield - speed_scale).max(0.0);
        t.multiplier = (t.multiplier - speed_scale).max(0.0);
        t.magnet = (t.magnet - speed_scale).max(0.0);
        t.invisible = (t.invisible - speed_scale).max(0.0);
        t.slow_motion = (t.slow_motion - 1.0).max(0.0);

        if t.multiplier <= 0.0 {
            self.score_multiplier = 1;
        }
        if t.magnet <= 0.0 {
            self.magnet_radius = 0.0;
        }
    }

    /// Re-derive movement stats from the absorbed color (runs every frame)
    pub fn apply_color_ability(&mut self) {
        self.speed = DEFAULT_SPEED;
        self.jump_power = DEFAULT_JUMP_POWER;

        match self.color {
            Some(OrbColor::Red) => self.speed = RED_SPEED,
            Some(OrbColor::Blue) => self.jump_power = BLUE_JUMP_POWER,
            Some(OrbColor::Green) => {
                if !self.is_invisible() {
                    self.timers.invisible = INVISIBILITY_TICKS;
                }
            }
            Some(OrbColor::Yellow) => {
                if !self.is_shielded() {
                    self.timers.shield = SHIELD_TICKS;
                }
            }
            Some(OrbColor::Purple) => {
                self.score_multiplier = 2;
                self.timers.multiplier = MULTIPLIER_TICKS;
            }
            None => {}
        }
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.timers.shield = SHIELD_TICKS,
            PowerUpKind::ExtraLife => self.lives += 1,
            PowerUpKind::ScoreMultiplier => {
                self.score_multiplier = 2;
                self.timers.multiplier = MULTIPLIER_TICKS;
            }
            PowerUpKind::SlowMotion => self.timers.slow_motion = SLOW_MOTION_TICKS,
            PowerUpKind::Magnet => {
                self.magnet_radius = MAGNET_RADIUS;
                self.timers.magnet = MAGNET_TICKS;
            }
        }
    }
}

/// Collectible that sets the player's color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorOrb {
    pub pos: Vec2,
    pub color: OrbColor,
    pub collected: bool,
    pub pulse_phase: f32,
    /// Size offset in [0, 5]
    pub pulse: f32,
    /// Ticks until a collected orb comes back
    pub respawn_ticks: u32,
}

impl ColorOrb {
    pub fn new(pos: Vec2, color: OrbColor) -> Self {
        Self {
            pos,
            color,
            collected: false,
            pulse_phase: 0.0,
            pulse: 0.0,
            respawn_ticks: 0,
        }
    }

    pub fn radius(&self) -> f32 {
        ORB_SIZE + self.pulse
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.radius())
    }
}

/// Triangular enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    /// Periodically re-aims at the player
    pub chase: bool,
    pub color: OrbColor,
    /// Full width, pulsates in [35, 45]
    pub size: f32,
    pub pulse_phase: f32,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size / 2.0)
    }
}

/// Color-matching scoring objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub color: OrbColor,
    pub points: u64,
    pub matched: bool,
    pub pulse_phase: f32,
    /// Size offset in [0, 3]
    pub pulse: f32,
    pub respawn_ticks: u32,
}

impl Target {
    pub fn half_size(&self) -> f32 {
        TARGET_SIZE + self.pulse
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_size())
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    ExtraLife,
    ScoreMultiplier,
    SlowMotion,
    Magnet,
}

impl PowerUpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::ExtraLife => "Extra Life",
            PowerUpKind::ScoreMultiplier => "2x Score",
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::Magnet => "Magnet",
        }
    }
}

/// A power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    pub float_phase: f32,
    /// Vertical bob in [-5, 5]
    pub float_offset: f32,
    pub respawn_ticks: u32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            collected: false,
            float_phase: 0.0,
            float_offset: 0.0,
            respawn_ticks: 0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, POWERUP_SIZE)
    }
}

/// Platform motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    /// Ping-pongs between `start` and `end`; `progress` is in [0, 1]
    Moving {
        start: Vec2,
        end: Vec2,
        progress: f32,
        speed: f32,
    },
}

/// A solid ledge the player can land on from above
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
    /// Movement applied during the last update (carries riders)
    pub last_delta: Vec2,
}

impl Platform {
    pub fn new_static(pos: Vec2, width: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(width, PLATFORM_HEIGHT),
            kind: PlatformKind::Static,
            last_delta: Vec2::ZERO,
        }
    }

    pub fn new_moving(start: Vec2, end: Vec2, width: f32, speed: f32) -> Self {
        Self {
            pos: start,
            size: Vec2::new(width, PLATFORM_HEIGHT),
            kind: PlatformKind::Moving {
                start,
                end,
                progress: 0.0,
                speed,
            },
            last_delta: Vec2::ZERO,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.kind, PlatformKind::Moving { .. })
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    /// Advance a moving platform; endpoints swap when progress reaches 1
    pub fn advance(&mut self, speed_scale: f32) {
        let PlatformKind::Moving {
            start,
            end,
            progress,
            speed,
        } = &mut self.kind
        else {
            return;
        };

        let before = self.pos;
        *progress += *speed * speed_scale;
        if *progress >= 1.0 {
            std::mem::swap(start, end);
            *progress = 0.0;
        }
        self.pos = start.lerp(*end, *progress);
        self.last_delta = self.pos - before;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    pub life: f32,
    pub max_life: f32,
    pub base_size: f32,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: [f32; 4], size: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            base_size: size,
            size,
        }
    }

    /// Remaining life fraction, used as draw alpha
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    pub fn update(&mut self, speed_scale: f32) {
        self.pos += self.vel * speed_scale;
        self.life -= speed_scale;
        self.size = self.base_size * self.alpha();
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    /// Score that triggers the next level
    pub next_level_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub background: Background,
    pub player: Player,
    pub orbs: Vec<ColorOrb>,
    pub enemies: Vec<Enemy>,
    pub targets: Vec<Target>,
    pub power_ups: Vec<PowerUp>,
    pub platforms: Vec<Platform>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Jump state on the previous tick (for edge detection)
    pub jump_held: bool,
}

impl GameState {
    /// Create a new game at level 1 with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self::empty(seed);
        super::level::init_level(&mut state, 1);
        state
    }

    /// Level-1 bookkeeping with no entities spawned
    pub fn empty(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            next_level_score: LevelTuning::for_level(1).score_threshold,
            time_ticks: 0,
            phase: GamePhase::Playing,
            background: Background::for_level(1),
            player: Player::new(),
            orbs: Vec::new(),
            enemies: Vec::new(),
            targets: Vec::new(),
            power_ups: Vec::new(),
            platforms: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            jump_held: false,
        }
    }

    /// Global time multiplier for this frame
    #[inline]
    pub fn speed_scale(&self) -> f32 {
        if self.player.is_slow_motion() {
            SLOW_MOTION_SCALE
        } else {
            1.0
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.player.score
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
