//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame
//! - Seeded RNG only
//! - Stable iteration order (entities are updated in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod palette;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collides};
pub use level::init_level;
pub use palette::{ColorAbility, OrbColor};
pub use state::{
    ColorOrb, DefeatReason, Enemy, GameEvent, GamePhase, GameState, Particle, Platform,
    PlatformKind, Player, PowerUp, PowerUpKind, Target,
};
pub use tick::{TickInput, defeat_reason, tick};
