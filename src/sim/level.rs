//! Level initialization and entity factories
//!
//! Runs at game start and on every level-up. All populations are rebuilt
//! from scratch, which also drops any pending respawn countdowns.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::palette::OrbColor;
use super::state::{
    ColorOrb, Enemy, GameEvent, GameState, Platform, PowerUp, PowerUpKind, Target,
};
use crate::consts::*;
use crate::tuning::{Background, LevelTuning, target_points_for_level};

/// Power-up kinds available on each level
pub fn power_up_pool(level: u32) -> &'static [PowerUpKind] {
    use PowerUpKind::*;
    match level {
        0 | 1 => &[Shield, ExtraLife, ScoreMultiplier],
        2 => &[Shield, ExtraLife, ScoreMultiplier, SlowMotion],
        _ => &[Shield, ExtraLife, ScoreMultiplier, SlowMotion, Magnet],
    }
}

/// Rebuild the arena for `level`
pub fn init_level(state: &mut GameState, level: u32) {
    let tuning = LevelTuning::for_level(level);
    let rng = &mut state.rng;

    state.level = tuning.level;
    state.next_level_score = tuning.score_threshold;
    state.background = Background::for_level(tuning.level);
    state.player.reset_for_level();
    state.jump_held = false;

    state.orbs = (0..tuning.orb_count).map(|_| random_orb(rng)).collect();
    state.enemies = (0..tuning.enemy_count)
        .map(|_| {
            let chase = rng.random_bool(tuning.chase_chance);
            random_enemy(rng, tuning.enemy_speed, chase)
        })
        .collect();
    state.targets = (0..tuning.target_count)
        .map(|_| random_target(rng, tuning.level))
        .collect();
    state.power_ups = (0..tuning.powerup_count)
        .map(|_| random_power_up(rng, tuning.level))
        .collect();

    state.platforms = (0..tuning.static_platforms)
        .map(|_| random_static_platform(rng))
        .collect();
    for i in 0..tuning.moving_platforms {
        state.platforms.push(random_moving_platform(rng, i % 2 == 1));
    }
    state.particles.clear();

    log::info!(
        "Level {}: {} orbs, {} enemies ({} chasing), {} targets, {} power-ups, {} platforms, next at {}",
        tuning.level,
        state.orbs.len(),
        state.enemies.len(),
        state.enemies.iter().filter(|e| e.chase).count(),
        state.targets.len(),
        state.power_ups.len(),
        state.platforms.len(),
        state.next_level_score,
    );
    state.events.push(GameEvent::LevelUp {
        level: tuning.level,
    });
}

/// Uniform position inside the play-field interior
pub fn random_interior(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random_range(PLAY_MARGIN..CANVAS_WIDTH - PLAY_MARGIN),
        rng.random_range(PLAY_MARGIN..CANVAS_HEIGHT - PLAY_MARGIN),
    )
}

pub fn random_color(rng: &mut Pcg32) -> OrbColor {
    OrbColor::from_index(rng.random_range(0..OrbColor::ALL.len()))
}

pub fn random_power_up_kind(rng: &mut Pcg32, level: u32) -> PowerUpKind {
    let pool = power_up_pool(level);
    pool[rng.random_range(0..pool.len())]
}

fn random_orb(rng: &mut Pcg32) -> ColorOrb {
    let color = random_color(rng);
    ColorOrb::new(random_interior(rng), color)
}

fn random_heading(rng: &mut Pcg32, speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin()) * speed
}

fn random_enemy(rng: &mut Pcg32, speed: f32, chase: bool) -> Enemy {
    let color = random_color(rng);
    Enemy {
        pos: random_interior(rng),
        vel: random_heading(rng, speed),
        speed,
        chase,
        color,
        size: ENEMY_BASE_SIZE,
        pulse_phase: 0.0,
    }
}

/// Minimum distance between a respawned enemy and the player
const ENEMY_RESPAWN_CLEARANCE: f32 = 150.0;

/// Send an enemy to a fresh random spot, away from the player if possible
pub fn respawn_enemy(enemy: &mut Enemy, rng: &mut Pcg32, player_pos: Vec2) {
    let mut pos = random_interior(rng);
    for _ in 0..8 {
        if pos.distance(player_pos) >= ENEMY_RESPAWN_CLEARANCE {
            break;
        }
        pos = random_interior(rng);
    }
    enemy.pos = pos;
    enemy.vel = random_heading(rng, enemy.speed);
}

fn random_target(rng: &mut Pcg32, level: u32) -> Target {
    let color = random_color(rng);
    Target {
        pos: random_interior(rng),
        color,
        points: target_points_for_level(level),
        matched: false,
        pulse_phase: 0.0,
        pulse: 0.0,
        respawn_ticks: 0,
    }
}

fn random_power_up(rng: &mut Pcg32, level: u32) -> PowerUp {
    let kind = random_power_up_kind(rng, level);
    PowerUp::new(random_interior(rng), kind)
}

fn random_static_platform(rng: &mut Pcg32) -> Platform {
    let width = rng.random_range(80.0..200.0);
    let pos = Vec2::new(
        rng.random_range(0.0..CANVAS_WIDTH - width),
        rng.random_range(150.0..CANVAS_HEIGHT - 100.0),
    );
    Platform::new_static(pos, width)
}

fn random_moving_platform(rng: &mut Pcg32, vertical: bool) -> Platform {
    let width = 120.0;
    let start = Vec2::new(
        rng.random_range(PLAY_MARGIN..CANVAS_WIDTH - width - 250.0),
        rng.random_range(250.0..CANVAS_HEIGHT - 120.0),
    );
    let travel: f32 = rng.random_range(120.0..220.0);
    let end = if vertical {
        start - Vec2::new(0.0, travel.min(start.y - 120.0))
    } else {
        start + Vec2::new(travel, 0.0)
    };
    let speed = rng.random_range(0.004..0.01);
    Platform::new_moving(start, end, width, speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_population() {
        let state = GameState::new(42);
        assert_eq!(state.level, 1);
        assert_eq!(state.orbs.len(), 6);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.targets.len(), 4);
        assert_eq!(state.power_ups.len(), 3);
        assert_eq!(state.platforms.len(), 0);
        assert_eq!(state.next_level_score, 300);
        assert!(state.enemies.iter().all(|e| !e.chase));
        assert!(state.targets.iter().all(|t| t.points == 50));
        assert_eq!(state.events, vec![GameEvent::LevelUp { level: 1 }]);
    }

    #[test]
    fn test_level_three_population() {
        let mut state = GameState::empty(7);
        init_level(&mut state, 3);
        assert_eq!(state.orbs.len(), 8);
        assert_eq!(state.enemies.len(), 5);
        assert_eq!(state.targets.len(), 6);
        assert_eq!(state.power_ups.len(), 5);
        assert_eq!(state.platforms.len(), 6 + 2);
        assert_eq!(state.platforms.iter().filter(|p| p.is_moving()).count(), 2);
        assert!(state.enemies.iter().all(|e| (e.speed - 2.5).abs() < f32::EPSILON));
        assert!(state.targets.iter().all(|t| t.points == 150));
        assert_eq!(state.next_level_score, 900);
    }

    #[test]
    fn test_positions_inside_play_field() {
        let mut state = GameState::empty(99);
        init_level(&mut state, 4);
        let inside = |p: Vec2| {
            p.x >= PLAY_MARGIN
                && p.x <= CANVAS_WIDTH - PLAY_MARGIN
                && p.y >= PLAY_MARGIN
                && p.y <= CANVAS_HEIGHT - PLAY_MARGIN
        };
        assert!(state.orbs.iter().all(|o| inside(o.pos)));
        assert!(state.enemies.iter().all(|e| inside(e.pos)));
        assert!(state.targets.iter().all(|t| inside(t.pos)));
        assert!(state.power_ups.iter().all(|p| inside(p.pos)));
        assert!(state.platforms.iter().all(|p| {
            p.pos.x >= 0.0 && p.pos.x + p.size.x <= CANVAS_WIDTH && p.pos.y < CANVAS_HEIGHT
        }));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = GameState::empty(1234);
        let mut b = GameState::empty(1234);
        init_level(&mut a, 2);
        init_level(&mut b, 2);

        let orb_pos = |s: &GameState| s.orbs.iter().map(|o| (o.pos, o.color)).collect::<Vec<_>>();
        assert_eq!(orb_pos(&a), orb_pos(&b));
        assert_eq!(
            a.platforms.iter().map(|p| p.pos).collect::<Vec<_>>(),
            b.platforms.iter().map(|p| p.pos).collect::<Vec<_>>()
        );
        assert_eq!(
            a.enemies.iter().map(|e| (e.pos, e.chase)).collect::<Vec<_>>(),
            b.enemies.iter().map(|e| (e.pos, e.chase)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_level_transition_keeps_score_and_lives() {
        let mut state = GameState::new(5);
        state.player.score = 320;
        state.player.lives = 2;
        state.player.color = Some(OrbColor::Red);
        state.orbs[0].collected = true;
        state.orbs[0].respawn_ticks = 100;

        init_level(&mut state, 2);
        assert_eq!(state.player.score, 320);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.color, None);
        assert!(state.player.is_invincible());
        assert!(state.orbs.iter().all(|o| !o.collected && o.respawn_ticks == 0));
    }

    #[test]
    fn test_power_up_pool_grows() {
        assert_eq!(power_up_pool(1).len(), 3);
        assert!(!power_up_pool(1).contains(&PowerUpKind::SlowMotion));
        assert!(power_up_pool(2).contains(&PowerUpKind::SlowMotion));
        assert!(!power_up_pool(2).contains(&PowerUpKind::Magnet));
        assert!(power_up_pool(3).contains(&PowerUpKind::Magnet));
        assert_eq!(power_up_pool(10).len(), 5);
    }

    #[test]
    fn test_respawn_enemy_keeps_speed() {
        let mut state = GameState::new(11);
        let player_pos = state.player.pos;
        let mut enemy = state.enemies[0].clone();
        respawn_enemy(&mut enemy, &mut state.rng, player_pos);
        assert!((enemy.vel.length() - enemy.speed).abs() < 1e-3);
    }
}
