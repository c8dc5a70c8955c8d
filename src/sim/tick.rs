//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by exactly one animation
//! frame. The order of the steps below is part of the game's behavior:
//! e.g. magnet pull happens before an orb is tested against the player, and
//! a defeated enemy is already repositioned when the next enemy is checked.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::autopilot;
use super::collision::{bounce_in_bounds, lands_on, magnet_pull, rests_on};
use super::level::{init_level, random_color, random_interior, random_power_up_kind, respawn_enemy};
use super::palette::OrbColor;
use super::state::{DefeatReason, GameEvent, GamePhase, GameState, Particle, Player};
use crate::consts::*;
use crate::ms_to_ticks;
use crate::tuning::target_points_for_level;

/// Input state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump/up held
    pub jump: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Particle color for player hits
const HIT_COLOR: [f32; 4] = [1.0, 0.27, 0.27, 1.0];

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Don't tick once the run is over
    if state.phase == GamePhase::GameOver {
        return;
    }

    let input = if input.idle_mode {
        autopilot::steer(state)
    } else {
        *input
    };

    state.time_ticks += 1;

    if state.score() >= state.next_level_score {
        let next = state.level + 1;
        init_level(state, next);
    }

    // Slow motion scales everything after this point
    let scale = state.speed_scale();

    state.player.decay_timers(scale);
    state.player.apply_color_ability();

    move_player(state, &input, scale);

    for platform in &mut state.platforms {
        platform.advance(scale);
    }

    update_orbs(state, scale);
    update_power_ups(state, scale);
    update_enemies(state, scale);
    if state.phase == GamePhase::GameOver {
        return;
    }
    update_targets(state, scale);
    update_particles(&mut state.particles, scale);
}

/// Input, gravity, platform landing and canvas bounds
fn move_player(state: &mut GameState, input: &TickInput, scale: f32) {
    let player = &mut state.player;

    player.vel.x = match (input.left, input.right) {
        (true, false) => -player.speed,
        (false, true) => player.speed,
        _ => 0.0,
    };

    let jump_edge = input.jump && !state.jump_held;
    state.jump_held = input.jump;
    if jump_edge && !player.airborne {
        player.vel.y = -player.jump_power;
        player.airborne = true;
    }

    // Ride the platform stood on last frame; it moved after we did
    if !player.airborne {
        let feet = player.aabb();
        let bottom = player.pos.y + player.size;
        if let Some(platform) = state.platforms.iter().find(|p| {
            p.is_moving() && rests_on(bottom, &feet, &p.aabb().translate(-p.last_delta))
        }) {
            player.pos += platform.last_delta;
        }
    }

    player.vel.y += GRAVITY * scale;
    let prev_bottom = player.pos.y + player.size;
    player.pos += player.vel * scale;
    player.airborne = true;

    if player.vel.y > 0.0 {
        let mover = player.aabb();
        if let Some(platform) = state
            .platforms
            .iter()
            .find(|p| lands_on(prev_bottom, &mover, &p.aabb()))
        {
            player.pos.y = platform.pos.y - player.size;
            player.vel.y = 0.0;
            player.airborne = false;
        }
    }

    let size = player.size;
    player.pos.x = player.pos.x.clamp(size, CANVAS_WIDTH - size);
    if player.pos.y < size {
        player.pos.y = size;
        player.vel.y = player.vel.y.max(0.0);
    }
    if player.pos.y >= CANVAS_HEIGHT - size {
        player.pos.y = CANVAS_HEIGHT - size;
        player.vel.y = 0.0;
        player.airborne = false;
    }
}

fn update_orbs(state: &mut GameState, scale: f32) {
    let player_box = state.player.aabb();

    for orb in &mut state.orbs {
        if orb.collected {
            orb.respawn_ticks = orb.respawn_ticks.saturating_sub(1);
            if orb.respawn_ticks == 0 {
                orb.pos = random_interior(&mut state.rng);
                orb.collected = false;
                orb.pulse_phase = 0.0;
                orb.pulse = 0.0;
            }
            continue;
        }

        orb.pulse_phase += 0.1 * scale;
        orb.pulse = (orb.pulse_phase.sin() + 1.0) * 2.5;

        if state.player.has_magnet() {
            orb.pos += magnet_pull(
                orb.pos,
                state.player.pos,
                state.player.magnet_radius,
                MAGNET_STRENGTH,
                scale,
            );
        }

        if orb.aabb().overlaps(&player_box) {
            state.player.color = Some(orb.color);
            orb.collected = true;
            orb.respawn_ticks = ms_to_ticks(ORB_RESPAWN_MS);
            spawn_burst(
                &mut state.particles,
                &mut state.rng,
                orb.pos,
                orb.color.rgba(),
                ORB_BURST,
            );
            log::debug!("Absorbed {} orb", orb.color.name());
            state.events.push(GameEvent::OrbAbsorbed { color: orb.color });
        }
    }
}

fn update_power_ups(state: &mut GameState, scale: f32) {
    let player_box = state.player.aabb();

    for power_up in &mut state.power_ups {
        if power_up.collected {
            power_up.respawn_ticks = power_up.respawn_ticks.saturating_sub(1);
            if power_up.respawn_ticks == 0 {
                power_up.kind = random_power_up_kind(&mut state.rng, state.level);
                power_up.pos = random_interior(&mut state.rng);
                power_up.collected = false;
                power_up.float_phase = 0.0;
                power_up.float_offset = 0.0;
            }
            continue;
        }

        power_up.float_phase += 0.05 * scale;
        power_up.float_offset = power_up.float_phase.sin() * 5.0;

        if state.player.has_magnet() {
            power_up.pos += magnet_pull(
                power_up.pos,
                state.player.pos,
                state.player.magnet_radius,
                MAGNET_STRENGTH,
                scale,
            );
        }

        if power_up.aabb().overlaps(&player_box) {
            state.player.apply_power_up(power_up.kind);
            power_up.collected = true;
            power_up.respawn_ticks = ms_to_ticks(POWERUP_RESPAWN_MS);
            spawn_burst(
                &mut state.particles,
                &mut state.rng,
                power_up.pos,
                [1.0, 1.0, 1.0, 1.0],
                POWERUP_BURST,
            );
            log::debug!("Collected {} power-up", power_up.kind.label());
            state.events.push(GameEvent::PowerUpCollected {
                kind: power_up.kind,
            });
        }
    }
}

/// Which guard (if any) turns an enemy contact into a defeat
pub fn defeat_reason(player: &Player, enemy_color: OrbColor) -> Option<DefeatReason> {
    if player.is_invincible() {
        Some(DefeatReason::Invincible)
    } else if player.is_invisible() {
        Some(DefeatReason::Invisible)
    } else if player.color == Some(enemy_color) {
        Some(DefeatReason::ColorMatch)
    } else if player.is_shielded() {
        Some(DefeatReason::Shield)
    } else {
        None
    }
}

fn update_enemies(state: &mut GameState, scale: f32) {
    let reaim = state.time_ticks % CHASE_INTERVAL == 0;
    let bounds = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    for enemy in &mut state.enemies {
        enemy.pulse_phase += 0.05 * scale;
        enemy.size = ENEMY_BASE_SIZE + ENEMY_SIZE_SWING * enemy.pulse_phase.sin();

        if enemy.chase && reaim {
            enemy.vel = (state.player.pos - enemy.pos).normalize_or_zero() * enemy.speed;
        }
        enemy.pos += enemy.vel * scale;
        bounce_in_bounds(&mut enemy.pos, &mut enemy.vel, enemy.size / 2.0, bounds);

        if !enemy.aabb().overlaps(&state.player.aabb()) {
            continue;
        }

        let player = &mut state.player;
        match defeat_reason(player, enemy.color) {
            Some(reason) => {
                let points = DEFEAT_POINTS * player.score_multiplier;
                player.score += points;
                if reason == DefeatReason::Shield {
                    player.timers.shield = 0.0;
                }
                respawn_enemy(enemy, &mut state.rng, player.pos);
                log::debug!("Enemy defeated ({:?}) +{}", reason, points);
                state
                    .events
                    .push(GameEvent::EnemyDefeated { reason, points });
            }
            None => {
                player.lives = player.lives.saturating_sub(1);
                spawn_burst(
                    &mut state.particles,
                    &mut state.rng,
                    player.pos,
                    HIT_COLOR,
                    HIT_BURST,
                );
                state.events.push(GameEvent::PlayerHit {
                    lives_left: player.lives,
                });

                if player.lives > 0 {
                    log::debug!("Player hit, {} lives left", player.lives);
                    player.timers.invincible = HIT_INVINCIBILITY;
                    respawn_enemy(enemy, &mut state.rng, player.pos);
                } else {
                    log::info!(
                        "Game over at level {} with score {}",
                        state.level,
                        player.score
                    );
                    state.phase = GamePhase::GameOver;
                    state.events.push(GameEvent::GameOver {
                        final_score: player.score,
                    });
                    return;
                }
            }
        }
    }
}

fn update_targets(state: &mut GameState, scale: f32) {
    let player_box = state.player.aabb();

    for target in &mut state.targets {
        if target.matched {
            target.respawn_ticks = target.respawn_ticks.saturating_sub(1);
            if target.respawn_ticks == 0 {
                target.color = random_color(&mut state.rng);
                target.pos = random_interior(&mut state.rng);
                target.points = target_points_for_level(state.level);
                target.matched = false;
                target.pulse_phase = 0.0;
                target.pulse = 0.0;
            }
            continue;
        }

        target.pulse_phase += 0.08 * scale;
        target.pulse = (target.pulse_phase.sin() + 1.0) * 1.5;

        if state.player.color == Some(target.color) && target.aabb().overlaps(&player_box) {
            let points = target.points * state.player.score_multiplier;
            state.player.score += points;
            target.matched = true;
            target.respawn_ticks = ms_to_ticks(TARGET_RESPAWN_MS);
            spawn_burst(
                &mut state.particles,
                &mut state.rng,
                target.pos,
                target.color.rgba(),
                TARGET_BURST,
            );
            log::debug!("Matched {} target +{}", target.color.name(), points);
            state.events.push(GameEvent::TargetMatched { points });
        }
    }
}

/// Move, age and cull particles
pub fn update_particles(particles: &mut Vec<Particle>, scale: f32) {
    for particle in particles.iter_mut() {
        particle.update(scale);
    }
    particles.retain(|p| p.life > 0.0);
}

/// Radial burst of cosmetic particles (dropped past the cap)
fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    at: Vec2,
    color: [f32; 4],
    count: usize,
) {
    let room = MAX_PARTICLES.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(1.0..5.0);
        let size = rng.random_range(2.0..5.0);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        particles.push(Particle::new(at, vel, color, size));
    }
}
