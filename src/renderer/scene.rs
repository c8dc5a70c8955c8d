//! Scene building
//!
//! Turns a [`GameState`] into one triangle list, back to front. Building a
//! scene never mutates the state.

use glam::Vec2;

use super::hud::level_progress;
use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::consts::*;
use crate::platform::{KeyState, TouchControl, touch_layout};
use crate::settings::Settings;
use crate::sim::{Enemy, GameState, Platform, Player, PowerUp, PowerUpKind, Target};

const GRID_SPACING: f32 = 50.0;
const GLOW_WIDTH: f32 = 10.0;
/// Ticks per on/off phase of the invincibility blink
const BLINK_PERIOD: u64 = 5;
const MAX_LIFE_ICONS: u32 = 10;

/// Build the draw list for one frame
///
/// `touch` carries the held state of the on-canvas controls and is `None`
/// when they should not be drawn.
pub fn build_scene(state: &GameState, settings: &Settings, touch: Option<&KeyState>) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let glow = settings.effective_glow();
    let mut out = Vec::with_capacity(8192);

    out.extend(shapes::gradient_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        state.background.top,
        state.background.bottom,
    ));

    if settings.grid {
        draw_grid(&mut out, state, settings.effective_grid_drift());
    }

    for platform in &state.platforms {
        draw_platform(&mut out, platform);
    }

    for orb in state.orbs.iter().filter(|o| !o.collected) {
        let color = orb.color.rgba();
        let radius = orb.radius();
        if glow {
            out.extend(shapes::radial_glow(
                orb.pos,
                radius,
                radius + GLOW_WIDTH,
                with_alpha(color, 0.5),
                segments,
            ));
        }
        out.extend(shapes::circle(orb.pos, radius, color, segments));
    }

    for power_up in state.power_ups.iter().filter(|p| !p.collected) {
        draw_power_up(&mut out, power_up, segments);
    }

    for enemy in &state.enemies {
        draw_enemy(&mut out, enemy, glow, segments);
    }

    for target in state.targets.iter().filter(|t| !t.matched) {
        draw_target(&mut out, target);
    }

    for particle in state.particles.iter().take(settings.max_particles()) {
        out.extend(shapes::circle(
            particle.pos,
            particle.size.max(0.0),
            with_alpha(particle.color, particle.color[3] * particle.alpha()),
            8,
        ));
    }

    let blink_hidden = settings.effective_blink()
        && state.player.is_invincible()
        && (state.time_ticks / BLINK_PERIOD) % 2 == 1;
    if !blink_hidden {
        draw_player(&mut out, &state.player, segments);
    }

    draw_status(&mut out, state);

    if let Some(keys) = touch {
        draw_touch_controls(&mut out, keys, segments);
    }

    out
}

fn draw_grid(out: &mut Vec<Vertex>, state: &GameState, drift: bool) {
    let offset = if drift {
        (state.time_ticks as f32 * 0.5) % GRID_SPACING
    } else {
        0.0
    };

    let mut x = offset;
    while x <= CANVAS_WIDTH {
        out.extend(shapes::line(
            Vec2::new(x, 0.0),
            Vec2::new(x, CANVAS_HEIGHT),
            1.0,
            colors::GRID,
        ));
        x += GRID_SPACING;
    }
    let mut y = offset;
    while y <= CANVAS_HEIGHT {
        out.extend(shapes::line(
            Vec2::new(0.0, y),
            Vec2::new(CANVAS_WIDTH, y),
            1.0,
            colors::GRID,
        ));
        y += GRID_SPACING;
    }
}

fn draw_platform(out: &mut Vec<Vertex>, platform: &Platform) {
    let fill = if platform.is_moving() {
        colors::PLATFORM_MOVING
    } else {
        colors::PLATFORM
    };
    out.extend(shapes::rect(platform.pos, platform.size, fill));
    out.extend(shapes::rect(
        platform.pos,
        Vec2::new(platform.size.x, 2.0),
        colors::PLATFORM_EDGE,
    ));
}

fn draw_power_up(out: &mut Vec<Vertex>, power_up: &PowerUp, segments: u32) {
    let center = power_up.pos + Vec2::new(0.0, power_up.float_offset);
    let r = POWERUP_SIZE;

    match power_up.kind {
        PowerUpKind::Shield => {
            out.extend(shapes::ring(center, r - 4.0, r, colors::POWERUP_SHIELD, segments));
            out.extend(shapes::circle(
                center,
                r * 0.4,
                with_alpha(colors::POWERUP_SHIELD, 0.6),
                segments,
            ));
        }
        PowerUpKind::ExtraLife => {
            // Heart: two lobes over a point
            let lobe = r * 0.5;
            let c = colors::POWERUP_EXTRA_LIFE;
            out.extend(shapes::circle(center + Vec2::new(-lobe, -lobe * 0.5), lobe, c, segments));
            out.extend(shapes::circle(center + Vec2::new(lobe, -lobe * 0.5), lobe, c, segments));
            out.extend(shapes::triangle(
                center + Vec2::new(-r, -lobe * 0.2),
                center + Vec2::new(r, -lobe * 0.2),
                center + Vec2::new(0.0, r),
                c,
            ));
        }
        PowerUpKind::ScoreMultiplier => {
            // Diamond
            let c = colors::POWERUP_MULTIPLIER;
            let top = center + Vec2::new(0.0, -r);
            let bottom = center + Vec2::new(0.0, r);
            let left = center + Vec2::new(-r, 0.0);
            let right = center + Vec2::new(r, 0.0);
            out.extend(shapes::triangle(top, left, right, c));
            out.extend(shapes::triangle(bottom, right, left, c));
        }
        PowerUpKind::SlowMotion => {
            // Clock face
            let c = colors::POWERUP_SLOW_MOTION;
            out.extend(shapes::ring(center, r - 3.0, r, c, segments));
            out.extend(shapes::line(center, center + Vec2::new(0.0, -r * 0.7), 2.0, c));
            out.extend(shapes::line(center, center + Vec2::new(r * 0.5, 0.0), 2.0, c));
        }
        PowerUpKind::Magnet => {
            // Horseshoe opening upward
            let c = colors::POWERUP_MAGNET;
            out.extend(shapes::arc_band(
                center,
                r * 0.5,
                r,
                0.0,
                std::f32::consts::PI,
                c,
                segments / 2,
            ));
            let pole = Vec2::new(r * 0.5, r * 0.6);
            out.extend(shapes::rect(center + Vec2::new(-r, -r * 0.6), pole, c));
            out.extend(shapes::rect(center + Vec2::new(r * 0.5, -r * 0.6), pole, c));
        }
    }
}

fn draw_enemy(out: &mut Vec<Vertex>, enemy: &Enemy, glow: bool, segments: u32) {
    let color = enemy.color.rgba();
    let half = enemy.size / 2.0;
    if glow {
        out.extend(shapes::radial_glow(
            enemy.pos,
            half * 0.6,
            half + GLOW_WIDTH,
            with_alpha(color, 0.4),
            segments,
        ));
    }
    out.extend(shapes::triangle(
        enemy.pos + Vec2::new(0.0, -half),
        enemy.pos + Vec2::new(-half, half),
        enemy.pos + Vec2::new(half, half),
        color,
    ));
}

fn draw_target(out: &mut Vec<Vertex>, target: &Target) {
    let half = target.half_size();
    let corner = target.pos - Vec2::splat(half);
    let size = Vec2::splat(half * 2.0);
    let color = target.color.rgba();

    out.extend(shapes::rect(corner, size, with_alpha(color, 0.3)));
    out.extend(shapes::rect_outline(corner, size, 3.0, color));
    out.extend(shapes::rect_outline(
        corner + Vec2::splat(5.0),
        size - Vec2::splat(10.0),
        1.0,
        colors::TARGET_BORDER,
    ));
}

fn draw_player(out: &mut Vec<Vertex>, player: &Player, segments: u32) {
    let alpha = if player.is_invisible() { 0.3 } else { 1.0 };
    let body = player
        .color
        .map_or(colors::PLAYER_NEUTRAL, |c| c.rgba());
    let face = with_alpha(colors::PLAYER_FACE, alpha);
    let pos = player.pos;

    if player.has_magnet() {
        out.extend(shapes::ring(
            pos,
            player.magnet_radius - 2.0,
            player.magnet_radius,
            colors::MAGNET_RING,
            segments * 2,
        ));
    }

    out.extend(shapes::circle(pos, player.size, with_alpha(body, alpha), segments));

    // Eyes and smile
    out.extend(shapes::circle(pos + Vec2::new(-6.0, -5.0), 3.0, face, 8));
    out.extend(shapes::circle(pos + Vec2::new(6.0, -5.0), 3.0, face, 8));
    out.extend(shapes::arc_band(
        pos,
        7.0,
        9.0,
        0.2 * std::f32::consts::PI,
        0.6 * std::f32::consts::PI,
        face,
        8,
    ));

    if player.is_shielded() {
        out.extend(shapes::ring(
            pos,
            player.size + 5.0,
            player.size + 8.0,
            colors::SHIELD_RING,
            segments,
        ));
    }
}

/// Life icons (top right) and the level-progress bar (top center)
fn draw_status(out: &mut Vec<Vertex>, state: &GameState) {
    for i in 0..state.player.lives.min(MAX_LIFE_ICONS) {
        let center = Vec2::new(CANVAS_WIDTH - 20.0 - i as f32 * 22.0, 20.0);
        out.extend(shapes::circle(center, 7.0, colors::LIFE_ICON, 12));
    }

    let track_corner = Vec2::new(CANVAS_WIDTH / 2.0 - 150.0, 12.0);
    let track_size = Vec2::new(300.0, 8.0);
    out.extend(shapes::rect(track_corner, track_size, colors::PROGRESS_TRACK));
    let progress = level_progress(state);
    if progress > 0.0 {
        out.extend(shapes::rect(
            track_corner,
            Vec2::new(track_size.x * progress, track_size.y),
            colors::PROGRESS_FILL,
        ));
    }
}

fn draw_touch_controls(out: &mut Vec<Vertex>, keys: &KeyState, segments: u32) {
    for button in touch_layout() {
        let fill = if keys.is_held(button.control) {
            colors::TOUCH_BUTTON_HELD
        } else {
            colors::TOUCH_BUTTON
        };
        out.extend(shapes::circle(button.center, button.radius, fill, segments));

        let c = button.center;
        let s = button.radius * 0.4;
        let (a, b, tip) = match button.control {
            TouchControl::Left => (c + Vec2::new(s, -s), c + Vec2::new(s, s), c + Vec2::new(-s, 0.0)),
            TouchControl::Right => (c + Vec2::new(-s, -s), c + Vec2::new(-s, s), c + Vec2::new(s, 0.0)),
            TouchControl::Jump => (c + Vec2::new(-s, s), c + Vec2::new(s, s), c + Vec2::new(0.0, -s)),
        };
        out.extend(shapes::triangle(a, b, tip, colors::TOUCH_GLYPH));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::{OrbColor, Particle};

    fn canvas_color_at_origin(vertices: &[Vertex]) -> [f32; 4] {
        vertices[0].color
    }

    #[test]
    fn test_background_drawn_first() {
        let state = GameState::new(3);
        let vertices = build_scene(&state, &Settings::default(), None);
        assert_eq!(canvas_color_at_origin(&vertices), state.background.top);
        assert!(vertices.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn test_scene_is_pure() {
        let state = GameState::new(3);
        let before = state.time_ticks;
        let a = build_scene(&state, &Settings::default(), None);
        let b = build_scene(&state, &Settings::default(), None);
        assert_eq!(a, b);
        assert_eq!(state.time_ticks, before);
    }

    #[test]
    fn test_collected_orbs_not_drawn() {
        let mut state = GameState::new(3);
        let settings = Settings::default();
        let full = build_scene(&state, &settings, None).len();
        for orb in &mut state.orbs {
            orb.collected = true;
        }
        assert!(build_scene(&state, &settings, None).len() < full);
    }

    #[test]
    fn test_particles_respect_settings() {
        let mut state = GameState::empty(3);
        let mut settings = Settings::default();
        let baseline = build_scene(&state, &settings, None).len();

        for _ in 0..10 {
            state
                .particles
                .push(Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, [1.0; 4], 3.0));
        }
        assert_eq!(build_scene(&state, &settings, None).len(), baseline + 10 * 8 * 3);

        settings.particles = false;
        assert_eq!(build_scene(&state, &settings, None).len(), baseline);
    }

    #[test]
    fn test_low_quality_drops_glow() {
        let mut state = GameState::empty(3);
        state
            .orbs
            .push(crate::sim::ColorOrb::new(Vec2::new(200.0, 200.0), OrbColor::Red));
        let high = build_scene(&state, &Settings::from_preset(QualityPreset::High), None);
        let low = build_scene(&state, &Settings::from_preset(QualityPreset::Low), None);
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_invincibility_blink_and_reduced_motion() {
        let mut state = GameState::empty(3);
        state.player.timers.invincible = 100.0;
        state.time_ticks = BLINK_PERIOD;

        let mut settings = Settings::default();
        let blinking = build_scene(&state, &settings, None).len();
        settings.reduced_motion = true;
        let steady = build_scene(&state, &settings, None).len();
        assert!(steady > blinking);
    }

    #[test]
    fn test_touch_controls_optional() {
        let state = GameState::empty(3);
        let settings = Settings::default();
        let keys = KeyState::new();
        let without = build_scene(&state, &settings, None).len();
        let with = build_scene(&state, &settings, Some(&keys)).len();
        assert!(with > without);
    }

    #[test]
    fn test_invisible_player_is_translucent() {
        let mut state = GameState::empty(3);
        let settings = Settings::from_preset(QualityPreset::Low);
        state.player.timers.invisible = 50.0;
        let vertices = build_scene(&state, &settings, None);
        let center = state.player.pos;
        assert!(vertices.iter().any(|v| {
            v.position == [center.x, center.y] && (v.color[3] - 0.3).abs() < 1e-6
        }));
    }
}
