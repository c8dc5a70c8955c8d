//! Idle/demo mode - the AI plays the game
//!
//! Produces the same [`TickInput`] a human would, so a demo run goes
//! through exactly the same rules as a played one.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// Horizontal dead zone around the goal
const ARRIVE_DISTANCE: f32 = 8.0;
/// Goal this far above the player is worth a jump
const JUMP_HEIGHT_TRIGGER: f32 = 40.0;
/// Enemies closer than this are jumped over
const THREAT_RADIUS: f32 = 90.0;

/// Pick this frame's input for the autopilot
pub fn steer(state: &GameState) -> TickInput {
    let player = &state.player;
    let mut input = TickInput::default();

    if let Some(goal) = pick_goal(state) {
        let dx = goal.x - player.pos.x;
        if dx > ARRIVE_DISTANCE {
            input.right = true;
        } else if dx < -ARRIVE_DISTANCE {
            input.left = true;
        }

        if player.pos.y - goal.y > JUMP_HEIGHT_TRIGGER && dx.abs() < 120.0 {
            input.jump = true;
        }
    }

    // Hop over enemies that would hurt us
    let vulnerable = !player.is_invincible() && !player.is_invisible() && !player.is_shielded();
    if vulnerable {
        let threatened = state.enemies.iter().any(|e| {
            player.color != Some(e.color) && e.pos.distance(player.pos) < THREAT_RADIUS
        });
        if threatened {
            input.jump = true;
        }
    }

    // Jumps fire on the press edge, so release every other frame
    input.jump = input.jump && !state.jump_held && !player.airborne;
    input
}

/// Where the autopilot wants to go
///
/// A target we can already score, then an orb whose color some target
/// needs, then any power-up, then the nearest orb.
fn pick_goal(state: &GameState) -> Option<Vec2> {
    let pos = state.player.pos;

    if let Some(color) = state.player.color {
        let matching = state
            .targets
            .iter()
            .filter(|t| !t.matched && t.color == color)
            .map(|t| t.pos);
        if let Some(goal) = nearest(pos, matching) {
            return Some(goal);
        }
    }

    let wanted_orbs = state
        .orbs
        .iter()
        .filter(|o| !o.collected)
        .filter(|o| state.targets.iter().any(|t| !t.matched && t.color == o.color))
        .map(|o| o.pos);
    if let Some(goal) = nearest(pos, wanted_orbs) {
        return Some(goal);
    }

    let power_ups = state
        .power_ups
        .iter()
        .filter(|p| !p.collected)
        .map(|p| p.pos);
    if let Some(goal) = nearest(pos, power_ups) {
        return Some(goal);
    }

    let orbs = state.orbs.iter().filter(|o| !o.collected).map(|o| o.pos);
    nearest(pos, orbs)
}

fn nearest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        a.distance_squared(from)
            .partial_cmp(&b.distance_squared(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
