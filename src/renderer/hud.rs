//! Heads-up display data
//!
//! The text half of the HUD is host-rendered (DOM on the web, log lines
//! natively); this module only decides what it says.

use serde::Serialize;

use crate::consts::FRAME_RATE;
use crate::sim::GameState;
use crate::tuning::LEVEL_SCORE_STEP;

/// A running effect and its remaining time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Countdown {
    pub label: &'static str,
    pub seconds: u32,
}

impl Countdown {
    fn from_ticks(label: &'static str, ticks: f32) -> Option<Self> {
        (ticks > 0.0).then(|| Self {
            label,
            seconds: (ticks / FRAME_RATE as f32).ceil() as u32,
        })
    }
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    /// Absorbed color name, "None" when neutral
    pub color: &'static str,
    pub ability: Option<&'static str>,
    pub multiplier: u64,
    pub countdowns: Vec<Countdown>,
    /// Fraction of the way to the next level, in [0, 1]
    pub progress: f32,
    pub game_over: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let player = &state.player;
        let t = &player.timers;
        let countdowns = [
            Countdown::from_ticks("Shield", t.shield),
            Countdown::from_ticks("2x Score", t.multiplier),
            Countdown::from_ticks("Magnet", t.magnet),
            Countdown::from_ticks("Slow Motion", t.slow_motion),
            Countdown::from_ticks("Invisible", t.invisible),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            score: player.score,
            level: state.level,
            lives: player.lives,
            color: player.color.map_or("None", |c| c.name()),
            ability: player.color.map(|c| c.ability().label()),
            multiplier: player.score_multiplier,
            countdowns,
            progress: level_progress(state),
            game_over: state.is_game_over(),
        }
    }

    /// Plain-text HUD lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Score: {}", self.score),
            format!("Level: {}", self.level),
            format!("Lives: {}", self.lives),
        ];
        match self.ability {
            Some(ability) => lines.push(format!("Color: {} ({})", self.color, ability)),
            None => lines.push(format!("Color: {}", self.color)),
        }
        if self.multiplier > 1 {
            lines.push(format!("Multiplier: x{}", self.multiplier));
        }
        for countdown in &self.countdowns {
            lines.push(format!("{}: {}s", countdown.label, countdown.seconds));
        }
        if self.game_over {
            lines.push("GAME OVER".to_string());
        }
        lines
    }
}

/// Progress from the current level's start score to the next threshold
pub fn level_progress(state: &GameState) -> f32 {
    let start = state.next_level_score.saturating_sub(LEVEL_SCORE_STEP);
    let earned = state.score().saturating_sub(start);
    (earned as f32 / LEVEL_SCORE_STEP as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{OrbColor, PowerUpKind};

    #[test]
    fn test_fresh_game_snapshot() {
        let state = GameState::empty(1);
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.color, "None");
        assert!(hud.countdowns.is_empty());
        assert_eq!(hud.progress, 0.0);
        assert_eq!(hud.lines()[3], "Color: None");
    }

    #[test]
    fn test_color_and_countdowns() {
        let mut state = GameState::empty(1);
        state.player.color = Some(OrbColor::Blue);
        state.player.apply_power_up(PowerUpKind::Magnet);
        state.player.timers.shield = 61.0;

        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.ability, Some("High Jump"));
        assert_eq!(
            hud.countdowns,
            vec![
                Countdown { label: "Shield", seconds: 2 },
                Countdown { label: "Magnet", seconds: 10 },
            ]
        );
        let lines = hud.lines();
        assert!(lines.contains(&"Color: Blue (High Jump)".to_string()));
        assert!(lines.contains(&"Shield: 2s".to_string()));
    }

    #[test]
    fn test_level_progress() {
        let mut state = GameState::empty(1);
        state.player.score = 150;
        assert_eq!(level_progress(&state), 0.5);

        // Level 2 starts counting from 300
        state.level = 2;
        state.next_level_score = 600;
        state.player.score = 375;
        assert_eq!(level_progress(&state), 0.25);

        state.player.score = 5000;
        assert_eq!(level_progress(&state), 1.0);
    }
}
