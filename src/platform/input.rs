//! Keyboard and touch input state
//!
//! Events update [`KeyState`] as they arrive; the frame loop polls it once
//! per frame through [`InputProvider::sample`].

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::TickInput;

/// Source of per-frame input
pub trait InputProvider {
    fn sample(&self) -> TickInput;
}

/// On-canvas touch controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchControl {
    Left,
    Right,
    Jump,
}

/// Circular touch control in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchButton {
    pub control: TouchControl,
    pub center: Vec2,
    pub radius: f32,
}

impl TouchButton {
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

const TOUCH_RADIUS: f32 = 40.0;
const TOUCH_BOTTOM_INSET: f32 = 60.0;

/// Left and right arrows bottom-left, jump bottom-right
pub fn touch_layout() -> [TouchButton; 3] {
    let y = CANVAS_HEIGHT - TOUCH_BOTTOM_INSET;
    [
        TouchButton {
            control: TouchControl::Left,
            center: Vec2::new(80.0, y),
            radius: TOUCH_RADIUS,
        },
        TouchButton {
            control: TouchControl::Right,
            center: Vec2::new(180.0, y),
            radius: TOUCH_RADIUS,
        },
        TouchButton {
            control: TouchControl::Jump,
            center: Vec2::new(CANVAS_WIDTH - 80.0, y),
            radius: TOUCH_RADIUS,
        },
    ]
}

/// Which control (if any) a canvas-space point lands on
pub fn hit_test(point: Vec2) -> Option<TouchControl> {
    touch_layout()
        .into_iter()
        .find(|b| b.contains(point))
        .map(|b| b.control)
}

/// Map a point in a letterboxed viewport (origin top-left) back to canvas
/// coordinates
pub fn viewport_to_canvas(point: Vec2, viewport: Vec2) -> Vec2 {
    let canvas = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let scale = (viewport.x / CANVAS_WIDTH)
        .min(viewport.y / CANVAS_HEIGHT)
        .max(f32::EPSILON);
    let offset = (viewport - canvas * scale) / 2.0;
    (point - offset) / scale
}

/// Held keys and active touches
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
    jump: bool,
    touch_left: bool,
    touch_right: bool,
    touch_jump: bool,
    idle_mode: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a `keydown` (`KeyboardEvent.key` value). Returns true if the
    /// key is a game key.
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => self.left = true,
            "ArrowRight" | "d" | "D" => self.right = true,
            "ArrowUp" | "w" | "W" | " " => self.jump = true,
            "i" | "I" => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
            }
            _ => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => self.left = false,
            "ArrowRight" | "d" | "D" => self.right = false,
            "ArrowUp" | "w" | "W" | " " => self.jump = false,
            _ => return false,
        }
        true
    }

    /// Replace the active touch points (canvas coordinates)
    pub fn set_touches(&mut self, points: &[Vec2]) {
        self.touch_left = false;
        self.touch_right = false;
        self.touch_jump = false;
        for control in points.iter().filter_map(|p| hit_test(*p)) {
            match control {
                TouchControl::Left => self.touch_left = true,
                TouchControl::Right => self.touch_right = true,
                TouchControl::Jump => self.touch_jump = true,
            }
        }
    }

    /// Release everything held (window blur)
    pub fn clear(&mut self) {
        let idle_mode = self.idle_mode;
        *self = Self {
            idle_mode,
            ..Self::default()
        };
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    pub fn set_idle_mode(&mut self, on: bool) {
        self.idle_mode = on;
    }

    pub fn is_held(&self, control: TouchControl) -> bool {
        match control {
            TouchControl::Left => self.left || self.touch_left,
            TouchControl::Right => self.right || self.touch_right,
            TouchControl::Jump => self.jump || self.touch_jump,
        }
    }
}

impl InputProvider for KeyState {
    fn sample(&self) -> TickInput {
        TickInput {
            left: self.is_held(TouchControl::Left),
            right: self.is_held(TouchControl::Right),
            jump: self.is_held(TouchControl::Jump),
            idle_mode: self.idle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_input() {
        let mut keys = KeyState::new();
        assert!(keys.key_down("ArrowLeft"));
        assert!(keys.key_down(" "));
        let input = keys.sample();
        assert!(input.left && input.jump && !input.right);

        keys.key_up("ArrowLeft");
        keys.key_down("d");
        let input = keys.sample();
        assert!(!input.left && input.right);

        assert!(!keys.key_down("Escape"));
    }

    #[test]
    fn test_idle_toggle_survives_clear() {
        let mut keys = KeyState::new();
        keys.key_down("i");
        keys.key_down("ArrowRight");
        assert!(keys.sample().idle_mode);

        keys.clear();
        let input = keys.sample();
        assert!(input.idle_mode);
        assert!(!input.right);

        keys.key_down("I");
        assert!(!keys.sample().idle_mode);
    }

    #[test]
    fn test_touch_hit_test() {
        for button in touch_layout() {
            assert_eq!(hit_test(button.center), Some(button.control));
        }
        assert_eq!(hit_test(Vec2::new(400.0, 300.0)), None);
    }

    #[test]
    fn test_viewport_to_canvas_undoes_letterbox() {
        // Exact fit
        let p = viewport_to_canvas(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        assert_eq!(p, Vec2::new(400.0, 300.0));

        // Double width: bars left and right
        let p = viewport_to_canvas(Vec2::new(400.0, 0.0), Vec2::new(1600.0, 600.0));
        assert_eq!(p, Vec2::ZERO);

        // Half size
        let p = viewport_to_canvas(Vec2::new(200.0, 150.0), Vec2::new(400.0, 300.0));
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_touches_and_keys_combine() {
        let mut keys = KeyState::new();
        let [left, _, jump] = touch_layout();
        keys.set_touches(&[left.center, jump.center]);
        let input = keys.sample();
        assert!(input.left && input.jump && !input.right);

        // Lifting all fingers releases touch controls only
        keys.key_down("d");
        keys.set_touches(&[]);
        let input = keys.sample();
        assert!(!input.left && !input.jump && input.right);
    }
}
