//! Platform abstraction layer
//!
//! Turns browser keyboard/touch events into the per-frame [`TickInput`]
//! the simulation consumes.
//!
//! [`TickInput`]: crate::sim::TickInput

pub mod input;

pub use input::{
    InputProvider, KeyState, TouchButton, TouchControl, hit_test, touch_layout, viewport_to_canvas,
};
