//! Frame driver
//!
//! Owns a [`GameState`], advances it once per animation frame and forwards
//! what happened to a [`GameObserver`]. The host decides when frames run;
//! the session only says whether another one should be scheduled.

use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Host-side hooks for game events
///
/// `on_level_up` also fires for level 1 when a session starts.
/// `on_game_over` fires exactly once per run.
pub trait GameObserver {
    fn on_level_up(&mut self, level: u32);

    fn on_game_over(&mut self, final_score: u64);

    /// Every event, including the two above (no-op by default)
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Observer that ignores everything
impl GameObserver for () {
    fn on_level_up(&mut self, _level: u32) {}
    fn on_game_over(&mut self, _final_score: u64) {}
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

/// A running game plus its observer
pub struct Session<O: GameObserver> {
    state: GameState,
    observer: O,
    running: bool,
    game_over_reported: bool,
}

impl<O: GameObserver> Session<O> {
    /// Start a fresh run at level 1
    pub fn new(seed: u64, observer: O) -> Self {
        Self::from_state(GameState::new(seed), observer)
    }

    /// Drive an existing state, delivering any events it already holds
    pub fn from_state(state: GameState, observer: O) -> Self {
        let mut session = Self {
            state,
            observer,
            running: true,
            game_over_reported: false,
        };
        session.dispatch_events();
        if session.state.is_game_over() {
            session.report_game_over();
            session.running = false;
        }
        session
    }

    /// Run one frame of simulation
    pub fn frame(&mut self, input: &TickInput) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stop;
        }

        tick(&mut self.state, input);
        self.dispatch_events();

        if self.state.is_game_over() {
            self.report_game_over();
            self.running = false;
            return FrameOutcome::Stop;
        }
        FrameOutcome::Continue
    }

    /// Stop scheduling frames (page unload, window close)
    pub fn cancel(&mut self) {
        if self.running {
            log::info!(
                "Session cancelled at level {} (score {})",
                self.state.level,
                self.state.score()
            );
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Tear down, returning the observer
    pub fn into_observer(self) -> O {
        self.observer
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            self.observer.on_event(&event);
            match event {
                GameEvent::LevelUp { level } => self.observer.on_level_up(level),
                GameEvent::GameOver { final_score } => {
                    if !self.game_over_reported {
                        self.game_over_reported = true;
                        self.observer.on_game_over(final_score);
                    }
                }
                _ => {}
            }
        }
    }

    /// Covers states that ended without emitting the event
    fn report_game_over(&mut self) {
        if !self.game_over_reported {
            self.game_over_reported = true;
            self.observer.on_game_over(self.state.score());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Enemy, GamePhase, OrbColor};
    use crate::tuning::LEVEL_SCORE_STEP;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        levels: Vec<u32>,
        game_overs: Vec<u64>,
        events: usize,
    }

    impl GameObserver for Recorder {
        fn on_level_up(&mut self, level: u32) {
            self.levels.push(level);
        }

        fn on_game_over(&mut self, final_score: u64) {
            self.game_overs.push(final_score);
        }

        fn on_event(&mut self, _event: &GameEvent) {
            self.events += 1;
        }
    }

    #[test]
    fn test_start_reports_level_one() {
        let session = Session::new(1, Recorder::default());
        assert_eq!(session.observer().levels, vec![1]);
        assert_eq!(session.observer().events, 1);
        assert!(session.is_running());
        assert!(session.state().events.is_empty());
    }

    #[test]
    fn test_level_up_callback() {
        let mut state = GameState::empty(4);
        state.player.score = LEVEL_SCORE_STEP;
        let mut session = Session::from_state(state, Recorder::default());

        assert_eq!(session.frame(&TickInput::default()), FrameOutcome::Continue);
        assert_eq!(session.observer().levels, vec![2]);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut state = GameState::empty(4);
        state.player.pos = Vec2::new(400.0, CANVAS_HEIGHT - PLAYER_SIZE);
        state.player.lives = 1;
        state.player.score = 42;
        state.enemies.push(Enemy {
            pos: state.player.pos,
            vel: Vec2::ZERO,
            speed: 1.5,
            chase: false,
            color: OrbColor::Red,
            size: ENEMY_BASE_SIZE,
            pulse_phase: 0.0,
        });
        let mut session = Session::from_state(state, Recorder::default());

        assert_eq!(session.frame(&TickInput::default()), FrameOutcome::Stop);
        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert!(!session.is_running());

        assert_eq!(session.frame(&TickInput::default()), FrameOutcome::Stop);
        assert_eq!(session.into_observer().game_overs, vec![42]);
    }

    #[test]
    fn test_cancel_stops_frames() {
        let mut session = Session::new(9, ());
        assert_eq!(session.frame(&TickInput::default()), FrameOutcome::Continue);
        session.cancel();
        let ticks = session.state().time_ticks;
        assert_eq!(session.frame(&TickInput::default()), FrameOutcome::Stop);
        assert_eq!(session.state().time_ticks, ticks);
    }

    #[test]
    fn test_finished_state_reports_immediately() {
        let mut state = GameState::empty(4);
        state.phase = GamePhase::GameOver;
        state.player.score = 900;
        let session = Session::from_state(state, Recorder::default());
        assert!(!session.is_running());
        assert_eq!(session.observer().game_overs, vec![900]);
    }
}
