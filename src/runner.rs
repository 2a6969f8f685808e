//! Fixed-rate game loop driver
//!
//! Polls input, forwards turn requests to the snake, runs ticks and hands
//! each finished frame to a sink. Quit is only noticed at a poll.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::MAX_SUBSTEPS;
use crate::error::RunError;
use crate::input::{InputEvent, InputSource};
use crate::render::FrameSink;
use crate::sim::{GameState, TickEvent, TickInput, tick};

/// Longest wall-clock gap credited in one poll
const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

/// Converts elapsed wall time into a whole number of ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn from_rate(ticks_per_second: u32) -> Self {
        Self::new(Duration::from_secs(1) / ticks_per_second.max(1))
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Credit `elapsed` and return how many ticks are due now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_TIME);

        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_substeps {
            self.accumulator -= self.step;
            due += 1;
        }
        // Drop whatever backlog the substep cap left behind
        if due == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        due
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}

/// Totals reported when a run ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: i64,
    pub best_score: i64,
    pub resets: u32,
    pub beneficial_eaten: u64,
    pub harmful_eaten: u64,
    /// Ended by a quit request rather than a tick limit
    pub quit: bool,
}

pub struct Runner<I: InputSource, S: FrameSink> {
    state: GameState,
    input: I,
    sink: S,
    /// `time_ticks` when this runner took the state
    start_tick: u64,
    beneficial_eaten: u64,
    harmful_eaten: u64,
}

impl<I: InputSource, S: FrameSink> Runner<I, S> {
    pub fn new(state: GameState, input: I, sink: S) -> Self {
        Self {
            start_tick: state.time_ticks,
            state,
            input,
            sink,
            beneficial_eaten: 0,
            harmful_eaten: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Ticks run by this runner
    pub fn ticks_run(&self) -> u64 {
        self.state.time_ticks - self.start_tick
    }

    fn limit_reached(&self, limit: Option<u64>) -> bool {
        limit.is_some_and(|limit| self.ticks_run() >= limit)
    }

    /// Poll once, buffering every turn in arrival order.
    /// Returns true if quit was requested.
    pub fn pump_input(&mut self) -> bool {
        for event in self.input.poll(&self.state) {
            match event {
                InputEvent::Turn(direction) => {
                    self.state.buffer_direction(direction);
                }
                InputEvent::Quit => {
                    log::info!("quit requested at tick {}", self.state.time_ticks);
                    return true;
                }
            }
        }
        false
    }

    /// Run one tick and present the result
    pub fn step(&mut self) -> Result<TickEvent, RunError> {
        let event = tick(&mut self.state, &TickInput::default())?;
        match event {
            TickEvent::AteBeneficial => self.beneficial_eaten += 1,
            TickEvent::AteHarmful => self.harmful_eaten += 1,
            TickEvent::Moved | TickEvent::SelfCollision => {}
        }
        self.sink.present(&self.state.frame())?;
        Ok(event)
    }

    /// Poll and tick alternately without a clock, up to `max_ticks`
    pub fn run_ticks(&mut self, max_ticks: u64) -> Result<RunSummary, RunError> {
        let mut quit = false;
        for _ in 0..max_ticks {
            if self.pump_input() {
                quit = true;
                break;
            }
            self.step()?;
        }
        Ok(self.summary(quit))
    }

    /// Run against the wall clock until quit or `limit` ticks
    pub fn run_realtime(
        &mut self,
        mut clock: FixedStep,
        limit: Option<u64>,
    ) -> Result<RunSummary, RunError> {
        let mut last = Instant::now();
        loop {
            if self.limit_reached(limit) {
                return Ok(self.summary(false));
            }
            if self.pump_input() {
                return Ok(self.summary(true));
            }

            let now = Instant::now();
            let due = clock.advance(now - last);
            last = now;

            for _ in 0..due {
                if self.limit_reached(limit) {
                    break;
                }
                self.step()?;
            }

            thread::sleep(clock.until_next());
        }
    }

    pub fn summary(&self, quit: bool) -> RunSummary {
        RunSummary {
            ticks: self.ticks_run(),
            score: self.state.score,
            best_score: self.state.best_score,
            resets: self.state.resets,
            beneficial_eaten: self.beneficial_eaten,
            harmful_eaten: self.harmful_eaten,
            quit,
        }
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Autopilot, ScriptedInput};
    use crate::render::{NullSink, RecordingSink};
    use crate::sim::{Direction, Grid, ResetPolicy};
    use glam::IVec2;

    fn state() -> GameState {
        let mut state = GameState::new(12345, Grid::new(32, 24), ResetPolicy::Center).unwrap();
        state.beneficial.position = IVec2::new(30, 20);
        state.harmful.position = IVec2::new(30, 22);
        state
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut clock = FixedStep::from_rate(20);
        assert_eq!(clock.step(), Duration::from_millis(50));
        assert_eq!(clock.advance(Duration::from_millis(30)), 0);
        assert_eq!(clock.advance(Duration::from_millis(30)), 1);
        assert_eq!(clock.until_next(), Duration::from_millis(40));
        assert_eq!(clock.advance(Duration::from_millis(90)), 2);
    }

    #[test]
    fn test_fixed_step_caps_catch_up() {
        let mut clock = FixedStep::from_rate(100);
        // A long stall is clamped to 100ms, then capped at MAX_SUBSTEPS
        assert_eq!(clock.advance(Duration::from_secs(5)), MAX_SUBSTEPS);
        assert!(clock.until_next() <= clock.step());
    }

    #[test]
    fn test_run_ticks_presents_every_frame() {
        let mut runner = Runner::new(state(), ScriptedInput::default(), RecordingSink::default());
        let summary = runner.run_ticks(5).unwrap();
        assert_eq!(summary.ticks, 5);
        assert!(!summary.quit);
        assert_eq!(runner.sink().frames.len(), 5);
        assert_eq!(runner.sink().frames[4].tick, 5);
        assert_eq!(runner.state().snake.head(), IVec2::new(21, 12));
    }

    #[test]
    fn test_turns_buffered_in_arrival_order() {
        // Up is accepted, the later Left reversal is dropped, so Up still applies
        let input = ScriptedInput::new([vec![
            InputEvent::Turn(Direction::Up),
            InputEvent::Turn(Direction::Left),
        ]]);
        let mut runner = Runner::new(state(), input, NullSink);
        runner.run_ticks(1).unwrap();
        assert_eq!(runner.state().snake.direction(), Direction::Up);
        assert_eq!(runner.state().snake.head(), IVec2::new(16, 11));
    }

    #[test]
    fn test_quit_stops_before_next_tick() {
        let input = ScriptedInput::new([vec![], vec![]]).quit_when_done();
        let mut runner = Runner::new(state(), input, NullSink);
        let summary = runner.run_ticks(100).unwrap();
        assert!(summary.quit);
        assert_eq!(summary.ticks, 2);
    }

    #[test]
    fn test_run_realtime_respects_limit() {
        let state = GameState::new(7, Grid::new(32, 24), ResetPolicy::Center).unwrap();
        let mut runner = Runner::new(state, Autopilot::new(), NullSink);
        let summary = runner
            .run_realtime(FixedStep::from_rate(200), Some(10))
            .unwrap();
        assert_eq!(summary.ticks, 10);
        assert!(!summary.quit);
    }

    #[test]
    fn test_run_realtime_zero_limit() {
        let mut runner = Runner::new(state(), Autopilot::new(), RecordingSink::default());
        let summary = runner
            .run_realtime(FixedStep::from_rate(200), Some(0))
            .unwrap();
        assert_eq!(summary.ticks, 0);
        assert!(!summary.quit);
        assert!(runner.sink().frames.is_empty());
        assert_eq!(runner.state().time_ticks, 0);
    }

    #[test]
    fn test_ticks_counted_from_handover() {
        let mut state = state();
        tick(&mut state, &TickInput::default()).unwrap();
        tick(&mut state, &TickInput::default()).unwrap();

        let mut runner = Runner::new(state, ScriptedInput::default(), NullSink);
        let summary = runner.run_realtime(FixedStep::from_rate(200), Some(3)).unwrap();
        assert_eq!(summary.ticks, 3);
        assert_eq!(runner.state().time_ticks, 5);
    }

    #[test]
    fn test_autopilot_run_counts_events() {
        let state = GameState::new(7, Grid::new(32, 24), ResetPolicy::Center).unwrap();
        let mut runner = Runner::new(state, Autopilot::new(), NullSink);
        let summary = runner.run_ticks(500).unwrap();
        assert_eq!(summary.ticks, 500);
        assert!(summary.beneficial_eaten > 0);
        assert!(summary.best_score >= summary.score);
        assert!(runner.into_state().items_placed_validly());
    }
}
