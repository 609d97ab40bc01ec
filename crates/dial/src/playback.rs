//! Renderer-independent replay of a [`Simulation`] history.
//!
//! A [`Playback`] is driven by the host's frame loop: call [`Playback::tick`]
//! once per rendered frame and draw from the read accessors. Button and
//! pointer input map onto [`Playback::toggle_play`], [`Playback::step`],
//! [`Playback::reset`], [`Playback::seek`] and [`Playback::set_speed`].

use std::sync::Arc;

use crate::{HistoryEntry, Simulation, DIAL_SIZE};

/// Speed values at or above this render the rest of the history in one frame.
pub const MAX_SPEED_THRESHOLD: f32 = 0.95;
const FLASH_DECAY: f32 = 0.92;
const FLASH_CUTOFF: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// Normalized slider value in `[0, 1]` mapped onto a logarithmic speed curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSetting(f32);

impl SpeedSetting {
    pub const DEFAULT: SpeedSetting = SpeedSetting(0.3);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::DEFAULT
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_max(self) -> bool {
        self.0 >= MAX_SPEED_THRESHOLD
    }

    pub fn steps_per_frame(self, history_len: usize) -> usize {
        if self.is_max() {
            history_len.max(1)
        } else {
            (100f32.powf(self.0).floor() as usize).max(1)
        }
    }

    /// Fraction of an interpolation completed per frame.
    pub fn interpolation_increment(self) -> f32 {
        if self.is_max() {
            1.0
        } else {
            0.1 + self.0 * 0.4
        }
    }

    pub fn label(self) -> String {
        if self.is_max() {
            "MAX".to_string()
        } else if self.0 < 0.1 {
            "1x".to_string()
        } else {
            format!("{}x", 100f32.powf(self.0).round() as u32)
        }
    }
}

impl Default for SpeedSetting {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Signed distance from `from` to `to` along the shorter way round the dial.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let size = DIAL_SIZE as f32;
    let diff = (to - from) % size;
    if diff > size / 2.0 {
        diff - size
    } else if diff < -size / 2.0 {
        diff + size
    } else {
        diff
    }
}

#[derive(Debug, Clone)]
pub struct Playback {
    simulation: Arc<Simulation>,
    current_step: usize,
    from_position: f32,
    target_position: f32,
    display_position: f32,
    // 1.0 means the current interpolation has finished.
    interpolation: f32,
    flash: f32,
    state: PlaybackState,
    speed: SpeedSetting,
}

impl Playback {
    pub fn new(simulation: Arc<Simulation>, speed: SpeedSetting) -> Self {
        let start = simulation.history[0].position as f32;
        Self {
            simulation,
            current_step: 0,
            from_position: start,
            target_position: start,
            display_position: start,
            interpolation: 1.0,
            flash: 0.0,
            state: PlaybackState::Paused,
            speed,
        }
    }

    pub fn simulation(&self) -> &Arc<Simulation> {
        &self.simulation
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed(&self) -> SpeedSetting {
        self.speed
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn last_step(&self) -> usize {
        self.simulation.last_step()
    }

    pub fn current_entry(&self) -> &HistoryEntry {
        &self.simulation.history[self.current_step]
    }

    pub fn display_position(&self) -> f32 {
        self.display_position
    }

    pub fn flash(&self) -> f32 {
        self.flash
    }

    pub fn progress_ratio(&self) -> f32 {
        self.current_step as f32 / self.last_step().max(1) as f32
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.last_step()
    }

    /// True while anything on screen is still changing between frames.
    pub fn is_animating(&self) -> bool {
        self.is_playing() || self.interpolation < 1.0 || self.flash > 0.0
    }

    pub fn toggle_play(&mut self) {
        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused if self.is_finished() => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
        };
        tracing::debug!(state = ?self.state, step = self.current_step, "playback toggled");
    }

    /// Advances exactly one step and leaves playback paused.
    pub fn step(&mut self) {
        self.state = PlaybackState::Paused;
        if !self.is_finished() {
            self.advance(1);
        }
    }

    pub fn reset(&mut self) {
        self.state = PlaybackState::Paused;
        self.current_step = 0;
        self.snap_to_current();
    }

    /// Jumps to the step at `ratio` of the history; the position snaps
    /// without interpolating.
    pub fn seek(&mut self, ratio: f32) {
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        let last = self.last_step();
        self.current_step = ((ratio * last as f32).floor() as usize).min(last);
        self.snap_to_current();
    }

    pub fn set_speed(&mut self, value: f32) {
        self.speed = SpeedSetting::new(value);
    }

    /// Runs one frame of playback.
    pub fn tick(&mut self) {
        if self.is_playing() && self.interpolation >= 1.0 {
            if !self.is_finished() {
                let steps = self.speed.steps_per_frame(self.simulation.history.len());
                self.advance(steps);
                if self.speed.is_max() {
                    self.interpolation = 1.0;
                }
            }
            if self.is_finished() {
                self.state = PlaybackState::Paused;
                tracing::debug!(step = self.current_step, "playback reached the end");
            }
        }

        self.interpolate();

        if self.flash > 0.0 {
            self.flash *= FLASH_DECAY;
            if self.flash < FLASH_CUTOFF {
                self.flash = 0.0;
            }
        }
    }

    fn advance(&mut self, steps: usize) {
        let last = self.last_step();
        let mut crossed_zero = false;
        for _ in 0..steps {
            if self.current_step >= last {
                break;
            }
            self.current_step += 1;
            crossed_zero |= self.current_entry().zeros_this_step > 0;
        }
        if crossed_zero {
            self.flash = 1.0;
        }

        self.from_position = self.display_position;
        self.target_position = self.current_entry().position as f32;
        self.interpolation = 0.0;
    }

    fn interpolate(&mut self) {
        if self.interpolation < 1.0 {
            self.interpolation =
                (self.interpolation + self.speed.interpolation_increment()).min(1.0);
            let delta = shortest_arc(self.from_position, self.target_position);
            self.display_position = (self.from_position
                + delta * ease_out_cubic(self.interpolation))
            .rem_euclid(DIAL_SIZE as f32);
        } else {
            self.display_position = self.target_position;
        }
    }

    fn snap_to_current(&mut self) {
        let position = self.current_entry().position as f32;
        self.from_position = position;
        self.target_position = position;
        self.display_position = position;
        self.interpolation = 1.0;
    }
}

#[cfg(test)]
#[path = "tests/playback_tests.rs"]
mod tests;
