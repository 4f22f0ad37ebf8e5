//! Sprite animation clocks and periodic timers
//!
//! Animations advance one simulation tick at a time, so playback speed is
//! expressed in ticks per sprite frame rather than seconds.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;

/// Frame-timing state for one sprite-strip clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    frame_count: u32,
    ticks_per_frame: u32,
    counter: u32,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

impl Animation {
    pub fn new(frame_count: u32, ticks_per_frame: u32) -> Self {
        Self {
            frame_count,
            ticks_per_frame: ticks_per_frame.max(1),
            counter: 0,
        }
    }

    /// Build a clip that plays `frame_count` frames over `duration` seconds
    /// at the nominal tick rate. Each frame lasts at least one tick.
    pub fn from_duration(frame_count: u32, duration: f32) -> Self {
        let ticks = if frame_count == 0 {
            1
        } else {
            (duration * TICK_RATE / frame_count as f32).round().max(1.0) as u32
        };
        Self::new(frame_count, ticks)
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame
    }

    /// Raw tick counter within the current cycle
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Ticks in one full cycle of the clip
    #[inline]
    fn cycle_ticks(&self) -> u32 {
        self.frame_count.saturating_mul(self.ticks_per_frame)
    }

    /// Playback length of one cycle in seconds
    pub fn length_seconds(&self) -> f32 {
        self.cycle_ticks() as f32 / TICK_RATE
    }

    /// Time into the current cycle in seconds
    pub fn elapsed_seconds(&self) -> f32 {
        self.counter as f32 / TICK_RATE
    }

    /// Advance by one tick, looping back to the first frame at the end
    pub fn step(&mut self) {
        self.counter += 1;
        if self.counter >= self.cycle_ticks() {
            self.counter = 0;
        }
    }

    /// Sprite frame to display
    pub fn current_frame(&self) -> u32 {
        if self.frame_count == 0 {
            return 0;
        }
        (self.counter / self.ticks_per_frame) % self.frame_count
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// True on the last tick of the cycle, i.e. the next `step` wraps.
    pub fn is_done(&self) -> bool {
        let cycle = self.cycle_ticks();
        cycle > 0 && self.counter + 1 >= cycle
    }
}

/// Repeating countdown measured in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    length: f32,
    time: f32,
    timeout: bool,
}

impl Timer {
    pub fn new(length: f32) -> Self {
        Self {
            length,
            time: 0.0,
            timeout: false,
        }
    }

    /// Accumulate `dt`. Returns true when a full period elapsed during this
    /// step; the surplus carries into the next period.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.length <= 0.0 {
            self.timeout = false;
            return false;
        }
        self.time += dt;
        self.timeout = self.time >= self.length;
        if self.timeout {
            self.time -= self.length;
        }
        self.timeout
    }

    pub fn is_timeout(&self) -> bool {
        self.timeout
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.timeout = false;
    }
}
