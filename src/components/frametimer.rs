//! Frame-counted countdown timer.
//!
//! A [`FrameTimer`] counts down a number of frames and invokes an optional
//! callback when it reaches zero. Durations are frame counts, not seconds:
//! whoever drives the timer decides what one frame is.
//!
//! # How It Works
//!
//! 1. Entity is spawned with a `FrameTimer` (or the timer is owned directly by
//!    game code and advanced by hand)
//! 2. The `update_frame_timers` system calls [`FrameTimer::advance`] once per
//!    tick with the number of frames that elapsed
//! 3. When the countdown reaches zero the callback runs and the timer either
//!    re-arms (looping) or marks itself completed
//!
//! # Reentrancy
//!
//! The callback receives `&mut FrameTimer`, so it may reset, restart or
//! invalidate the timer that fired it. A reset performed inside the callback
//! pre-empts auto-completion for that cycle:
//!
//! ```
//! use frameclock::components::frametimer::FrameTimer;
//!
//! let mut timer = FrameTimer::new(3).with_callback(|t: &mut FrameTimer| t.reset_and_start_to(5));
//! for _ in 0..3 {
//!     timer.advance(1);
//! }
//! assert!(!timer.is_completed());
//! assert_eq!(timer.frames_remaining(), 5);
//! ```
//!
//! # Related
//!
//! - [`crate::systems::frametimer::update_frame_timers`] – system that advances timers
//! - [`crate::events::timer::FrameTimerEvent`] – event emitted on each expiry

use bevy_ecs::prelude::Component;
use std::fmt;

/// Completion callback. Receives the timer that fired it.
pub type TimerCallback = Box<dyn FnMut(&mut FrameTimer) + Send + Sync>;

/// Restartable, loop-capable countdown measured in frames.
#[derive(Component)]
pub struct FrameTimer {
    total_frames: i32,
    remaining_frames: i32,
    paused: bool,
    loops: bool,
    completed: bool,
    callback: Option<TimerCallback>,
    // Set when the callback slot is written while the callback is running.
    callback_replaced: bool,
}

impl FrameTimer {
    /// Create a running, non-looping timer without a callback.
    ///
    /// A duration of zero completes on the first advance.
    pub fn new(total_frames: i32) -> Self {
        FrameTimer {
            total_frames,
            remaining_frames: total_frames,
            paused: false,
            loops: false,
            completed: false,
            callback: None,
            callback_replaced: false,
        }
    }

    /// Create a timer with every construction option spelled out.
    pub fn with_options(
        total_frames: i32,
        loops: bool,
        starts_immediately: bool,
        callback: Option<TimerCallback>,
    ) -> Self {
        FrameTimer {
            loops,
            paused: !starts_immediately,
            callback,
            ..FrameTimer::new(total_frames)
        }
    }

    /// Builder: set whether the timer re-arms on expiry.
    pub fn looping(mut self, loops: bool) -> Self {
        self.loops = loops;
        self
    }

    /// Builder: create the timer paused; it will not count down until [`start`](Self::start).
    pub fn paused_at_start(mut self) -> Self {
        self.paused = true;
        self
    }

    /// Builder: attach a completion callback.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut FrameTimer) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Resume counting down. Remaining frames and completion are untouched.
    pub fn start(&mut self) {
        self.paused = false;
    }

    /// Stop counting down until [`start`](Self::start) is called.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Re-arm to the current duration and clear completion. Does not unpause.
    pub fn reset(&mut self) {
        self.remaining_frames = self.total_frames;
        self.completed = false;
    }

    /// Change the duration, then [`reset`](Self::reset).
    pub fn reset_to(&mut self, total_frames: i32) {
        self.total_frames = total_frames;
        self.reset();
    }

    /// Re-arm and run in one step.
    pub fn reset_and_start(&mut self) {
        self.reset();
        self.start();
    }

    /// Change the duration, re-arm and run in one step.
    pub fn reset_and_start_to(&mut self, total_frames: i32) {
        self.reset_to(total_frames);
        self.start();
    }

    /// Count down by `frames`.
    ///
    /// Does nothing while paused or completed. Returns `true` when the
    /// countdown reached zero during this call and [`complete`](Self::complete)
    /// ran.
    pub fn advance(&mut self, frames: i32) -> bool {
        if self.paused || self.completed {
            return false;
        }
        self.remaining_frames = self.remaining_frames.saturating_sub(frames);
        if self.remaining_frames <= 0 {
            self.complete(true);
            return true;
        }
        false
    }

    /// Force the countdown to zero and process expiry.
    ///
    /// When `fire_callback` is set the callback runs exactly once before the
    /// loop/termination check. A looping timer re-arms. A non-looping timer is
    /// marked completed only if the callback left the countdown at zero.
    pub fn complete(&mut self, fire_callback: bool) {
        self.remaining_frames = 0;

        if fire_callback {
            if let Some(mut callback) = self.callback.take() {
                self.callback_replaced = false;
                callback(self);
                if !self.callback_replaced {
                    self.callback = Some(callback);
                }
            }
        }

        if self.loops {
            self.remaining_frames = self.total_frames;
        } else if self.remaining_frames == 0 {
            self.completed = true;
        }
    }

    /// Drop the callback and mark the timer completed.
    ///
    /// Works on looping timers too; nothing fires again until a reset.
    pub fn invalidate(&mut self) {
        self.clear_callback();
        self.completed = true;
    }

    /// Replace the completion callback.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut FrameTimer) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self.callback_replaced = true;
    }

    /// Remove the completion callback.
    pub fn clear_callback(&mut self) {
        self.callback = None;
        self.callback_replaced = true;
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub fn set_loops(&mut self, loops: bool) {
        self.loops = loops;
    }

    pub fn loops(&self) -> bool {
        self.loops
    }

    pub fn frames_remaining(&self) -> i32 {
        self.remaining_frames
    }

    pub fn total_frames(&self) -> i32 {
        self.total_frames
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// `true` while the timer is neither completed nor paused.
    pub fn is_running(&self) -> bool {
        !self.completed && !self.paused
    }
}

impl fmt::Debug for FrameTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTimer")
            .field("total_frames", &self.total_frames)
            .field("remaining_frames", &self.remaining_frames)
            .field("paused", &self.paused)
            .field("loops", &self.loops)
            .field("completed", &self.completed)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
