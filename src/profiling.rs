//! Frame timing statistics and a session event log for the simulator.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = FrameMetrics::new();
//! let mut events = EventLog::new();
//!
//! // In the frame loop:
//! let frame_start = Instant::now();
//! root.update(&message);
//! let update_time = frame_start.elapsed();
//! root.render(&mut display, &printer)?;
//! let render_time = frame_start.elapsed() - update_time;
//! metrics.record_frame(frame_start.elapsed(), update_time, render_time);
//!
//! events.push(metrics.total_frames, "state -> Pause");
//! ```

use core::fmt::Write;
use std::time::{Duration, Instant};

use heapless::{Deque, String};
use tracing::debug;

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Number of events kept in the ring buffer.
pub const EVENT_LOG_SIZE: usize = 16;

/// Maximum bytes per event line.
pub const EVENT_LINE_LENGTH: usize = 48;

pub type EventLine = String<EVENT_LINE_LENGTH>;

// =============================================================================
// Frame Metrics
// =============================================================================

/// Per-frame timing with running min/max/average.
#[derive(Debug, Clone)]
pub struct FrameMetrics {
    /// Wall time of the last frame's update and render (microseconds)
    pub frame_time_us: u32,
    /// Time spent in the root `update`
    pub update_time_us: u32,
    /// Time spent in the root `render`
    pub render_time_us: u32,

    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    /// Exponential moving average of the frame time
    frame_time_avg_us: f32,

    pub total_frames: u64,

    start_time: Instant,
}

impl FrameMetrics {
    /// Smoothing factor for the moving average.
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            update_time_us: 0,
            render_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_frame(&mut self, total_time: Duration, update_time: Duration, render_time: Duration) {
        let total_us = total_time.as_micros() as u32;

        self.frame_time_us = total_us;
        self.update_time_us = update_time.as_micros() as u32;
        self.render_time_us = render_time.as_micros() as u32;

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 {
        self.frame_time_avg_us as u32
    }

    #[inline]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Uptime as `HH:MM:SS`.
    pub fn uptime_string(&self) -> String<12> {
        format_hms(self.uptime())
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_hms(elapsed: Duration) -> String<12> {
    let secs = elapsed.as_secs();
    let mut s = String::new();
    write!(s, "{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60).ok();
    s
}

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Last [`EVENT_LOG_SIZE`] session events, oldest dropped first.
#[derive(Debug, Clone)]
pub struct EventLog {
    buffer: Deque<(u64, EventLine), EVENT_LOG_SIZE>,
}

impl EventLog {
    pub const fn new() -> Self {
        Self { buffer: Deque::new() }
    }

    /// Record `event` at `frame`, truncating to [`EVENT_LINE_LENGTH`] bytes.
    pub fn push(&mut self, frame: u64, event: &str) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line = EventLine::new();
        for c in event.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        debug!(frame, event = line.as_str(), "session event");
        self.buffer.push_back((frame, line)).ok();
    }

    /// Events oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.buffer.iter().map(|(frame, line)| (*frame, line.as_str()))
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
