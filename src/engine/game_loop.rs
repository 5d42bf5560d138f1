/// Frame timing for the simulation loop
///
/// Implements a variable timestep: one simulation tick per display refresh,
/// with the measured delta clamped so a backgrounded window or a slow
/// frame cannot produce a huge jump.
use std::time::{Duration, Instant};

/// Upper bound on a single frame's delta (about two 60 Hz frames)
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(32);

/// Delta used for the first frame after starting, or when no time passed
pub const FALLBACK_FRAME_DELTA: Duration = Duration::from_millis(16);

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame clock state
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Time of last frame, `None` until the first frame after a start
    last_frame_time: Option<Instant>,

    /// Whether frames should be scheduled at all
    running: bool,

    /// Clamped frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Frames measured since creation
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Clamped delta of the last frame
    last_delta: Duration,
}

impl FrameClock {
    /// Create a stopped clock
    pub fn new() -> Self {
        Self {
            last_frame_time: None,
            running: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            last_delta: Duration::ZERO,
        }
    }

    /// Start (or restart) scheduling frames.
    ///
    /// The next frame measures against nothing and uses the fallback delta.
    pub fn start(&mut self) {
        self.running = true;
        self.last_frame_time = None;
    }

    /// Stop scheduling frames. Safe to call any number of times.
    ///
    /// Returns whether the clock was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.last_frame_time = None;
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin a new frame at `now` and return its clamped delta
    pub fn begin_frame(&mut self, now: Instant) -> Duration {
        let raw = self
            .last_frame_time
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_frame_time = Some(now);

        let delta = clamp_delta(raw);
        self.record(delta);
        delta
    }

    /// Get the delta of the last frame (in seconds)
    pub fn delta_secs(&self) -> f32 {
        self.last_delta.as_secs_f32()
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames measured
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn record(&mut self, delta: Duration) {
        self.last_delta = delta;
        self.frame_count += 1;

        self.frame_times.push(delta);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero becomes the fallback delta, anything over the cap is capped
pub fn clamp_delta(raw: Duration) -> Duration {
    if raw.is_zero() {
        FALLBACK_FRAME_DELTA
    } else {
        raw.min(MAX_FRAME_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.frame_count(), 0);
    }

    #[test]
    fn test_start_stop() {
        let mut clock = FrameClock::new();
        clock.start();
        assert!(clock.is_running());

        assert!(clock.stop());
        assert!(!clock.is_running());

        // Stopping twice is harmless
        assert!(!clock.stop());
        assert!(!clock.is_running());
    }

    #[test]
    fn test_first_frame_uses_fallback() {
        let mut clock = FrameClock::new();
        clock.start();
        assert_eq!(clock.begin_frame(Instant::now()), FALLBACK_FRAME_DELTA);
    }

    #[test]
    fn test_measured_delta() {
        let mut clock = FrameClock::new();
        clock.start();
        let t0 = Instant::now();
        clock.begin_frame(t0);

        let delta = clock.begin_frame(t0 + Duration::from_millis(10));
        assert_eq!(delta, Duration::from_millis(10));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new();
        clock.start();
        let t0 = Instant::now();
        clock.begin_frame(t0);

        // A backgrounded tab coming back after five seconds
        let delta = clock.begin_frame(t0 + Duration::from_secs(5));
        assert_eq!(delta, MAX_FRAME_DELTA);
    }

    #[test]
    fn test_zero_delta_uses_fallback() {
        let mut clock = FrameClock::new();
        clock.start();
        let t0 = Instant::now();
        clock.begin_frame(t0);
        assert_eq!(clock.begin_frame(t0), FALLBACK_FRAME_DELTA);
    }

    #[test]
    fn test_restart_forgets_last_frame() {
        let mut clock = FrameClock::new();
        clock.start();
        let t0 = Instant::now();
        clock.begin_frame(t0);

        clock.stop();
        clock.start();
        assert_eq!(
            clock.begin_frame(t0 + Duration::from_millis(5)),
            FALLBACK_FRAME_DELTA
        );
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = FrameClock::new();
        clock.start();
        let mut now = Instant::now();
        clock.begin_frame(now);

        for _ in 0..19 {
            now += Duration::from_millis(20);
            clock.begin_frame(now);
        }
        assert_eq!(clock.frame_count(), 20);
        // One fallback frame of 16ms among 20ms frames
        assert!(clock.fps() > 49.0 && clock.fps() < 51.0);
    }
}
