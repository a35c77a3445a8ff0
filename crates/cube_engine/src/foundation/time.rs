//! Time management utilities

/// Frame timer fed from an external monotonic clock (seconds)
///
/// The window host owns the clock, so the timer never samples time itself:
/// call [`Timer::tick`] once per frame with the current clock reading.
#[derive(Debug, Clone)]
pub struct Timer {
    last_frame: f64,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Timer {
    /// Create a new timer anchored at `start` seconds
    pub fn new(start: f64) -> Self {
        Self {
            last_frame: start,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the timer to `now` seconds (should be called once per frame)
    ///
    /// A clock reading earlier than the previous frame yields a zero delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        let elapsed = (now - self.last_frame).max(0.0);
        self.delta_time = elapsed as f32;
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_accumulates() {
        let mut timer = Timer::new(10.0);

        assert_relative_eq!(timer.tick(10.5), 0.5);
        assert_relative_eq!(timer.tick(10.75), 0.25);

        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.total_time(), 0.75);
        assert_relative_eq!(timer.delta_time(), 0.25);
        assert_relative_eq!(timer.average_fps(), 2.0 / 0.75, epsilon = 1e-4);
    }

    #[test]
    fn test_backwards_clock_gives_zero_delta() {
        let mut timer = Timer::new(5.0);

        assert_eq!(timer.tick(4.0), 0.0);
        assert_relative_eq!(timer.tick(4.5), 0.5);
    }

    #[test]
    fn test_fresh_timer_reports_zero_fps() {
        assert_eq!(Timer::new(0.0).average_fps(), 0.0);
    }
}
