//! A simple RAII-based timer that reports how long a frame or a load took.

use instant::Instant;

pub struct Timer {
    start_t: Instant,
    is_running: bool,
    msg: &'static str,
    /// only report runs slower than this many nanoseconds
    threshold: u128,
}

impl Timer {
    pub fn new(msg: &'static str) -> Self {
        Timer {
            start_t: Instant::now(),
            is_running: true,
            msg,
            threshold: 0,
        }
    }

    /// A timer that stays quiet unless it ran longer than `threshold_nanos`.
    pub fn with_threshold(msg: &'static str, threshold_nanos: u128) -> Self {
        Timer {
            threshold: threshold_nanos,
            ..Timer::new(msg)
        }
    }

    pub fn stop(&mut self) -> u128 {
        if !self.is_running {
            return 0;
        }
        let elapsed = self.start_t.elapsed().as_nanos();
        if elapsed >= self.threshold {
            self.summary("finished", elapsed);
        }
        self.is_running = false;
        elapsed
    }

    fn summary(&self, verb: &str, elapsed: u128) {
        if self.threshold > 0 {
            warn!("{} {} in {}", self.msg, verb, time_from(elapsed));
        } else {
            debug!("{} {} in {}", self.msg, verb, time_from(elapsed));
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.is_running {
            self.stop();
        }
    }
}

pub fn time_from(mut t: u128) -> String {
    let nanos = t % 1000;
    t /= 1000;
    let micros = t % 1000;
    t /= 1000;
    let millis = t % 1000;
    t /= 1000;
    let secs = t % 1000;
    format!("{}:{}:{}:{}", secs, millis, micros, nanos)
}
