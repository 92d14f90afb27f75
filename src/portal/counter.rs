//! Count-up animation for the headline metric cards, stepped explicitly
//! instead of by a frame timer.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    pub start: u64,
    pub end: u64,
    pub duration: Duration,
}

impl CounterAnimation {
    pub fn new(start: u64, end: u64, duration: Duration) -> Self {
        Self { start, end, duration }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Displayed value after `elapsed`; lands exactly on `end` once done.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let p = self.progress(elapsed);
        if p >= 1.0 {
            return self.end;
        }
        let (start, end) = (self.start as f64, self.end as f64);
        (start + (end - start) * p).floor().max(0.0) as u64
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Values at each `step` until the animation completes, final value
    /// included.
    pub fn frames(&self, step: Duration) -> Vec<u64> {
        let mut out = Vec::new();
        if step.is_zero() {
            out.push(self.end);
            return out;
        }
        let mut elapsed = Duration::ZERO;
        loop {
            out.push(self.value_at(elapsed));
            if self.is_done(elapsed) {
                return out;
            }
            elapsed += step;
        }
    }
}

/// `3.3k` style for large plain counts, grouped digits plus suffix otherwise.
pub fn format_counter(value: u64, suffix: &str) -> String {
    if suffix.is_empty() && value > 999 {
        let tenths = (value as f64 / 100.0).round() / 10.0;
        return format!("{:.1}k", tenths);
    }
    format!("{}{}", group_thousands(value), suffix)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
