/// Number of samples [`RunningAverage`] keeps.
pub const STORE_SIZE: usize = 64;

/// Average of the last [`STORE_SIZE`] samples.
#[derive(Debug, Clone)]
pub struct RunningAverage {
    values: [f64; STORE_SIZE],
    head: usize,
    entries: usize,
    sum: f64,
}

impl Default for RunningAverage {
    fn default() -> Self {
        Self {
            values: [0.0; STORE_SIZE],
            head: 0,
            entries: 0,
            sum: 0.0,
        }
    }
}

impl RunningAverage {
    /// Records `value`, evicting the oldest sample once full, and returns the new average.
    pub fn push(&mut self, value: f64) -> f64 {
        self.sum = self.sum - self.values[self.head] + value;
        self.values[self.head] = value;
        self.head = (self.head + 1) % STORE_SIZE;
        self.entries = (self.entries + 1).min(STORE_SIZE);
        self.average()
    }

    /// Current average, or 0 with no samples.
    pub fn average(&self) -> f64 {
        if self.entries == 0 {
            return 0.0;
        }
        self.sum / self.entries as f64
    }
}
