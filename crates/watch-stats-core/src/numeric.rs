// Rating arithmetic shared by every aggregator.

/// Running mean over ratings with a compensated sum, so long histories
/// produce the same digits regardless of insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingAccumulator {
    count: u32,
    sum: f64,
    compensation: f64,
}

impl RatingAccumulator {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let adjusted = value - self.compensation;
        let total = self.sum + adjusted;
        self.compensation = (total - self.sum) - adjusted;
        self.sum = total;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Arithmetic mean; 0 when nothing was pushed
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn rounded_mean(&self, places: u32) -> f64 {
        round_half_up(self.mean(), places)
    }
}

/// Round half-up to `places` decimals.
///
/// The epsilon nudge makes values like 2.675 (stored as 2.67499...) round
/// up the way a decimal reader expects.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor + 0.5 + 1e-9).floor() / factor;
    if rounded == 0.0 {
        0.0 // no negative zero in output
    } else {
        rounded
    }
}
