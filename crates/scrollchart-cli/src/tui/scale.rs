//! Linear and band scales in terminal cells
//!
//! Same math as the usual charting scales: a linear map for values and an
//! evenly spaced band per row with inner/outer padding.

/// Maps a numeric domain onto a column range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Round tick values (1, 2 or 5 times a power of ten), about `count` of them
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = self.domain;
        if count == 0 || stop <= start {
            return vec![start];
        }

        let step = tick_step(start, stop, count);
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }

    /// Decimal places that show every tick from `ticks(count)` without float noise
    pub fn tick_decimals(&self, count: usize) -> usize {
        let (start, stop) = self.domain;
        if count == 0 || stop <= start {
            return 0;
        }
        let step = tick_step(start, stop, count);
        (-step.log10().floor()).max(0.0) as usize
    }
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count as f64;
    let power = raw.log10().floor();
    let magnitude = 10f64.powf(power);
    let error = raw / magnitude;

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Evenly spaced bands for `count` rows over a line range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `padding` is used for both inner and outer padding, as a fraction of a step
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = count as f64;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Top of the band at (possibly fractional) row `index`
    pub fn position(&self, index: f64) -> f64 {
        self.start + self.step * index
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}
