/// Picks "nice" tick values (multiples of 1, 2, 2.5 or 5 times a power of ten) for a range,
/// never returning more than `max_ticks` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickLocator {
    max_ticks: usize,
}

const NICE_STEPS: [f64; 4] = [1.0, 2.0, 2.5, 5.0];

impl TickLocator {
    /// Locator producing at most `max_ticks` ticks (at least one).
    pub fn new(max_ticks: usize) -> Self {
        Self {
            max_ticks: max_ticks.max(1),
        }
    }

    /// Tick cap.
    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    /// Ticks inside `[min(a, b), max(a, b)]`, ascending, with the chosen step.
    pub fn locate(&self, a: f64, b: f64) -> (Vec<f64>, f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let span = hi - lo;
        if !span.is_finite() || span <= 0.0 {
            return (vec![lo], 0.0);
        }

        let mut exp = (span / self.max_ticks as f64).log10().floor() as i32;
        loop {
            let mag = 10f64.powi(exp);
            for m in NICE_STEPS {
                let step = m * mag;
                let first = (lo / step - 1e-9).ceil();
                let last = (hi / step + 1e-9).floor();
                let count = (last - first + 1.0).max(0.0) as usize;
                if count <= self.max_ticks {
                    if count == 0 {
                        return (vec![lo], step);
                    }
                    let ticks = (0..count)
                        .map(|i| clean_zero((first + i as f64) * step))
                        .collect();
                    return (ticks, step);
                }
            }
            exp += 1;
        }
    }
}

fn clean_zero(v: f64) -> f64 {
    if v.abs() < 1e-12 { 0.0 } else { v }
}

/// Format a tick value with just enough decimals for `step`.
pub fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        let mut d = (-step.log10().floor()).max(0.0) as usize;
        let scaled = step * 10f64.powi(d as i32);
        if (scaled - scaled.round()).abs() > 1e-6 {
            d += 1;
        }
        d.min(8)
    } else {
        2
    };
    let s = format!("{:.*}", decimals, v);
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ticks.rs"]
mod tests;
