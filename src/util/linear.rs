//! Piecewise-linear interpolation over evenly spaced points.

/// A function defined by values at evenly spaced points of `[min, max]`,
/// linearly interpolated in between and clamped outside the range.
#[derive(Debug, Clone)]
pub struct LinearApproximation {
    points: Vec<f64>,
    min: f64,
    max: f64,
}

impl LinearApproximation {
    /// Create an approximation. At least one point is expected; an empty
    /// point list evaluates to zero everywhere.
    pub fn new(points: Vec<f64>, min: f64, max: f64) -> Self {
        LinearApproximation { points, min, max }
    }

    /// Evaluate the function at `x`.
    pub fn value(&self, x: f64) -> f64 {
        match self.points.len() {
            0 => return 0.0,
            1 => return self.points[0],
            _ => {}
        }

        if x <= self.min {
            return self.points[0];
        }
        if x >= self.max {
            return self.points[self.points.len() - 1];
        }

        let step = (self.max - self.min) / (self.points.len() - 1) as f64;
        let position = (x - self.min) / step;
        let index = (position.floor() as usize).min(self.points.len() - 2);
        let fraction = position - index as f64;

        self.points[index] + (self.points[index + 1] - self.points[index]) * fraction
    }
}
