//! Scalar-to-[0,1] membership functions shared by every pillar.

use serde::Serialize;

/// Trapezoidal membership window.
///
/// Zero at or below `a` and at or above `d`, rising linearly over `[a, b]`,
/// flat at 1 over `[b, c]`, and falling linearly over `[c, d]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trapezoid {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Trapezoid {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Same window with every edge mapped through log10.
    pub fn log10(&self) -> Self {
        Self {
            a: self.a.log10(),
            b: self.b.log10(),
            c: self.c.log10(),
            d: self.d.log10(),
        }
    }

    pub fn membership(&self, value: f64) -> f64 {
        trapezoidal(value, self.a, self.b, self.c, self.d)
    }

    /// Element-wise membership over a column of values.
    pub fn membership_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.membership(v)).collect()
    }
}

pub fn trapezoidal(value: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if value <= a || value >= d {
        return 0.0;
    }
    let raw = if value < b {
        (value - a) / (b - a)
    } else if value <= c {
        1.0
    } else {
        (d - value) / (d - c)
    };
    raw.clamp(0.0, 1.0)
}

/// Logistic curve rising from 0 (low values) to 1 (high values).
pub fn logistic_increasing(value: f64, midpoint: f64, width: f64) -> f64 {
    1.0 / (1.0 + (-(value - midpoint) / width).exp())
}

/// Mirror of [`logistic_increasing`]: low values map toward 1.
pub fn logistic_decreasing(value: f64, midpoint: f64, width: f64) -> f64 {
    1.0 / (1.0 + ((value - midpoint) / width).exp())
}
