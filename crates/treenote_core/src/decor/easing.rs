//! Timing curves and offset transitions.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const SOLVE_EPSILON: f32 = 1e-6;
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;

/// Cubic timing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl UnitBezier {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    /// Curve `y` for input `x` in `[0, 1]`.
    pub fn solve(&self, x: f32) -> f32 {
        self.sample_y(self.solve_parameter(x))
    }

    fn sample_x(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    fn solve_parameter(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = self.sample_x(t) - x;
            if error.abs() < SOLVE_EPSILON {
                return t;
            }
            let slope = self.sample_dx(t);
            if slope.abs() < SOLVE_EPSILON {
                break;
            }
            t -= error / slope;
        }

        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = self.sample_x(t);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if x > value {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        t
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Standard ease-in-out curve `(0.42, 0, 0.58, 1)`.
    EaseInOut,
}

impl Easing {
    /// Eased fraction for linear fraction `t`; endpoints map exactly.
    pub fn apply(self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::EaseInOut => UnitBezier::new(0.42, 0.0, 0.58, 1.0).solve(t),
        }
    }
}

/// Eased move of one blob's displayed offset between two targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTransition {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub started_at: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl OffsetTransition {
    /// Displayed offset at clock time `now`.
    pub fn value_at(&self, now: Duration) -> (f32, f32) {
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            now.saturating_sub(self.started_at).as_secs_f32() / self.duration.as_secs_f32()
        };
        let eased = self.easing.apply(fraction);
        (
            self.from.0 + (self.to.0 - self.from.0) * eased,
            self.from.1 + (self.to.1 - self.from.1) * eased,
        )
    }
}
