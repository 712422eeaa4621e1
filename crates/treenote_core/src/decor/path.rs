//! Quadratic route followed by blobs in the path variant.
//!
//! # Responsibility
//! - Evaluate a quadratic Bézier by curve parameter.
//! - Map a shared animation progress to the point reached after that
//!   fraction of the curve's length.
//!
//! # Invariants
//! - Progress `0` yields exactly the start point, `1` exactly the end point.
//! - Sampling is a pure function of `(curve, progress)`.

use serde::{Deserialize, Serialize};

/// Polyline resolution of the arc-length table.
const ARC_SEGMENTS: usize = 128;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Quadratic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadCurve {
    pub const fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Route used by the detail pane background.
    pub const fn blob_route() -> Self {
        Self::new(
            Point::new(25.0, 50.0),
            Point::new(30.0, 20.0),
            Point::new(40.0, 55.0),
        )
    }

    /// `B(t) = (1-t)²·P0 + 2(1-t)t·Pc + t²·P1`, with `t` clamped to `[0, 1]`.
    pub fn point_at_parameter(&self, t: f32) -> Point {
        let t = clamp_unit(t);
        let u = 1.0 - t;
        let (a, b, c) = (u * u, 2.0 * u * t, t * t);
        Point::new(
            a * self.start.x + b * self.control.x + c * self.end.x,
            a * self.start.y + b * self.control.y + c * self.end.y,
        )
    }
}

/// Arc-length sampler over a fixed curve.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSampler {
    curve: QuadCurve,
    /// `cumulative[i]` is the polyline length up to `t = i / ARC_SEGMENTS`.
    cumulative: Vec<f32>,
}

impl PathSampler {
    pub fn new(curve: QuadCurve) -> Self {
        let mut cumulative = Vec::with_capacity(ARC_SEGMENTS + 1);
        cumulative.push(0.0);

        let mut previous = curve.start;
        let mut length = 0.0;
        for step in 1..=ARC_SEGMENTS {
            let point = curve.point_at_parameter(step as f32 / ARC_SEGMENTS as f32);
            length += previous.distance(point);
            cumulative.push(length);
            previous = point;
        }

        Self { curve, cumulative }
    }

    pub fn curve(&self) -> &QuadCurve {
        &self.curve
    }

    /// Approximate total arc length.
    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point reached after traversing `progress` of the curve's length.
    ///
    /// Out-of-range progress is clamped; NaN counts as `0`.
    pub fn point_at_progress(&self, progress: f32) -> Point {
        let progress = clamp_unit(progress);
        if progress <= 0.0 {
            return self.curve.start;
        }
        if progress >= 1.0 {
            return self.curve.end;
        }

        let total = self.length();
        if total <= 0.0 {
            return self.curve.start;
        }

        let target = progress * total;
        let index = self
            .cumulative
            .partition_point(|&length| length < target)
            .clamp(1, ARC_SEGMENTS);
        let (from, to) = (self.cumulative[index - 1], self.cumulative[index]);
        let fraction = if to > from {
            (target - from) / (to - from)
        } else {
            0.0
        };

        let t = ((index - 1) as f32 + fraction) / ARC_SEGMENTS as f32;
        self.curve.point_at_parameter(t)
    }
}

impl Default for PathSampler {
    fn default() -> Self {
        Self::new(QuadCurve::blob_route())
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{PathSampler, Point, QuadCurve};

    fn assert_close(actual: Point, expected: Point, tolerance: f32) {
        assert!(
            actual.distance(expected) <= tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn endpoints_are_exact() {
        let sampler = PathSampler::default();
        assert_eq!(sampler.point_at_progress(0.0), Point::new(25.0, 50.0));
        assert_eq!(sampler.point_at_progress(1.0), Point::new(40.0, 55.0));
    }

    #[test]
    fn out_of_range_and_nan_progress_clamp() {
        let sampler = PathSampler::default();
        assert_eq!(sampler.point_at_progress(-0.5), Point::new(25.0, 50.0));
        assert_eq!(sampler.point_at_progress(f32::NAN), Point::new(25.0, 50.0));
        assert_eq!(sampler.point_at_progress(3.0), Point::new(40.0, 55.0));
    }

    #[test]
    fn parameter_midpoint_matches_closed_form() {
        let curve = QuadCurve::blob_route();
        assert_close(curve.point_at_parameter(0.5), Point::new(31.25, 36.25), 1e-4);
    }

    #[test]
    fn arc_length_midpoint_differs_from_parameter_midpoint() {
        let sampler = PathSampler::default();
        let by_length = sampler.point_at_progress(0.5);
        assert_close(by_length, Point::new(33.11, 37.77), 0.05);
        assert!(by_length.distance(sampler.curve().point_at_parameter(0.5)) > 1.0);
    }

    #[test]
    fn equal_progress_steps_cover_similar_distances() {
        let sampler = PathSampler::default();
        assert!((sampler.length() - 37.27).abs() < 0.05);

        let step_length = sampler.length() / 20.0;
        let points = (0..=20)
            .map(|step| sampler.point_at_progress(step as f32 / 20.0))
            .collect::<Vec<_>>();
        for pair in points.windows(2) {
            let chord = pair[0].distance(pair[1]);
            assert!(
                (chord - step_length).abs() < step_length * 0.1,
                "chord {chord} vs step {step_length}"
            );
        }
    }

    #[test]
    fn degenerate_curve_returns_start() {
        let here = Point::new(3.0, 4.0);
        let sampler = PathSampler::new(QuadCurve::new(here, here, here));
        assert_eq!(sampler.point_at_progress(0.4), here);
    }
}
