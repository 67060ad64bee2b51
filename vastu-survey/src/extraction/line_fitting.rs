//! Least-squares line fitting on the dominant axis.
//!
//! The run is regressed on whichever axis has the larger variance, so that
//! walls parallel to either axis fit without blowing up the slope. Moments
//! are computed on centroid-subtracted coordinates.
//!
//! Lines are kept in implicit form `A·x + B·y = C`:
//! - `Vx > Vy`: `A = Cxy/Vx, B = −1, C = A·Mx − My` (y as a function of x)
//! - otherwise: `A = −1, B = Cxy/Vy, C = B·My − Mx` (x as a function of y)

use crate::core::Point;
use crate::error::{Result, SurveyError};

/// Variances at or below this (cm²) count as zero spread.
pub const VARIANCE_EPSILON: f32 = 1e-6;

/// Fitted line with projected run endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineFit {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    /// Correlation |Cxy| / sqrt(Vx·Vy), clamped to [0, 1].
    pub q: f32,
    /// First point projected on the line.
    pub start: Point,
    /// Last point projected on the line.
    pub end: Point,
}

/// Fit a line to at least two points.
///
/// Returns `DegenerateFit` when the points have no spread on either axis.
/// A run with spread on one axis only is a perfect fit (Q = 1).
pub fn fit_line(points: &[Point]) -> Result<LineFit> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(SurveyError::InsufficientPoints { count: 0 });
    };
    if points.len() < 2 {
        return Err(SurveyError::InsufficientPoints {
            count: points.len(),
        });
    }

    let n = points.len() as f32;
    let mut sum_x: f32 = 0.0;
    let mut sum_y: f32 = 0.0;
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
    }
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let mut sxx: f32 = 0.0;
    let mut syy: f32 = 0.0;
    let mut sxy: f32 = 0.0;
    for p in points {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let vx = sxx / n;
    let vy = syy / n;
    let cxy = sxy / n;

    let flat_x = vx <= VARIANCE_EPSILON;
    let flat_y = vy <= VARIANCE_EPSILON;
    if flat_x && flat_y {
        return Err(SurveyError::DegenerateFit {
            points: points.len(),
        });
    }

    let q = if flat_x || flat_y {
        1.0
    } else {
        (cxy.abs() / (vx * vy).sqrt()).min(1.0)
    };

    let (a, b, c, start, end) = if vx > vy {
        let a = cxy / vx;
        let c = a * mean_x - mean_y;
        let project = |p: &Point| Point::new(p.x, a * p.x - c);
        (a, -1.0, c, project(first), project(last))
    } else {
        let b = cxy / vy;
        let c = b * mean_y - mean_x;
        let project = |p: &Point| Point::new(b * p.y - c, p.y);
        (-1.0, b, c, project(first), project(last))
    };

    Ok(LineFit {
        a,
        b,
        c,
        q,
        start,
        end,
    })
}

/// Perpendicular distance from `point` to the line `A·x + B·y = C`.
pub fn line_distance(a: f32, b: f32, c: f32, point: Point) -> Result<f32> {
    let norm = (a * a + b * b).sqrt();
    if norm <= f32::EPSILON {
        return Err(SurveyError::DegenerateLine);
    }
    Ok((a * point.x + b * point.y - c).abs() / norm)
}
