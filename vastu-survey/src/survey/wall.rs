//! Fitted wall segment and its classification relative to the station.

use crate::core::{Angle, Point};
use crate::error::{Result, SurveyError};
use crate::extraction::{LineFit, fit_line, line_distance};

use super::{MIN_WALL_POINTS, SurveyPoint};

/// Which side of the station a wall lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallSide {
    Left,
    Front,
    Right,
}

impl WallSide {
    /// Fraction of a wall's points that must lie on one side of the scan
    /// axis for the wall to be classified on that side.
    pub const SIDE_FRACTION: f32 = 0.6;

    /// Classify a run of points by the sign of their scan angles.
    ///
    /// Right wins ties with Left since it is checked first.
    pub fn classify(points: &[SurveyPoint]) -> Self {
        if points.is_empty() {
            return WallSide::Front;
        }
        let n = points.len() as f32;
        let right = points.iter().filter(|p| p.raw_angle > 0.0).count() as f32;
        let left = points.iter().filter(|p| p.raw_angle < 0.0).count() as f32;
        if right / n > Self::SIDE_FRACTION {
            WallSide::Right
        } else if left / n > Self::SIDE_FRACTION {
            WallSide::Left
        } else {
            WallSide::Front
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WallSide::Left => "left",
            WallSide::Front => "front",
            WallSide::Right => "right",
        }
    }
}

/// Wall fitted to consecutive valid points of one station.
///
/// Holds the implicit line `A·x + B·y = C`, the correlation `Q` of the fit,
/// and the run's first and last points projected onto the line.
#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    points: Vec<SurveyPoint>,
    first_index: usize,
    line: LineFit,
    bearing: Angle,
    side: WallSide,
}

impl Wall {
    /// Fit a wall to a run of points starting at `first_index` in its station.
    pub fn from_run(points: &[SurveyPoint], first_index: usize) -> Result<Self> {
        if points.len() < MIN_WALL_POINTS {
            return Err(SurveyError::InsufficientPoints {
                count: points.len(),
            });
        }

        let positions: Vec<Point> = points.iter().map(|p| p.position).collect();
        let line = fit_line(&positions)?;
        let delta = line.end - line.start;

        Ok(Self {
            points: points.to_vec(),
            first_index,
            bearing: Angle::bearing(delta.x, delta.y),
            side: WallSide::classify(points),
            line,
        })
    }

    #[inline]
    pub fn a(&self) -> f32 {
        self.line.a
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.line.b
    }

    #[inline]
    pub fn c(&self) -> f32 {
        self.line.c
    }

    /// Correlation of the fit in [0, 1].
    #[inline]
    pub fn q(&self) -> f32 {
        self.line.q
    }

    /// First point of the run projected on the line.
    #[inline]
    pub fn pt1(&self) -> Point {
        self.line.start
    }

    /// Last point of the run projected on the line.
    #[inline]
    pub fn pt2(&self) -> Point {
        self.line.end
    }

    /// Bearing from Pt1 to Pt2.
    #[inline]
    pub fn bearing(&self) -> Angle {
        self.bearing
    }

    #[inline]
    pub fn side(&self) -> WallSide {
        self.side
    }

    pub fn is_left(&self) -> bool {
        self.side == WallSide::Left
    }

    pub fn is_front(&self) -> bool {
        self.side == WallSide::Front
    }

    pub fn is_right(&self) -> bool {
        self.side == WallSide::Right
    }

    pub fn points(&self) -> &[SurveyPoint] {
        &self.points
    }

    /// Index of the wall's first point in its station.
    pub fn first_index(&self) -> usize {
        self.first_index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Perpendicular distance from a point to the wall's line.
    pub fn distance_from(&self, point: Point) -> Result<f32> {
        line_distance(self.line.a, self.line.b, self.line.c, point)
    }
}
