//! The degree-agnostic de Casteljau reduction.
//!
//! A [`ControlPolygon`] of `n` points defines a bezier curve of degree
//! `n - 1`. Evaluating the curve at a parameter `s` works by repeatedly
//! interpolating every pair of adjacent points until a single point is left;
//! the figures additionally want to *see* the intermediate steps, so the
//! whole pyramid is exposed through [`ControlPolygon::levels`].

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use crate::geometry::{lerp, Point};

/// An ordered sequence of control points.
///
/// Cubic curves and lower are stored on the stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPolygon(pub SmallVec<[Point; 4]>);

impl Deref for ControlPolygon {
    type Target = SmallVec<[Point; 4]>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for ControlPolygon {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<Point> for ControlPolygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        ControlPolygon(iter.into_iter().collect())
    }
}

impl ControlPolygon {
    /// Returns the curve's degree which is one lower than its number of
    /// control points.
    pub fn degree(&self) -> usize {
        self.len() - 1
    }

    /// Performs a single reduction step at parameter `s`.
    ///
    /// Combines `n` points into `n - 1` by computing `lerp(A, B, s)` on
    /// consecutive points `A` and `B`. A single point has nothing left to
    /// reduce, so at least two are required.
    pub fn reduce_once(&self, s: f64) -> ControlPolygon {
        assert!(
            self.len() >= 2,
            "need at least two control points to reduce"
        );
        self.windows(2).map(|pair| lerp(pair[0], pair[1], s)).collect()
    }

    /// Get the point on the curve at parameter `s`.
    ///
    /// This is the full de Casteljau reduction: exactly `degree` rounds of
    /// pairwise interpolation, uniform over the degree. For two points it is
    /// plain [`lerp`].
    pub fn eval(&self, s: f64) -> Point {
        assert!(!self.is_empty(), "cannot evaluate an empty control polygon");
        let mut points = self.0.clone();
        let inv_s = 1.0 - s;
        while points.len() > 1 {
            for i in 0..points.len() - 1 {
                points[i] = points[i] * inv_s + points[i + 1] * s;
            }
            points.truncate(points.len() - 1);
        }
        points[0]
    }

    /// Iterate over the whole reduction pyramid at parameter `s`.
    ///
    /// The first item is the polygon itself, each following item is one
    /// reduction step shorter, and the last holds the single point the curve
    /// passes through at `s`.
    pub fn levels(&self, s: f64) -> Levels {
        Levels {
            next: Some(self.clone()),
            s,
        }
    }

    /// Sample the full curve at `steps` uniformly spaced parameter values
    /// across `[0, 1]`.
    ///
    /// Connecting the samples with straight segments gives the
    /// piecewise-linear trace the general figure draws; each item carries its
    /// parameter value so callers can split the trace at a chosen `s`.
    pub fn sample(&self, steps: usize) -> impl Iterator<Item = (f64, Point)> + '_ {
        assert!(steps >= 2, "need at least two samples to trace a curve");
        (0..steps).map(move |i| {
            let s = i as f64 / (steps - 1) as f64;
            (s, self.eval(s))
        })
    }
}

/// Iterator yielded by [`ControlPolygon::levels`].
pub struct Levels {
    next: Option<ControlPolygon>,
    s: f64,
}

impl Iterator for Levels {
    type Item = ControlPolygon;

    fn next(&mut self) -> Option<ControlPolygon> {
        let current = self.next.take()?;
        if current.len() > 1 {
            self.next = Some(current.reduce_once(self.s));
        }
        Some(current)
    }
}
