/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Axis-aligned rectangles and points in a plane where y increases upward.

use serde::{Deserialize, Serialize};

/// A point in the plane. Serialized as an `(x, y)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    /// Horizontal coordinate, increasing to the right.
    pub x: f64,

    /// Vertical coordinate, increasing upward.
    pub y: f64,
}

impl Point {
    /// The origin, where every turtle starts.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// An axis-aligned rectangle stored as its top-left and bottom-right corners.
///
/// The corners are always ordered: `top_left.x <= bottom_right.x` and
/// `top_left.y >= bottom_right.y`. Constructors normalize whatever corners they are
/// given, so callers never need to care which corner they computed first. Serialized as
/// a `(top_left, bottom_right)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Point, Point)", into = "(Point, Point)")]
pub struct Rect {
    top_left: Point,
    bottom_right: Point,
}

impl Rect {
    /// Create a rectangle from any two opposite corners.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x.min(b.x), a.y.max(b.y)),
            bottom_right: Point::new(a.x.max(b.x), a.y.min(b.y)),
        }
    }

    /// Build a rectangle centered at `center`. Half extents use integer division, so an odd
    /// width or height loses its remainder: a width of 5 spans `center.x - 2..=center.x + 2`.
    pub fn centered_at(center: Point, width: i32, height: i32) -> Self {
        let half_width = f64::from(width / 2);
        let half_height = f64::from(height / 2);
        Self::new(
            Point::new(center.x - half_width, center.y + half_height),
            Point::new(center.x + half_width, center.y - half_height),
        )
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    pub fn right(&self) -> f64 {
        self.bottom_right.x
    }

    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    pub fn bottom(&self) -> f64 {
        self.bottom_right.y
    }

    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f64 {
        self.top() - self.bottom()
    }

    /// True if the point lies inside the rectangle. All four edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        self.left() <= point.x
            && point.x <= self.right()
            && self.bottom() <= point.y
            && point.y <= self.top()
    }
}

impl From<(Point, Point)> for Rect {
    fn from((a, b): (Point, Point)) -> Self {
        Self::new(a, b)
    }
}

impl From<Rect> for (Point, Point) {
    fn from(rect: Rect) -> Self {
        (rect.top_left, rect.bottom_right)
    }
}

/// Free-function form of [`Rect::contains`].
pub fn contains(point: Point, rect: &Rect) -> bool {
    rect.contains(point)
}
