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

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::environment::Environment;
use crate::geometry::{Point, Rect};

/// Why a turtle stopped short of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Failure {
    /// Stepped onto an obstacle.
    Collision,

    /// Stepped outside the arena.
    OutOfBounds,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Collision => write!(f, "hit an obstacle"),
            Failure::OutOfBounds => write!(f, "left the area"),
        }
    }
}

/// Where a turtle is in its run. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Running,
    Succeeded,
    Failed(Failure),
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// The agent for a single run: its pose, how far it has walked, and whether it is done.
///
/// A turtle borrows the environment it runs in, so a fresh turtle is created for every run
/// and nothing it does can leak into the next one. Heading is in degrees, 0 pointing along
/// +x, and left turns go counterclockwise.
#[derive(Debug, Clone)]
pub struct Turtle<'env> {
    environment: &'env Environment,
    position: Point,
    heading: f64,
    steps_forward: u32,
    status: Status,
}

impl<'env> Turtle<'env> {
    /// A running turtle at the origin, facing +x.
    pub fn new(environment: &'env Environment) -> Self {
        Self {
            environment,
            position: Point::ORIGIN,
            heading: 0.0,
            steps_forward: 0,
            status: Status::Running,
        }
    }

    pub fn turn_left(&mut self, degrees: f64) {
        self.heading = normalize_heading(self.heading + degrees);
    }

    pub fn turn_right(&mut self, degrees: f64) {
        self.heading = normalize_heading(self.heading - degrees);
    }

    /// Take one unit step along the current heading and check where it landed.
    ///
    /// Checks run in a fixed order: obstacles, then the arena bounds, then the target box.
    /// The first match decides the outcome, so a step onto an obstacle that overlaps the
    /// target is still a collision. Once the turtle is in a terminal state this does
    /// nothing and returns that state.
    pub fn forward(&mut self) -> Status {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "ignoring forward on a finished turtle");
            return self.status;
        }

        self.steps_forward += 1;
        self.position = self.ahead(1.0);

        if !self.environment.is_clear(self.position) {
            warn!(position = %self.position, "hit obstacle");
            self.status = Status::Failed(Failure::Collision);
        } else if !self.environment.area().contains(self.position) {
            warn!(position = %self.position, "left area");
            self.status = Status::Failed(Failure::OutOfBounds);
        } else if self.environment.target_box().contains(self.position) {
            self.status = Status::Succeeded;
        }

        debug!(
            steps = self.steps_forward,
            position = %self.position,
            heading = self.heading,
            "forward"
        );
        self.status
    }

    /// The point `distance` units away along the current heading. Does not move the turtle.
    pub fn ahead(&self, distance: f64) -> Point {
        let radians = self.heading.to_radians();
        Point::new(
            self.position.x + distance * radians.cos(),
            self.position.y + distance * radians.sin(),
        )
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Heading in degrees, always in `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Position and heading together, which is what the stall detector compares.
    pub fn pose(&self) -> (Point, f64) {
        (self.position, self.heading)
    }

    pub fn steps_forward(&self) -> u32 {
        self.steps_forward
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn environment(&self) -> &'env Environment {
        self.environment
    }

    pub fn area(&self) -> &'env Rect {
        self.environment.area()
    }

    pub fn obstacles(&self) -> &'env [Rect] {
        self.environment.obstacles()
    }

    pub fn target(&self) -> Point {
        self.environment.target()
    }

    pub fn target_box(&self) -> Rect {
        self.environment.target_box()
    }
}

fn normalize_heading(degrees: f64) -> f64 {
    let heading = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}
