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

#![warn(missing_docs)]

//! Example policies for turtle escape.
//!
//! None of these are clever. They exist to exercise the simulator from the command line and
//! to give new policies something to compare against.

use tracing::debug;
use turtle_escape::{Point, Policy, SimulationError, Turtle};

/// Names accepted by [`policy_by_name`].
pub const POLICY_NAMES: [&str; 3] = ["idle", "straight", "seeker"];

/// Build a policy from its name.
///
/// Unknown names fail with [`SimulationError::PolicyNotImplemented`] before any run starts.
pub fn policy_by_name(name: &str) -> Result<Box<dyn Policy>, SimulationError> {
    match name {
        "idle" => Ok(Box::new(Idle)),
        "straight" => Ok(Box::new(Straight)),
        "seeker" => Ok(Box::new(Seeker::default())),
        _ => Err(SimulationError::PolicyNotImplemented(name.to_string())),
    }
}

/// Never moves, so every run stalls on its first tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct Idle;

impl Policy for Idle {
    fn setup(&mut self, _turtle: &mut Turtle<'_>) {}

    fn update(&mut self, _turtle: &mut Turtle<'_>) {}
}

/// Walks one unit per tick along its starting heading.
#[derive(Debug, Default, Clone, Copy)]
pub struct Straight;

impl Policy for Straight {
    fn setup(&mut self, _turtle: &mut Turtle<'_>) {}

    fn update(&mut self, turtle: &mut Turtle<'_>) {
        turtle.forward();
    }
}

/// Heads for the target and sidesteps anything in the way.
///
/// Each tick it turns to face the target, then keeps turning right by `turn_step` degrees
/// until the spot one unit ahead is neither inside an obstacle nor outside the area, then
/// walks up to `stride` units, stopping early if the next spot is blocked. Because it only
/// steps onto spots it has checked, it never collides or leaves the area.
///
/// After `patience` ticks it stops moving, which lets the stall detector end runs where it
/// would otherwise circle forever.
#[derive(Debug, Clone)]
pub struct Seeker {
    turn_step: f64,
    stride: u32,
    patience: u64,
    ticks: u64,
}

impl Seeker {
    /// Create a seeker. `turn_step` must be positive.
    pub fn new(turn_step: f64, stride: u32, patience: u64) -> Self {
        Self {
            turn_step,
            stride,
            patience,
            ticks: 0,
        }
    }

    fn max_turns(&self) -> u32 {
        (360.0 / self.turn_step).ceil() as u32
    }
}

impl Default for Seeker {
    fn default() -> Self {
        Self::new(15.0, 5, 20_000)
    }
}

impl Policy for Seeker {
    fn setup(&mut self, _turtle: &mut Turtle<'_>) {
        self.ticks = 0;
    }

    fn update(&mut self, turtle: &mut Turtle<'_>) {
        if self.ticks >= self.patience {
            return;
        }
        self.ticks += 1;
        if self.ticks == self.patience {
            debug!(ticks = self.ticks, "seeker out of patience");
        }

        let desired = bearing(turtle.position(), turtle.target());
        turtle.turn_left(signed_turn(turtle.heading(), desired));

        let mut turns = 0;
        while is_blocked(turtle, turtle.ahead(1.0)) && turns < self.max_turns() {
            turtle.turn_right(self.turn_step);
            turns += 1;
        }

        for _ in 0..self.stride {
            if turtle.status().is_terminal() || is_blocked(turtle, turtle.ahead(1.0)) {
                break;
            }
            turtle.forward();
        }
    }
}

fn is_blocked(turtle: &Turtle<'_>, point: Point) -> bool {
    !turtle.environment().is_clear(point) || !turtle.area().contains(point)
}

/// Heading in degrees that points from `from` to `to`.
fn bearing(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Smallest left turn, in `(-180, 180]`, that takes `heading` to `desired`. Negative means
/// turn right.
fn signed_turn(heading: f64, desired: f64) -> f64 {
    let delta = (desired - heading).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}
