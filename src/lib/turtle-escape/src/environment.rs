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

//! Random arenas: obstacle rectangles that never cover the origin, and a target point that
//! never lands inside an obstacle.
//!
//! Every sampling loop here rejects bad draws and retries, up to a caller-supplied cap.

use std::ops::RangeInclusive;

use rand::Rng as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SimulatorConfig;
use crate::geometry::{Point, Rect};
use crate::SimulationError;

pub type Rng = rand_pcg::Pcg64;

/// The obstacles and target the turtle runs against, plus the arena they live in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    area: Rect,
    obstacles: Vec<Rect>,
    target: Point,
    target_size: i32,
}

impl Environment {
    pub fn new(area: Rect, obstacles: Vec<Rect>, target: Point, target_size: i32) -> Self {
        Self {
            area,
            obstacles,
            target,
            target_size,
        }
    }

    /// The environment a fresh simulator starts with: no obstacles and the target on the
    /// origin.
    pub fn empty(config: &SimulatorConfig) -> Self {
        Self::new(config.area, Vec::new(), Point::ORIGIN, config.target_size)
    }

    /// Draw a new set of obstacles, then a target point clear of all of them.
    pub fn generate(config: &SimulatorConfig, rng: &mut Rng) -> Result<Self, SimulationError> {
        let obstacles = generate_obstacles(
            &config.area,
            config.max_height,
            config.max_width,
            config.num_obstacles,
            config.max_generation_attempts,
            rng,
        )?;
        let target = pick_target_point(
            &obstacles,
            &config.area,
            config.max_generation_attempts,
            rng,
        )?;
        info!(
            obstacles = obstacles.len(),
            target = %target,
            "generated environment"
        );
        Ok(Self::new(config.area, obstacles, target, config.target_size))
    }

    pub fn area(&self) -> &Rect {
        &self.area
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn target_size(&self) -> i32 {
        self.target_size
    }

    /// Move the target. The target box follows immediately since it is never cached.
    pub fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    /// The square around the target that counts as reaching it, derived fresh on every call.
    pub fn target_box(&self) -> Rect {
        Rect::centered_at(self.target, self.target_size, self.target_size)
    }

    /// True if no obstacle contains the point. Says nothing about the arena bounds.
    pub fn is_clear(&self, point: Point) -> bool {
        !self.obstacles.iter().any(|obstacle| obstacle.contains(point))
    }
}

/// Integer ranges covering every lattice point inside `area`, x first.
fn lattice_ranges(
    area: &Rect,
) -> Result<(RangeInclusive<i64>, RangeInclusive<i64>), SimulationError> {
    let xs = area.left().ceil() as i64..=area.right().floor() as i64;
    let ys = area.bottom().ceil() as i64..=area.top().floor() as i64;
    if xs.is_empty() || ys.is_empty() {
        return Err(SimulationError::InvalidConfig(format!(
            "area {:?} contains no integer point",
            area
        )));
    }
    Ok((xs, ys))
}

fn random_lattice_point(
    xs: &RangeInclusive<i64>,
    ys: &RangeInclusive<i64>,
    rng: &mut Rng,
) -> Point {
    Point::new(
        rng.gen_range(xs.clone()) as f64,
        rng.gen_range(ys.clone()) as f64,
    )
}

/// Pick a rectangle with a uniformly random integer center inside `area`, height in
/// `1..=max_height` and width in `1..=max_width`.
///
/// With `avoid_origin`, draws that contain the origin are thrown away and redrawn, at most
/// `max_attempts` times in total.
pub fn random_rectangle(
    area: &Rect,
    max_height: i32,
    max_width: i32,
    avoid_origin: bool,
    max_attempts: u32,
    rng: &mut Rng,
) -> Result<Rect, SimulationError> {
    if max_height < 1 || max_width < 1 {
        return Err(SimulationError::InvalidConfig(format!(
            "rectangle size limits must be at least 1, got {}x{}",
            max_width, max_height
        )));
    }
    let (xs, ys) = lattice_ranges(area)?;
    for _ in 0..max_attempts {
        let center = random_lattice_point(&xs, &ys, rng);
        let height = rng.gen_range(1..=max_height);
        let width = rng.gen_range(1..=max_width);
        let rect = Rect::centered_at(center, width, height);
        if avoid_origin && rect.contains(Point::ORIGIN) {
            debug!(?rect, "rejected rectangle covering the origin");
            continue;
        }
        return Ok(rect);
    }
    Err(SimulationError::GenerationFailed {
        what: "obstacle",
        attempts: max_attempts,
    })
}

/// Draw `count` obstacles independently. Obstacles may overlap each other; none covers the
/// origin.
pub fn generate_obstacles(
    area: &Rect,
    max_height: i32,
    max_width: i32,
    count: usize,
    max_attempts: u32,
    rng: &mut Rng,
) -> Result<Vec<Rect>, SimulationError> {
    (0..count)
        .map(|_| random_rectangle(area, max_height, max_width, true, max_attempts, rng))
        .collect()
}

/// Draw a uniformly random integer point in `area` that no obstacle contains.
pub fn pick_target_point(
    obstacles: &[Rect],
    area: &Rect,
    max_attempts: u32,
    rng: &mut Rng,
) -> Result<Point, SimulationError> {
    let (xs, ys) = lattice_ranges(area)?;
    for _ in 0..max_attempts {
        let point = random_lattice_point(&xs, &ys, rng);
        if obstacles.iter().all(|obstacle| !obstacle.contains(point)) {
            return Ok(point);
        }
    }
    Err(SimulationError::GenerationFailed {
        what: "target",
        attempts: max_attempts,
    })
}
