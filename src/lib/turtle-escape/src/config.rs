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

use crate::geometry::{Point, Rect};
use crate::SimulationError;

/// Settings that stay fixed for the lifetime of a [`crate::Simulator`].
///
/// Every field has a default, so a JSON file only needs to name the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// The region the turtle must stay inside. Obstacle centers and the target are drawn
    /// from it too.
    pub area: Rect,

    /// Largest height an obstacle can have.
    pub max_height: i32,

    /// Largest width an obstacle can have.
    pub max_width: i32,

    /// Obstacles generated for each new environment.
    pub num_obstacles: usize,

    pub obstacle_color: String,

    /// Side length of the square target box around the target point.
    pub target_size: i32,

    pub target_color: String,

    /// Seed for the environment RNG. `None` seeds from system entropy.
    pub seed: Option<u64>,

    /// Cap on rejected random draws before generation gives up.
    pub max_generation_attempts: u32,
}

impl SimulatorConfig {
    fn new(
        area: Rect,
        max_height: i32,
        max_width: i32,
        num_obstacles: usize,
        target_size: i32,
    ) -> Self {
        Self {
            area,
            max_height,
            max_width,
            num_obstacles,
            obstacle_color: "black".to_string(),
            target_size,
            target_color: "green".to_string(),
            seed: None,
            max_generation_attempts: 10_000,
        }
    }

    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.max_height < 1 || self.max_width < 1 {
            return Err(SimulationError::InvalidConfig(format!(
                "obstacle size limits must be at least 1, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        if self.target_size < 1 {
            return Err(SimulationError::InvalidConfig(format!(
                "target size must be at least 1, got {}",
                self.target_size
            )));
        }
        if self.max_generation_attempts == 0 {
            return Err(SimulationError::InvalidConfig(
                "max_generation_attempts must be at least 1".to_string(),
            ));
        }
        if self.area.left().ceil() > self.area.right().floor()
            || self.area.bottom().ceil() > self.area.top().floor()
        {
            return Err(SimulationError::InvalidConfig(format!(
                "area {:?} contains no integer point",
                self.area
            )));
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(
            Rect::new(Point::new(-300.0, 300.0), Point::new(300.0, -300.0)),
            100, /*max_height*/
            100, /*max_width*/
            30,  /*num_obstacles*/
            10,  /*target_size*/
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulatorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.area.top_left(), Point::new(-300.0, 300.0));
        assert_eq!(config.num_obstacles, 30);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SimulatorConfig =
            serde_json::from_str(r#"{"num_obstacles": 5, "seed": 7}"#).expect("parse failed");
        assert_eq!(config.num_obstacles, 5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_height, 100);
        assert_eq!(config.target_color, "green");
    }

    #[test]
    fn test_zero_sized_obstacles_rejected() {
        let config = SimulatorConfig {
            max_width: 0,
            ..SimulatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_target_size_rejected() {
        let config = SimulatorConfig {
            target_size: 0,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_area_without_integer_points_rejected() {
        let config = SimulatorConfig {
            area: Rect::new(Point::new(0.2, 0.8), Point::new(0.7, 0.1)),
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
