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

use std::time::Duration;

use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SimulatorConfig;
use crate::environment::{Environment, Rng};
use crate::geometry::Point;
use crate::policy::Policy;
use crate::render::Renderer;
use crate::turtle::{Failure, Status, Turtle};
use crate::SimulationError;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The turtle stepped into the target box.
    Succeeded { steps_forward: u32 },

    /// The turtle hit an obstacle or left the area.
    Failed(Failure),

    /// A whole tick went by without the turtle moving or turning.
    Stalled,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Succeeded { steps_forward } => {
                write!(f, "reached the target in {} steps", steps_forward)
            }
            Outcome::Failed(failure) => write!(f, "{}", failure),
            Outcome::Stalled => write!(f, "stopped moving"),
        }
    }
}

/// Result of one call to [`Simulator::simulate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: Outcome,

    /// How many times the policy's `update` hook ran.
    pub ticks: u64,

    pub final_position: Point,
    pub final_heading: f64,
}

impl RunReport {
    /// Steps taken to reach the target, or `None` if the run failed or stalled.
    pub fn steps(&self) -> Option<u32> {
        match self.outcome {
            Outcome::Succeeded { steps_forward } => Some(steps_forward),
            Outcome::Failed(_) | Outcome::Stalled => None,
        }
    }
}

/// Runs a policy against an environment, one run at a time.
///
/// The simulator keeps the environment between runs so a run can either reuse it or ask for
/// a fresh one. All per-run state lives in a [`Turtle`] created inside
/// [`Simulator::simulate`], which takes `&mut self` so two runs can never overlap on the
/// same simulator.
pub struct Simulator {
    config: SimulatorConfig,
    environment: Environment,
    rng: Rng,
}

impl Simulator {
    /// Start with no obstacles and the target on the origin. Most callers want the first
    /// run to generate a new environment.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulationError> {
        let environment = Environment::empty(&config);
        Self::with_environment(config, environment)
    }

    pub fn with_environment(
        config: SimulatorConfig,
        environment: Environment,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Rng::seed_from_u64(seed),
            None => Rng::from_entropy(),
        };
        Ok(Self {
            config,
            environment,
            rng,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Replace the environment with a freshly generated one.
    pub fn regenerate(&mut self) -> Result<&Environment, SimulationError> {
        self.environment = Environment::generate(&self.config, &mut self.rng)?;
        Ok(&self.environment)
    }

    /// Run one simulation.
    ///
    /// Draws the environment, calls `policy.setup` once, then loops: sleep for `delay`,
    /// call `policy.update`, and sample the turtle's pose. The loop ends when the turtle
    /// reaches a terminal status, or when a tick leaves position and heading exactly as
    /// they were after the previous tick (or after setup, for the first tick).
    ///
    /// Only environment generation can fail. Collisions, leaving the area and stalls are
    /// reported through [`RunReport::outcome`].
    pub fn simulate<P, R>(
        &mut self,
        policy: &mut P,
        renderer: &mut R,
        delay: Duration,
        new_environment: bool,
    ) -> Result<RunReport, SimulationError>
    where
        P: Policy + ?Sized,
        R: Renderer + ?Sized,
    {
        if new_environment {
            self.regenerate()?;
        }
        let environment = &self.environment;

        renderer.clear();
        renderer.draw_boxes(environment.obstacles(), &self.config.obstacle_color);
        renderer.draw_box(&environment.target_box(), &self.config.target_color);
        renderer.place_turtle(Point::ORIGIN, 0.0);

        info!(
            obstacles = environment.obstacles().len(),
            target = %environment.target(),
            "starting run"
        );

        let mut turtle = Turtle::new(environment);
        policy.setup(&mut turtle);

        let mut last_pose = turtle.pose();
        let mut ticks: u64 = 0;
        let mut stalled = false;
        while !turtle.status().is_terminal() {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            policy.update(&mut turtle);
            ticks += 1;

            let pose = turtle.pose();
            renderer.move_turtle(pose.0, pose.1);
            if turtle.status().is_terminal() {
                break;
            }
            if pose == last_pose {
                warn!(ticks, position = %pose.0, heading = pose.1, "motionless, stopping run");
                stalled = true;
                break;
            }
            last_pose = pose;
        }

        let outcome = match (stalled, turtle.status()) {
            (true, _) => Outcome::Stalled,
            (false, Status::Succeeded) => Outcome::Succeeded {
                steps_forward: turtle.steps_forward(),
            },
            (false, Status::Failed(failure)) => Outcome::Failed(failure),
            (false, Status::Running) => unreachable!("loop only exits on a terminal status"),
        };
        info!(%outcome, ticks, steps = turtle.steps_forward(), "run finished");

        Ok(RunReport {
            outcome,
            ticks,
            final_position: turtle.position(),
            final_heading: turtle.heading(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::render::NoopRenderer;

    struct Forward;

    impl Policy for Forward {
        fn setup(&mut self, _turtle: &mut Turtle<'_>) {}

        fn update(&mut self, turtle: &mut Turtle<'_>) {
            turtle.forward();
        }
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self) {
            self.calls.push("clear".to_string());
        }

        fn draw_box(&mut self, rect: &Rect, color: &str) {
            self.calls.push(format!("box {} {:?}", color, rect.top_left()));
        }

        fn place_turtle(&mut self, position: Point, _heading: f64) {
            self.calls.push(format!("place {}", position));
        }

        fn move_turtle(&mut self, position: Point, _heading: f64) {
            self.calls.push(format!("move {}", position));
        }
    }

    fn config() -> SimulatorConfig {
        SimulatorConfig::default().with_seed(11)
    }

    // a fresh simulator's target box surrounds the origin, so the first step succeeds.
    #[test]
    fn test_default_environment_reaches_target_in_one_step() {
        let mut sim = Simulator::new(config()).expect("new failed");
        let report = sim
            .simulate(&mut Forward, &mut NoopRenderer, Duration::ZERO, false)
            .expect("simulate failed");
        assert_eq!(report.outcome, Outcome::Succeeded { steps_forward: 1 });
        assert_eq!(report.steps(), Some(1));
        assert_eq!(report.ticks, 1);
    }

    #[test]
    fn test_renderer_sees_environment_then_motion() {
        let area = config().area;
        let env = Environment::new(
            area,
            vec![Rect::new(Point::new(50.0, 60.0), Point::new(70.0, 40.0))],
            Point::new(3.0, 0.0),
            2,
        );
        let mut sim = Simulator::with_environment(config(), env).expect("new failed");
        let mut recorder = Recorder::default();
        sim.simulate(&mut Forward, &mut recorder, Duration::ZERO, false)
            .expect("simulate failed");
        assert_eq!(
            recorder.calls,
            vec![
                "clear".to_string(),
                "box black Point { x: 50.0, y: 60.0 }".to_string(),
                "box green Point { x: 2.0, y: 1.0 }".to_string(),
                "place (0.00, 0.00)".to_string(),
                "move (1.00, 0.00)".to_string(),
                "move (2.00, 0.00)".to_string(),
            ]
        );
    }

    #[test]
    fn test_new_environment_replaces_and_reuse_keeps() {
        let mut sim = Simulator::new(config()).expect("new failed");
        assert!(sim.environment().obstacles().is_empty());

        sim.simulate(&mut Forward, &mut NoopRenderer, Duration::ZERO, true)
            .expect("simulate failed");
        let generated = sim.environment().clone();
        assert_eq!(generated.obstacles().len(), 30);

        sim.simulate(&mut Forward, &mut NoopRenderer, Duration::ZERO, false)
            .expect("simulate failed");
        assert_eq!(sim.environment(), &generated);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let bad = SimulatorConfig {
            max_height: 0,
            ..SimulatorConfig::default()
        };
        assert!(matches!(
            Simulator::new(bad),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}
