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

use turtle_escape::{
    Environment, Failure, NoopRenderer, Outcome, Point, Policy, Rect, Simulator,
    SimulatorConfig, Turtle,
};

fn arena() -> Rect {
    Rect::new(Point::new(-20.0, 20.0), Point::new(20.0, -20.0))
}

fn config() -> SimulatorConfig {
    SimulatorConfig {
        area: arena(),
        ..SimulatorConfig::default()
    }
    .with_seed(42)
}

fn run<P: Policy>(environment: Environment, policy: &mut P) -> turtle_escape::RunReport {
    let mut sim = Simulator::with_environment(config(), environment).expect("new failed");
    sim.simulate(policy, &mut NoopRenderer, Duration::ZERO, false)
        .expect("simulate failed")
}

/// Turns once during setup, then walks one unit per tick.
struct Walker {
    initial_left_turn: f64,
}

impl Policy for Walker {
    fn setup(&mut self, turtle: &mut Turtle<'_>) {
        turtle.turn_left(self.initial_left_turn);
    }

    fn update(&mut self, turtle: &mut Turtle<'_>) {
        turtle.forward();
    }
}

/// Never moves.
struct Inert {
    updates: u32,
}

impl Policy for Inert {
    fn setup(&mut self, _turtle: &mut Turtle<'_>) {}

    fn update(&mut self, _turtle: &mut Turtle<'_>) {
        self.updates += 1;
    }
}

/// Moves for a while, then stops.
struct Tired {
    remaining: u32,
}

impl Policy for Tired {
    fn setup(&mut self, _turtle: &mut Turtle<'_>) {}

    fn update(&mut self, turtle: &mut Turtle<'_>) {
        if self.remaining > 0 {
            self.remaining -= 1;
            turtle.turn_left(10.0);
        }
    }
}

#[test]
fn test_clear_straight_path_reports_distance() {
    // target box spans x in 9..=11, so the 9th unit step is the first inside it
    let env = Environment::new(arena(), Vec::new(), Point::new(10.0, 0.0), 2);
    let report = run(env, &mut Walker { initial_left_turn: 0.0 });
    assert_eq!(report.outcome, Outcome::Succeeded { steps_forward: 9 });
    assert_eq!(report.ticks, 9);
    assert_eq!(report.final_position, Point::new(9.0, 0.0));
}

#[test]
fn test_unit_target_reached_after_exact_distance() {
    let env = Environment::new(arena(), Vec::new(), Point::new(15.0, 0.0), 1);
    let report = run(env, &mut Walker { initial_left_turn: 0.0 });
    assert_eq!(report.steps(), Some(15));
}

#[test]
fn test_inert_policy_stalls_after_one_tick() {
    let env = Environment::new(arena(), Vec::new(), Point::new(10.0, 0.0), 2);
    let mut policy = Inert { updates: 0 };
    let report = run(env, &mut policy);
    assert_eq!(report.outcome, Outcome::Stalled);
    assert_eq!(report.ticks, 1);
    assert_eq!(policy.updates, 1);
    assert_eq!(report.steps(), None);
}

#[test]
fn test_turning_counts_as_motion_until_it_stops() {
    let env = Environment::new(arena(), Vec::new(), Point::new(10.0, 0.0), 2);
    let report = run(env, &mut Tired { remaining: 3 });
    assert_eq!(report.outcome, Outcome::Stalled);
    assert_eq!(report.ticks, 4);
    assert_eq!(report.final_position, Point::ORIGIN);
}

#[test]
fn test_obstacle_ahead_is_collision_even_inside_target_box() {
    let obstacle = Rect::centered_at(Point::new(1.0, 0.0), 1, 1);
    let env = Environment::new(arena(), vec![obstacle], Point::new(1.0, 0.0), 6);
    let report = run(env, &mut Walker { initial_left_turn: 0.0 });
    assert_eq!(report.outcome, Outcome::Failed(Failure::Collision));
    assert_eq!(report.steps(), None);
    assert_eq!(report.ticks, 1);
}

#[test]
fn test_walking_off_the_edge_is_out_of_bounds() {
    let env = Environment::new(arena(), Vec::new(), Point::new(10.0, 10.0), 2);
    let report = run(env, &mut Walker { initial_left_turn: 180.0 });
    assert_eq!(report.outcome, Outcome::Failed(Failure::OutOfBounds));
    // 20 steps land on the boundary, the 21st leaves
    assert_eq!(report.ticks, 21);
    assert!(report.final_position.x < -20.0);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let outcomes: Vec<_> = (0..2)
        .map(|_| {
            let mut sim = Simulator::new(SimulatorConfig::default().with_seed(1234))
                .expect("new failed");
            let report = sim
                .simulate(
                    &mut Walker { initial_left_turn: 45.0 },
                    &mut NoopRenderer,
                    Duration::ZERO,
                    true,
                )
                .expect("simulate failed");
            (sim.environment().clone(), report)
        })
        .collect();
    assert_eq!(outcomes[0], outcomes[1]);
}

#[test]
fn test_generated_environment_keeps_origin_and_target_clear() {
    let mut sim = Simulator::new(SimulatorConfig::default().with_seed(99)).expect("new failed");
    for _ in 0..20 {
        let env = sim.regenerate().expect("regenerate failed");
        assert!(env.is_clear(Point::ORIGIN));
        assert!(env.is_clear(env.target()));
    }
}

#[test]
fn test_boxed_policy_runs() {
    let env = Environment::new(arena(), Vec::new(), Point::new(0.0, 5.0), 3);
    let mut policy: Box<dyn Policy> = Box::new(Walker {
        initial_left_turn: 90.0,
    });
    let mut sim = Simulator::with_environment(config(), env).expect("new failed");
    let report = sim
        .simulate(&mut policy, &mut NoopRenderer, Duration::ZERO, false)
        .expect("simulate failed");
    assert_eq!(report.steps(), Some(4));
}
