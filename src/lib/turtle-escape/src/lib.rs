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

//! Turtle escape: a point agent steered by an injected policy through a rectangular arena
//! full of rectangular obstacles, trying to reach a square target without leaving the arena
//! or touching an obstacle.
//!
//! The crate owns environment generation, collision and termination checks, step counting
//! and stall detection. Callers supply a [`Policy`] that turns and advances the turtle, and
//! optionally a [`Renderer`] that mirrors the run somewhere visible.
//!
//! A run flows from [`Environment::generate`] into a run-scoped [`Turtle`], which the
//! [`Simulator`] hands to the policy once per tick until the turtle reaches a terminal
//! [`Status`] or stops moving.

pub mod config;
pub mod environment;
pub mod geometry;
pub mod policy;
pub mod render;
pub mod simulation;
pub mod turtle;

pub use config::SimulatorConfig;
pub use environment::{Environment, Rng};
pub use geometry::{contains, Point, Rect};
pub use policy::Policy;
pub use render::{AsciiRenderer, NoopRenderer, Renderer};
pub use simulation::{Outcome, RunReport, Simulator};
pub use turtle::{Failure, Status, Turtle};

/// Turtle escape error.
///
/// Only contract violations and exhausted sampling end up here. A turtle hitting an obstacle,
/// leaving the arena or stalling is an ordinary [`Outcome`] of a run, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// The configuration cannot describe a usable arena.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Random sampling kept producing rejected draws.
    #[error("failed to generate {what} after {attempts} attempts")]
    GenerationFailed {
        /// What was being generated, e.g. "obstacle".
        what: &'static str,

        /// How many draws were rejected.
        attempts: u32,
    },

    /// No policy is registered under this name.
    #[error("policy not implemented: {0}")]
    PolicyNotImplemented(String),
}
