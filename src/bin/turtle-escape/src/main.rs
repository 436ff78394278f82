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

//! Run a turtle escape simulation from the command line.
//!
//! Prints the number of steps the turtle took to reach the target, or why it failed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use turtle_escape::{AsciiRenderer, NoopRenderer, Outcome, Renderer, Simulator, SimulatorConfig};
use turtle_policies::policy_by_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderMode {
    /// Print the arena as a character grid after each run.
    Ascii,
    /// Draw nothing.
    Off,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON file with simulator settings. Missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for environment generation. Overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of obstacles. Overrides the config file.
    #[arg(long, value_name = "COUNT")]
    obstacles: Option<usize>,

    /// Seconds to wait between ticks.
    #[arg(long, value_name = "SECONDS", default_value_t = 0.001)]
    delay: f64,

    /// Policy steering the turtle: idle, straight or seeker.
    #[arg(long, default_value = "seeker")]
    policy: String,

    #[arg(long, value_enum, default_value_t = RenderMode::Ascii)]
    render: RenderMode,

    /// Arena units per character when rendering as ASCII.
    #[arg(long, value_name = "UNITS", default_value_t = 10.0)]
    cell_size: f64,

    /// Number of runs.
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Reuse the first run's environment for every later run.
    #[arg(long)]
    keep_environment: bool,
}

fn load_config(path: Option<&Path>) -> Result<SimulatorConfig> {
    let Some(path) = path else {
        return Ok(SimulatorConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(obstacles) = args.obstacles {
        config.num_obstacles = obstacles;
    }
    let delay = Duration::try_from_secs_f64(args.delay)
        .with_context(|| format!("invalid delay {}", args.delay))?;

    // fail on an unknown policy before touching the environment
    let mut policy = policy_by_name(&args.policy)?;
    let mut renderer: Box<dyn Renderer> = match args.render {
        RenderMode::Ascii => Box::new(AsciiRenderer::new(
            std::io::stdout(),
            config.area,
            args.cell_size,
        )),
        RenderMode::Off => Box::new(NoopRenderer),
    };
    let mut sim = Simulator::new(config)?;
    info!(policy = %args.policy, runs = args.runs, "starting");

    for run in 0..args.runs {
        let new_environment = run == 0 || !args.keep_environment;
        let report = sim.simulate(&mut policy, renderer.as_mut(), delay, new_environment)?;
        match report.outcome {
            Outcome::Succeeded { steps_forward } => {
                println!("You reached the target in {} steps", steps_forward);
            }
            Outcome::Failed(failure) => {
                println!("Failed to reach the target: turtle {}", failure);
            }
            Outcome::Stalled => {
                println!("Failed to reach the target: turtle stopped moving");
            }
        }
        renderer.finish().context("failed to render run")?;
    }

    Ok(())
}
