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

//! Evaluate a turtle escape policy.
//!
//! Runs the policy once in each of many seeded environments and reports how often it reaches
//! the target and how many steps it needs on average.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turtle_escape::{Failure, NoopRenderer, Outcome, Simulator, SimulatorConfig};
use turtle_policies::policy_by_name;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Number of environments to run.
    #[arg(long, default_value_t = 100)]
    runs: u64,

    /// Run `i` uses seed `seed + i`.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Policy to evaluate: idle, straight or seeker.
    #[arg(long, default_value = "seeker")]
    policy: String,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
struct Summary {
    runs: u64,
    successes: u64,
    collisions: u64,
    out_of_bounds: u64,
    stalls: u64,
    success_rate: f64,
    mean_steps: Option<f64>,
}

impl Summary {
    fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut summary = Summary {
            runs: outcomes.len() as u64,
            ..Summary::default()
        };
        let mut total_steps: u64 = 0;
        for outcome in outcomes {
            match outcome {
                Outcome::Succeeded { steps_forward } => {
                    summary.successes += 1;
                    total_steps += u64::from(*steps_forward);
                }
                Outcome::Failed(Failure::Collision) => summary.collisions += 1,
                Outcome::Failed(Failure::OutOfBounds) => summary.out_of_bounds += 1,
                Outcome::Stalled => summary.stalls += 1,
            }
        }
        if summary.runs > 0 {
            summary.success_rate = summary.successes as f64 / summary.runs as f64;
        }
        if summary.successes > 0 {
            summary.mean_steps = Some(total_steps as f64 / summary.successes as f64);
        }
        summary
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "runs:          {}", self.runs)?;
        writeln!(f, "successes:     {}", self.successes)?;
        writeln!(f, "collisions:    {}", self.collisions)?;
        writeln!(f, "out of bounds: {}", self.out_of_bounds)?;
        writeln!(f, "stalls:        {}", self.stalls)?;
        writeln!(f, "success rate:  {:.3}", self.success_rate)?;
        match self.mean_steps {
            Some(mean) => write!(f, "mean steps:    {:.1}", mean),
            None => write!(f, "mean steps:    n/a"),
        }
    }
}

fn run_once(policy: &str, seed: u64) -> Result<Outcome> {
    let mut policy = policy_by_name(policy)?;
    let mut sim = Simulator::new(SimulatorConfig::default().with_seed(seed))?;
    let report = sim.simulate(&mut policy, &mut NoopRenderer, Duration::ZERO, true)?;
    Ok(report.outcome)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .init();

    let args = CliArgs::parse();
    policy_by_name(&args.policy)?;
    info!(policy = %args.policy, runs = args.runs, "evaluating");

    let outcomes = (0..args.runs)
        .into_par_iter()
        .map(|i| run_once(&args.policy, args.seed.wrapping_add(i)))
        .collect::<Result<Vec<_>>>()?;
    let summary = Summary::from_outcomes(&outcomes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}
