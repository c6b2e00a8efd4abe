//! Monte Carlo engine for monthly goal projections
//!
//! Each path compounds a geometric-Brownian-motion style monthly return and
//! then adds the fixed contribution. Percentile bands are taken across paths
//! for every month.

use super::config::{clamp_path_count, ProjectionConfig, DEFAULT_GOAL_PATH_COUNT};
use super::percentile::percentiles;
use super::random::{standard_normal, RandSource, UniformSource};
use super::results::{ProjectionPoint, ProjectionResult};
use super::state::PathState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Percentiles reported for every month (p10, p50, p90)
pub const REPORTED_PERCENTILES: [f64; 3] = [0.10, 0.50, 0.90];

/// Main simulation engine
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    config: ProjectionConfig,
}

impl MonteCarloEngine {
    /// Create an engine, clamping the config into its valid range
    pub fn new(config: ProjectionConfig) -> Self {
        if config.needs_clamping() {
            log::warn!(
                "Clamping projection config (paths={}, horizon_years={}, volatility={}, corpus={})",
                config.path_count,
                config.horizon_years,
                config.annual_return_volatility,
                config.start_corpus
            );
        }

        Self {
            config: config.clamped(),
        }
    }

    /// The clamped config actually simulated
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn horizon_months(&self) -> usize {
        self.config.horizon_months()
    }

    /// Inflation multiplier from month 0 to `month`
    pub fn cumulative_inflation(&self, month: usize) -> f64 {
        (1.0 + self.config.monthly_inflation()).powi(month as i32)
    }

    /// Deterministic part of the monthly log-return
    fn monthly_drift(&self) -> f64 {
        let sigma = self.config.monthly_volatility();
        (self.config.annual_return_mean - 0.5 * sigma * sigma) / 12.0
    }

    /// Simulate one path, returning the balance for months 0..=horizon
    fn simulate_path<S: UniformSource + ?Sized>(&self, source: &mut S) -> Vec<f64> {
        let months = self.horizon_months();
        let sigma = self.config.monthly_volatility();
        let drift = self.monthly_drift();

        let mut state = PathState::new(self.config.start_corpus);
        let mut balances = Vec::with_capacity(months + 1);
        balances.push(state.balance);

        while state.month < months {
            let z = standard_normal(source);
            state.advance_month((drift + sigma * z).exp(), self.config.monthly_contribution);
            balances.push(state.balance);
        }

        balances
    }

    /// Run all paths sequentially from the given source
    pub fn simulate_paths<S: UniformSource + ?Sized>(&self, source: &mut S) -> ProjectionResult {
        log::debug!(
            "Simulating {} paths over {} months",
            self.config.path_count,
            self.horizon_months()
        );

        let paths: Vec<Vec<f64>> = (0..self.config.path_count)
            .map(|_| self.simulate_path(source))
            .collect();

        self.summarize(&paths)
    }

    /// Run all paths across the rayon pool.
    ///
    /// Per-path seeds are drawn up front from `seed`, so the result depends only
    /// on the seed and not on thread scheduling.
    pub fn simulate_paths_parallel(&self, seed: u64) -> ProjectionResult {
        log::debug!(
            "Simulating {} paths over {} months in parallel (seed={})",
            self.config.path_count,
            self.horizon_months(),
            seed
        );

        let seeds = path_seeds(seed, self.config.path_count);
        let paths: Vec<Vec<f64>> = seeds
            .par_iter()
            .map(|&path_seed| self.simulate_path(&mut RandSource::seeded(path_seed)))
            .collect();

        self.summarize(&paths)
    }

    /// Reduce per-path balances to per-month percentile bands
    fn summarize(&self, paths: &[Vec<f64>]) -> ProjectionResult {
        let mut result = ProjectionResult::new();
        let mut column = Vec::with_capacity(paths.len());

        for month in 0..=self.horizon_months() {
            column.clear();
            column.extend(paths.iter().map(|path| path[month]));

            let bands = percentiles(&mut column, &REPORTED_PERCENTILES);
            result.add_point(ProjectionPoint {
                month_index: month,
                p10: bands[0],
                p50: bands[1],
                p90: bands[2],
                cumulative_inflation_factor: self.cumulative_inflation(month),
            });
        }

        result
    }

    /// Ending balances of an independent batch of `path_count` paths (clamped)
    pub fn ending_balances<S: UniformSource + ?Sized>(&self, path_count: usize, source: &mut S) -> Vec<f64> {
        (0..clamp_path_count(path_count))
            .map(|_| {
                let path = self.simulate_path(source);
                path[path.len() - 1]
            })
            .collect()
    }

    /// Probability that the ending balance meets a target stated in today's money.
    ///
    /// The target is inflated to the horizon, then checked against a fresh batch
    /// of `goal_path_count` paths.
    pub fn estimate_goal_success_probability<S: UniformSource + ?Sized>(
        &self,
        target_amount_today: f64,
        goal_path_count: usize,
        source: &mut S,
    ) -> f64 {
        let target = target_amount_today * self.cumulative_inflation(self.horizon_months());
        let endings = self.ending_balances(goal_path_count, source);
        let hits = endings.iter().filter(|&&balance| balance >= target).count();

        let probability = hits as f64 / endings.len() as f64;
        log::debug!(
            "Goal {:.2} (inflated {:.2}) met on {}/{} paths",
            target_amount_today,
            target,
            hits,
            endings.len()
        );
        probability
    }
}

/// Derive one seed per path from a master seed
fn path_seeds(seed: u64, count: usize) -> Vec<u64> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..count).map(|_| master.gen()).collect()
}

/// Simulate a projection with an entropy-seeded source
pub fn simulate_paths(config: &ProjectionConfig) -> ProjectionResult {
    MonteCarloEngine::new(config.clone()).simulate_paths(&mut RandSource::from_entropy())
}

/// Goal-success probability with an entropy-seeded source and the default batch size
pub fn estimate_goal_success_probability(config: &ProjectionConfig, target_amount_today: f64) -> f64 {
    MonteCarloEngine::new(config.clone()).estimate_goal_success_probability(
        target_amount_today,
        DEFAULT_GOAL_PATH_COUNT,
        &mut RandSource::from_entropy(),
    )
}
