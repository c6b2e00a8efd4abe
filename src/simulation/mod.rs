//! Monte Carlo goal projections

mod config;
mod engine;
mod percentile;
mod random;
mod results;
mod state;

pub use config::{
    clamp_path_count, ProjectionConfig, DEFAULT_GOAL_PATH_COUNT, MAX_HORIZON_MONTHS, MAX_PATH_COUNT,
    MIN_PATH_COUNT,
};
pub use engine::{estimate_goal_success_probability, simulate_paths, MonteCarloEngine, REPORTED_PERCENTILES};
pub use percentile::{percentile, percentiles};
pub use random::{entropy_seed, standard_normal, RandSource, UniformSource};
pub use results::{ProjectionPoint, ProjectionResult, ProjectionSummary};
pub use state::PathState;
