//! Portfolio Analytics - numerical core for an investment-portfolio dashboard
//!
//! This library provides:
//! - XIRR (annualized internal rate of return) over irregular dated cash flows
//! - Monte Carlo goal projections with percentile wealth bands
//! - Goal-success probability estimates in today's currency
//! - Adapters mapping holdings rows and cash-flow records into typed inputs
//! - Batch scenario runs (contribution sweeps, assumption comparisons)

pub mod error;
pub mod portfolio;
pub mod returns;
pub mod scenario;
pub mod settings;
pub mod simulation;

// Re-export commonly used types
pub use error::{AnalyticsError, Result};
pub use portfolio::{CashFlow, CashFlowRecord, Holding, PortfolioSnapshot};
pub use returns::{xirr, xnpv, DayCount, PortfolioReturns, XirrOptions};
pub use scenario::ScenarioRunner;
pub use settings::Settings;
pub use simulation::{
    estimate_goal_success_probability, simulate_paths, MonteCarloEngine, ProjectionConfig,
    ProjectionPoint, ProjectionResult,
};
