//! Output structures for Monte Carlo projections

use serde::{Deserialize, Serialize};

/// Percentile band of simulated wealth at one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month_index: usize,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    /// Compounded inflation multiplier since month 0
    pub cumulative_inflation_factor: f64,
}

impl ProjectionPoint {
    /// Median wealth in month-0 currency units
    pub fn real_p50(&self) -> f64 {
        self.p50 / self.cumulative_inflation_factor
    }
}

/// Complete projection result, one point per month from 0 to the horizon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point for the next month
    pub fn add_point(&mut self, point: ProjectionPoint) {
        self.points.push(point);
    }

    /// Last simulated month (0 when empty)
    pub fn horizon_months(&self) -> usize {
        self.points.last().map(|p| p.month_index).unwrap_or(0)
    }

    pub fn final_point(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }

    /// Median path deflated to month-0 currency
    pub fn real_median(&self) -> Vec<f64> {
        self.points.iter().map(ProjectionPoint::real_p50).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let final_point = self.points.last();

        ProjectionSummary {
            horizon_months: self.horizon_months(),
            final_p10: final_point.map(|p| p.p10).unwrap_or(0.0),
            final_p50: final_point.map(|p| p.p50).unwrap_or(0.0),
            final_p90: final_point.map(|p| p.p90).unwrap_or(0.0),
            final_real_p50: final_point.map(|p| p.real_p50()).unwrap_or(0.0),
            final_inflation_factor: final_point.map(|p| p.cumulative_inflation_factor).unwrap_or(1.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub horizon_months: usize,
    pub final_p10: f64,
    pub final_p50: f64,
    pub final_p90: f64,
    pub final_real_p50: f64,
    pub final_inflation_factor: f64,
}
