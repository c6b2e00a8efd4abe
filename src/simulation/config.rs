//! Input configuration for a Monte Carlo projection run

use serde::{Deserialize, Serialize};

/// Fewest paths a projection will run
pub const MIN_PATH_COUNT: usize = 100;

/// Most paths a projection will run
pub const MAX_PATH_COUNT: usize = 10_000;

/// Longest horizon a projection will simulate (100 years)
pub const MAX_HORIZON_MONTHS: usize = 1_200;

/// Default path count for the separate goal-success batch
pub const DEFAULT_GOAL_PATH_COUNT: usize = 2_000;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    /// Corpus at month 0
    pub start_corpus: f64,

    /// Amount added at the end of every month
    pub monthly_contribution: f64,

    /// Projection horizon in years
    pub horizon_years: f64,

    /// Expected annual return (drift), e.g. 0.12 for 12%
    pub annual_return_mean: f64,

    /// Annual volatility of returns
    pub annual_return_volatility: f64,

    /// Expected annual inflation
    pub annual_inflation: f64,

    /// Number of simulated paths
    pub path_count: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            start_corpus: 0.0,
            monthly_contribution: 0.0,
            horizon_years: 10.0,
            annual_return_mean: 0.10,
            annual_return_volatility: 0.15,
            annual_inflation: 0.06,
            path_count: 1_000,
        }
    }
}

impl ProjectionConfig {
    /// Number of simulated months, within `[1, MAX_HORIZON_MONTHS]`
    ///
    /// NaN horizons count as one month.
    pub fn horizon_months(&self) -> usize {
        let months = self.raw_horizon_months();
        if months >= MAX_HORIZON_MONTHS as f64 {
            MAX_HORIZON_MONTHS
        } else if months >= 1.0 {
            months as usize
        } else {
            1
        }
    }

    fn raw_horizon_months(&self) -> f64 {
        (self.horizon_years * 12.0).round()
    }

    fn horizon_in_range(&self) -> bool {
        (1.0..=MAX_HORIZON_MONTHS as f64).contains(&self.raw_horizon_months())
    }

    /// Copy of this config with out-of-range values pulled back into range
    pub fn clamped(&self) -> Self {
        let horizon_years = if self.horizon_in_range() {
            self.horizon_years
        } else {
            self.horizon_months() as f64 / 12.0
        };

        Self {
            start_corpus: self.start_corpus.max(0.0),
            horizon_years,
            annual_return_volatility: self.annual_return_volatility.max(0.0),
            path_count: clamp_path_count(self.path_count),
            ..self.clone()
        }
    }

    /// Whether [`clamped`](Self::clamped) would change anything
    pub fn needs_clamping(&self) -> bool {
        self.start_corpus < 0.0
            || self.annual_return_volatility < 0.0
            || self.path_count != clamp_path_count(self.path_count)
            || !self.horizon_in_range()
    }

    /// Monthly volatility under square-root-of-time scaling
    pub fn monthly_volatility(&self) -> f64 {
        self.annual_return_volatility * (1.0_f64 / 12.0).sqrt()
    }

    /// Monthly inflation rate compounding to the annual rate
    pub fn monthly_inflation(&self) -> f64 {
        (1.0 + self.annual_inflation).powf(1.0 / 12.0) - 1.0
    }
}

/// Clamp a requested path count into `[MIN_PATH_COUNT, MAX_PATH_COUNT]`
pub fn clamp_path_count(paths: usize) -> usize {
    paths.clamp(MIN_PATH_COUNT, MAX_PATH_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_horizon_months() {
        let mut config = ProjectionConfig::default();
        assert_eq!(config.horizon_months(), 120);

        config.horizon_years = 2.54;
        assert_eq!(config.horizon_months(), 30);

        config.horizon_years = 0.0;
        assert_eq!(config.horizon_months(), 1);

        config.horizon_years = -3.0;
        assert_eq!(config.horizon_months(), 1);
    }

    #[test]
    fn test_horizon_is_capped() {
        for years in [1e15, f64::MAX, f64::INFINITY] {
            let config = ProjectionConfig {
                horizon_years: years,
                ..Default::default()
            };
            assert_eq!(config.horizon_months(), MAX_HORIZON_MONTHS);
            assert!(config.needs_clamping());

            let clamped = config.clamped();
            assert_eq!(clamped.horizon_months(), MAX_HORIZON_MONTHS);
            assert!(!clamped.needs_clamping());
        }

        let exact = ProjectionConfig {
            horizon_years: 100.0,
            ..Default::default()
        };
        assert_eq!(exact.horizon_months(), MAX_HORIZON_MONTHS);
        assert!(!exact.needs_clamping());
    }

    #[test]
    fn test_nan_horizon_is_flagged() {
        let config = ProjectionConfig {
            horizon_years: f64::NAN,
            ..Default::default()
        };
        assert_eq!(config.horizon_months(), 1);
        assert!(config.needs_clamping());

        let clamped = config.clamped();
        assert_eq!(clamped.horizon_months(), 1);
        assert!(!clamped.needs_clamping());
    }

    #[test]
    fn test_clamping() {
        let config = ProjectionConfig {
            start_corpus: -10.0,
            annual_return_volatility: -0.2,
            path_count: 5,
            ..Default::default()
        };
        assert!(config.needs_clamping());

        let clamped = config.clamped();
        assert_eq!(clamped.start_corpus, 0.0);
        assert_eq!(clamped.annual_return_volatility, 0.0);
        assert_eq!(clamped.path_count, MIN_PATH_COUNT);
        assert!(!clamped.needs_clamping());

        assert_eq!(clamp_path_count(1_000_000), MAX_PATH_COUNT);
        assert!(!ProjectionConfig::default().needs_clamping());
    }

    #[test]
    fn test_monthly_conversions() {
        let config = ProjectionConfig {
            annual_return_volatility: 0.12,
            annual_inflation: 0.06,
            ..Default::default()
        };

        assert_abs_diff_eq!(config.monthly_volatility(), 0.12 / 12.0_f64.sqrt(), epsilon = 1e-15);
        assert_abs_diff_eq!((1.0 + config.monthly_inflation()).powi(12), 1.06, epsilon = 1e-12);
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{"startCorpus": 500000, "monthlyContribution": 20000, "horizonYears": 15}"#;
        let config: ProjectionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.start_corpus, 500_000.0);
        assert_eq!(config.monthly_contribution, 20_000.0);
        assert_eq!(config.horizon_months(), 180);
        assert_eq!(config.path_count, ProjectionConfig::default().path_count);
    }
}
