//! Per-path state tracking during a simulation

/// State of one simulated path at a point in time
#[derive(Debug, Clone)]
pub struct PathState {
    /// Months elapsed since the start (0 = initial corpus)
    pub month: usize,

    /// Portfolio balance at the end of `month`
    pub balance: f64,
}

impl PathState {
    /// Initialize state at month 0
    pub fn new(start_corpus: f64) -> Self {
        Self {
            month: 0,
            balance: start_corpus,
        }
    }

    /// Grow the balance by one month's return factor, then add the contribution
    pub fn advance_month(&mut self, growth_factor: f64, contribution: f64) {
        self.month += 1;
        self.balance = self.balance * growth_factor + contribution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_applies_before_contribution() {
        let mut state = PathState::new(1000.0);
        state.advance_month(1.01, 100.0);

        assert_eq!(state.month, 1);
        // Contribution is not grown in the month it is added
        assert!((state.balance - 1110.0).abs() < 1e-10);
    }
}
