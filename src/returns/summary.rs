//! Portfolio-level return figures built from recorded cash flows and a valuation

use super::xirr::{xirr, XirrOptions};
use crate::portfolio::{CashFlow, CashFlowRecord, PortfolioSnapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Return summary for one portfolio as of a valuation date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReturns {
    pub as_of: NaiveDate,
    /// Sum of all money put in (positive number)
    pub total_invested: f64,
    /// Sum of all money taken out before the valuation date
    pub total_withdrawn: f64,
    pub current_value: f64,
    /// current + withdrawn - invested
    pub absolute_gain: f64,
    /// absolute gain / invested
    pub simple_return: Option<f64>,
    /// Annualized money-weighted return
    pub xirr: Option<f64>,
}

impl PortfolioReturns {
    /// Compute returns from typed cash flows and the current valuation.
    ///
    /// The valuation is appended as a terminal inflow dated `as_of`.
    pub fn compute(flows: &[CashFlow], current_value: f64, as_of: NaiveDate, options: XirrOptions) -> Self {
        let total_invested: f64 = flows.iter().filter(|cf| cf.amount < 0.0).map(|cf| -cf.amount).sum();
        let total_withdrawn: f64 = flows.iter().filter(|cf| cf.amount > 0.0).map(|cf| cf.amount).sum();
        let absolute_gain = current_value + total_withdrawn - total_invested;

        let simple_return = if total_invested > 0.0 {
            Some(absolute_gain / total_invested)
        } else {
            None
        };

        let mut all_flows = flows.to_vec();
        if current_value != 0.0 {
            all_flows.push(CashFlow::new(as_of, current_value));
        }

        Self {
            as_of,
            total_invested,
            total_withdrawn,
            current_value,
            absolute_gain,
            simple_return,
            xirr: xirr(&all_flows, options),
        }
    }

    /// Compute returns from stored records and a holdings snapshot
    pub fn from_records(
        records: &[CashFlowRecord],
        snapshot: &PortfolioSnapshot,
        as_of: NaiveDate,
        options: XirrOptions,
    ) -> Self {
        let flows: Vec<CashFlow> = records.iter().map(CashFlow::from).collect();
        Self::compute(&flows, snapshot.total_current_value, as_of, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_returns_with_terminal_value() {
        let flows = vec![
            CashFlow::investment(date(2021, 1, 1), 10_000.0),
            CashFlow::investment(date(2021, 7, 1), 5_000.0),
            CashFlow::withdrawal(date(2022, 1, 1), 1_000.0),
        ];

        let returns = PortfolioReturns::compute(&flows, 16_500.0, date(2023, 1, 1), XirrOptions::default());

        assert_abs_diff_eq!(returns.total_invested, 15_000.0);
        assert_abs_diff_eq!(returns.total_withdrawn, 1_000.0);
        assert_abs_diff_eq!(returns.absolute_gain, 2_500.0);
        assert_abs_diff_eq!(returns.simple_return.unwrap(), 2_500.0 / 15_000.0, epsilon = 1e-12);

        let irr = returns.xirr.unwrap();
        assert!(irr > 0.0 && irr < returns.simple_return.unwrap());
    }

    #[test]
    fn test_no_investment_has_no_returns() {
        let returns = PortfolioReturns::compute(&[], 0.0, date(2023, 1, 1), XirrOptions::default());
        assert!(returns.simple_return.is_none());
        assert!(returns.xirr.is_none());
    }

    #[test]
    fn test_from_records_uses_snapshot_value() {
        let records = vec![CashFlowRecord {
            date: date(2022, 1, 1),
            amount: -1_000.0,
            note: "lump sum".to_string(),
        }];
        let snapshot = PortfolioSnapshot {
            holding_count: 1,
            total_current_value: 1_100.0,
            total_buy_value: 1_000.0,
            total_profit_loss: 100.0,
        };

        let returns = PortfolioReturns::from_records(&records, &snapshot, date(2023, 1, 1), XirrOptions::default());
        assert_abs_diff_eq!(returns.xirr.unwrap(), 0.10, epsilon = 1e-4);
    }
}
