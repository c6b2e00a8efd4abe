//! Extended Internal Rate of Return (XIRR) calculation
//!
//! Annualized return of an irregular, dated series of cash flows, found by
//! bisection on the extended net present value.

use crate::portfolio::CashFlow;
use serde::{Deserialize, Serialize};

/// Lowest admissible annual rate (-100% would divide by zero)
pub const LOWER_RATE_BOUND: f64 = -0.9999;

/// Starting upper bound of the bracket (1000% annual)
pub const INITIAL_UPPER_RATE_BOUND: f64 = 10.0;

/// Factor applied to the upper bound each time the root is not bracketed
pub const BRACKET_EXPANSION_FACTOR: f64 = 1.5;

/// Number of times the upper bound may be widened before giving up
pub const MAX_BRACKET_EXPANSIONS: u32 = 20;

/// Bisection iteration budget
pub const MAX_BISECTION_ITERATIONS: u32 = 100;

/// |XNPV| below this counts as converged
pub const NPV_TOLERANCE: f64 = 1e-6;

/// Year length used by the default day count
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Day-count convention used to turn elapsed days into years
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCount {
    /// Elapsed days / 365, ignoring leap years
    #[default]
    Actual365Fixed,
    /// Elapsed days / 365.25
    Actual36525,
}

impl DayCount {
    pub fn days_per_year(self) -> f64 {
        match self {
            DayCount::Actual365Fixed => DAYS_PER_YEAR,
            DayCount::Actual36525 => 365.25,
        }
    }

    /// Year fraction between two dates
    pub fn year_fraction(self, from: chrono::NaiveDate, to: chrono::NaiveDate) -> f64 {
        (to - from).num_days() as f64 / self.days_per_year()
    }
}

/// Optional knobs for [`xirr`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct XirrOptions {
    /// Candidate rate returned as-is when it already zeroes the XNPV
    pub guess: Option<f64>,
    pub day_count: DayCount,
}

impl XirrOptions {
    pub fn with_guess(guess: f64) -> Self {
        Self {
            guess: Some(guess),
            ..Default::default()
        }
    }
}

/// Net present value of dated cash flows at an annual `rate`, discounting each
/// flow by the years elapsed since the earliest flow (days / 365).
pub fn xnpv(rate: f64, cashflows: &[CashFlow]) -> f64 {
    xnpv_with(rate, cashflows, DayCount::default())
}

/// [`xnpv`] with an explicit day-count convention
pub fn xnpv_with(rate: f64, cashflows: &[CashFlow], day_count: DayCount) -> f64 {
    let Some(base_date) = cashflows.iter().map(|cf| cf.date).min() else {
        return 0.0;
    };

    cashflows
        .iter()
        .map(|cf| {
            let years = day_count.year_fraction(base_date, cf.date);
            cf.amount / (1.0 + rate).powf(years)
        })
        .sum()
}

/// Calculate the annualized XIRR of a series of dated cash flows.
///
/// # Arguments
/// * `cashflows` - Dated flows in any order (negative = invested, positive = received)
/// * `options` - Optional guess and day-count convention
///
/// # Returns
/// * `Option<f64>` - Annual rate as a decimal (0.12 for 12%), or None when fewer
///   than two flows are given, all flows share one date, or no root can be bracketed
pub fn xirr(cashflows: &[CashFlow], options: XirrOptions) -> Option<f64> {
    if cashflows.len() < 2 {
        return None;
    }

    let first_date = cashflows[0].date;
    if cashflows.iter().all(|cf| cf.date == first_date) {
        return None;
    }

    let mut flows = cashflows.to_vec();
    flows.sort_by_key(|cf| cf.date);

    let npv = |rate: f64| xnpv_with(rate, &flows, options.day_count);

    if let Some(guess) = options.guess {
        if guess > LOWER_RATE_BOUND && guess.is_finite() && npv(guess).abs() < NPV_TOLERANCE {
            return Some(guess);
        }
    }

    let mut low = LOWER_RATE_BOUND;
    let mut high = INITIAL_UPPER_RATE_BOUND;
    let mut npv_low = npv(low);
    let mut npv_high = npv(high);

    if npv_low.is_nan() {
        log::warn!("XNPV undefined at the lower rate bound; no XIRR");
        return None;
    }

    let mut expansions = 0;
    while npv_low * npv_high > 0.0 || npv_high.is_nan() {
        if expansions == MAX_BRACKET_EXPANSIONS {
            log::debug!("XIRR root not bracketed after {} expansions (high={:.4})", expansions, high);
            return None;
        }
        high *= BRACKET_EXPANSION_FACTOR;
        npv_high = npv(high);
        expansions += 1;
    }

    for iteration in 0..MAX_BISECTION_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(mid);

        if npv_mid.abs() < NPV_TOLERANCE {
            log::debug!("XIRR converged to {:.8} after {} iterations", mid, iteration + 1);
            return Some(mid);
        }

        if npv_low * npv_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    // Interval is far below any meaningful precision by now
    Some((low + high) / 2.0)
}
