//! Typed portfolio inputs: dated cash flows, stored cash-flow records and holdings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column names used by the holdings spreadsheet
pub const CURRENT_VALUE_KEY: &str = "Current Value";
pub const BUY_VALUE_KEY: &str = "Buy Value";
pub const PROFIT_LOSS_KEY: &str = "Profit/Loss";
pub const QUANTITY_KEY: &str = "Quantity";
const SYMBOL_KEYS: [&str; 3] = ["Symbol", "Name", "Stock"];

/// A single dated cash flow
///
/// Sign convention: negative = money invested, positive = money received
/// (withdrawals, dividends or the terminal valuation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    /// Money put into the portfolio (recorded as a negative flow)
    pub fn investment(date: NaiveDate, amount: f64) -> Self {
        Self::new(date, -amount.abs())
    }

    /// Money taken out of the portfolio (recorded as a positive flow)
    pub fn withdrawal(date: NaiveDate, amount: f64) -> Self {
        Self::new(date, amount.abs())
    }
}

/// A cash-flow record as kept per portfolio in the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRecord {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

impl CashFlowRecord {
    pub fn to_cash_flow(&self) -> CashFlow {
        CashFlow::new(self.date, self.amount)
    }
}

impl From<&CashFlowRecord> for CashFlow {
    fn from(record: &CashFlowRecord) -> Self {
        record.to_cash_flow()
    }
}

/// One holding row from the spreadsheet-backed holdings source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: Option<String>,
    pub quantity: Option<f64>,
    pub buy_value: Option<f64>,
    pub current_value: Option<f64>,
    pub profit_loss: Option<f64>,
}

impl Holding {
    /// Map a loosely-typed spreadsheet row into a holding.
    ///
    /// Every field is an explicit named lookup; missing or unparseable values
    /// become `None`. Profit/loss falls back to `current - buy` when the row
    /// omits it.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let symbol = SYMBOL_KEYS
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_str))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let current_value = lookup_number(record, CURRENT_VALUE_KEY);
        let buy_value = lookup_number(record, BUY_VALUE_KEY);
        let profit_loss = lookup_number(record, PROFIT_LOSS_KEY).or_else(|| match (current_value, buy_value) {
            (Some(current), Some(buy)) => Some(current - buy),
            _ => None,
        });

        Self {
            symbol,
            quantity: lookup_number(record, QUANTITY_KEY),
            buy_value,
            current_value,
            profit_loss,
        }
    }
}

/// Read a numeric field that may arrive as a JSON number or a formatted string
/// such as "1,234.50" or "₹ 1,000".
pub fn lookup_number(record: &Map<String, Value>, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

/// Parse a formatted amount, skipping any currency prefix and digit-group commas
fn parse_amount(raw: &str) -> Option<f64> {
    let start = raw
        .char_indices()
        .find(|&(idx, c)| starts_number(&raw[..idx], c, &raw[idx + c.len_utf8()..]))
        .map(|(idx, _)| idx)?;

    let cleaned: String = raw[start..].chars().filter(|&c| c != ',').collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether `c` opens the numeric part of an amount
fn starts_number(before: &str, c: char, after: &str) -> bool {
    let digit_next = |s: &str| s.starts_with(|n: char| n.is_ascii_digit());
    match c {
        '0'..='9' => true,
        // "Rs.100": a dot glued to a currency word is not a decimal point
        '.' => digit_next(after) && !before.ends_with(|p: char| p.is_alphabetic()),
        '-' => digit_next(after) || (after.starts_with('.') && digit_next(&after[1..])),
        _ => false,
    }
}

/// Aggregate view across all holdings of one portfolio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub holding_count: usize,
    pub total_current_value: f64,
    pub total_buy_value: f64,
    pub total_profit_loss: f64,
}

impl PortfolioSnapshot {
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let mut snapshot = Self {
            holding_count: holdings.len(),
            ..Default::default()
        };

        for holding in holdings {
            snapshot.total_current_value += holding.current_value.unwrap_or(0.0);
            snapshot.total_buy_value += holding.buy_value.unwrap_or(0.0);
            snapshot.total_profit_loss += holding.profit_loss.unwrap_or(0.0);
        }

        snapshot
    }

    /// Profit/loss as a fraction of the amount invested (None when nothing was bought)
    pub fn return_pct(&self) -> Option<f64> {
        if self.total_buy_value.abs() < 1e-10 {
            None
        } else {
            Some(self.total_profit_loss / self.total_buy_value)
        }
    }

    /// Current valuation expressed as the terminal inflow for an XIRR calculation
    pub fn terminal_flow(&self, as_of: NaiveDate) -> CashFlow {
        CashFlow::new(as_of, self.total_current_value)
    }
}
