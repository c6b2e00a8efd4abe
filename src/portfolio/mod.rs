//! Portfolio data structures and loading of cash flows and holdings

mod data;
pub mod loader;

pub use data::{lookup_number, CashFlow, CashFlowRecord, Holding, PortfolioSnapshot};
pub use loader::{load_cash_flows, load_cash_flows_from_reader, load_holdings, load_holdings_from_reader};
