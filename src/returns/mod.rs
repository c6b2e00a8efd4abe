//! Money-weighted return calculations

mod summary;
pub mod xirr;

pub use summary::PortfolioReturns;
pub use xirr::{xirr, xnpv, xnpv_with, DayCount, XirrOptions};
