//! Load cash-flow records from CSV and holdings from JSON

use super::{CashFlowRecord, Holding};
use crate::error::{AnalyticsError, Result};
use csv::Reader;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row matching the cash-flow export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "Amount")]
    amount: f64,
    #[serde(default, alias = "Note")]
    note: String,
}

impl CsvRow {
    fn to_record(self, row: usize) -> Result<CashFlowRecord> {
        let date = chrono::NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            AnalyticsError::InvalidRecord {
                row,
                reason: format!("bad date {:?}: {}", self.date, e),
            }
        })?;

        if !self.amount.is_finite() {
            return Err(AnalyticsError::InvalidRecord {
                row,
                reason: format!("non-finite amount {}", self.amount),
            });
        }

        Ok(CashFlowRecord {
            date,
            amount: self.amount,
            note: self.note,
        })
    }
}

/// Load all cash-flow records from a CSV file
pub fn load_cash_flows<P: AsRef<Path>>(path: P) -> Result<Vec<CashFlowRecord>> {
    let file = File::open(path)?;
    load_cash_flows_from_reader(file)
}

/// Load cash-flow records from any reader (e.g., string buffer, network stream)
pub fn load_cash_flows_from_reader<R: Read>(reader: R) -> Result<Vec<CashFlowRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Row 1 is the header
        records.push(row.to_record(idx + 2)?);
    }

    log::debug!("Loaded {} cash-flow records", records.len());
    Ok(records)
}

/// Load holdings from a JSON file containing an array of row objects
pub fn load_holdings<P: AsRef<Path>>(path: P) -> Result<Vec<Holding>> {
    let file = File::open(path)?;
    load_holdings_from_reader(BufReader::new(file))
}

/// Load holdings from any reader yielding a JSON array of row objects
pub fn load_holdings_from_reader<R: Read>(reader: R) -> Result<Vec<Holding>> {
    let rows: Vec<Value> = serde_json::from_reader(reader)?;
    let mut holdings = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let record = row.as_object().ok_or_else(|| AnalyticsError::InvalidRecord {
            row: idx,
            reason: "holding row is not an object".to_string(),
        })?;
        holdings.push(Holding::from_record(record));
    }

    log::debug!("Loaded {} holdings", holdings.len());
    Ok(holdings)
}
