//! Read-side transformations over the entry list.
//!
//! Everything here is a pure function over `&[LogEntry]`; nothing mutates
//! the store. Rows and cells are plain JSON values, the shape the chart and
//! table surfaces consume.

mod export;

pub use export::{export_range, EmptyRangeWarning, ExportDocument, ExportPage};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{ChecklistEntry, LogEntry};

/// One charting row: the entry's timestamp plus the requested columns.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub values: Map<String, Value>,
}

/// Extracts the requested columns from every entry, in store order.
///
/// An entry that lacks a requested column contributes null for it rather
/// than being skipped, so the series stays index-aligned when quick logs,
/// checklists, and notes share one chart.
pub fn time_series(entries: &[LogEntry], columns: &[&str]) -> Vec<SeriesPoint> {
    entries
        .iter()
        .map(|entry| {
            let mut row = row_for_entry(entry);
            let mut values = Map::new();
            for column in columns {
                let value = row.remove(*column).unwrap_or(Value::Null);
                values.insert((*column).to_string(), value);
            }
            SeriesPoint {
                timestamp: entry.timestamp(),
                values,
            }
        })
        .collect()
}

/// One row per entry, every field it carries, no filtering or derived
/// columns. Used for the full-history review table.
pub fn tabular_summary(entries: &[LogEntry]) -> Vec<Map<String, Value>> {
    entries.iter().map(row_for_entry).collect()
}

/// The newest `n` entries, newest first.
pub fn recent(entries: &[LogEntry], n: usize) -> Vec<LogEntry> {
    entries.iter().rev().take(n).cloned().collect()
}

/// The latest checklist logged on `date`, if any.
pub fn checklist_for_day(entries: &[LogEntry], date: NaiveDate) -> Option<ChecklistEntry> {
    entries.iter().rev().find_map(|entry| match entry {
        LogEntry::Checklist(checklist) if checklist.timestamp.date_naive() == date => {
            Some(checklist.clone())
        }
        _ => None,
    })
}

fn row_for_entry(entry: &LogEntry) -> Map<String, Value> {
    match serde_json::to_value(entry) {
        Ok(Value::Object(row)) => row,
        // Entry types always serialize to objects.
        _ => Map::new(),
    }
}
