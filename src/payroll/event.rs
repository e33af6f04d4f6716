//! Explicit trigger messages between the daily write path and the
//! monthly aggregator. Keeping the trigger as a value (instead of a
//! nested call chain) lets the policy be exercised without a store.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollEvent {
    /// A daily record was created or overwritten; the containing month
    /// must be re-aggregated.
    DailyRecordChanged { employee_id: u64, date: NaiveDate },
}

impl PayrollEvent {
    /// The (employee, year, month) aggregation this event invalidates.
    pub fn aggregation_target(&self) -> (u64, i32, u32) {
        match *self {
            PayrollEvent::DailyRecordChanged { employee_id, date } => {
                (employee_id, date.year(), date.month())
            }
        }
    }
}
