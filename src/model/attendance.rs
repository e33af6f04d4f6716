use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One work session of an employee on a calendar date. Several intervals
/// may exist for the same employee/date; they are summed before payroll
/// treats them as "hours worked that day".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceInterval {
    pub id: u64,
    pub employee_id: u64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

impl AttendanceInterval {
    /// Minutes contributed by this interval. Open sessions (no checkout
    /// recorded yet) contribute zero; a checkout before the check-in
    /// clamps to zero instead of going negative.
    pub fn total_minutes(&self) -> i64 {
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) => (end - start).num_minutes().max(0),
            _ => 0,
        }
    }
}
