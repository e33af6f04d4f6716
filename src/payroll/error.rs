use thiserror::Error;

/// Failure taxonomy of the payroll engine.
///
/// None of these may abort the attendance close-out that triggered a
/// recalculation: close-out paths log them and carry on. They are fatal
/// only to the single calculation they occurred in.
#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("employee {employee_id} not found")]
    EmployeeNotFound { employee_id: u64 },

    /// A pay profile whose rate fields resolve to a non-positive rate.
    /// The engine falls back to the configured default rate instead of
    /// failing; this variant exists so log output stays classifiable.
    #[error("employee {employee_id} pay profile resolves to a non-positive rate")]
    InvalidRateConfiguration { employee_id: u64 },

    #[error("payroll persistence unavailable: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Summed daily figures diverge from the recomputed monthly totals.
    /// Logged for audit; the aggregation proceeds with recomputed values.
    #[error("aggregated daily totals diverge for employee {employee_id} in {month}/{year}")]
    AggregationInconsistency {
        employee_id: u64,
        month: u32,
        year: i32,
    },
}
