use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-day compensation record, keyed by (employee_id, work_date).
/// Always fully recomputed from current attendance, never patched.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DailyPayrollRecord {
    pub id: u64,

    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "2026-03-02")]
    pub work_date: NaiveDate,

    /// Day classification: "regular", "weekend" or "holiday".
    #[schema(example = "regular")]
    pub day_kind: String,

    pub planned_hours: Decimal,
    pub actual_hours: Decimal,
    pub regular_hours: Decimal,
    pub overtime_hours: Decimal,
    pub effective_hourly_rate: Decimal,
    pub base_pay: Decimal,
    pub overtime_pay: Decimal,
    pub gross_pay: Decimal,

    /// Daily tax figures are for per-day reporting only; the monthly
    /// recomputation is authoritative.
    pub income_tax: Decimal,
    pub stamp_tax: Decimal,
    pub employee_social_security: Decimal,
    pub employee_unemployment: Decimal,
    pub employer_social_security: Decimal,
    pub employer_unemployment: Decimal,
    pub total_employee_deductions: Decimal,
    pub net_pay: Decimal,
    pub total_employer_cost: Decimal,

    /// How many attendance intervals fed this record.
    #[schema(example = 2)]
    pub interval_count: u32,

    pub computed_at: NaiveDateTime,
}

/// Per-month compensation record, keyed by (employee_id, month, year).
/// Taxes are recomputed on the monthly gross, not summed from daily
/// records, to match the jurisdiction's monthly filing unit.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct MonthlyPayrollRecord {
    pub id: u64,

    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,

    /// Days with at least one daily record — not a calendar constant.
    #[schema(example = 21)]
    pub working_days: u32,

    /// Calendar working days of the month times planned daily hours.
    pub planned_hours: Decimal,
    pub actual_hours: Decimal,
    pub overtime_hours: Decimal,
    pub base_pay: Decimal,
    pub overtime_pay: Decimal,
    pub gross_salary: Decimal,

    pub income_tax: Decimal,
    pub stamp_tax: Decimal,
    pub employee_social_security: Decimal,
    pub employee_unemployment: Decimal,
    pub employer_social_security: Decimal,
    pub employer_unemployment: Decimal,
    pub total_employee_deductions: Decimal,
    pub net_salary: Decimal,
    pub total_employer_cost: Decimal,

    pub computed_at: NaiveDateTime,
}
