use crate::api::attendance::CloseSessionRequest;
use crate::api::payroll::{DateRangeQuery, SyncMonthlyRequest};
use crate::model::attendance::AttendanceInterval;
use crate::model::employee::EmployeeProfile;
use crate::model::payroll::{DailyPayrollRecord, MonthlyPayrollRecord};
use crate::payroll::service::SyncSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Engine API",
        version = "1.0.0",
        description = r#"
## Payroll Calculation & Synchronization Engine

This API turns raw attendance sessions into per-day and per-month
compensation figures, applying jurisdiction-specific tax and
contribution rules.

### 🔹 Key Features
- **Attendance Close-Out**
  - Check-in / check-out tracking and an external session-close hook
  - Every close-out recomputes the affected daily and monthly payroll
- **Daily Payroll**
  - Overtime, weekend and holiday rate multipliers
  - Full tax breakdown per day (reporting granularity)
- **Monthly Payroll**
  - Aggregated from daily records, taxes recomputed on monthly gross
  - Bulk administrative sync with per-employee error accumulation

### 📦 Response Format
- JSON-based RESTful responses
- Monetary amounts are fixed-point decimals serialized as strings

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::close_session,

        crate::api::payroll::get_daily_payroll,
        crate::api::payroll::get_daily_payroll_range,
        crate::api::payroll::recalculate_daily,
        crate::api::payroll::get_monthly_payroll,
        crate::api::payroll::sync_monthly
    ),
    components(
        schemas(
            EmployeeProfile,
            AttendanceInterval,
            DailyPayrollRecord,
            MonthlyPayrollRecord,
            CloseSessionRequest,
            DateRangeQuery,
            SyncMonthlyRequest,
            SyncSummary
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance close-out APIs"),
        (name = "Payroll", description = "Payroll calculation and sync APIs"),
    )
)]
pub struct ApiDoc;
