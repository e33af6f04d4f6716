use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pay profile of an employee. Owned by HR administration; the payroll
/// engine only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_code": "EMP-001",
        "first_name": "John",
        "last_name": "Doe",
        "email": "john.doe@company.com",
        "daily_working_hours": "8",
        "hourly_rate": "50",
        "monthly_salary": null,
        "overtime_rate": "1.5",
        "weekend_rate": "1.25",
        "holiday_rate": "2.0",
        "status": "active"
    })
)]
pub struct EmployeeProfile {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    /// Planned working hours per day. Non-positive values fall back to the
    /// configured default.
    pub daily_working_hours: Decimal,

    /// Explicit hourly rate. Takes precedence over `monthly_salary`.
    pub hourly_rate: Option<Decimal>,

    /// Monthly salary, converted to an hourly rate over the standard
    /// working month when no explicit hourly rate is set.
    pub monthly_salary: Option<Decimal>,

    /// Overtime multiplier; engine default applies when absent.
    pub overtime_rate: Option<Decimal>,

    /// Weekend multiplier; engine default applies when absent.
    pub weekend_rate: Option<Decimal>,

    /// Holiday multiplier; engine default applies when absent.
    pub holiday_rate: Option<Decimal>,

    #[schema(example = "active")]
    pub status: String,
}
