//! Persistence for the payroll engine.
//!
//! All mutation is full-record upsert keyed by natural identity
//! ((employee, date) daily, (employee, month, year) monthly), which
//! keeps every write idempotent and retry-safe.

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, MySql};

use crate::model::attendance::AttendanceInterval;
use crate::model::employee::EmployeeProfile;
use crate::model::payroll::{DailyPayrollRecord, MonthlyPayrollRecord};
use crate::payroll::daily::DailyPayroll;
use crate::payroll::monthly::MonthlyPayroll;

const PROFILE_COLUMNS: &str = r#"
    id, employee_code, first_name, last_name, email,
    daily_working_hours, hourly_rate, monthly_salary,
    overtime_rate, weekend_rate, holiday_rate, status
"#;

const DAILY_COLUMNS: &str = r#"
    id, employee_id, work_date, day_kind,
    planned_hours, actual_hours, regular_hours, overtime_hours,
    effective_hourly_rate, base_pay, overtime_pay, gross_pay,
    income_tax, stamp_tax, employee_social_security, employee_unemployment,
    employer_social_security, employer_unemployment,
    total_employee_deductions, net_pay, total_employer_cost,
    interval_count, computed_at
"#;

const MONTHLY_COLUMNS: &str = r#"
    id, employee_id, month, year, working_days,
    planned_hours, actual_hours, overtime_hours,
    base_pay, overtime_pay, gross_salary,
    income_tax, stamp_tax, employee_social_security, employee_unemployment,
    employer_social_security, employer_unemployment,
    total_employee_deductions, net_salary, total_employer_cost,
    computed_at
"#;

pub async fn fetch_profile<'e, E>(
    executor: E,
    employee_id: u64,
) -> Result<Option<EmployeeProfile>, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM employees WHERE id = ?");
    sqlx::query_as::<_, EmployeeProfile>(&sql)
        .bind(employee_id)
        .fetch_optional(executor)
        .await
}

pub async fn active_employee_ids<'e, E>(executor: E) -> Result<Vec<u64>, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let rows = sqlx::query_as::<_, (u64,)>(
        "SELECT id FROM employees WHERE status = 'active' ORDER BY id",
    )
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Loads one day's attendance rows under a row lock, so concurrent
/// recalculations for the same employee/date serialize instead of
/// interleaving partial writes.
pub async fn fetch_intervals_for_update<'e, E>(
    executor: E,
    employee_id: u64,
    date: NaiveDate,
) -> Result<Vec<AttendanceInterval>, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    sqlx::query_as::<_, AttendanceInterval>(
        r#"
        SELECT id, employee_id, date, check_in, check_out
        FROM attendance
        WHERE employee_id = ? AND date = ?
        ORDER BY id
        FOR UPDATE
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .fetch_all(executor)
    .await
}

/// Records an externally measured, already-closed work session as a
/// midnight-anchored interval. Sessions longer than a day clamp to 23:59.
pub async fn insert_closed_interval<'e, E>(
    executor: E,
    employee_id: u64,
    date: NaiveDate,
    total_minutes: u32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let minutes = total_minutes.min(1439);
    let check_in = NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default();
    let check_out =
        NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0).unwrap_or_default();

    sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, check_in, check_out)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(check_in)
    .bind(check_out)
    .execute(executor)
    .await?;
    Ok(())
}

/// Full-overwrite upsert of a daily record.
pub async fn upsert_daily<'e, E>(executor: E, record: &DailyPayroll) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    sqlx::query(
        r#"
        INSERT INTO daily_payroll
        (employee_id, work_date, day_kind,
         planned_hours, actual_hours, regular_hours, overtime_hours,
         effective_hourly_rate, base_pay, overtime_pay, gross_pay,
         income_tax, stamp_tax, employee_social_security, employee_unemployment,
         employer_social_security, employer_unemployment,
         total_employee_deductions, net_pay, total_employer_cost,
         interval_count, computed_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NOW())
        ON DUPLICATE KEY UPDATE
         day_kind = VALUES(day_kind),
         planned_hours = VALUES(planned_hours),
         actual_hours = VALUES(actual_hours),
         regular_hours = VALUES(regular_hours),
         overtime_hours = VALUES(overtime_hours),
         effective_hourly_rate = VALUES(effective_hourly_rate),
         base_pay = VALUES(base_pay),
         overtime_pay = VALUES(overtime_pay),
         gross_pay = VALUES(gross_pay),
         income_tax = VALUES(income_tax),
         stamp_tax = VALUES(stamp_tax),
         employee_social_security = VALUES(employee_social_security),
         employee_unemployment = VALUES(employee_unemployment),
         employer_social_security = VALUES(employer_social_security),
         employer_unemployment = VALUES(employer_unemployment),
         total_employee_deductions = VALUES(total_employee_deductions),
         net_pay = VALUES(net_pay),
         total_employer_cost = VALUES(total_employer_cost),
         interval_count = VALUES(interval_count),
         computed_at = NOW()
        "#,
    )
    .bind(record.employee_id)
    .bind(record.work_date)
    .bind(record.day_kind.to_string())
    .bind(record.planned_hours)
    .bind(record.actual_hours)
    .bind(record.regular_hours)
    .bind(record.overtime_hours)
    .bind(record.effective_hourly_rate)
    .bind(record.base_pay)
    .bind(record.overtime_pay)
    .bind(record.gross_pay)
    .bind(record.taxes.income_tax)
    .bind(record.taxes.stamp_tax)
    .bind(record.taxes.employee_social_security)
    .bind(record.taxes.employee_unemployment)
    .bind(record.taxes.employer_social_security)
    .bind(record.taxes.employer_unemployment)
    .bind(record.taxes.total_employee_deductions)
    .bind(record.taxes.net_pay)
    .bind(record.taxes.total_employer_cost)
    .bind(record.interval_count)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn fetch_daily<'e, E>(
    executor: E,
    employee_id: u64,
    date: NaiveDate,
) -> Result<Option<DailyPayrollRecord>, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let sql = format!(
        "SELECT {DAILY_COLUMNS} FROM daily_payroll WHERE employee_id = ? AND work_date = ?"
    );
    sqlx::query_as::<_, DailyPayrollRecord>(&sql)
        .bind(employee_id)
        .bind(date)
        .fetch_optional(executor)
        .await
}

pub async fn fetch_daily_range<'e, E>(
    executor: E,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyPayrollRecord>, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let sql = format!(
        r#"
        SELECT {DAILY_COLUMNS} FROM daily_payroll
        WHERE employee_id = ? AND work_date BETWEEN ? AND ?
        ORDER BY work_date
        "#
    );
    sqlx::query_as::<_, DailyPayrollRecord>(&sql)
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await
}

pub async fn fetch_month_dailies<'e, E>(
    executor: E,
    employee_id: u64,
    year: i32,
    month: u32,
) -> Result<Vec<DailyPayrollRecord>, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let sql = format!(
        r#"
        SELECT {DAILY_COLUMNS} FROM daily_payroll
        WHERE employee_id = ? AND YEAR(work_date) = ? AND MONTH(work_date) = ?
        ORDER BY work_date
        "#
    );
    sqlx::query_as::<_, DailyPayrollRecord>(&sql)
        .bind(employee_id)
        .bind(year)
        .bind(month)
        .fetch_all(executor)
        .await
}

/// Full-overwrite upsert of a monthly record.
pub async fn upsert_monthly<'e, E>(executor: E, record: &MonthlyPayroll) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    sqlx::query(
        r#"
        INSERT INTO monthly_payroll
        (employee_id, month, year, working_days,
         planned_hours, actual_hours, overtime_hours,
         base_pay, overtime_pay, gross_salary,
         income_tax, stamp_tax, employee_social_security, employee_unemployment,
         employer_social_security, employer_unemployment,
         total_employee_deductions, net_salary, total_employer_cost,
         computed_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NOW())
        ON DUPLICATE KEY UPDATE
         working_days = VALUES(working_days),
         planned_hours = VALUES(planned_hours),
         actual_hours = VALUES(actual_hours),
         overtime_hours = VALUES(overtime_hours),
         base_pay = VALUES(base_pay),
         overtime_pay = VALUES(overtime_pay),
         gross_salary = VALUES(gross_salary),
         income_tax = VALUES(income_tax),
         stamp_tax = VALUES(stamp_tax),
         employee_social_security = VALUES(employee_social_security),
         employee_unemployment = VALUES(employee_unemployment),
         employer_social_security = VALUES(employer_social_security),
         employer_unemployment = VALUES(employer_unemployment),
         total_employee_deductions = VALUES(total_employee_deductions),
         net_salary = VALUES(net_salary),
         total_employer_cost = VALUES(total_employer_cost),
         computed_at = NOW()
        "#,
    )
    .bind(record.employee_id)
    .bind(record.month)
    .bind(record.year)
    .bind(record.working_days)
    .bind(record.planned_hours)
    .bind(record.actual_hours)
    .bind(record.overtime_hours)
    .bind(record.base_pay)
    .bind(record.overtime_pay)
    .bind(record.gross_salary)
    .bind(record.taxes.income_tax)
    .bind(record.taxes.stamp_tax)
    .bind(record.taxes.employee_social_security)
    .bind(record.taxes.employee_unemployment)
    .bind(record.taxes.employer_social_security)
    .bind(record.taxes.employer_unemployment)
    .bind(record.taxes.total_employee_deductions)
    .bind(record.taxes.net_pay)
    .bind(record.taxes.total_employer_cost)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn fetch_monthly<'e, E>(
    executor: E,
    employee_id: u64,
    year: i32,
    month: u32,
) -> Result<Option<MonthlyPayrollRecord>, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let sql = format!(
        "SELECT {MONTHLY_COLUMNS} FROM monthly_payroll WHERE employee_id = ? AND year = ? AND month = ?"
    );
    sqlx::query_as::<_, MonthlyPayrollRecord>(&sql)
        .bind(employee_id)
        .bind(year)
        .bind(month)
        .fetch_optional(executor)
        .await
}

/// Removes the monthly record once its last contributing daily record is
/// gone, so reads see "absent" rather than a stale aggregate.
pub async fn delete_monthly<'e, E>(
    executor: E,
    employee_id: u64,
    year: i32,
    month: u32,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = MySql>,
{
    let result = sqlx::query(
        "DELETE FROM monthly_payroll WHERE employee_id = ? AND year = ? AND month = ?",
    )
    .bind(employee_id)
    .bind(year)
    .bind(month)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
