use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::model::payroll::{DailyPayrollRecord, MonthlyPayrollRecord};
use crate::payroll::error::PayrollError;
use crate::payroll::service::{PayrollService, SyncSummary};
use crate::payroll::store;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DateRangeQuery {
    #[schema(example = "2026-03-01", value_type = String, format = "date")]
    pub start: NaiveDate,

    #[schema(example = "2026-03-31", value_type = String, format = "date")]
    pub end: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct SyncMonthlyRequest {
    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,

    /// Restrict the sync to one employee; omit to sync all active
    /// employees.
    #[schema(example = 1001)]
    pub employee_id: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/daily/{employee_id}/{date}",
    params(
        ("employee_id", description = "Employee ID"),
        ("date", description = "Work date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, body = DailyPayrollRecord),
        (status = 404, description = "No daily payroll for that date")
    ),
    tag = "Payroll"
)]
pub async fn get_daily_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, date) = path.into_inner();

    let record = store::fetch_daily(pool.get_ref(), employee_id, date)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch daily payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match record {
        Some(r) => Ok(HttpResponse::Ok().json(r)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Daily payroll not found"
        }))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/daily/{employee_id}",
    params(
        ("employee_id", description = "Employee ID"),
        DateRangeQuery
    ),
    responses(
        (status = 200, body = [DailyPayrollRecord]),
        (status = 400, description = "start must not be after end")
    ),
    tag = "Payroll"
)]
pub async fn get_daily_payroll_range(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    if query.start > query.end {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "start must not be after end"
        })));
    }

    let records = store::fetch_daily_range(pool.get_ref(), employee_id, query.start, query.end)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch daily payroll range");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Administrative recompute of one employee/date
#[utoipa::path(
    post,
    path = "/api/v1/payroll/daily/{employee_id}/{date}/recalculate",
    params(
        ("employee_id", description = "Employee ID"),
        ("date", description = "Work date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Recomputed record", body = DailyPayrollRecord),
        (status = 404, description = "Employee not found")
    ),
    tag = "Payroll"
)]
pub async fn recalculate_daily(
    service: web::Data<PayrollService>,
    path: web::Path<(u64, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, date) = path.into_inner();

    match service.recalculate_daily(employee_id, date).await {
        Ok(record) => Ok(HttpResponse::Ok().json(record)),
        Err(PayrollError::EmployeeNotFound { .. }) => {
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": "Employee not found"
            })))
        }
        Err(e) => {
            tracing::error!(error = %e, employee_id, %date, "Daily recalculation failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/monthly/{employee_id}/{year}/{month}",
    params(
        ("employee_id", description = "Employee ID"),
        ("year", description = "Calendar year"),
        ("month", description = "Calendar month (1-12)")
    ),
    responses(
        (status = 200, body = MonthlyPayrollRecord),
        (status = 400, description = "Month out of range"),
        (status = 404, description = "No monthly payroll for that period")
    ),
    tag = "Payroll"
)]
pub async fn get_monthly_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, i32, u32)>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, year, month) = path.into_inner();

    if !(1..=12).contains(&month) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Month must be between 1 and 12"
        })));
    }

    let record = store::fetch_monthly(pool.get_ref(), employee_id, year, month)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch monthly payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match record {
        Some(r) => Ok(HttpResponse::Ok().json(r)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Monthly payroll not found"
        }))),
    }
}

/// Bulk administrative sync of a month
///
/// Re-aggregates every active employee (or one, when `employee_id` is
/// given) for the period. Per-employee failures land in the summary
/// instead of failing the request.
#[utoipa::path(
    post,
    path = "/api/v1/payroll/monthly/sync",
    request_body = SyncMonthlyRequest,
    responses(
        (status = 200, description = "Sync summary", body = SyncSummary),
        (status = 400, description = "Month out of range")
    ),
    tag = "Payroll"
)]
pub async fn sync_monthly(
    service: web::Data<PayrollService>,
    payload: web::Json<SyncMonthlyRequest>,
) -> actix_web::Result<impl Responder> {
    if !(1..=12).contains(&payload.month) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Month must be between 1 and 12"
        })));
    }

    let summary = service
        .sync_month(payload.year, payload.month, payload.employee_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Monthly sync failed to start");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(summary))
}
