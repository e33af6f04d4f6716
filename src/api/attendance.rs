use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::payroll::error::PayrollError;
use crate::payroll::service::PayrollService;

#[derive(Deserialize, ToSchema)]
pub struct CloseSessionRequest {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// Minutes worked in the already-closed session.
    #[schema(example = 480)]
    pub total_minutes: u32,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/{employee_id}/check-in",
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully"
        })),
        (status = 400, description = "An open session already exists today", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let today = chrono::Local::now().date_naive();

    let open_sessions = sqlx::query_as::<_, (i64,)>(
        r#"
        SELECT COUNT(*) FROM attendance
        WHERE employee_id = ? AND date = ? AND check_out IS NULL
        "#,
    )
    .bind(employee_id)
    .bind(today)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-in lookup failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if open_sessions.0 > 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Already checked in today"
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, check_in)
        VALUES (?, ?, CURTIME())
        "#,
    )
    .bind(employee_id)
    .bind(today)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-in failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked in successfully"
    })))
}

/// Check-out endpoint
///
/// Closes the latest open session of the day, then recomputes the
/// employee's daily and monthly payroll. Payroll trouble never fails the
/// check-out; it is surfaced as a warning in the response.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/{employee_id}/check-out",
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    pool: web::Data<MySqlPool>,
    service: web::Data<PayrollService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let today = chrono::Local::now().date_naive();

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET check_out = CURTIME()
        WHERE employee_id = ?
        AND date = ?
        AND check_out IS NULL
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .bind(employee_id)
    .bind(today)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-out failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "No active check-in found for today"
        })));
    }

    let payroll_warning = service.close_out(employee_id, today).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked out successfully",
        "payroll_warning": payroll_warning
    })))
}

/// Session-close hook for external attendance sources
///
/// Records an already-measured closed session, then runs the same
/// payroll pipeline as check-out.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/close",
    request_body = CloseSessionRequest,
    responses(
        (status = 200, description = "Session recorded", body = Object, example = json!({
            "message": "Session recorded",
            "payroll_warning": null
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn close_session(
    service: web::Data<PayrollService>,
    payload: web::Json<CloseSessionRequest>,
) -> actix_web::Result<impl Responder> {
    let result = service
        .record_session_close(payload.employee_id, payload.date, payload.total_minutes)
        .await;

    match result {
        Ok(payroll_warning) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Session recorded",
            "payroll_warning": payroll_warning
        }))),
        Err(PayrollError::EmployeeNotFound { .. }) => {
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": "Employee not found"
            })))
        }
        Err(e) => {
            tracing::error!(error = %e, employee_id = payload.employee_id, "Failed to record session");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}
