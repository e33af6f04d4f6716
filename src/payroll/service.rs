//! Orchestration of the payroll pipeline: attendance close-out → daily
//! recalculation → monthly re-aggregation.

use chrono::NaiveDate;
use futures::{StreamExt, stream};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::employee::EmployeeProfile;
use crate::model::payroll::{DailyPayrollRecord, MonthlyPayrollRecord};
use crate::payroll::PayrollConfig;
use crate::payroll::daily::compute_daily;
use crate::payroll::error::PayrollError;
use crate::payroll::event::PayrollEvent;
use crate::payroll::monthly::{aggregate_month, totals_consistent};
use crate::payroll::store;
use crate::utils::profile_cache;

/// How many employees a bulk sync aggregates concurrently.
const SYNC_CONCURRENCY: usize = 8;

/// Outcome of a bulk monthly sync. Per-employee failures accumulate
/// here instead of failing the run.
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncSummary {
    /// Correlation id; the per-employee warning logs of this run carry it.
    #[schema(example = "3b3f1f9e-7c10-4e2d-9a60-0a3a86a1a111")]
    pub sync_id: String,
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 41)]
    pub employees_processed: u32,
    #[schema(example = 1)]
    pub error_count: u32,
    pub errors: Vec<String>,
}

#[derive(Clone)]
pub struct PayrollService {
    pool: MySqlPool,
    config: PayrollConfig,
}

impl PayrollService {
    pub fn new(pool: MySqlPool, config: PayrollConfig) -> Self {
        Self { pool, config }
    }

    async fn profile(&self, employee_id: u64) -> Result<EmployeeProfile, PayrollError> {
        if let Some(profile) = profile_cache::get(employee_id).await {
            return Ok(profile);
        }
        let profile = store::fetch_profile(&self.pool, employee_id)
            .await?
            .ok_or(PayrollError::EmployeeNotFound { employee_id })?;
        profile_cache::insert(&profile).await;
        Ok(profile)
    }

    /// Recomputes the daily record from current attendance, then
    /// dispatches the change event so the month is re-aggregated.
    /// Bypasses the profile cache so an explicit recompute always sees
    /// the current rates.
    pub async fn recalculate_daily(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<DailyPayrollRecord, PayrollError> {
        profile_cache::invalidate(employee_id).await;
        let record = self.run_daily(employee_id, date).await?;
        self.dispatch(PayrollEvent::DailyRecordChanged { employee_id, date })
            .await?;
        Ok(record)
    }

    /// Daily calculation inside one transaction: the day's attendance
    /// rows are read under a row lock so concurrent recalculations for
    /// the same employee/date serialize.
    async fn run_daily(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<DailyPayrollRecord, PayrollError> {
        let profile = self.profile(employee_id).await?;

        let mut tx = self.pool.begin().await?;
        let intervals = store::fetch_intervals_for_update(&mut *tx, employee_id, date).await?;
        let computed = compute_daily(&profile, date, &intervals, &self.config);
        store::upsert_daily(&mut *tx, &computed).await?;
        let record = store::fetch_daily(&mut *tx, employee_id, date)
            .await?
            .ok_or(PayrollError::Persistence(sqlx::Error::RowNotFound))?;
        tx.commit().await?;

        info!(
            employee_id,
            date = %date,
            actual_hours = %record.actual_hours,
            gross_pay = %record.gross_pay,
            "daily payroll recomputed"
        );
        Ok(record)
    }

    /// Routes a payroll event to the aggregation it invalidates.
    pub async fn dispatch(
        &self,
        event: PayrollEvent,
    ) -> Result<Option<MonthlyPayrollRecord>, PayrollError> {
        let (employee_id, year, month) = event.aggregation_target();
        self.run_monthly(employee_id, year, month).await
    }

    /// Re-aggregates one employee's month from a transactional snapshot
    /// of its daily records. A month left without daily records has its
    /// monthly row deleted.
    pub async fn run_monthly(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
    ) -> Result<Option<MonthlyPayrollRecord>, PayrollError> {
        let profile = self.profile(employee_id).await?;

        let mut tx = self.pool.begin().await?;
        let dailies = store::fetch_month_dailies(&mut *tx, employee_id, year, month).await?;

        if !totals_consistent(&dailies) {
            let audit = PayrollError::AggregationInconsistency { employee_id, month, year };
            warn!(employee_id, month, year, "{audit}; continuing with recomputed totals");
        }

        match aggregate_month(&profile, year, month, &dailies, &self.config) {
            Some(monthly) => {
                store::upsert_monthly(&mut *tx, &monthly).await?;
                let record = store::fetch_monthly(&mut *tx, employee_id, year, month)
                    .await?
                    .ok_or(PayrollError::Persistence(sqlx::Error::RowNotFound))?;
                tx.commit().await?;
                Ok(Some(record))
            }
            None => {
                let removed = store::delete_monthly(&mut *tx, employee_id, year, month).await?;
                tx.commit().await?;
                if removed > 0 {
                    info!(employee_id, month, year, "monthly payroll removed, no daily records left");
                }
                Ok(None)
            }
        }
    }

    /// Runs the daily→monthly pipeline after an attendance close-out.
    ///
    /// Never fatal to the close-out: failures are logged and returned as
    /// a warning for the caller to surface.
    pub async fn close_out(&self, employee_id: u64, date: NaiveDate) -> Option<String> {
        match self.recalculate_daily(employee_id, date).await {
            Ok(_) => None,
            Err(err) => {
                warn!(
                    employee_id,
                    date = %date,
                    error = %err,
                    "payroll recalculation failed after attendance close-out"
                );
                Some(format!("payroll recalculation deferred: {err}"))
            }
        }
    }

    /// Ingests an externally measured closed session, then runs the
    /// pipeline with the close-out policy. Only the session insert
    /// itself may fail the call — the attendance event must survive
    /// payroll trouble.
    pub async fn record_session_close(
        &self,
        employee_id: u64,
        date: NaiveDate,
        total_minutes: u32,
    ) -> Result<Option<String>, PayrollError> {
        self.profile(employee_id).await?;
        store::insert_closed_interval(&self.pool, employee_id, date, total_minutes).await?;
        Ok(self.close_out(employee_id, date).await)
    }

    /// Administrative reconciliation: re-aggregates the given month for
    /// one employee, or for every active employee. Idempotent; failures
    /// are accumulated, never raised.
    pub async fn sync_month(
        &self,
        year: i32,
        month: u32,
        employee_id: Option<u64>,
    ) -> Result<SyncSummary, PayrollError> {
        let sync_id = Uuid::new_v4().to_string();
        let ids = match employee_id {
            Some(id) => vec![id],
            None => store::active_employee_ids(&self.pool).await?,
        };
        info!(%sync_id, year, month, employees = ids.len(), "starting monthly payroll sync");

        let tasks = ids
            .into_iter()
            .map(|id| async move { (id, self.run_monthly(id, year, month).await) });
        let results: Vec<_> = stream::iter(tasks)
            .buffer_unordered(SYNC_CONCURRENCY)
            .collect()
            .await;

        let mut employees_processed = 0u32;
        let mut errors = Vec::new();
        for (id, result) in results {
            match result {
                Ok(_) => employees_processed += 1,
                Err(err) => {
                    warn!(%sync_id, employee_id = id, error = %err, "monthly sync failed for employee");
                    errors.push(format!("employee {id}: {err}"));
                }
            }
        }

        info!(%sync_id, employees_processed, error_count = errors.len(), "monthly payroll sync finished");
        Ok(SyncSummary {
            sync_id,
            month,
            year,
            employees_processed,
            error_count: errors.len() as u32,
            errors,
        })
    }
}
