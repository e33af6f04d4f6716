use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::model::employee::EmployeeProfile;

/// Read-through cache of employee pay profiles, keyed by employee id.
/// Rates change rarely; a short TTL bounds how long a stale rate can
/// leak into recalculations.
pub static PROFILE_CACHE: Lazy<Cache<u64, EmployeeProfile>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(300)) // 5 min TTL
        .build()
});

pub async fn get(employee_id: u64) -> Option<EmployeeProfile> {
    PROFILE_CACHE.get(&employee_id).await
}

pub async fn insert(profile: &EmployeeProfile) {
    PROFILE_CACHE.insert(profile.id, profile.clone()).await;
}

/// Drop a cached profile after HR updates it out of band.
pub async fn invalidate(employee_id: u64) {
    PROFILE_CACHE.invalidate(&employee_id).await;
}

async fn batch_insert(profiles: Vec<EmployeeProfile>) {
    let futures: Vec<_> = profiles
        .into_iter()
        .map(|p| PROFILE_CACHE.insert(p.id, p))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load active employee profiles into the in-memory cache (batched).
pub async fn warmup_profile_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, EmployeeProfile>(
        r#"
        SELECT id, employee_code, first_name, last_name, email,
               daily_working_hours, hourly_rate, monthly_salary,
               overtime_rate, weekend_rate, holiday_rate, status
        FROM employees
        WHERE status = 'active'
        ORDER BY id
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let profile = row?;
        batch.push(profile);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_insert(std::mem::take(&mut batch)).await;
        }
    }

    if !batch.is_empty() {
        batch_insert(batch).await;
    }

    tracing::info!("Profile cache warmup complete: {} active employees", total_count);

    Ok(())
}
