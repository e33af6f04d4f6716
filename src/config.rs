use std::env;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use dotenvy::dotenv;
use rust_decimal::Decimal;

use crate::payroll::PayrollConfig;
use crate::payroll::calendar::WorkCalendar;
use crate::payroll::tax::{TaxBracket, TaxConfig};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_attendance_per_min: u32,
    pub rate_payroll_per_min: u32,
    pub rate_sync_per_min: u32,

    pub api_prefix: String,

    pub payroll: PayrollConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            rate_attendance_per_min: env::var("RATE_ATTENDANCE_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_payroll_per_min: env::var("RATE_PAYROLL_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap(),
            rate_sync_per_min: env::var("RATE_SYNC_PER_MIN")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            payroll: payroll_from_env(),
        }
    }
}

fn payroll_from_env() -> PayrollConfig {
    let defaults = PayrollConfig::default();
    let tax_defaults = TaxConfig::default();

    PayrollConfig {
        fallback_hourly_rate: env_decimal(
            "PAYROLL_FALLBACK_HOURLY_RATE",
            defaults.fallback_hourly_rate,
        ),
        monthly_working_days: env::var("PAYROLL_MONTHLY_WORKING_DAYS")
            .unwrap_or_else(|_| "22".to_string())
            .parse()
            .unwrap(),
        default_daily_hours: env_decimal("PAYROLL_DEFAULT_DAILY_HOURS", defaults.default_daily_hours),
        overtime_rate: env_decimal("PAYROLL_OVERTIME_RATE", defaults.overtime_rate),
        weekend_rate: env_decimal("PAYROLL_WEEKEND_RATE", defaults.weekend_rate),
        holiday_rate: env_decimal("PAYROLL_HOLIDAY_RATE", defaults.holiday_rate),
        calendar: WorkCalendar {
            weekend_days: env::var("PAYROLL_WEEKEND_DAYS")
                .map(|v| parse_weekend_days(&v))
                .unwrap_or(defaults.calendar.weekend_days),
            holidays: env::var("PAYROLL_HOLIDAYS")
                .map(|v| parse_holidays(&v))
                .unwrap_or_default(),
        },
        tax: TaxConfig {
            brackets: env::var("PAYROLL_TAX_BRACKETS")
                .map(|v| parse_tax_brackets(&v))
                .unwrap_or(tax_defaults.brackets),
            stamp_tax_rate: env_decimal("PAYROLL_STAMP_TAX_RATE", tax_defaults.stamp_tax_rate),
            employee_social_security_rate: env_decimal(
                "PAYROLL_EMPLOYEE_SOCIAL_SECURITY_RATE",
                tax_defaults.employee_social_security_rate,
            ),
            employer_social_security_rate: env_decimal(
                "PAYROLL_EMPLOYER_SOCIAL_SECURITY_RATE",
                tax_defaults.employer_social_security_rate,
            ),
            employee_unemployment_rate: env_decimal(
                "PAYROLL_EMPLOYEE_UNEMPLOYMENT_RATE",
                tax_defaults.employee_unemployment_rate,
            ),
            employer_unemployment_rate: env_decimal(
                "PAYROLL_EMPLOYER_UNEMPLOYMENT_RATE",
                tax_defaults.employer_unemployment_rate,
            ),
        },
    }
}

fn env_decimal(key: &str, default: Decimal) -> Decimal {
    match env::var(key) {
        Ok(value) => Decimal::from_str(&value)
            .unwrap_or_else(|_| panic!("{key} must be a decimal number, got {value:?}")),
        Err(_) => default,
    }
}

/// Parses `"Sat,Sun"` style weekend-day lists.
fn parse_weekend_days(value: &str) -> Vec<Weekday> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Weekday::from_str(s)
                .unwrap_or_else(|_| panic!("PAYROLL_WEEKEND_DAYS contains unknown day {s:?}"))
        })
        .collect()
}

/// Parses `"2026-01-01,2026-04-23"` style holiday lists.
fn parse_holidays(value: &str) -> Vec<NaiveDate> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .unwrap_or_else(|_| panic!("PAYROLL_HOLIDAYS contains invalid date {s:?}"))
        })
        .collect()
}

/// Parses `"15000:0.15,40000:0.20,100000:0.27,:0.35"` — comma-separated
/// `upper:rate` slices in ascending order, empty upper for the unbounded
/// top slice.
fn parse_tax_brackets(value: &str) -> Vec<TaxBracket> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (upper, rate) = entry
                .split_once(':')
                .unwrap_or_else(|| panic!("PAYROLL_TAX_BRACKETS entry {entry:?} must be upper:rate"));
            let upper = if upper.is_empty() {
                None
            } else {
                Some(Decimal::from_str(upper).unwrap_or_else(|_| {
                    panic!("PAYROLL_TAX_BRACKETS entry {entry:?} has an invalid bound")
                }))
            };
            let rate = Decimal::from_str(rate).unwrap_or_else(|_| {
                panic!("PAYROLL_TAX_BRACKETS entry {entry:?} has an invalid rate")
            });
            TaxBracket { upper, rate }
        })
        .collect()
}
