//! Hourly-rate resolution for a pay profile.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::model::employee::EmployeeProfile;
use crate::payroll::PayrollConfig;
use crate::payroll::error::PayrollError;

/// Rates keep 4 decimal places so salary-derived rates survive the
/// daily multiplier math without drift.
const RATE_DP: u32 = 4;

#[inline]
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Planned working hours per day for a profile, falling back to the
/// configured default when the profile value is missing or non-positive.
pub fn planned_daily_hours(profile: &EmployeeProfile, cfg: &PayrollConfig) -> Decimal {
    if profile.daily_working_hours > Decimal::ZERO {
        profile.daily_working_hours
    } else {
        cfg.default_daily_hours
    }
}

/// Resolves the base hourly rate for an employee.
///
/// An explicit positive `hourly_rate` wins; otherwise a positive
/// `monthly_salary` is divided over the standard working month
/// (configured working days times planned daily hours). Anything else
/// falls through to the configured fallback rate — never zero, never
/// negative, so downstream pay math cannot divide by or pay out nothing.
pub fn resolve_hourly_rate(profile: &EmployeeProfile, cfg: &PayrollConfig) -> Decimal {
    if let Some(rate) = profile.hourly_rate {
        if rate > Decimal::ZERO {
            return rate;
        }
    }

    if let Some(salary) = profile.monthly_salary {
        if salary > Decimal::ZERO {
            let monthly_hours =
                Decimal::from(cfg.monthly_working_days) * planned_daily_hours(profile, cfg);
            if monthly_hours > Decimal::ZERO {
                return round_rate(salary / monthly_hours);
            }
        }
    }

    if profile.hourly_rate.is_some() || profile.monthly_salary.is_some() {
        let audit = PayrollError::InvalidRateConfiguration { employee_id: profile.id };
        warn!(employee_id = profile.id, "{audit}, applying fallback rate");
    }
    cfg.fallback_hourly_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile(hourly: Option<Decimal>, salary: Option<Decimal>) -> EmployeeProfile {
        EmployeeProfile {
            id: 1,
            employee_code: "EMP-001".into(),
            first_name: "Test".into(),
            last_name: "Employee".into(),
            email: "test@company.com".into(),
            daily_working_hours: dec!(8),
            hourly_rate: hourly,
            monthly_salary: salary,
            overtime_rate: None,
            weekend_rate: None,
            holiday_rate: None,
            status: "active".into(),
        }
    }

    #[test]
    fn explicit_hourly_rate_wins() {
        let cfg = PayrollConfig::default();
        let p = profile(Some(dec!(75)), Some(dec!(10000)));
        assert_eq!(resolve_hourly_rate(&p, &cfg), dec!(75));
    }

    #[test]
    fn salary_divided_over_standard_month() {
        let cfg = PayrollConfig::default();
        // 17600 / (22 * 8)
        let p = profile(None, Some(dec!(17600)));
        assert_eq!(resolve_hourly_rate(&p, &cfg), dec!(100));
    }

    #[test]
    fn salary_rate_rounds_to_rate_precision() {
        let cfg = PayrollConfig::default();
        // 50000 / 176 = 284.0909...
        let p = profile(None, Some(dec!(50000)));
        assert_eq!(resolve_hourly_rate(&p, &cfg), dec!(284.0909));
    }

    #[test]
    fn missing_rates_fall_back() {
        let cfg = PayrollConfig::default();
        assert_eq!(resolve_hourly_rate(&profile(None, None), &cfg), dec!(50));
    }

    #[test]
    fn zero_rates_fall_back() {
        let cfg = PayrollConfig::default();
        let p = profile(Some(Decimal::ZERO), Some(Decimal::ZERO));
        assert_eq!(resolve_hourly_rate(&p, &cfg), cfg.fallback_hourly_rate);
    }

    #[test]
    fn zero_hourly_rate_still_uses_salary() {
        let cfg = PayrollConfig::default();
        let p = profile(Some(Decimal::ZERO), Some(dec!(17600)));
        assert_eq!(resolve_hourly_rate(&p, &cfg), dec!(100));
    }

    #[test]
    fn profile_daily_hours_shape_salary_conversion() {
        let cfg = PayrollConfig::default();
        let mut p = profile(None, Some(dec!(13200)));
        p.daily_working_hours = dec!(6);
        // 13200 / (22 * 6)
        assert_eq!(resolve_hourly_rate(&p, &cfg), dec!(100));
    }
}
