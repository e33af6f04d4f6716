//! Daily payroll computation: one employee, one date, that date's
//! attendance intervals in, a fully priced daily record out.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::attendance::AttendanceInterval;
use crate::model::employee::EmployeeProfile;
use crate::payroll::PayrollConfig;
use crate::payroll::calendar::DayKind;
use crate::payroll::rate::{planned_daily_hours, resolve_hourly_rate, round_rate};
use crate::payroll::tax::{TaxBreakdown, round_money};

/// Hours are tracked with 2 decimal places (36-second resolution).
const HOURS_DP: u32 = 2;

#[inline]
fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(HOURS_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// The computed (not yet persisted) daily payroll for one employee/date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPayroll {
    pub employee_id: u64,
    pub work_date: NaiveDate,
    pub day_kind: DayKind,
    pub planned_hours: Decimal,
    pub actual_hours: Decimal,
    pub regular_hours: Decimal,
    pub overtime_hours: Decimal,
    pub effective_hourly_rate: Decimal,
    pub base_pay: Decimal,
    pub overtime_pay: Decimal,
    pub gross_pay: Decimal,
    pub taxes: TaxBreakdown,
    pub interval_count: u32,
}

/// Computes the daily payroll record from current inputs.
///
/// Pure and idempotent: identical attendance always produces an
/// identical record. Zero attendance is valid and yields a zero-hours,
/// zero-pay record. Invariants upheld:
/// `actual = regular + overtime`, `regular = min(actual, planned)`.
pub fn compute_daily(
    profile: &EmployeeProfile,
    date: NaiveDate,
    intervals: &[AttendanceInterval],
    cfg: &PayrollConfig,
) -> DailyPayroll {
    let base_rate = resolve_hourly_rate(profile, cfg);

    let day_kind = cfg.calendar.classify(date);
    let day_multiplier = match day_kind {
        DayKind::Holiday => profile.holiday_rate.unwrap_or(cfg.holiday_rate),
        DayKind::Weekend => profile.weekend_rate.unwrap_or(cfg.weekend_rate),
        DayKind::Regular => Decimal::ONE,
    };
    let effective_hourly_rate = round_rate(base_rate * day_multiplier);

    let total_minutes: i64 = intervals.iter().map(AttendanceInterval::total_minutes).sum();
    let actual_hours = round_hours(Decimal::from(total_minutes) / Decimal::from(60));

    let planned_hours = planned_daily_hours(profile, cfg);
    let regular_hours = actual_hours.min(planned_hours);
    let overtime_hours = (actual_hours - planned_hours).max(Decimal::ZERO);

    let overtime_multiplier = profile.overtime_rate.unwrap_or(cfg.overtime_rate);
    let base_pay = round_money(regular_hours * effective_hourly_rate);
    let overtime_pay = round_money(overtime_hours * effective_hourly_rate * overtime_multiplier);
    let gross_pay = base_pay + overtime_pay;

    let taxes = cfg.tax.compute(gross_pay);

    DailyPayroll {
        employee_id: profile.id,
        work_date: date,
        day_kind,
        planned_hours,
        actual_hours,
        regular_hours,
        overtime_hours,
        effective_hourly_rate,
        base_pay,
        overtime_pay,
        gross_pay,
        taxes,
        interval_count: intervals.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn profile() -> EmployeeProfile {
        EmployeeProfile {
            id: 1,
            employee_code: "EMP-001".into(),
            first_name: "Test".into(),
            last_name: "Employee".into(),
            email: "test@company.com".into(),
            daily_working_hours: dec!(8),
            hourly_rate: Some(dec!(50)),
            monthly_salary: None,
            overtime_rate: None,
            weekend_rate: None,
            holiday_rate: None,
            status: "active".into(),
        }
    }

    fn session(id: u64, date: NaiveDate, from: &str, to: Option<&str>) -> AttendanceInterval {
        let parse = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        AttendanceInterval {
            id,
            employee_id: 1,
            date,
            check_in: Some(parse(from)),
            check_out: to.map(parse),
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn weekday_overtime_scenario() {
        // 10h on a weekday at rate 50, planned 8h
        let cfg = PayrollConfig::default();
        let date = monday();
        let intervals = [session(1, date, "08:00", Some("18:00"))];
        let record = compute_daily(&profile(), date, &intervals, &cfg);

        assert_eq!(record.day_kind, DayKind::Regular);
        assert_eq!(record.actual_hours, dec!(10));
        assert_eq!(record.regular_hours, dec!(8));
        assert_eq!(record.overtime_hours, dec!(2));
        assert_eq!(record.effective_hourly_rate, dec!(50));
        assert_eq!(record.base_pay, dec!(400));
        assert_eq!(record.overtime_pay, dec!(150));
        assert_eq!(record.gross_pay, dec!(550));
        assert_eq!(record.interval_count, 1);
    }

    #[test]
    fn weekend_multiplier_no_overtime() {
        let cfg = PayrollConfig::default();
        let date = saturday();
        let intervals = [session(1, date, "09:00", Some("17:00"))];
        let record = compute_daily(&profile(), date, &intervals, &cfg);

        assert_eq!(record.day_kind, DayKind::Weekend);
        assert_eq!(record.effective_hourly_rate, dec!(62.5));
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert_eq!(record.gross_pay, dec!(500));
    }

    #[test]
    fn holiday_takes_precedence_over_weekend() {
        let mut cfg = PayrollConfig::default();
        let date = saturday();
        cfg.calendar.holidays.push(date);
        let intervals = [session(1, date, "09:00", Some("13:00"))];
        let record = compute_daily(&profile(), date, &intervals, &cfg);

        assert_eq!(record.day_kind, DayKind::Holiday);
        assert_eq!(record.effective_hourly_rate, dec!(100));
        assert_eq!(record.gross_pay, dec!(400));
    }

    #[test]
    fn zero_attendance_is_a_valid_record() {
        let cfg = PayrollConfig::default();
        let record = compute_daily(&profile(), monday(), &[], &cfg);

        assert_eq!(record.actual_hours, Decimal::ZERO);
        assert_eq!(record.gross_pay, Decimal::ZERO);
        assert_eq!(record.taxes.net_pay, Decimal::ZERO);
        assert_eq!(record.interval_count, 0);
    }

    #[test]
    fn open_sessions_contribute_zero() {
        let cfg = PayrollConfig::default();
        let date = monday();
        let intervals = [
            session(1, date, "08:00", Some("12:00")),
            session(2, date, "13:00", None),
        ];
        let record = compute_daily(&profile(), date, &intervals, &cfg);

        assert_eq!(record.actual_hours, dec!(4));
        assert_eq!(record.interval_count, 2);
    }

    #[test]
    fn multiple_intervals_are_summed() {
        let cfg = PayrollConfig::default();
        let date = monday();
        let intervals = [
            session(1, date, "08:00", Some("12:00")),
            session(2, date, "13:00", Some("17:00")),
        ];
        let record = compute_daily(&profile(), date, &intervals, &cfg);

        assert_eq!(record.actual_hours, dec!(8));
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert_eq!(record.gross_pay, dec!(400));
    }

    #[test]
    fn hours_invariant_holds() {
        let cfg = PayrollConfig::default();
        let date = monday();
        for (from, to) in [("09:00", "12:30"), ("06:15", "19:45"), ("09:00", "09:00")] {
            let intervals = [session(1, date, from, Some(to))];
            let record = compute_daily(&profile(), date, &intervals, &cfg);
            assert_eq!(record.regular_hours + record.overtime_hours, record.actual_hours);
            assert!(record.regular_hours <= record.planned_hours);
        }
    }

    #[test]
    fn profile_multipliers_override_defaults() {
        let cfg = PayrollConfig::default();
        let mut p = profile();
        p.overtime_rate = Some(dec!(2));
        let date = monday();
        let intervals = [session(1, date, "08:00", Some("18:00"))];
        let record = compute_daily(&p, date, &intervals, &cfg);

        // 2h overtime at 50 * 2.0
        assert_eq!(record.overtime_pay, dec!(200));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let cfg = PayrollConfig::default();
        let date = monday();
        let intervals = [session(1, date, "08:00", Some("18:00"))];
        let first = compute_daily(&profile(), date, &intervals, &cfg);
        let second = compute_daily(&profile(), date, &intervals, &cfg);
        assert_eq!(first, second);
    }
}
