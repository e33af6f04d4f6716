//! Monthly aggregation: sums a month's daily records and re-runs the tax
//! computation on the aggregate gross. Taxes are deliberately NOT summed
//! from daily records — the monthly gross is the jurisdiction's filing
//! unit, so daily and monthly tax totals may legitimately disagree at
//! bracket boundaries.

use rust_decimal::Decimal;

use crate::model::employee::EmployeeProfile;
use crate::model::payroll::DailyPayrollRecord;
use crate::payroll::PayrollConfig;
use crate::payroll::rate::planned_daily_hours;
use crate::payroll::tax::{MONEY_TOLERANCE, TaxBreakdown};

/// The computed (not yet persisted) monthly payroll for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPayroll {
    pub employee_id: u64,
    pub month: u32,
    pub year: i32,
    pub working_days: u32,
    pub planned_hours: Decimal,
    pub actual_hours: Decimal,
    pub overtime_hours: Decimal,
    pub base_pay: Decimal,
    pub overtime_pay: Decimal,
    pub gross_salary: Decimal,
    pub taxes: TaxBreakdown,
}

/// True when the summed daily gross matches the recomputed base+overtime
/// total within money tolerance. A divergence means daily records were
/// written by inconsistent inputs and is logged for audit by the caller.
pub fn totals_consistent(dailies: &[DailyPayrollRecord]) -> bool {
    let gross: Decimal = dailies.iter().map(|d| d.gross_pay).sum();
    let recomputed: Decimal = dailies.iter().map(|d| d.base_pay + d.overtime_pay).sum();
    (gross - recomputed).abs() <= MONEY_TOLERANCE
}

/// Aggregates one month of daily records into a monthly payroll.
///
/// Returns `None` when the month has no daily records — the caller
/// removes any existing monthly record so no stale aggregate survives.
/// Fully recomputed on every call; identical daily data yields an
/// identical result.
pub fn aggregate_month(
    profile: &EmployeeProfile,
    year: i32,
    month: u32,
    dailies: &[DailyPayrollRecord],
    cfg: &PayrollConfig,
) -> Option<MonthlyPayroll> {
    if dailies.is_empty() {
        return None;
    }

    let actual_hours: Decimal = dailies.iter().map(|d| d.actual_hours).sum();
    let overtime_hours: Decimal = dailies.iter().map(|d| d.overtime_hours).sum();
    let base_pay: Decimal = dailies.iter().map(|d| d.base_pay).sum();
    let overtime_pay: Decimal = dailies.iter().map(|d| d.overtime_pay).sum();
    let gross_salary: Decimal = dailies.iter().map(|d| d.gross_pay).sum();

    let calendar_working_days = cfg.calendar.working_days_in_month(year, month);
    let planned_hours = Decimal::from(calendar_working_days) * planned_daily_hours(profile, cfg);

    let taxes = cfg.tax.compute(gross_salary);

    Some(MonthlyPayroll {
        employee_id: profile.id,
        month,
        year,
        working_days: dailies.len() as u32,
        planned_hours,
        actual_hours,
        overtime_hours,
        base_pay,
        overtime_pay,
        gross_salary,
        taxes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
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

    fn daily(day: u32, regular: Decimal, overtime: Decimal, rate: Decimal) -> DailyPayrollRecord {
        let cfg = PayrollConfig::default();
        let base_pay = regular * rate;
        let overtime_pay = overtime * rate * dec!(1.5);
        let gross_pay = base_pay + overtime_pay;
        let taxes = cfg.tax.compute(gross_pay);
        DailyPayrollRecord {
            id: day as u64,
            employee_id: 1,
            work_date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            day_kind: "regular".into(),
            planned_hours: dec!(8),
            actual_hours: regular + overtime,
            regular_hours: regular,
            overtime_hours: overtime,
            effective_hourly_rate: rate,
            base_pay,
            overtime_pay,
            gross_pay,
            income_tax: taxes.income_tax,
            stamp_tax: taxes.stamp_tax,
            employee_social_security: taxes.employee_social_security,
            employee_unemployment: taxes.employee_unemployment,
            employer_social_security: taxes.employer_social_security,
            employer_unemployment: taxes.employer_unemployment,
            total_employee_deductions: taxes.total_employee_deductions,
            net_pay: taxes.net_pay,
            total_employer_cost: taxes.total_employer_cost,
            interval_count: 1,
            computed_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn empty_month_aggregates_to_none() {
        let cfg = PayrollConfig::default();
        assert_eq!(aggregate_month(&profile(), 2026, 2, &[], &cfg), None);
    }

    #[test]
    fn sums_match_daily_records() {
        let cfg = PayrollConfig::default();
        let dailies = vec![
            daily(2, dec!(8), dec!(2), dec!(50)),
            daily(3, dec!(8), Decimal::ZERO, dec!(50)),
            daily(4, dec!(6), Decimal::ZERO, dec!(50)),
        ];
        let monthly = aggregate_month(&profile(), 2026, 2, &dailies, &cfg).unwrap();

        assert_eq!(monthly.working_days, 3);
        assert_eq!(monthly.actual_hours, dec!(24));
        assert_eq!(monthly.overtime_hours, dec!(2));
        assert_eq!(monthly.base_pay, dec!(1100));
        assert_eq!(monthly.overtime_pay, dec!(150));
        let daily_gross: Decimal = dailies.iter().map(|d| d.gross_pay).sum();
        assert_eq!(monthly.gross_salary, daily_gross);
    }

    #[test]
    fn planned_hours_use_calendar_working_days() {
        let cfg = PayrollConfig::default();
        let dailies = vec![daily(2, dec!(8), Decimal::ZERO, dec!(50))];
        let monthly = aggregate_month(&profile(), 2026, 2, &dailies, &cfg).unwrap();
        // February 2026 has 20 working days, 8 planned hours each
        assert_eq!(monthly.planned_hours, dec!(160));
    }

    #[test]
    fn monthly_tax_recomputed_not_summed() {
        // Two days of 10000 gross each stay in the 15% bracket daily,
        // but the 20000 monthly gross crosses into the 20% bracket.
        let cfg = PayrollConfig::default();
        let dailies = vec![
            daily(2, dec!(8), Decimal::ZERO, dec!(1250)),
            daily(3, dec!(8), Decimal::ZERO, dec!(1250)),
        ];
        let summed_daily_tax: Decimal = dailies.iter().map(|d| d.income_tax).sum();
        let monthly = aggregate_month(&profile(), 2026, 2, &dailies, &cfg).unwrap();

        assert_eq!(summed_daily_tax, dec!(3000));
        assert_eq!(monthly.taxes.income_tax, dec!(3250));
        assert_eq!(
            monthly.taxes.net_pay + monthly.taxes.total_employee_deductions,
            monthly.gross_salary
        );
    }

    #[test]
    fn aggregation_is_idempotent() {
        let cfg = PayrollConfig::default();
        let dailies = vec![
            daily(2, dec!(8), dec!(1.5), dec!(62.5)),
            daily(3, dec!(7.25), Decimal::ZERO, dec!(50)),
        ];
        let first = aggregate_month(&profile(), 2026, 2, &dailies, &cfg).unwrap();
        let second = aggregate_month(&profile(), 2026, 2, &dailies, &cfg).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn consistent_records_pass_the_audit_check() {
        let dailies = vec![daily(2, dec!(8), dec!(2), dec!(50))];
        assert!(totals_consistent(&dailies));
    }

    #[test]
    fn tampered_records_fail_the_audit_check() {
        let mut dailies = vec![daily(2, dec!(8), dec!(2), dec!(50))];
        dailies[0].gross_pay += dec!(10);
        assert!(!totals_consistent(&dailies));
    }
}
