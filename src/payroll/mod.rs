pub mod calendar;
pub mod daily;
pub mod error;
pub mod event;
pub mod monthly;
pub mod rate;
pub mod service;
pub mod store;
pub mod tax;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use calendar::WorkCalendar;
use tax::TaxConfig;

/// Jurisdiction and policy knobs for the payroll engine. Built once from
/// the environment and passed explicitly into every calculation — the
/// engine keeps no module-level mutable state.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Applied when a profile resolves to no positive rate.
    pub fallback_hourly_rate: Decimal,
    /// Standard working days per month, used to turn a monthly salary
    /// into an hourly rate.
    pub monthly_working_days: u32,
    /// Planned daily hours when the profile carries none.
    pub default_daily_hours: Decimal,
    pub overtime_rate: Decimal,
    pub weekend_rate: Decimal,
    pub holiday_rate: Decimal,
    pub calendar: WorkCalendar,
    pub tax: TaxConfig,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            fallback_hourly_rate: dec!(50),
            monthly_working_days: 22,
            default_daily_hours: dec!(8),
            overtime_rate: dec!(1.5),
            weekend_rate: dec!(1.25),
            holiday_rate: dec!(2.0),
            calendar: WorkCalendar::default(),
            tax: TaxConfig::default(),
        }
    }
}
