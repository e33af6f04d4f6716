//! Gross-to-net tax computation.
//!
//! Pure arithmetic: the same gross pay always yields the same breakdown.
//! Bracket boundaries and rates are configuration, swappable per
//! jurisdiction; the shipped defaults are illustrative flat-rate
//! approximations of a single jurisdiction, not tax-law advice.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Monetary values are stored with 2 decimal places, half-up.
pub const MONEY_DP: u32 = 2;

/// Tolerance for monetary comparisons (0.01).
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// One slice of the progressive income-tax schedule. `upper` is the
/// inclusive upper bound of the slice; `None` marks the unbounded top
/// slice. Brackets are ordered by ascending `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// Tax and contribution rates for one jurisdiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfig {
    pub brackets: Vec<TaxBracket>,
    pub stamp_tax_rate: Decimal,
    pub employee_social_security_rate: Decimal,
    pub employer_social_security_rate: Decimal,
    pub employee_unemployment_rate: Decimal,
    pub employer_unemployment_rate: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            brackets: vec![
                TaxBracket { upper: Some(dec!(15000)), rate: dec!(0.15) },
                TaxBracket { upper: Some(dec!(40000)), rate: dec!(0.20) },
                TaxBracket { upper: Some(dec!(100000)), rate: dec!(0.27) },
                TaxBracket { upper: None, rate: dec!(0.35) },
            ],
            stamp_tax_rate: dec!(0.00759),
            employee_social_security_rate: dec!(0.14),
            employer_social_security_rate: dec!(0.205),
            employee_unemployment_rate: dec!(0.01),
            employer_unemployment_rate: dec!(0.02),
        }
    }
}

/// Full gross-pay breakdown: employee-side deductions, employer-side
/// contributions and the resulting net pay / employer cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxBreakdown {
    pub income_tax: Decimal,
    pub stamp_tax: Decimal,
    pub employee_social_security: Decimal,
    pub employee_unemployment: Decimal,
    pub employer_social_security: Decimal,
    pub employer_unemployment: Decimal,
    pub total_employee_deductions: Decimal,
    pub net_pay: Decimal,
    pub total_employer_cost: Decimal,
}

impl TaxConfig {
    /// Progressive income tax over the bracket table.
    pub fn income_tax(&self, gross: Decimal) -> Decimal {
        let mut tax = Decimal::ZERO;
        let mut lower = Decimal::ZERO;
        for bracket in &self.brackets {
            match bracket.upper {
                Some(upper) if gross > upper => {
                    tax += (upper - lower) * bracket.rate;
                    lower = upper;
                }
                _ => {
                    tax += (gross - lower).max(Decimal::ZERO) * bracket.rate;
                    break;
                }
            }
        }
        round_money(tax)
    }

    /// Computes the full breakdown for a non-negative gross amount.
    ///
    /// Each component is rounded to money precision before summing, so
    /// `net_pay + total_employee_deductions == gross` holds exactly.
    pub fn compute(&self, gross: Decimal) -> TaxBreakdown {
        let gross = gross.max(Decimal::ZERO);

        let income_tax = self.income_tax(gross);
        let stamp_tax = round_money(gross * self.stamp_tax_rate);
        let employee_social_security = round_money(gross * self.employee_social_security_rate);
        let employee_unemployment = round_money(gross * self.employee_unemployment_rate);
        let employer_social_security = round_money(gross * self.employer_social_security_rate);
        let employer_unemployment = round_money(gross * self.employer_unemployment_rate);

        let total_employee_deductions =
            income_tax + stamp_tax + employee_social_security + employee_unemployment;
        let net_pay = gross - total_employee_deductions;
        let total_employer_cost = gross + employer_social_security + employer_unemployment;

        TaxBreakdown {
            income_tax,
            stamp_tax,
            employee_social_security,
            employee_unemployment,
            employer_social_security,
            employer_unemployment,
            total_employee_deductions,
            net_pay,
            total_employer_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_gross_zero_everything() {
        let breakdown = TaxConfig::default().compute(Decimal::ZERO);
        assert_eq!(breakdown.income_tax, Decimal::ZERO);
        assert_eq!(breakdown.total_employee_deductions, Decimal::ZERO);
        assert_eq!(breakdown.net_pay, Decimal::ZERO);
        assert_eq!(breakdown.total_employer_cost, Decimal::ZERO);
    }

    #[test]
    fn first_bracket_only() {
        let cfg = TaxConfig::default();
        assert_eq!(cfg.income_tax(dec!(10000)), dec!(1500));
        // boundary value stays in the first bracket
        assert_eq!(cfg.income_tax(dec!(15000)), dec!(2250));
    }

    #[test]
    fn crosses_into_second_bracket() {
        // 15000 * 0.15 + 5000 * 0.20
        assert_eq!(TaxConfig::default().income_tax(dec!(20000)), dec!(3250));
    }

    #[test]
    fn top_bracket_is_unbounded() {
        // 2250 + 5000 + 16200 + 50000 * 0.35
        assert_eq!(TaxConfig::default().income_tax(dec!(150000)), dec!(40950));
    }

    #[test]
    fn net_plus_deductions_equals_gross() {
        let cfg = TaxConfig::default();
        let mut gross = Decimal::ZERO;
        while gross <= dec!(120000) {
            let b = cfg.compute(gross);
            assert_eq!(b.net_pay + b.total_employee_deductions, gross, "gross {gross}");
            gross += dec!(333.33);
        }
    }

    #[test]
    fn income_tax_is_monotonic() {
        let cfg = TaxConfig::default();
        let mut previous = Decimal::ZERO;
        let mut gross = Decimal::ZERO;
        while gross <= dec!(120000) {
            let tax = cfg.income_tax(gross);
            assert!(tax >= previous, "marginal rate went negative at gross {gross}");
            previous = tax;
            gross += dec!(250);
        }
    }

    #[test]
    fn flat_rates_apply_to_gross() {
        let b = TaxConfig::default().compute(dec!(550));
        assert_eq!(b.income_tax, dec!(82.50));
        assert_eq!(b.stamp_tax, dec!(4.17));
        assert_eq!(b.employee_social_security, dec!(77.00));
        assert_eq!(b.employee_unemployment, dec!(5.50));
        assert_eq!(b.total_employee_deductions, dec!(169.17));
        assert_eq!(b.net_pay, dec!(380.83));
        assert_eq!(b.employer_social_security, dec!(112.75));
        assert_eq!(b.employer_unemployment, dec!(11.00));
        assert_eq!(b.total_employer_cost, dec!(673.75));
    }

    #[test]
    fn negative_gross_treated_as_zero() {
        let breakdown = TaxConfig::default().compute(dec!(-100));
        assert_eq!(breakdown.net_pay, Decimal::ZERO);
    }

    #[test]
    fn same_gross_same_breakdown() {
        let cfg = TaxConfig::default();
        assert_eq!(cfg.compute(dec!(12345.67)), cfg.compute(dec!(12345.67)));
    }
}
