//! Figures derived from loan application input
//!
//! Everything here is a pure function of the form state and is recomputed on
//! every draw. Unparsable input produces zeros, never errors.

use super::catalog;
use super::fields;
use super::form_state::FormState;

/// Amortized monthly payment for `principal` at `annual_rate_percent` over `term_months`.
///
/// Returns 0 unless principal, rate and term are all positive.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_months: i64) -> f64 {
    let rate = annual_rate_percent / 100.0 / 12.0;
    if !(principal.is_finite() && principal > 0.0 && rate > 0.0 && term_months > 0) {
        return 0.0;
    }
    let growth = (1.0 + rate).powf(term_months as f64);
    principal * rate * growth / (growth - 1.0)
}

/// Requested amount, only when it is a positive finite number
pub fn principal(state: &FormState) -> Option<f64> {
    state.number(fields::AMOUNT).filter(|p| *p > 0.0)
}

pub fn interest_rate(state: &FormState) -> f64 {
    catalog::loan_type(state.text(fields::LOAN_TYPE))
        .map(|t| t.interest_rate)
        .unwrap_or(0.0)
}

pub fn term_months(state: &FormState) -> i64 {
    state.integer(fields::TERM).unwrap_or(0)
}

pub fn monthly_payment_for(state: &FormState) -> f64 {
    match principal(state) {
        Some(p) => monthly_payment(p, interest_rate(state), term_months(state)),
        None => 0.0,
    }
}

/// Income minus expenses, both read as integers
pub fn net_income(state: &FormState) -> i64 {
    let income = state.integer(fields::MONTHLY_INCOME).unwrap_or(0);
    let expenses = state.integer(fields::MONTHLY_EXPENSES).unwrap_or(0);
    income.saturating_sub(expenses)
}

/// Monthly payment as a rounded percentage of monthly income
pub fn debt_to_income(state: &FormState) -> i64 {
    let income = state.integer(fields::MONTHLY_INCOME).unwrap_or(0);
    if income <= 0 {
        return 0;
    }
    (monthly_payment_for(state) / income as f64 * 100.0).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordability {
    Good,
    Poor,
}

impl Affordability {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Poor => "Poor",
        }
    }
}

pub fn affordability(state: &FormState) -> Affordability {
    if net_income(state) > 0 {
        Affordability::Good
    } else {
        Affordability::Poor
    }
}

/// All derived figures shown alongside the wizard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub total_interest: f64,
    pub net_income: i64,
    pub debt_to_income: i64,
    pub affordability: Affordability,
    /// Requested amount is above the selected product's ceiling (informational)
    pub exceeds_maximum: bool,
}

impl LoanSummary {
    pub fn from_state(state: &FormState) -> Self {
        let payment = monthly_payment_for(state);
        let total_repayment = payment * term_months(state).max(0) as f64;
        let total_interest = match principal(state) {
            Some(p) if total_repayment > 0.0 => total_repayment - p,
            _ => 0.0,
        };
        let exceeds_maximum = match (
            catalog::loan_type(state.text(fields::LOAN_TYPE)),
            principal(state),
        ) {
            (Some(t), Some(p)) => p > t.max_amount,
            _ => false,
        };

        Self {
            monthly_payment: payment,
            total_repayment,
            total_interest,
            net_income: net_income(state),
            debt_to_income: debt_to_income(state),
            affordability: affordability(state),
            exceeds_maximum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldValue;

    fn loan(loan_type: &str, amount: &str, term: &str) -> FormState {
        FormState::new()
            .with(fields::LOAN_TYPE, FieldValue::choice(loan_type))
            .with(fields::AMOUNT, FieldValue::numeric(amount))
            .with(fields::TERM, FieldValue::choice(term))
    }

    #[test]
    fn test_monthly_payment_reference_value() {
        let payment = monthly_payment(5_000_000.0, 12.0, 24);
        assert!((payment - 235_367.35).abs() < 1.0, "got {payment}");
    }

    #[test]
    fn test_monthly_payment_zero_inputs() {
        assert_eq!(monthly_payment(0.0, 12.0, 24), 0.0);
        assert_eq!(monthly_payment(5_000_000.0, 12.0, 0), 0.0);
        assert_eq!(monthly_payment(5_000_000.0, 0.0, 24), 0.0);
        assert_eq!(monthly_payment(-10.0, 12.0, 24), 0.0);
    }

    #[test]
    fn test_monthly_payment_from_state_uses_catalog_rate() {
        let state = loan("personal", "5000000", "24");
        let payment = monthly_payment_for(&state);
        assert!((payment - 235_367.35).abs() < 1.0);
    }

    #[test]
    fn test_net_income_saturates_at_extremes() {
        let state = FormState::new()
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("-9223372036854775808"))
            .with(fields::MONTHLY_EXPENSES, FieldValue::numeric("1"));
        assert_eq!(net_income(&state), i64::MIN);

        let state = FormState::new()
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("9223372036854775807"))
            .with(fields::MONTHLY_EXPENSES, FieldValue::numeric("-1"));
        let summary = LoanSummary::from_state(&state);
        assert_eq!(summary.net_income, i64::MAX);
        assert_eq!(summary.affordability, Affordability::Good);
    }

    #[test]
    fn test_unparsable_amount_yields_zero_payment() {
        assert_eq!(monthly_payment_for(&loan("personal", "abc", "24")), 0.0);
        assert_eq!(monthly_payment_for(&loan("personal", "-5", "24")), 0.0);
        assert_eq!(monthly_payment_for(&FormState::new()), 0.0);
        assert_eq!(monthly_payment_for(&loan("unknown", "1000", "12")), 0.0);
    }

    #[test]
    fn test_net_income_treats_non_numeric_as_zero() {
        let state = FormState::new()
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("500000"))
            .with(fields::MONTHLY_EXPENSES, FieldValue::text("lots"));
        assert_eq!(net_income(&state), 500_000);
        assert_eq!(affordability(&state), Affordability::Good);
    }

    #[test]
    fn test_debt_to_income_zero_income() {
        let state = loan("personal", "5000000", "24")
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("0"));
        assert_eq!(debt_to_income(&state), 0);
        assert_eq!(debt_to_income(&loan("personal", "5000000", "24")), 0);
    }

    #[test]
    fn test_debt_to_income_rounds() {
        let state = loan("personal", "5000000", "24")
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("1000000"));
        // 235,367 / 1,000,000 = 23.5%
        assert_eq!(debt_to_income(&state), 24);
    }

    #[test]
    fn test_poor_affordability_when_expenses_match_income() {
        let state = FormState::new()
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("200"))
            .with(fields::MONTHLY_EXPENSES, FieldValue::numeric("200"));
        assert_eq!(affordability(&state), Affordability::Poor);
    }

    #[test]
    fn test_summary_is_repeatable() {
        let state = loan("business", "12000000", "36")
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("900000"))
            .with(fields::MONTHLY_EXPENSES, FieldValue::numeric("300000"));
        assert_eq!(LoanSummary::from_state(&state), LoanSummary::from_state(&state));
    }

    #[test]
    fn test_summary_flags_amount_over_maximum() {
        let summary = LoanSummary::from_state(&loan("emergency", "3000000", "12"));
        assert!(summary.exceeds_maximum);
        assert!(summary.total_interest > 0.0);
        let within = LoanSummary::from_state(&loan("emergency", "1000000", "12"));
        assert!(!within.exceeds_maximum);
    }
}
