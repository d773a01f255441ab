//! Per-step validation for the loan application wizard

use super::fields;
use super::form_state::{FormState, ValidationErrors};

pub const TOTAL_STEPS: u8 = 4;

const STEP1_REQUIRED: &[(&str, &str)] = &[
    (fields::LOAN_TYPE, "Please select a loan type"),
    (fields::AMOUNT, "Loan amount is required"),
    (fields::PURPOSE, "Loan purpose is required"),
    (fields::TERM, "Please select a repayment term"),
];

const STEP2_REQUIRED: &[(&str, &str)] = &[
    (fields::REPAYMENT_SOURCE, "Please select a source of repayment"),
    (fields::MONTHLY_INCOME, "Monthly income is required"),
    (fields::MONTHLY_EXPENSES, "Monthly expenses are required"),
];

const STEP3_REQUIRED: &[(&str, &str)] = &[
    (fields::GUARANTOR1_NAME, "Guarantor name is required"),
    (fields::GUARANTOR1_PHONE, "Guarantor phone is required"),
];

/// Fields that must be non-empty for a step to pass
pub fn required_fields(step: u8) -> &'static [(&'static str, &'static str)] {
    match step {
        1 => STEP1_REQUIRED,
        2 => STEP2_REQUIRED,
        3 => STEP3_REQUIRED,
        _ => &[],
    }
}

/// Check only the rules belonging to `step`. An empty result means the step is valid.
pub fn validate_step(step: u8, state: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for (field, message) in required_fields(step) {
        if state.is_blank(field) {
            errors.insert(field, *message);
        }
    }

    if step == 4 && !state.flag(fields::AGREE_TO_TERMS) {
        errors.insert(
            fields::AGREE_TO_TERMS,
            "You must agree to the terms and conditions",
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldValue;
    use pretty_assertions::assert_eq;

    fn step1_complete() -> FormState {
        FormState::new()
            .with(fields::LOAN_TYPE, FieldValue::choice("personal"))
            .with(fields::AMOUNT, FieldValue::numeric("1000000"))
            .with(fields::PURPOSE, FieldValue::text("stock"))
            .with(fields::TERM, FieldValue::choice("12"))
    }

    #[test]
    fn test_step1_valid_when_required_present() {
        assert!(validate_step(1, &step1_complete()).is_empty());
    }

    #[test]
    fn test_step1_missing_amount_reports_only_amount() {
        let state = step1_complete().with(fields::AMOUNT, FieldValue::numeric(""));
        let errors = validate_step(1, &state);
        let names: Vec<&str> = errors.fields().collect();
        assert_eq!(names, vec![fields::AMOUNT]);
    }

    #[test]
    fn test_empty_state_reports_every_step1_field() {
        let errors = validate_step(1, &FormState::new());
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(fields::LOAN_TYPE));
        assert!(errors.contains(fields::TERM));
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let state = step1_complete().with(fields::PURPOSE, FieldValue::text("   "));
        assert!(validate_step(1, &state).contains(fields::PURPOSE));
    }

    #[test]
    fn test_step_ignores_other_steps_fields() {
        // Step 1 data only; step 2 must complain about its own fields and nothing else
        let errors = validate_step(2, &step1_complete());
        assert_eq!(errors.len(), 3);
        assert!(!errors.contains(fields::AMOUNT));

        // Optional fields are never validated, even when empty
        let errors = validate_step(3, &FormState::new());
        assert!(!errors.contains(fields::GUARANTOR2_NAME));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_step4_requires_agreement() {
        let unchecked =
            FormState::new().with(fields::AGREE_TO_TERMS, FieldValue::Boolean(false));
        assert!(validate_step(4, &unchecked).contains(fields::AGREE_TO_TERMS));

        let checked = FormState::new().with(fields::AGREE_TO_TERMS, FieldValue::Boolean(true));
        assert!(validate_step(4, &checked).is_empty());
    }

    #[test]
    fn test_out_of_range_step_has_no_rules() {
        assert!(validate_step(0, &FormState::new()).is_empty());
        assert!(validate_step(5, &FormState::new()).is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let state = step1_complete();
        assert_eq!(validate_step(2, &state), validate_step(2, &state));
    }
}
