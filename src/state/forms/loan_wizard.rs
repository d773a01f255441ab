//! Four-step loan application wizard
//!
//! The wizard owns a [`FormStore`] for the whole session and a [`StepController`]
//! that only moves forward when the current step validates. Going back is always
//! allowed and keeps every value entered so far.

use super::calculators::LoanSummary;
use super::field::{FieldSpec, FieldValue};
use super::fields;
use super::form_state::{Form, FormState, FormStore, ValidationErrors};
use super::validation::{validate_step, TOTAL_STEPS};
use crate::error::SubmissionError;
use async_trait::async_trait;

/// Receives the outcome of a wizard session
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionHandler: Send {
    /// Called once with the full form state after the last step validates
    async fn on_submit(&mut self, state: &FormState) -> Result<(), SubmissionError>;
    /// Called when the user dismisses the wizard
    fn on_cancel(&mut self);
}

/// Linear step counter clamped to `1..=TOTAL_STEPS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    current: u8,
}

impl Default for StepController {
    fn default() -> Self {
        Self::new()
    }
}

impl StepController {
    pub fn new() -> Self {
        Self { current: 1 }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == TOTAL_STEPS
    }

    /// Validate the current step and advance when it passes.
    /// Returns the errors that blocked the move (empty when it succeeded).
    pub fn next(&mut self, state: &FormState) -> ValidationErrors {
        let errors = validate_step(self.current, state);
        if errors.is_empty() && self.current < TOTAL_STEPS {
            self.current += 1;
        }
        errors
    }

    /// Step back without validating
    pub fn previous(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }
}

/// Result of a submit attempt that did not fail at the handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submit is only reachable from the last step
    NotOnFinalStep,
    /// The handler already accepted this wizard's state
    AlreadySubmitted,
    Invalid(ValidationErrors),
    Submitted,
}

#[derive(Debug, Clone, Default)]
pub struct LoanWizard {
    store: FormStore,
    steps: StepController,
    active_field_index: usize,
    completed: bool,
}

impl LoanWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.steps.current()
    }

    pub fn is_first_step(&self) -> bool {
        self.steps.is_first()
    }

    pub fn is_last_step(&self) -> bool {
        self.steps.is_last()
    }

    #[cfg(test)]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn state(&self) -> &FormState {
        self.store.state()
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.store.errors()
    }

    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        self.store.set_field(name, value);
    }

    pub fn current_fields(&self) -> &'static [FieldSpec] {
        fields::step_fields(self.step())
    }

    /// Derived figures for the current input
    pub fn summary(&self) -> LoanSummary {
        LoanSummary::from_state(self.store.state())
    }

    /// Try to move to the next step. Errors stay on display when blocked.
    pub fn next(&mut self) -> ValidationErrors {
        let before = self.steps.current();
        let errors = self.steps.next(self.store.state());
        self.store.set_errors(errors.clone());
        if self.steps.current() != before {
            self.active_field_index = 0;
            tracing::debug!(from = before, to = self.steps.current(), "wizard advanced");
        } else if !errors.is_empty() {
            tracing::debug!(step = before, errors = errors.len(), "wizard step blocked");
        }
        errors
    }

    pub fn previous(&mut self) {
        self.steps.previous();
        self.store.clear_errors();
        self.active_field_index = 0;
    }

    /// Validate the last step and hand the full form state to `handler`.
    ///
    /// The wizard is marked complete only when the handler accepts the state.
    pub async fn submit<H>(&mut self, handler: &mut H) -> Result<SubmitOutcome, SubmissionError>
    where
        H: SubmissionHandler + ?Sized,
    {
        if self.completed {
            return Ok(SubmitOutcome::AlreadySubmitted);
        }
        if !self.steps.is_last() {
            return Ok(SubmitOutcome::NotOnFinalStep);
        }
        let errors = validate_step(self.steps.current(), self.store.state());
        if !errors.is_empty() {
            self.store.set_errors(errors.clone());
            return Ok(SubmitOutcome::Invalid(errors));
        }
        self.store.clear_errors();
        handler.on_submit(self.store.state()).await?;
        self.completed = true;
        tracing::info!(fields = self.store.state().len(), "loan application submitted");
        Ok(SubmitOutcome::Submitted)
    }

    pub fn cancel<H>(&mut self, handler: &mut H)
    where
        H: SubmissionHandler + ?Sized,
    {
        handler.on_cancel();
    }
}

impl Form for LoanWizard {
    fn field_count(&self) -> usize {
        self.current_fields().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count().saturating_sub(1));
    }
    fn active_spec(&self) -> Option<&'static FieldSpec> {
        self.current_fields().get(self.active_field_index)
    }
    fn store(&self) -> &FormStore {
        &self.store
    }
    fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::state::forms::FieldValue;
    use pretty_assertions::assert_eq;

    fn fill_step1(wizard: &mut LoanWizard) {
        wizard.set_field(fields::LOAN_TYPE, FieldValue::choice("personal"));
        wizard.set_field(fields::AMOUNT, FieldValue::numeric("1000000"));
        wizard.set_field(fields::PURPOSE, FieldValue::text("test"));
        wizard.set_field(fields::TERM, FieldValue::choice("12"));
    }

    fn minimal_payload() -> Vec<(&'static str, FieldValue)> {
        vec![
            (fields::LOAN_TYPE, FieldValue::choice("personal")),
            (fields::AMOUNT, FieldValue::numeric("1000000")),
            (fields::PURPOSE, FieldValue::text("test")),
            (fields::TERM, FieldValue::choice("12")),
            (fields::REPAYMENT_SOURCE, FieldValue::choice("salary")),
            (fields::MONTHLY_INCOME, FieldValue::numeric("500000")),
            (fields::MONTHLY_EXPENSES, FieldValue::numeric("200000")),
            (fields::GUARANTOR1_NAME, FieldValue::text("A")),
            (fields::GUARANTOR1_PHONE, FieldValue::text("+256700000000")),
            (fields::AGREE_TO_TERMS, FieldValue::Boolean(true)),
        ]
    }

    #[test]
    fn test_next_blocked_on_invalid_step() {
        let mut wizard = LoanWizard::new();
        let errors = wizard.next();
        assert_eq!(wizard.step(), 1);
        assert!(!errors.is_empty());
        assert_eq!(wizard.errors(), &errors);
    }

    #[test]
    fn test_next_advances_on_valid_step() {
        let mut wizard = LoanWizard::new();
        fill_step1(&mut wizard);
        let errors = wizard.next();
        assert!(errors.is_empty());
        assert_eq!(wizard.step(), 2);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_previous_clamps_at_first_step() {
        let mut wizard = LoanWizard::new();
        wizard.previous();
        assert_eq!(wizard.step(), 1);
        assert!(wizard.is_first_step());
    }

    #[test]
    fn test_previous_keeps_values_and_clears_errors() {
        let mut wizard = LoanWizard::new();
        fill_step1(&mut wizard);
        wizard.next();
        wizard.next(); // step 2 empty, blocked
        assert!(!wizard.errors().is_empty());

        wizard.previous();
        assert_eq!(wizard.step(), 1);
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.state().text(fields::PURPOSE), "test");
    }

    #[test]
    fn test_advance_discards_previous_step_errors() {
        let mut wizard = LoanWizard::new();
        wizard.next();
        assert!(wizard.errors().contains(fields::AMOUNT));
        fill_step1(&mut wizard);
        // Editing cleared the per-field errors already
        assert!(wizard.errors().is_empty());
        wizard.next();
        assert_eq!(wizard.step(), 2);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_step_controller_ceiling() {
        let mut steps = StepController::new();
        let state = FormState::new()
            .with(fields::LOAN_TYPE, FieldValue::choice("personal"))
            .with(fields::AMOUNT, FieldValue::numeric("1"))
            .with(fields::PURPOSE, FieldValue::text("p"))
            .with(fields::TERM, FieldValue::choice("6"))
            .with(fields::REPAYMENT_SOURCE, FieldValue::choice("salary"))
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("1"))
            .with(fields::MONTHLY_EXPENSES, FieldValue::numeric("1"))
            .with(fields::GUARANTOR1_NAME, FieldValue::text("g"))
            .with(fields::GUARANTOR1_PHONE, FieldValue::text("1"))
            .with(fields::AGREE_TO_TERMS, FieldValue::Boolean(true));
        for _ in 0..10 {
            steps.next(&state);
        }
        assert_eq!(steps.current(), TOTAL_STEPS);
        assert!(steps.is_last());
    }

    #[tokio::test]
    async fn test_submit_only_from_last_step() {
        let mut wizard = LoanWizard::new();
        let mut handler = MockSubmissionHandler::new();
        handler.expect_on_submit().never();
        assert_eq!(
            wizard.submit(&mut handler).await.unwrap(),
            SubmitOutcome::NotOnFinalStep
        );
    }

    #[tokio::test]
    async fn test_end_to_end_submits_once_with_all_fields() {
        let payload = minimal_payload();
        let mut wizard = LoanWizard::new();
        for (name, value) in &payload {
            wizard.set_field(name, value.clone());
        }
        for expected_step in 2..=4 {
            assert!(wizard.next().is_empty());
            assert_eq!(wizard.step(), expected_step);
        }

        let expected = payload.clone();
        let mut handler = MockSubmissionHandler::new();
        handler
            .expect_on_submit()
            .times(1)
            .withf(move |state| {
                state.len() == expected.len()
                    && expected
                        .iter()
                        .all(|(name, value)| state.get(name) == Some(value))
            })
            .returning(|_| Ok(()));
        handler.expect_on_cancel().never();

        assert_eq!(wizard.submit(&mut handler).await.unwrap(), SubmitOutcome::Submitted);
        assert!(wizard.is_completed());
        assert_eq!(wizard.step(), 4);
    }

    #[tokio::test]
    async fn test_second_submit_is_not_filed() {
        let mut wizard = LoanWizard::new();
        for (name, value) in minimal_payload() {
            wizard.set_field(name, value);
        }
        wizard.next();
        wizard.next();
        wizard.next();
        let mut handler = MockSubmissionHandler::new();
        handler.expect_on_submit().times(1).returning(|_| Ok(()));

        assert_eq!(wizard.submit(&mut handler).await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(
            wizard.submit(&mut handler).await.unwrap(),
            SubmitOutcome::AlreadySubmitted
        );
    }

    #[tokio::test]
    async fn test_submit_without_agreement_is_invalid() {
        let mut wizard = LoanWizard::new();
        for (name, value) in minimal_payload() {
            if name != fields::AGREE_TO_TERMS {
                wizard.set_field(name, value);
            }
        }
        wizard.next();
        wizard.next();
        wizard.next();
        let mut handler = MockSubmissionHandler::new();
        handler.expect_on_submit().never();

        let outcome = wizard.submit(&mut handler).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.contains(fields::AGREE_TO_TERMS)));
        assert!(!wizard.is_completed());
    }

    #[tokio::test]
    async fn test_handler_failure_keeps_wizard_open() {
        let mut wizard = LoanWizard::new();
        for (name, value) in minimal_payload() {
            wizard.set_field(name, value);
        }
        wizard.next();
        wizard.next();
        wizard.next();
        let mut handler = MockSubmissionHandler::new();
        handler
            .expect_on_submit()
            .times(1)
            .returning(|_| Err(DataError::InvalidState("offline".into()).into()));

        assert!(wizard.submit(&mut handler).await.is_err());
        assert!(!wizard.is_completed());
        assert_eq!(wizard.step(), 4);
    }

    #[test]
    fn test_cancel_notifies_handler() {
        let mut wizard = LoanWizard::new();
        let mut handler = MockSubmissionHandler::new();
        handler.expect_on_cancel().times(1).return_const(());
        wizard.cancel(&mut handler);
    }

    #[test]
    fn test_active_field_follows_step_layout() {
        let mut wizard = LoanWizard::new();
        wizard.set_active_field(99);
        assert_eq!(wizard.active_field(), wizard.field_count() - 1);
        wizard.next_field();
        assert_eq!(wizard.active_field(), 0);
        assert_eq!(wizard.active_spec().unwrap().name, fields::LOAN_TYPE);
    }

    #[test]
    fn test_edit_active_routes_through_store() {
        let mut wizard = LoanWizard::new();
        wizard.set_active_field(1); // amount
        wizard.next(); // record errors
        assert!(wizard.errors().contains(fields::AMOUNT));
        wizard.edit_active(|v| v.with_char('7'));
        assert_eq!(wizard.state().text(fields::AMOUNT), "7");
        assert!(!wizard.errors().contains(fields::AMOUNT));
        assert!(wizard.errors().contains(fields::PURPOSE));
    }
}
