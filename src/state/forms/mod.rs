//! Form domain layer
//!
//! Field values, per-form stores, the loan application wizard and the
//! single-step request forms. Nothing in here touches the terminal.

pub mod calculators;
pub mod catalog;
mod field;
pub mod fields;
mod form_state;
mod loan_wizard;
mod requests;
mod single_step;
pub mod validation;

pub use calculators::{Affordability, LoanSummary};
pub use field::{FieldKind, FieldSpec, FieldValue};
pub use form_state::{Form, FormState, ValidationErrors};
pub use loan_wizard::{LoanWizard, SubmissionHandler, SubmitOutcome};
pub use requests::{
    DepositRequest, LoanApplication, NewEmployee, NewExpense, NewOtherIncome, StatementFormat,
    StatementRequest, WithdrawalRequest, DATE_FORMAT,
};
pub use single_step::{names, FormKind, FormSubmission, SingleStepForm};
pub use validation::TOTAL_STEPS;
