//! Single-step validate-then-submit forms

use super::catalog::{
    ACCOUNT_TYPES, EXPENSE_CATEGORIES, INCOME_SOURCES, PAYMENT_METHODS, STATEMENT_FORMATS,
};
use super::field::{FieldKind, FieldSpec};
use super::form_state::{Form, FormState, FormStore, ValidationErrors};
use super::requests::{
    DepositRequest, NewEmployee, NewExpense, NewOtherIncome, StatementRequest, WithdrawalRequest,
    DATE_FORMAT,
};
use crate::error::RequestError;
use crate::state::records::{AccountType, DataSnapshot};
use chrono::NaiveDate;

/// Field names shared by the single-step forms
pub mod names {
    pub const MEMBER_ID: &str = "memberId";
    pub const ACCOUNT_TYPE: &str = "accountType";
    pub const AMOUNT: &str = "amount";
    pub const PAYMENT_METHOD: &str = "paymentMethod";
    pub const REFERENCE: &str = "reference";
    pub const REASON: &str = "reason";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const FORMAT: &str = "format";
    pub const CATEGORY: &str = "category";
    pub const DESCRIPTION: &str = "description";
    pub const DATE: &str = "date";
    pub const SOURCE: &str = "source";
    pub const NAME: &str = "name";
    pub const POSITION: &str = "position";
    pub const DEPARTMENT: &str = "department";
    pub const SALARY: &str = "salary";
    pub const PHONE: &str = "phone";
}

const DEPOSIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(names::MEMBER_ID, "Member ID", FieldKind::Text),
    FieldSpec::required(names::ACCOUNT_TYPE, "Account", FieldKind::Choice(ACCOUNT_TYPES)),
    FieldSpec::required(names::AMOUNT, "Amount (UGX)", FieldKind::Numeric),
    FieldSpec::required(
        names::PAYMENT_METHOD,
        "Payment Method",
        FieldKind::Choice(PAYMENT_METHODS),
    ),
    FieldSpec::optional(names::REFERENCE, "Reference (optional)", FieldKind::Text),
];

const WITHDRAWAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(names::MEMBER_ID, "Member ID", FieldKind::Text),
    FieldSpec::required(names::ACCOUNT_TYPE, "Account", FieldKind::Choice(ACCOUNT_TYPES)),
    FieldSpec::required(names::AMOUNT, "Amount (UGX)", FieldKind::Numeric),
    FieldSpec::required(names::REASON, "Reason", FieldKind::Multiline),
];

const STATEMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(names::MEMBER_ID, "Member ID", FieldKind::Text),
    FieldSpec::required(names::ACCOUNT_TYPE, "Account", FieldKind::Choice(ACCOUNT_TYPES)),
    FieldSpec::required(names::START_DATE, "From (YYYY-MM-DD)", FieldKind::Text),
    FieldSpec::required(names::END_DATE, "To (YYYY-MM-DD)", FieldKind::Text),
    FieldSpec::required(names::FORMAT, "Format", FieldKind::Choice(STATEMENT_FORMATS)),
];

const EXPENSE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(names::CATEGORY, "Category", FieldKind::Choice(EXPENSE_CATEGORIES)),
    FieldSpec::required(names::DESCRIPTION, "Description", FieldKind::Text),
    FieldSpec::required(names::AMOUNT, "Amount (UGX)", FieldKind::Numeric),
    FieldSpec::required(names::DATE, "Date (YYYY-MM-DD)", FieldKind::Text),
];

const OTHER_INCOME_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(names::SOURCE, "Source", FieldKind::Choice(INCOME_SOURCES)),
    FieldSpec::required(names::DESCRIPTION, "Description", FieldKind::Text),
    FieldSpec::required(names::AMOUNT, "Amount (UGX)", FieldKind::Numeric),
    FieldSpec::required(names::DATE, "Date (YYYY-MM-DD)", FieldKind::Text),
];

const EMPLOYEE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(names::NAME, "Full Name", FieldKind::Text),
    FieldSpec::required(names::POSITION, "Position", FieldKind::Text),
    FieldSpec::required(names::DEPARTMENT, "Department", FieldKind::Text),
    FieldSpec::required(names::SALARY, "Monthly Salary (UGX)", FieldKind::Numeric),
    FieldSpec::optional(names::PHONE, "Phone (optional)", FieldKind::Text),
];

/// Which single-step form is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Deposit,
    Withdrawal,
    Statement,
    Expense,
    OtherIncome,
    Employee,
}

impl FormKind {
    pub fn title(&self, editing: bool) -> &'static str {
        match (self, editing) {
            (Self::Deposit, _) => "Deposit Request",
            (Self::Withdrawal, _) => "Withdrawal Request",
            (Self::Statement, _) => "Download Statement",
            (Self::Expense, _) => "Record Expense",
            (Self::OtherIncome, false) => "Record Other Income",
            (Self::OtherIncome, true) => "Edit Other Income",
            (Self::Employee, false) => "Add Employee",
            (Self::Employee, true) => "Edit Employee",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Deposit => DEPOSIT_FIELDS,
            Self::Withdrawal => WITHDRAWAL_FIELDS,
            Self::Statement => STATEMENT_FIELDS,
            Self::Expense => EXPENSE_FIELDS,
            Self::OtherIncome => OTHER_INCOME_FIELDS,
            Self::Employee => EMPLOYEE_FIELDS,
        }
    }
}

/// Typed payload produced by a successful submit
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Deposit(DepositRequest),
    Withdrawal(WithdrawalRequest),
    Statement(StatementRequest),
    Expense(NewExpense),
    OtherIncome {
        id: Option<String>,
        income: NewOtherIncome,
    },
    Employee {
        id: Option<String>,
        employee: NewEmployee,
    },
}

fn check_positive(state: &FormState, field: &'static str, errors: &mut ValidationErrors) {
    if errors.contains(field) {
        return;
    }
    match state.number(field) {
        Some(n) if n > 0.0 => {}
        _ => errors.insert(field, "Enter an amount greater than zero"),
    }
}

fn check_date(state: &FormState, field: &'static str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    if errors.contains(field) {
        return None;
    }
    match NaiveDate::parse_from_str(state.text(field), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.insert(field, "Use the format YYYY-MM-DD");
            None
        }
    }
}

/// Validate a single-step form. `snapshot` enables balance checks for withdrawals.
pub fn validate_form(
    kind: FormKind,
    state: &FormState,
    snapshot: Option<&DataSnapshot>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for spec in kind.fields().iter().filter(|s| s.required) {
        if state.is_blank(spec.name) {
            errors.insert(spec.name, format!("{} is required", spec.label));
        }
    }

    match kind {
        FormKind::Deposit | FormKind::Expense | FormKind::OtherIncome => {
            check_positive(state, names::AMOUNT, &mut errors);
        }
        FormKind::Employee => check_positive(state, names::SALARY, &mut errors),
        FormKind::Withdrawal => {
            check_positive(state, names::AMOUNT, &mut errors);
            if !errors.contains(names::AMOUNT) {
                let balance = snapshot.zip(AccountType::from_key(state.text(names::ACCOUNT_TYPE)))
                    .and_then(|(data, account)| {
                        data.available_balance(state.text(names::MEMBER_ID), account)
                    });
                if let (Some(balance), Some(amount)) = (balance, state.number(names::AMOUNT)) {
                    if amount > balance {
                        errors.insert(
                            names::AMOUNT,
                            format!("Amount exceeds available balance of {balance:.0}"),
                        );
                    }
                }
            }
        }
        FormKind::Statement => {
            let start = check_date(state, names::START_DATE, &mut errors);
            let end = check_date(state, names::END_DATE, &mut errors);
            if let (Some(start), Some(end)) = (start, end) {
                if start > end {
                    errors.insert(names::END_DATE, "End date must be on or after the start date");
                }
            }
        }
    }

    if matches!(kind, FormKind::Expense | FormKind::OtherIncome) {
        check_date(state, names::DATE, &mut errors);
    }

    if matches!(
        kind,
        FormKind::Deposit | FormKind::Withdrawal | FormKind::Statement
    ) && !errors.contains(names::MEMBER_ID)
    {
        if let Some(data) = snapshot {
            if data.member(state.text(names::MEMBER_ID)).is_none() {
                errors.insert(names::MEMBER_ID, "No member with this ID");
            }
        }
    }

    errors
}

#[derive(Debug, Clone)]
pub struct SingleStepForm {
    kind: FormKind,
    store: FormStore,
    active_field_index: usize,
    /// Id of the record being edited, if any
    editing: Option<String>,
}

impl SingleStepForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            store: FormStore::new(),
            active_field_index: 0,
            editing: None,
        }
    }

    /// Open the form prefilled, e.g. for editing an existing record
    pub fn prefilled(kind: FormKind, state: FormState, editing: Option<String>) -> Self {
        Self {
            kind,
            store: FormStore::from_state(state),
            active_field_index: 0,
            editing,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn title(&self) -> &'static str {
        self.kind.title(self.editing.is_some())
    }

    pub fn state(&self) -> &FormState {
        self.store.state()
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.store.errors()
    }

    /// Validate and, when clean, build the typed request
    pub fn submit(&mut self, snapshot: Option<&DataSnapshot>) -> Result<FormSubmission, ValidationErrors> {
        let errors = validate_form(self.kind, self.store.state(), snapshot);
        if !errors.is_empty() {
            self.store.set_errors(errors.clone());
            return Err(errors);
        }
        self.store.clear_errors();

        self.build().map_err(|err| {
            let mut errors = ValidationErrors::new();
            let field = match &err {
                RequestError::Missing(field) | RequestError::Invalid { field, .. } => *field,
            };
            errors.insert(field, err.to_string());
            self.store.set_errors(errors.clone());
            errors
        })
    }

    fn build(&self) -> Result<FormSubmission, RequestError> {
        let state = self.store.state();
        Ok(match self.kind {
            FormKind::Deposit => FormSubmission::Deposit(DepositRequest::try_from(state)?),
            FormKind::Withdrawal => FormSubmission::Withdrawal(WithdrawalRequest::try_from(state)?),
            FormKind::Statement => FormSubmission::Statement(StatementRequest::try_from(state)?),
            FormKind::Expense => FormSubmission::Expense(NewExpense::try_from(state)?),
            FormKind::OtherIncome => FormSubmission::OtherIncome {
                id: self.editing.clone(),
                income: NewOtherIncome::try_from(state)?,
            },
            FormKind::Employee => FormSubmission::Employee {
                id: self.editing.clone(),
                employee: NewEmployee::try_from(state)?,
            },
        })
    }
}

impl Form for SingleStepForm {
    fn field_count(&self) -> usize {
        self.kind.fields().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count().saturating_sub(1));
    }
    fn active_spec(&self) -> Option<&'static FieldSpec> {
        self.kind.fields().get(self.active_field_index)
    }
    fn store(&self) -> &FormStore {
        &self.store
    }
    fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }
}
