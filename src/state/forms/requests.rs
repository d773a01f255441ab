//! Typed requests built from validated form state

use super::calculators;
use super::catalog;
use super::fields;
use super::form_state::FormState;
use super::single_step::names;
use crate::error::RequestError;
use crate::state::records::AccountType;
use chrono::NaiveDate;
use std::path::PathBuf;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn required_text(state: &FormState, field: &'static str) -> Result<String, RequestError> {
    state.optional_text(field).ok_or(RequestError::Missing(field))
}

fn positive_amount(state: &FormState, field: &'static str) -> Result<f64, RequestError> {
    if state.is_blank(field) {
        return Err(RequestError::Missing(field));
    }
    state
        .number(field)
        .filter(|n| *n > 0.0)
        .ok_or_else(|| RequestError::Invalid {
            field,
            reason: "must be a positive number".to_string(),
        })
}

fn account_type(state: &FormState, field: &'static str) -> Result<AccountType, RequestError> {
    let key = required_text(state, field)?;
    AccountType::from_key(&key).ok_or_else(|| RequestError::Invalid {
        field,
        reason: format!("unknown account type '{key}'"),
    })
}

pub fn parse_date(state: &FormState, field: &'static str) -> Result<NaiveDate, RequestError> {
    let raw = required_text(state, field)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| RequestError::Invalid {
        field,
        reason: "expected a date as YYYY-MM-DD".to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guarantor {
    pub name: String,
    pub phone: String,
    pub member_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub field: &'static str,
    pub path: PathBuf,
}

/// A completed loan application
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    pub loan_type: String,
    pub amount: f64,
    pub purpose: String,
    pub term_months: u32,
    pub interest_rate: f64,
    pub collateral: Option<String>,
    pub repayment_source: String,
    pub employer_name: Option<String>,
    pub other_loans: Option<String>,
    pub monthly_income: i64,
    pub monthly_expenses: i64,
    pub monthly_payment: f64,
    pub guarantors: Vec<Guarantor>,
    pub documents: Vec<DocumentRef>,
}

impl TryFrom<&FormState> for LoanApplication {
    type Error = RequestError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        let loan_type = required_text(state, fields::LOAN_TYPE)?;
        let product = catalog::loan_type(&loan_type).ok_or_else(|| RequestError::Invalid {
            field: fields::LOAN_TYPE,
            reason: format!("unknown loan type '{loan_type}'"),
        })?;
        let amount = positive_amount(state, fields::AMOUNT)?;
        let term_months = state
            .integer(fields::TERM)
            .and_then(|t| u32::try_from(t).ok())
            .filter(|t| *t > 0)
            .ok_or_else(|| RequestError::Invalid {
                field: fields::TERM,
                reason: "must be a whole number of months".to_string(),
            })?;

        let mut guarantors = vec![Guarantor {
            name: required_text(state, fields::GUARANTOR1_NAME)?,
            phone: required_text(state, fields::GUARANTOR1_PHONE)?,
            member_id: state.optional_text(fields::GUARANTOR1_MEMBER_ID),
        }];
        if let Some(name) = state.optional_text(fields::GUARANTOR2_NAME) {
            guarantors.push(Guarantor {
                name,
                phone: state.text(fields::GUARANTOR2_PHONE).to_string(),
                member_id: state.optional_text(fields::GUARANTOR2_MEMBER_ID),
            });
        }

        let documents = [fields::ID_DOCUMENT, fields::PAYSLIP, fields::BANK_STATEMENT]
            .into_iter()
            .filter_map(|field| {
                state
                    .get(field)
                    .and_then(|v| v.as_path())
                    .map(|path| DocumentRef {
                        field,
                        path: path.clone(),
                    })
            })
            .collect();

        Ok(Self {
            purpose: required_text(state, fields::PURPOSE)?,
            repayment_source: required_text(state, fields::REPAYMENT_SOURCE)?,
            monthly_income: state
                .integer(fields::MONTHLY_INCOME)
                .ok_or(RequestError::Missing(fields::MONTHLY_INCOME))?,
            monthly_expenses: state
                .integer(fields::MONTHLY_EXPENSES)
                .ok_or(RequestError::Missing(fields::MONTHLY_EXPENSES))?,
            monthly_payment: calculators::monthly_payment_for(state),
            interest_rate: product.interest_rate,
            collateral: state.optional_text(fields::COLLATERAL),
            employer_name: state.optional_text(fields::EMPLOYER_NAME),
            other_loans: state.optional_text(fields::OTHER_LOANS),
            loan_type,
            amount,
            term_months,
            guarantors,
            documents,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepositRequest {
    pub member_id: String,
    pub account_type: AccountType,
    pub amount: f64,
    pub payment_method: String,
    pub reference: Option<String>,
}

impl TryFrom<&FormState> for DepositRequest {
    type Error = RequestError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: required_text(state, names::MEMBER_ID)?,
            account_type: account_type(state, names::ACCOUNT_TYPE)?,
            amount: positive_amount(state, names::AMOUNT)?,
            payment_method: required_text(state, names::PAYMENT_METHOD)?,
            reference: state.optional_text(names::REFERENCE),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalRequest {
    pub member_id: String,
    pub account_type: AccountType,
    pub amount: f64,
    pub reason: String,
}

impl TryFrom<&FormState> for WithdrawalRequest {
    type Error = RequestError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: required_text(state, names::MEMBER_ID)?,
            account_type: account_type(state, names::ACCOUNT_TYPE)?,
            amount: positive_amount(state, names::AMOUNT)?,
            reason: required_text(state, names::REASON)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    Pdf,
    Csv,
    Excel,
}

impl StatementFormat {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pdf" => Some(Self::Pdf),
            "csv" => Some(Self::Csv),
            "excel" => Some(Self::Excel),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Csv => "CSV",
            Self::Excel => "Excel",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementRequest {
    pub member_id: String,
    pub account_type: AccountType,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: StatementFormat,
}

impl TryFrom<&FormState> for StatementRequest {
    type Error = RequestError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        let start = parse_date(state, names::START_DATE)?;
        let end = parse_date(state, names::END_DATE)?;
        if start > end {
            return Err(RequestError::Invalid {
                field: names::END_DATE,
                reason: "must not be before the start date".to_string(),
            });
        }
        let format_key = required_text(state, names::FORMAT)?;
        let format = StatementFormat::from_key(&format_key).ok_or_else(|| {
            RequestError::Invalid {
                field: names::FORMAT,
                reason: format!("unknown format '{format_key}'"),
            }
        })?;
        Ok(Self {
            member_id: required_text(state, names::MEMBER_ID)?,
            account_type: account_type(state, names::ACCOUNT_TYPE)?,
            start,
            end,
            format,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl TryFrom<&FormState> for NewExpense {
    type Error = RequestError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        Ok(Self {
            category: required_text(state, names::CATEGORY)?,
            description: required_text(state, names::DESCRIPTION)?,
            amount: positive_amount(state, names::AMOUNT)?,
            date: parse_date(state, names::DATE)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOtherIncome {
    pub source: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl TryFrom<&FormState> for NewOtherIncome {
    type Error = RequestError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        Ok(Self {
            source: required_text(state, names::SOURCE)?,
            description: required_text(state, names::DESCRIPTION)?,
            amount: positive_amount(state, names::AMOUNT)?,
            date: parse_date(state, names::DATE)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub phone: Option<String>,
}

impl TryFrom<&FormState> for NewEmployee {
    type Error = RequestError;

    fn try_from(state: &FormState) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text(state, names::NAME)?,
            position: required_text(state, names::POSITION)?,
            department: required_text(state, names::DEPARTMENT)?,
            salary: positive_amount(state, names::SALARY)?,
            phone: state.optional_text(names::PHONE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldValue;
    use pretty_assertions::assert_eq;

    fn application_state() -> FormState {
        FormState::new()
            .with(fields::LOAN_TYPE, FieldValue::choice("personal"))
            .with(fields::AMOUNT, FieldValue::numeric("1000000"))
            .with(fields::PURPOSE, FieldValue::text("test"))
            .with(fields::TERM, FieldValue::choice("12"))
            .with(fields::REPAYMENT_SOURCE, FieldValue::choice("salary"))
            .with(fields::MONTHLY_INCOME, FieldValue::numeric("500000"))
            .with(fields::MONTHLY_EXPENSES, FieldValue::numeric("200000"))
            .with(fields::GUARANTOR1_NAME, FieldValue::text("A"))
            .with(fields::GUARANTOR1_PHONE, FieldValue::text("+256700000000"))
            .with(fields::AGREE_TO_TERMS, FieldValue::Boolean(true))
    }

    #[test]
    fn test_loan_application_from_minimal_state() {
        let app = LoanApplication::try_from(&application_state()).unwrap();
        assert_eq!(app.loan_type, "personal");
        assert_eq!(app.term_months, 12);
        assert_eq!(app.interest_rate, 12.0);
        assert_eq!(app.guarantors.len(), 1);
        assert!(app.documents.is_empty());
        assert!(app.monthly_payment > 0.0);
    }

    #[test]
    fn test_second_guarantor_and_documents_are_carried() {
        let state = application_state()
            .with(fields::GUARANTOR2_NAME, FieldValue::text("B"))
            .with(fields::PAYSLIP, FieldValue::file("/tmp/payslip.pdf"));
        let app = LoanApplication::try_from(&state).unwrap();
        assert_eq!(app.guarantors[1].name, "B");
        assert_eq!(app.documents.len(), 1);
        assert_eq!(app.documents[0].field, fields::PAYSLIP);
    }

    #[test]
    fn test_loan_application_rejects_unknown_product() {
        let state = application_state().with(fields::LOAN_TYPE, FieldValue::choice("yacht"));
        assert!(matches!(
            LoanApplication::try_from(&state),
            Err(RequestError::Invalid { field: "loanType", .. })
        ));
    }

    #[test]
    fn test_statement_request_orders_dates() {
        let state = FormState::new()
            .with(names::MEMBER_ID, FieldValue::text("M001"))
            .with(names::ACCOUNT_TYPE, FieldValue::choice("savings"))
            .with(names::START_DATE, FieldValue::text("2026-03-01"))
            .with(names::END_DATE, FieldValue::text("2026-01-01"))
            .with(names::FORMAT, FieldValue::choice("csv"));
        assert!(matches!(
            StatementRequest::try_from(&state),
            Err(RequestError::Invalid { field: "endDate", .. })
        ));
    }

    #[test]
    fn test_deposit_request_missing_amount() {
        let state = FormState::new()
            .with(names::MEMBER_ID, FieldValue::text("M001"))
            .with(names::ACCOUNT_TYPE, FieldValue::choice("savings"));
        assert_eq!(
            DepositRequest::try_from(&state),
            Err(RequestError::Missing(names::AMOUNT))
        );
    }
}
