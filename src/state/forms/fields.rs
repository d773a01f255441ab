//! Field names and layouts for the loan application wizard

use super::catalog::{LOAN_TYPE_CHOICES, REPAYMENT_SOURCES, TERM_CHOICES};
use super::field::{FieldKind, FieldSpec};

// Loan details
pub const LOAN_TYPE: &str = "loanType";
pub const AMOUNT: &str = "amount";
pub const PURPOSE: &str = "purpose";
pub const TERM: &str = "term";
pub const COLLATERAL: &str = "collateral";

// Financial information
pub const REPAYMENT_SOURCE: &str = "repaymentSource";
pub const MONTHLY_INCOME: &str = "monthlyIncome";
pub const MONTHLY_EXPENSES: &str = "monthlyExpenses";
pub const EMPLOYER_NAME: &str = "employerName";
pub const OTHER_LOANS: &str = "otherLoans";

// Guarantors
pub const GUARANTOR1_NAME: &str = "guarantor1Name";
pub const GUARANTOR1_PHONE: &str = "guarantor1Phone";
pub const GUARANTOR1_MEMBER_ID: &str = "guarantor1MemberId";
pub const GUARANTOR2_NAME: &str = "guarantor2Name";
pub const GUARANTOR2_PHONE: &str = "guarantor2Phone";
pub const GUARANTOR2_MEMBER_ID: &str = "guarantor2MemberId";

// Documents and terms
pub const ID_DOCUMENT: &str = "idDocument";
pub const PAYSLIP: &str = "payslip";
pub const BANK_STATEMENT: &str = "bankStatement";
pub const AGREE_TO_TERMS: &str = "agreeToTerms";

const LOAN_DETAILS: &[FieldSpec] = &[
    FieldSpec::required(LOAN_TYPE, "Loan Type", FieldKind::Choice(LOAN_TYPE_CHOICES)),
    FieldSpec::required(AMOUNT, "Amount (UGX)", FieldKind::Numeric),
    FieldSpec::required(PURPOSE, "Purpose", FieldKind::Multiline),
    FieldSpec::required(TERM, "Repayment Term", FieldKind::Choice(TERM_CHOICES)),
    FieldSpec::optional(COLLATERAL, "Collateral (optional)", FieldKind::Text),
];

const FINANCIAL_INFO: &[FieldSpec] = &[
    FieldSpec::required(
        REPAYMENT_SOURCE,
        "Source of Repayment",
        FieldKind::Choice(REPAYMENT_SOURCES),
    ),
    FieldSpec::required(MONTHLY_INCOME, "Monthly Income (UGX)", FieldKind::Numeric),
    FieldSpec::required(MONTHLY_EXPENSES, "Monthly Expenses (UGX)", FieldKind::Numeric),
    FieldSpec::optional(EMPLOYER_NAME, "Employer / Business Name", FieldKind::Text),
    FieldSpec::optional(OTHER_LOANS, "Other Outstanding Loans", FieldKind::Text),
];

const GUARANTORS: &[FieldSpec] = &[
    FieldSpec::required(GUARANTOR1_NAME, "Guarantor 1 Name", FieldKind::Text),
    FieldSpec::required(GUARANTOR1_PHONE, "Guarantor 1 Phone", FieldKind::Text),
    FieldSpec::optional(GUARANTOR1_MEMBER_ID, "Guarantor 1 Member ID", FieldKind::Text),
    FieldSpec::optional(GUARANTOR2_NAME, "Guarantor 2 Name", FieldKind::Text),
    FieldSpec::optional(GUARANTOR2_PHONE, "Guarantor 2 Phone", FieldKind::Text),
    FieldSpec::optional(GUARANTOR2_MEMBER_ID, "Guarantor 2 Member ID", FieldKind::Text),
];

const DOCUMENTS: &[FieldSpec] = &[
    FieldSpec::optional(ID_DOCUMENT, "National ID (path)", FieldKind::File),
    FieldSpec::optional(PAYSLIP, "Payslip (path)", FieldKind::File),
    FieldSpec::optional(BANK_STATEMENT, "Bank Statement (path)", FieldKind::File),
    FieldSpec::required(
        AGREE_TO_TERMS,
        "I agree to the loan terms and conditions",
        FieldKind::Boolean,
    ),
];

/// Inputs shown on a wizard step; empty for steps outside 1..=4
pub fn step_fields(step: u8) -> &'static [FieldSpec] {
    match step {
        1 => LOAN_DETAILS,
        2 => FINANCIAL_INFO,
        3 => GUARANTORS,
        4 => DOCUMENTS,
        _ => &[],
    }
}

/// Step and layout entry for a wizard field name
pub fn locate(name: &str) -> Option<(u8, &'static FieldSpec)> {
    (1..=4).find_map(|step| {
        step_fields(step)
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| (step, spec))
    })
}

pub fn step_title(step: u8) -> &'static str {
    match step {
        1 => "Loan Details",
        2 => "Financial Information",
        3 => "Guarantors",
        4 => "Documents & Terms",
        _ => "",
    }
}
