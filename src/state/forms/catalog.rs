//! Reference tables for form choices

use super::field::ChoiceOption;

/// Loan product offered by the cooperative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanType {
    pub key: &'static str,
    pub label: &'static str,
    /// Nominal annual interest rate, in percent
    pub interest_rate: f64,
    pub max_amount: f64,
}

pub const LOAN_TYPES: &[LoanType] = &[
    LoanType {
        key: "personal",
        label: "Personal Loan",
        interest_rate: 12.0,
        max_amount: 10_000_000.0,
    },
    LoanType {
        key: "business",
        label: "Business Loan",
        interest_rate: 15.0,
        max_amount: 50_000_000.0,
    },
    LoanType {
        key: "emergency",
        label: "Emergency Loan",
        interest_rate: 10.0,
        max_amount: 2_000_000.0,
    },
    LoanType {
        key: "education",
        label: "Education Loan",
        interest_rate: 11.0,
        max_amount: 15_000_000.0,
    },
    LoanType {
        key: "agricultural",
        label: "Agricultural Loan",
        interest_rate: 13.0,
        max_amount: 20_000_000.0,
    },
];

/// Same entries as [`LOAN_TYPES`], shaped for a choice field
pub const LOAN_TYPE_CHOICES: &[ChoiceOption] = &[
    ChoiceOption::new("personal", "Personal Loan (12%)"),
    ChoiceOption::new("business", "Business Loan (15%)"),
    ChoiceOption::new("emergency", "Emergency Loan (10%)"),
    ChoiceOption::new("education", "Education Loan (11%)"),
    ChoiceOption::new("agricultural", "Agricultural Loan (13%)"),
];

pub const TERM_CHOICES: &[ChoiceOption] = &[
    ChoiceOption::new("6", "6 months"),
    ChoiceOption::new("12", "12 months"),
    ChoiceOption::new("18", "18 months"),
    ChoiceOption::new("24", "24 months"),
    ChoiceOption::new("36", "36 months"),
    ChoiceOption::new("48", "48 months"),
    ChoiceOption::new("60", "60 months"),
];

pub const REPAYMENT_SOURCES: &[ChoiceOption] = &[
    ChoiceOption::new("salary", "Salary"),
    ChoiceOption::new("business", "Business income"),
    ChoiceOption::new("farming", "Farming"),
    ChoiceOption::new("remittances", "Remittances"),
    ChoiceOption::new("other", "Other"),
];

pub const ACCOUNT_TYPES: &[ChoiceOption] = &[
    ChoiceOption::new("savings", "Savings"),
    ChoiceOption::new("shares", "Shares"),
    ChoiceOption::new("fixed_deposit", "Fixed Deposit"),
];

pub const PAYMENT_METHODS: &[ChoiceOption] = &[
    ChoiceOption::new("cash", "Cash"),
    ChoiceOption::new("mobile_money", "Mobile Money"),
    ChoiceOption::new("bank_transfer", "Bank Transfer"),
    ChoiceOption::new("cheque", "Cheque"),
];

pub const STATEMENT_FORMATS: &[ChoiceOption] = &[
    ChoiceOption::new("pdf", "PDF"),
    ChoiceOption::new("csv", "CSV"),
    ChoiceOption::new("excel", "Excel"),
];

pub const EXPENSE_CATEGORIES: &[ChoiceOption] = &[
    ChoiceOption::new("utilities", "Utilities"),
    ChoiceOption::new("rent", "Rent"),
    ChoiceOption::new("stationery", "Stationery"),
    ChoiceOption::new("transport", "Transport"),
    ChoiceOption::new("maintenance", "Maintenance"),
    ChoiceOption::new("other", "Other"),
];

pub const INCOME_SOURCES: &[ChoiceOption] = &[
    ChoiceOption::new("fees", "Membership fees"),
    ChoiceOption::new("penalties", "Penalties"),
    ChoiceOption::new("investments", "Investment returns"),
    ChoiceOption::new("grants", "Grants"),
    ChoiceOption::new("other", "Other"),
];

pub fn loan_type(key: &str) -> Option<&'static LoanType> {
    LOAN_TYPES.iter().find(|t| t.key == key)
}

pub fn option_label(options: &[ChoiceOption], key: &str) -> Option<&'static str> {
    options.iter().find(|o| o.key == key).map(|o| o.label)
}
