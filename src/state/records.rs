//! Cooperative records held by the data source

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
    Suspended,
}

impl MemberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Suspended => "Suspended",
        }
    }

    /// Next status in the admin toggle cycle
    pub fn next(&self) -> Self {
        match self {
            Self::Active => Self::Suspended,
            Self::Suspended => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub joined_on: NaiveDate,
    pub status: MemberStatus,
}

/// Partial update applied by `update_member`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<MemberStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Savings,
    Shares,
    FixedDeposit,
}

impl AccountType {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "savings" => Some(Self::Savings),
            "shares" => Some(Self::Shares),
            "fixed_deposit" => Some(Self::FixedDeposit),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Savings => "savings",
            Self::Shares => "shares",
            Self::FixedDeposit => "fixed_deposit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Shares => "Shares",
            Self::FixedDeposit => "Fixed Deposit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Interest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsTransaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
    pub reference: String,
}

impl SavingsTransaction {
    /// Effect on the account balance
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Deposit | TransactionKind::Interest => self.amount,
            TransactionKind::Withdrawal => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub id: String,
    pub member_id: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub transactions: Vec<SavingsTransaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    Active,
    Completed,
    Defaulted,
    Rejected,
}

impl LoanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Defaulted => "Defaulted",
            Self::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    pub member_id: String,
    pub loan_type: String,
    pub principal: f64,
    pub interest_rate: f64,
    pub term_months: u32,
    pub amount_repaid: f64,
    pub balance: f64,
    pub status: LoanStatus,
    pub applied_on: NaiveDate,
    pub disbursed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// What an approval acts on once decided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApprovalSubject {
    Loan {
        loan_id: String,
    },
    Deposit {
        account_type: AccountType,
        amount: f64,
        reference: String,
    },
    Withdrawal {
        account_type: AccountType,
        amount: f64,
        reason: String,
    },
    Membership,
}

impl ApprovalSubject {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loan { .. } => "Loan",
            Self::Deposit { .. } => "Deposit",
            Self::Withdrawal { .. } => "Withdrawal",
            Self::Membership => "Membership",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub id: String,
    pub member_id: String,
    pub subject: ApprovalSubject,
    pub description: String,
    pub amount: Option<f64>,
    pub submitted_on: NaiveDate,
    pub status: ApprovalStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStatus {
    Pending,
    Verified,
    Rejected,
}

impl IncomeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherIncome {
    pub id: String,
    pub source: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: IncomeStatus,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub phone: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    Generated,
    Paid,
}

impl PayrollStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generated => "Generated",
            Self::Paid => "Paid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    /// Pay period as `YYYY-MM`
    pub period: String,
    pub gross: f64,
    pub tax: f64,
    pub social_security: f64,
    pub net: f64,
    pub status: PayrollStatus,
}

/// Every collection exposed by the data source, as of one read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSnapshot {
    pub members: Vec<Member>,
    pub loans: Vec<Loan>,
    pub savings: Vec<SavingsAccount>,
    pub approvals: Vec<Approval>,
    pub expenses: Vec<Expense>,
    pub other_income: Vec<OtherIncome>,
    pub employees: Vec<Employee>,
    pub payroll: Vec<PayrollRecord>,
}

impl DataSnapshot {
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn account(&self, member_id: &str, account_type: AccountType) -> Option<&SavingsAccount> {
        self.savings
            .iter()
            .find(|a| a.member_id == member_id && a.account_type == account_type)
    }

    pub fn available_balance(&self, member_id: &str, account_type: AccountType) -> Option<f64> {
        self.account(member_id, account_type).map(|a| a.balance)
    }

    pub fn loans_for<'a>(&'a self, member_id: &'a str) -> impl Iterator<Item = &'a Loan> + 'a {
        self.loans.iter().filter(move |l| l.member_id == member_id)
    }

    pub fn accounts_for<'a>(
        &'a self,
        member_id: &'a str,
    ) -> impl Iterator<Item = &'a SavingsAccount> + 'a {
        self.savings.iter().filter(move |a| a.member_id == member_id)
    }

    pub fn member_name(&self, id: &str) -> String {
        self.member(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
