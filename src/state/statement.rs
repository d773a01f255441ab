//! Account statements built from savings transactions

use crate::error::DataError;
use crate::state::records::{AccountType, DataSnapshot, TransactionKind};
use crate::state::{StatementFormat, StatementRequest};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct StatementLine {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub reference: String,
    pub credit: f64,
    pub debit: f64,
    /// Running balance after this line
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub member_id: String,
    pub member_name: String,
    pub account_type: AccountType,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: StatementFormat,
    pub opening_balance: f64,
    pub lines: Vec<StatementLine>,
}

impl Statement {
    pub fn build(request: &StatementRequest, data: &DataSnapshot) -> Result<Self, DataError> {
        let member = data
            .member(&request.member_id)
            .ok_or_else(|| DataError::not_found("Member", &request.member_id))?;
        let account = data
            .account(&request.member_id, request.account_type)
            .ok_or_else(|| {
                DataError::not_found(
                    "Account",
                    format!("{}/{}", request.member_id, request.account_type.key()),
                )
            })?;

        let mut transactions: Vec<_> = account.transactions.iter().collect();
        transactions.sort_by_key(|t| t.date);

        let opening_balance: f64 = transactions
            .iter()
            .filter(|t| t.date < request.start)
            .map(|t| t.signed_amount())
            .sum();

        let mut balance = opening_balance;
        let lines = transactions
            .into_iter()
            .filter(|t| t.date >= request.start && t.date <= request.end)
            .map(|t| {
                balance += t.signed_amount();
                let (credit, debit) = match t.kind {
                    TransactionKind::Withdrawal => (0.0, t.amount),
                    TransactionKind::Deposit | TransactionKind::Interest => (t.amount, 0.0),
                };
                StatementLine {
                    date: t.date,
                    kind: t.kind,
                    reference: t.reference.clone(),
                    credit,
                    debit,
                    balance,
                }
            })
            .collect();

        Ok(Self {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            account_type: request.account_type,
            start: request.start,
            end: request.end,
            format: request.format,
            opening_balance,
            lines,
        })
    }

    pub fn closing_balance(&self) -> f64 {
        self.lines
            .last()
            .map(|l| l.balance)
            .unwrap_or(self.opening_balance)
    }

    pub fn total_credits(&self) -> f64 {
        self.lines.iter().map(|l| l.credit).sum()
    }

    pub fn total_debits(&self) -> f64 {
        self.lines.iter().map(|l| l.debit).sum()
    }
}
