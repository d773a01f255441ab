//! Dashboard figures derived from a data snapshot

use crate::format;
use crate::session::{Role, User};
use crate::state::records::{
    ApprovalStatus, DataSnapshot, IncomeStatus, LoanStatus, MemberStatus,
};

/// `part / whole * 100`, or 0 when `whole` is 0
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardValue {
    Count(usize),
    Money(f64),
    Percent(f64),
}

impl CardValue {
    pub fn render(&self, currency: &str) -> String {
        match self {
            Self::Count(n) => n.to_string(),
            Self::Money(amount) => format::money(*amount, currency),
            Self::Percent(p) => format::percent(*p),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: CardValue,
}

impl StatCard {
    fn new(title: &'static str, value: CardValue) -> Self {
        Self { title, value }
    }
}

/// Cooperative-wide figures
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub total_savings: f64,
    /// Principal of loans that have been disbursed
    pub loan_portfolio: f64,
    pub outstanding_balance: f64,
    pub pending_approvals: usize,
    pub pending_loans: usize,
    pub repayment_rate: f64,
    pub total_expenses: f64,
    pub verified_income: f64,
    pub net_position: f64,
    pub latest_payroll_period: Option<String>,
    pub latest_payroll_total: f64,
}

impl DashboardStats {
    pub fn from_snapshot(data: &DataSnapshot) -> Self {
        let disbursed = data.loans.iter().filter(|l| {
            matches!(
                l.status,
                LoanStatus::Active | LoanStatus::Completed | LoanStatus::Defaulted
            )
        });
        let (loan_portfolio, repaid) = disbursed.fold((0.0, 0.0), |(principal, repaid), l| {
            (principal + l.principal, repaid + l.amount_repaid)
        });
        let outstanding_balance: f64 = data
            .loans
            .iter()
            .filter(|l| matches!(l.status, LoanStatus::Active | LoanStatus::Defaulted))
            .map(|l| l.balance)
            .sum();

        let total_expenses: f64 = data.expenses.iter().map(|e| e.amount).sum();
        let verified_income: f64 = data
            .other_income
            .iter()
            .filter(|i| i.status == IncomeStatus::Verified)
            .map(|i| i.amount)
            .sum();

        let latest_payroll_period = data.payroll.iter().map(|p| p.period.clone()).max();
        let latest_payroll_total = latest_payroll_period
            .as_deref()
            .map(|period| {
                data.payroll
                    .iter()
                    .filter(|p| p.period == period)
                    .map(|p| p.gross)
                    .sum()
            })
            .unwrap_or(0.0);

        Self {
            total_members: data.members.len(),
            active_members: data
                .members
                .iter()
                .filter(|m| m.status == MemberStatus::Active)
                .count(),
            total_savings: data.savings.iter().map(|a| a.balance).sum(),
            loan_portfolio,
            outstanding_balance,
            pending_approvals: data
                .approvals
                .iter()
                .filter(|a| a.status == ApprovalStatus::Pending)
                .count(),
            pending_loans: data
                .loans
                .iter()
                .filter(|l| l.status == LoanStatus::Pending)
                .count(),
            repayment_rate: percentage(repaid, repaid + outstanding_balance),
            total_expenses,
            verified_income,
            net_position: verified_income - total_expenses - latest_payroll_total,
            latest_payroll_period,
            latest_payroll_total,
        }
    }
}

/// Figures for one member's own accounts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberStats {
    pub savings: f64,
    pub active_loans: usize,
    pub outstanding_balance: f64,
    pub pending_requests: usize,
}

impl MemberStats {
    pub fn for_member(data: &DataSnapshot, member_id: &str) -> Self {
        let active: Vec<_> = data
            .loans_for(member_id)
            .filter(|l| l.status == LoanStatus::Active)
            .collect();
        Self {
            savings: data.accounts_for(member_id).map(|a| a.balance).sum(),
            active_loans: active.len(),
            outstanding_balance: active.iter().map(|l| l.balance).sum(),
            pending_requests: data
                .approvals
                .iter()
                .filter(|a| a.member_id == member_id && a.status == ApprovalStatus::Pending)
                .count(),
        }
    }
}

/// Cards shown on the dashboard for the signed-in user
pub fn dashboard_cards(data: &DataSnapshot, user: &User) -> Vec<StatCard> {
    use CardValue::{Count, Money, Percent};

    if user.role == Role::Member {
        let own = MemberStats::for_member(data, user.member_id.as_deref().unwrap_or_default());
        return vec![
            StatCard::new("My Savings", Money(own.savings)),
            StatCard::new("Active Loans", Count(own.active_loans)),
            StatCard::new("Loan Balance", Money(own.outstanding_balance)),
            StatCard::new("Pending Requests", Count(own.pending_requests)),
        ];
    }

    let stats = DashboardStats::from_snapshot(data);
    let members = [
        StatCard::new("Total Members", Count(stats.total_members)),
        StatCard::new("Active Members", Count(stats.active_members)),
    ];
    let loans = [
        StatCard::new("Loan Portfolio", Money(stats.loan_portfolio)),
        StatCard::new("Outstanding", Money(stats.outstanding_balance)),
        StatCard::new("Repayment Rate", Percent(stats.repayment_rate)),
        StatCard::new("Pending Approvals", Count(stats.pending_approvals)),
    ];
    let finance = [
        StatCard::new("Total Savings", Money(stats.total_savings)),
        StatCard::new("Expenses", Money(stats.total_expenses)),
        StatCard::new("Other Income", Money(stats.verified_income)),
        StatCard::new("Payroll", Money(stats.latest_payroll_total)),
    ];

    match user.role {
        Role::LoanOfficer => members.into_iter().chain(loans).collect(),
        Role::Accountant => finance.into_iter().collect(),
        _ => members
            .into_iter()
            .chain(loans)
            .chain(finance)
            .chain([StatCard::new("Net Position", Money(stats.net_position))])
            .collect(),
    }
}
